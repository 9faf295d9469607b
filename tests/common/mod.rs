#![allow(dead_code)]

use conduit::repository::DataSource;
use conduit::users::{FollowKey, NewUser, User};
use conduit::{ArticlesService, Database, ErrorKind, HydratedArticle, Result};
use env_logger;

pub type Service = ArticlesService<Database>;

pub fn service() -> Service {
    let _ = env_logger::builder().is_test(true).try_init();
    let db = Database::in_memory().expect("in-memory database");
    ArticlesService::with_defaults(db)
}

pub fn user(service: &Service, username: &str) -> User {
    let mut new_user = NewUser::new(username, format!("{}@mail.com", username));
    new_user.bio = Some(format!("{}'s bio", username));
    new_user.image = Some(format!("https://images.example/{}.png", username));
    service
        .data()
        .unit_of_work(|uow| uow.users().create(&new_user))
        .expect("create user")
}

/// `follower` starts following `followed`.
pub fn follow(service: &Service, follower: &User, followed: &User) {
    service
        .data()
        .unit_of_work(|uow| uow.follows().follow(FollowKey::new(followed.id, follower.id)))
        .expect("follow")
}

/// `follower` stops following `followed`.
pub fn unfollow(service: &Service, follower: &User, followed: &User) {
    service
        .data()
        .unit_of_work(|uow| uow.follows().unfollow(FollowKey::new(followed.id, follower.id)))
        .expect("unfollow")
}

pub fn article(service: &Service, author: &User, title: &str, tags: &[&str]) -> HydratedArticle {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    service
        .create(title, "Description", "Body", &tags, author.id)
        .expect("create article")
}

/// `count` articles by `author` titled "<title> 0", "<title> 1", ...
pub fn articles(service: &Service, author: &User, title: &str, count: usize, tags: &[&str]) -> Vec<HydratedArticle> {
    (0..count)
        .map(|i| article(service, author, &format!("{} {}", title, i), tags))
        .collect()
}

pub fn assert_kind<T: ::std::fmt::Debug>(result: Result<T>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("expected {:?}, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(
            ::std::mem::discriminant(err.kind()),
            ::std::mem::discriminant(&expected),
            "expected {:?}, got {:?}",
            expected,
            err.kind()
        ),
    }
}
