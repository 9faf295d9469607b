use db::schema::{follows, users};
use profile::Profile;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl User {
    pub fn profile(&self, following: bool) -> Profile {
        Profile {
            username: self.username.clone(),
            bio: self.bio.clone(),
            image: self.image.clone(),
            following,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl NewUser {
    pub fn new<U: Into<String>, E: Into<String>>(username: U, email: E) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            bio: None,
            image: None,
        }
    }
}

/// "`follower_id` follows `followed_id`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Queryable, Insertable)]
#[table_name = "follows"]
pub struct FollowKey {
    pub followed_id: i32,
    pub follower_id: i32,
}

impl FollowKey {
    pub fn new(followed_id: i32, follower_id: i32) -> FollowKey {
        FollowKey {
            followed_id,
            follower_id,
        }
    }
}
