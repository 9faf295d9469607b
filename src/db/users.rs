use article::Article;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{delete, insert_or_ignore_into, insert_into, select};
use repository::{FollowRepository, UserRepository};
use types::{Result, Window};
use users::{FollowKey, NewUser, User};

use super::schema::{articles, follows, users};
use super::{last_insert_id, DbUnitOfWork};

impl<'a> UserRepository for DbUnitOfWork<'a> {
    fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::table
            .find(id)
            .first::<User>(self.connection)
            .optional()?;
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::table
            .filter(users::username.eq(username))
            .first::<User>(self.connection)
            .optional()?;
        Ok(user)
    }

    fn create(&self, user: &NewUser) -> Result<User> {
        insert_into(users::table)
            .values(user)
            .execute(self.connection)?;
        let id = last_insert_id(self.connection)?;
        Ok(users::table.find(id).first::<User>(self.connection)?)
    }
}

impl<'a> FollowRepository for DbUnitOfWork<'a> {
    fn is_following(&self, key: FollowKey) -> Result<bool> {
        let query = select(exists(follows::table.find((key.followed_id, key.follower_id))));
        Ok(query.get_result::<bool>(self.connection)?)
    }

    fn follow(&self, key: FollowKey) -> Result<()> {
        insert_or_ignore_into(follows::table)
            .values(&key)
            .execute(self.connection)?;
        Ok(())
    }

    fn unfollow(&self, key: FollowKey) -> Result<()> {
        delete(follows::table.find((key.followed_id, key.follower_id))).execute(self.connection)?;
        Ok(())
    }

    fn find_most_recent_articles(&self, follower_id: i32, window: Window) -> Result<Vec<Article>> {
        let followed = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .select(follows::followed_id);
        let found = articles::table
            .filter(articles::author_id.eq_any(followed))
            .order((articles::created_at.desc(), articles::id.desc()))
            .offset(window.offset)
            .limit(window.limit)
            .load::<Article>(self.connection)?;
        Ok(found)
    }

    fn count(&self, follower_id: i32) -> Result<i64> {
        let followed = follows::table
            .filter(follows::follower_id.eq(follower_id))
            .select(follows::followed_id);
        let total = articles::table
            .filter(articles::author_id.eq_any(followed))
            .count()
            .get_result::<i64>(self.connection)?;
        Ok(total)
    }
}
