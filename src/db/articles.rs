use article::{Article, ArticleChanges, ArticleFilter, ArticleTagKey, FavoriteKey, NewArticle, NewTag, Tag};
use comment::Comment;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::{delete, insert_into, insert_or_ignore_into, select, update};
use repository::{ArticleRepository, ArticleTagRepository, FavoriteRepository, TagRepository};
use types::{Result, Window};

use super::schema::{article_tags, articles, comments, favorites, tags, users};
use super::{last_insert_id, DbUnitOfWork};

/// Articles matching `filter`, unordered and unwindowed.
fn filtered(filter: &ArticleFilter) -> articles::BoxedQuery<'static, Sqlite> {
    let mut query = articles::table.into_boxed();

    if !filter.tags.is_empty() {
        let tagged = article_tags::table
            .inner_join(tags::table)
            .filter(tags::name.eq_any(filter.tags.clone()))
            .select(article_tags::article_id);
        query = query.filter(articles::id.eq_any(tagged));
    }

    if !filter.authors.is_empty() {
        let authors = users::table
            .filter(users::username.eq_any(filter.authors.clone()))
            .select(users::id);
        query = query.filter(articles::author_id.eq_any(authors));
    }

    if !filter.favorited_by.is_empty() {
        let favorited = favorites::table
            .inner_join(users::table)
            .filter(users::username.eq_any(filter.favorited_by.clone()))
            .select(favorites::article_id);
        query = query.filter(articles::id.eq_any(favorited));
    }

    query
}

impl<'a> ArticleRepository for DbUnitOfWork<'a> {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let article = articles::table
            .filter(articles::slug.eq(slug))
            .first::<Article>(self.connection)
            .optional()?;
        Ok(article)
    }

    fn find_by_author_and_slug(&self, author_id: i32, slug: &str) -> Result<Option<Article>> {
        let article = articles::table
            .filter(articles::author_id.eq(author_id))
            .filter(articles::slug.eq(slug))
            .first::<Article>(self.connection)
            .optional()?;
        Ok(article)
    }

    fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let query = select(exists(articles::table.filter(articles::slug.eq(slug))));
        Ok(query.get_result::<bool>(self.connection)?)
    }

    fn create(&self, article: &NewArticle) -> Result<Article> {
        insert_into(articles::table)
            .values(article)
            .execute(self.connection)?;
        let id = last_insert_id(self.connection)?;
        Ok(articles::table.find(id).first::<Article>(self.connection)?)
    }

    fn update(&self, id: i32, changes: &ArticleChanges) -> Result<Article> {
        update(articles::table.find(id))
            .set(changes)
            .execute(self.connection)?;
        Ok(articles::table.find(id).first::<Article>(self.connection)?)
    }

    fn delete(&self, article: &Article) -> Result<()> {
        delete(favorites::table.filter(favorites::article_id.eq(article.id)))
            .execute(self.connection)?;
        delete(article_tags::table.filter(article_tags::article_id.eq(article.id)))
            .execute(self.connection)?;
        delete(comments::table.filter(comments::article_id.eq(article.id)))
            .execute(self.connection)?;
        delete(articles::table.find(article.id)).execute(self.connection)?;
        Ok(())
    }

    fn find_articles(&self, filter: &ArticleFilter, window: Window) -> Result<Vec<Article>> {
        let found = filtered(filter)
            .order((articles::created_at.desc(), articles::id.desc()))
            .offset(window.offset)
            .limit(window.limit)
            .load::<Article>(self.connection)?;
        Ok(found)
    }

    fn count(&self, filter: &ArticleFilter) -> Result<i64> {
        let total = filtered(filter)
            .count()
            .get_result::<i64>(self.connection)?;
        Ok(total)
    }

    fn find_comments(&self, article_id: i32) -> Result<Vec<Comment>> {
        let found = comments::table
            .filter(comments::article_id.eq(article_id))
            .order(comments::id.asc())
            .load::<Comment>(self.connection)?;
        Ok(found)
    }
}

impl<'a> TagRepository for DbUnitOfWork<'a> {
    fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let tag = tags::table
            .filter(tags::name.eq(name))
            .first::<Tag>(self.connection)
            .optional()?;
        Ok(tag)
    }

    fn create(&self, name: &str) -> Result<Tag> {
        insert_into(tags::table)
            .values(&NewTag { name })
            .execute(self.connection)?;
        let id = last_insert_id(self.connection)?;
        Ok(tags::table.find(id).first::<Tag>(self.connection)?)
    }

    fn find_all(&self) -> Result<Vec<Tag>> {
        Ok(tags::table.order(tags::name.asc()).load::<Tag>(self.connection)?)
    }
}

impl<'a> ArticleTagRepository for DbUnitOfWork<'a> {
    fn create(&self, key: ArticleTagKey) -> Result<()> {
        insert_or_ignore_into(article_tags::table)
            .values(&key)
            .execute(self.connection)?;
        Ok(())
    }

    fn find_tags(&self, article_id: i32) -> Result<Vec<Tag>> {
        let found = article_tags::table
            .inner_join(tags::table)
            .filter(article_tags::article_id.eq(article_id))
            .select((tags::id, tags::name))
            .load::<Tag>(self.connection)?;
        Ok(found)
    }
}

impl<'a> FavoriteRepository for DbUnitOfWork<'a> {
    fn is_favorited(&self, key: FavoriteKey) -> Result<bool> {
        let query = select(exists(favorites::table.find((key.article_id, key.user_id))));
        Ok(query.get_result::<bool>(self.connection)?)
    }

    fn favorites_count(&self, article_id: i32) -> Result<i64> {
        let total = favorites::table
            .filter(favorites::article_id.eq(article_id))
            .count()
            .get_result::<i64>(self.connection)?;
        Ok(total)
    }

    fn find_by_id(&self, key: FavoriteKey) -> Result<Option<FavoriteKey>> {
        let favorite = favorites::table
            .find((key.article_id, key.user_id))
            .first::<FavoriteKey>(self.connection)
            .optional()?;
        Ok(favorite)
    }

    fn create(&self, key: FavoriteKey) -> Result<()> {
        insert_into(favorites::table)
            .values(&key)
            .execute(self.connection)?;
        Ok(())
    }

    fn remove(&self, favorite: FavoriteKey) -> Result<()> {
        delete(favorites::table.find((favorite.article_id, favorite.user_id)))
            .execute(self.connection)?;
        Ok(())
    }
}
