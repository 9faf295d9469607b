//! Storage contracts the services are written against.
//!
//! Each trait covers one entity or relation. A [`UnitOfWork`] hands out all
//! of them over a single transaction; a [`DataSource`] opens units of work.

use article::{Article, ArticleChanges, ArticleFilter, ArticleTagKey, FavoriteKey, NewArticle, Tag};
use comment::{Comment, NewComment};
use types::{Result, Window};
use users::{FollowKey, NewUser, User};

pub trait UserRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn create(&self, user: &NewUser) -> Result<User>;
}

pub trait FollowRepository {
    fn is_following(&self, key: FollowKey) -> Result<bool>;
    /// No-op when the row already exists.
    fn follow(&self, key: FollowKey) -> Result<()>;
    fn unfollow(&self, key: FollowKey) -> Result<()>;
    /// Newest-first articles whose author is followed by `follower_id`.
    fn find_most_recent_articles(&self, follower_id: i32, window: Window) -> Result<Vec<Article>>;
    /// Total of [`find_most_recent_articles`](#tymethod.find_most_recent_articles), ignoring the window.
    fn count(&self, follower_id: i32) -> Result<i64>;
}

pub trait ArticleRepository {
    fn find_by_slug(&self, slug: &str) -> Result<Option<Article>>;
    fn find_by_author_and_slug(&self, author_id: i32, slug: &str) -> Result<Option<Article>>;
    fn exists_by_slug(&self, slug: &str) -> Result<bool>;
    fn create(&self, article: &NewArticle) -> Result<Article>;
    fn update(&self, id: i32, changes: &ArticleChanges) -> Result<Article>;
    /// Removes the article together with its favorites, tag links and comments.
    fn delete(&self, article: &Article) -> Result<()>;
    fn find_articles(&self, filter: &ArticleFilter, window: Window) -> Result<Vec<Article>>;
    fn count(&self, filter: &ArticleFilter) -> Result<i64>;
    fn find_comments(&self, article_id: i32) -> Result<Vec<Comment>>;
}

pub trait TagRepository {
    fn find_by_name(&self, name: &str) -> Result<Option<Tag>>;
    fn create(&self, name: &str) -> Result<Tag>;
    fn find_all(&self) -> Result<Vec<Tag>>;
}

pub trait ArticleTagRepository {
    /// No-op when the article already carries the tag.
    fn create(&self, key: ArticleTagKey) -> Result<()>;
    fn find_tags(&self, article_id: i32) -> Result<Vec<Tag>>;
}

pub trait FavoriteRepository {
    fn is_favorited(&self, key: FavoriteKey) -> Result<bool>;
    fn favorites_count(&self, article_id: i32) -> Result<i64>;
    fn find_by_id(&self, key: FavoriteKey) -> Result<Option<FavoriteKey>>;
    fn create(&self, key: FavoriteKey) -> Result<()>;
    fn remove(&self, favorite: FavoriteKey) -> Result<()>;
}

pub trait CommentRepository {
    fn create(&self, comment: &NewComment) -> Result<Comment>;
    /// The comment `comment_id` on the article `slug`, written by `author_id`.
    fn find_comment(&self, slug: &str, comment_id: i32, author_id: i32) -> Result<Option<Comment>>;
    fn delete(&self, comment: &Comment) -> Result<()>;
}

/// Every repository, bound to one open transaction.
pub trait UnitOfWork {
    fn users(&self) -> &dyn UserRepository;
    fn follows(&self) -> &dyn FollowRepository;
    fn articles(&self) -> &dyn ArticleRepository;
    fn tags(&self) -> &dyn TagRepository;
    fn article_tags(&self) -> &dyn ArticleTagRepository;
    fn favorites(&self) -> &dyn FavoriteRepository;
    fn comments(&self) -> &dyn CommentRepository;
}

/// Opens units of work. `work` runs inside one transaction that commits when
/// it returns `Ok` and rolls back when it returns `Err`.
pub trait DataSource {
    fn unit_of_work<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn UnitOfWork) -> Result<T>;
}
