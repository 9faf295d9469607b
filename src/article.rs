use chrono::NaiveDateTime;
use db::schema::{article_tags, articles, favorites, tags};
use profile::Profile;
use utils::serialize_date;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Article {
    pub id: i32,
    pub author_id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "articles"]
pub struct NewArticle {
    pub author_id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values written back by an article update.
#[derive(Debug, AsChangeset)]
#[table_name = "articles"]
pub struct ArticleChanges<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> From<&'a Article> for ArticleChanges<'a> {
    fn from(article: &'a Article) -> Self {
        ArticleChanges {
            slug: &article.slug,
            title: &article.title,
            description: &article.description,
            body: &article.body,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[table_name = "tags"]
pub struct NewTag<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Queryable, Insertable)]
#[table_name = "article_tags"]
pub struct ArticleTagKey {
    pub article_id: i32,
    pub tag_id: i32,
}

impl ArticleTagKey {
    pub fn new(article_id: i32, tag_id: i32) -> ArticleTagKey {
        ArticleTagKey { article_id, tag_id }
    }
}

/// One row of the favorites relation: `user_id` favorited `article_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Queryable, Insertable)]
#[table_name = "favorites"]
pub struct FavoriteKey {
    pub article_id: i32,
    pub user_id: i32,
}

impl FavoriteKey {
    pub fn new(article_id: i32, user_id: i32) -> FavoriteKey {
        FavoriteKey {
            article_id,
            user_id,
        }
    }
}

/// Optional fields of an article update. Absent and empty strings both mean
/// "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

impl ArticlePatch {
    pub fn title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description<T: Into<String>>(mut self, description: T) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn body<T: Into<String>>(mut self, body: T) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn provided_title(&self) -> Option<&str> {
        provided(&self.title)
    }

    pub fn provided_description(&self) -> Option<&str> {
        provided(&self.description)
    }

    pub fn provided_body(&self) -> Option<&str> {
        provided(&self.body)
    }
}

fn provided(value: &Option<String>) -> Option<&str> {
    match *value {
        Some(ref v) if !v.is_empty() => Some(v.as_str()),
        _ => None,
    }
}

/// Filters for the global listing. Categories combine with AND; the values
/// inside one category combine with OR. An empty list does not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub favorited_by: Vec<String>,
}

impl ArticleFilter {
    pub fn tagged<T: Into<String>>(mut self, tag: T) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn by_author<T: Into<String>>(mut self, username: T) -> Self {
        self.authors.push(username.into());
        self
    }

    pub fn favorited_by<T: Into<String>>(mut self, username: T) -> Self {
        self.favorited_by.push(username.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedArticle {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "serialize_date")]
    pub updated_at: NaiveDateTime,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author: Profile,
}

impl HydratedArticle {
    pub fn from(
        article: Article,
        tag_list: Vec<String>,
        favorited: bool,
        favorites_count: i64,
        author: Profile,
    ) -> Self {
        HydratedArticle {
            slug: article.slug,
            title: article.title,
            description: article.description,
            body: article.body,
            tag_list,
            created_at: article.created_at,
            updated_at: article.updated_at,
            favorited,
            favorites_count,
            author,
        }
    }
}

/// A page of articles plus the number of articles matching the query
/// regardless of the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleList {
    pub articles: Vec<HydratedArticle>,
    pub articles_count: i64,
}
