use article::{ArticleChanges, ArticlePatch, ArticleTagKey, FavoriteKey, HydratedArticle, NewArticle};
use chrono::Utc;
use profile::ProfileResolver;
use repository::{DataSource, UnitOfWork};
use slugs::SlugProvider;
use types::*;

use super::ArticlesService;

impl<D, P, S> ArticlesService<D, P, S>
where
    D: DataSource,
    P: ProfileResolver,
    S: SlugProvider,
{
    /// Publishes a new article by `author_id`, creating any tag it names
    /// that does not exist yet.
    pub fn create(
        &self,
        title: &str,
        description: &str,
        body: &str,
        tag_list: &[String],
        author_id: i32,
    ) -> Result<HydratedArticle> {
        let mut errors = ValidationError::default();
        errors.require("title", title, "can't be blank");
        errors.require("description", description, "can't be blank");
        errors.require("body", body, "can't be blank");
        errors.into_result()?;

        self.data.unit_of_work(|uow| {
            let author = uow
                .users()
                .find_by_id(author_id)?
                .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
            let now = Utc::now().naive_utc();
            let new_article = NewArticle {
                author_id: author.id,
                slug: self.unique_slug(uow, title, None)?,
                title: title.to_string(),
                description: description.to_string(),
                body: body.to_string(),
                created_at: now,
                updated_at: now,
            };
            let article = uow.articles().create(&new_article)?;
            for name in tag_list {
                self.tag_article(uow, article.id, name)?;
            }
            info!("user {} created article {}", author.id, article.slug);
            self.hydrate(uow, article, Some(author_id))
        })
    }

    fn tag_article(&self, uow: &dyn UnitOfWork, article_id: i32, name: &str) -> Result<()> {
        let tag = match uow.tags().find_by_name(name)? {
            Some(tag) => tag,
            None => uow.tags().create(name)?,
        };
        uow.article_tags()
            .create(ArticleTagKey::new(article_id, tag.id))
    }

    /// The article `slug` as seen by `viewer_id`; anonymous when `None`.
    pub fn find_by_slug(&self, slug: &str, viewer_id: Option<i32>) -> Result<HydratedArticle> {
        self.data.unit_of_work(|uow| {
            let article = self.find_article(uow, slug)?;
            self.hydrate(uow, article, viewer_id)
        })
    }

    /// Applies the provided fields of `patch`. A new title also moves the slug.
    pub fn update(&self, slug: &str, patch: &ArticlePatch, author_id: i32) -> Result<HydratedArticle> {
        self.data.unit_of_work(|uow| {
            let mut article = self.find_article(uow, slug)?;

            if let Some(title) = patch.provided_title() {
                article.slug = self.unique_slug(uow, title, Some(&article))?;
                article.title = title.to_string();
            }
            if let Some(description) = patch.provided_description() {
                article.description = description.to_string();
            }
            if let Some(body) = patch.provided_body() {
                article.body = body.to_string();
            }
            article.updated_at = Utc::now().naive_utc();

            let updated = uow
                .articles()
                .update(article.id, &ArticleChanges::from(&article))?;
            info!("article {} updated (was {})", updated.slug, slug);
            self.hydrate(uow, updated, Some(author_id))
        })
    }

    /// Deletes the article `slug` only if `author_id` wrote it. Any other
    /// caller sees `ArticleNotFound`.
    pub fn delete(&self, slug: &str, author_id: i32) -> Result<()> {
        self.data.unit_of_work(|uow| {
            let article = uow
                .articles()
                .find_by_author_and_slug(author_id, slug)?
                .ok_or_else(|| Error::from(ErrorKind::ArticleNotFound))?;
            uow.articles().delete(&article)?;
            info!("user {} deleted article {}", author_id, slug);
            Ok(())
        })
    }

    /// Marks the article as favorited by `viewer_id`. Favoriting twice is a no-op.
    pub fn favorite_article(&self, slug: &str, viewer_id: i32) -> Result<HydratedArticle> {
        self.data.unit_of_work(|uow| {
            let article = self.find_article(uow, slug)?;
            let key = FavoriteKey::new(article.id, viewer_id);

            if !uow.favorites().is_favorited(key)? {
                uow.users()
                    .find_by_id(viewer_id)?
                    .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
                uow.favorites().create(key)?;
                info!("user {} favorited article {}", viewer_id, slug);
            }

            self.hydrate(uow, article, Some(viewer_id))
        })
    }

    /// Drops `viewer_id`'s favorite. Unfavoriting an article that was never
    /// favorited is a no-op.
    pub fn unfavorite_article(&self, slug: &str, viewer_id: i32) -> Result<HydratedArticle> {
        self.data.unit_of_work(|uow| {
            let article = self.find_article(uow, slug)?;
            let key = FavoriteKey::new(article.id, viewer_id);

            if uow.favorites().is_favorited(key)? {
                let user = uow
                    .users()
                    .find_by_id(viewer_id)?
                    .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
                let favorite = match uow.favorites().find_by_id(FavoriteKey::new(article.id, user.id))? {
                    Some(favorite) => favorite,
                    None => {
                        warn!(
                            "favorite ({}, {}) reported present but could not be loaded",
                            article.id, user.id
                        );
                        bail!(ErrorKind::FavoriteEntryNotFound);
                    }
                };
                uow.favorites().remove(favorite)?;
                info!("user {} unfavorited article {}", viewer_id, slug);
            }

            self.hydrate(uow, article, Some(viewer_id))
        })
    }

    /// Every tag name in the store, alphabetically.
    pub fn find_all_tags(&self) -> Result<Vec<String>> {
        self.data.unit_of_work(|uow| {
            let tags = uow.tags().find_all()?;
            Ok(tags.into_iter().map(|tag| tag.name).collect())
        })
    }
}
