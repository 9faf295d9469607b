//! Article aggregation and feed composition.
//!
//! [`ArticlesService`] is stateless: it owns a [`DataSource`] plus the two
//! injected capabilities (profile resolution and slugs) and runs every
//! public operation inside exactly one unit of work.

use article::{Article, FavoriteKey, HydratedArticle};
use profile::{FollowProfileResolver, Profile, ProfileResolver};
use repository::{DataSource, UnitOfWork};
use slugs::{SlugProvider, TitleSlugProvider};
use types::*;
use uuid::Uuid;

mod articles;
mod comments;
mod feed;

pub struct ArticlesService<D, P = FollowProfileResolver, S = TitleSlugProvider> {
    data: D,
    profiles: P,
    slugs: S,
}

impl<D: DataSource> ArticlesService<D> {
    /// Service with the follows-backed profile resolver and the `slug` crate transform.
    pub fn with_defaults(data: D) -> Self {
        ArticlesService::new(data, FollowProfileResolver, TitleSlugProvider)
    }
}

impl<D, P, S> ArticlesService<D, P, S>
where
    D: DataSource,
    P: ProfileResolver,
    S: SlugProvider,
{
    pub fn new(data: D, profiles: P, slugs: S) -> Self {
        ArticlesService {
            data,
            profiles,
            slugs,
        }
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Builds the public view of `article` as seen by `viewer_id`.
    ///
    /// Four independent reads: the viewer's favorite row, the favorite
    /// count, the author profile and the tag names. Listings call this once
    /// per row through [`hydrate_all`](#method.hydrate_all).
    fn hydrate(
        &self,
        uow: &dyn UnitOfWork,
        article: Article,
        viewer_id: Option<i32>,
    ) -> Result<HydratedArticle> {
        let favorited = match viewer_id {
            Some(viewer_id) => uow
                .favorites()
                .is_favorited(FavoriteKey::new(article.id, viewer_id))?,
            None => false,
        };
        let favorites_count = uow.favorites().favorites_count(article.id)?;
        let author = self.author_profile(uow, article.author_id, viewer_id)?;
        let tag_list = uow
            .article_tags()
            .find_tags(article.id)?
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        Ok(HydratedArticle::from(
            article,
            tag_list,
            favorited,
            favorites_count,
            author,
        ))
    }

    // Batch seam for listings: a page-wide loader must return exactly what
    // per-row hydration returns, in the same order.
    fn hydrate_all(
        &self,
        uow: &dyn UnitOfWork,
        articles: Vec<Article>,
        viewer_id: Option<i32>,
    ) -> Result<Vec<HydratedArticle>> {
        debug!(
            "hydrating {} articles for viewer {:?}",
            articles.len(),
            viewer_id
        );
        articles
            .into_iter()
            .map(|article| self.hydrate(uow, article, viewer_id))
            .collect()
    }

    fn author_profile(
        &self,
        uow: &dyn UnitOfWork,
        author_id: i32,
        viewer_id: Option<i32>,
    ) -> Result<Profile> {
        let author = uow
            .users()
            .find_by_id(author_id)?
            .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
        self.profiles.get_profile(uow, &author.username, viewer_id)
    }

    /// Slug for `title`. A slug already held by an article other than
    /// `current` gets a random suffix. Titles with nothing to slugify are
    /// rejected.
    fn unique_slug(
        &self,
        uow: &dyn UnitOfWork,
        title: &str,
        current: Option<&Article>,
    ) -> Result<String> {
        let slug = self.slugs.slugify(title);
        if slug.is_empty() {
            bail!(ErrorKind::Validation(ValidationError::with(
                "title",
                "must contain a letter or digit"
            )));
        }
        if current.map_or(false, |article| article.slug == slug) {
            return Ok(slug);
        }
        if uow.articles().exists_by_slug(&slug)? {
            let disambiguated = format!("{}-{}", slug, Uuid::new_v4());
            debug!("slug {} is taken, using {}", slug, disambiguated);
            return Ok(disambiguated);
        }
        Ok(slug)
    }

    fn find_article(&self, uow: &dyn UnitOfWork, slug: &str) -> Result<Article> {
        uow.articles()
            .find_by_slug(slug)?
            .ok_or_else(|| ErrorKind::ArticleNotFound.into())
    }
}
