use article::{ArticleFilter, ArticleList};
use profile::ProfileResolver;
use repository::DataSource;
use slugs::SlugProvider;
use types::*;

use super::ArticlesService;

impl<D, P, S> ArticlesService<D, P, S>
where
    D: DataSource,
    P: ProfileResolver,
    S: SlugProvider,
{
    /// Newest articles written by users `viewer_id` follows.
    ///
    /// `articles_count` counts every matching article, not just the page.
    /// A non-positive `limit` means the default page size.
    pub fn find_recent_articles(&self, viewer_id: i32, offset: i64, limit: i64) -> Result<ArticleList> {
        let window = Window::new(offset, limit);
        self.data.unit_of_work(|uow| {
            let articles = uow.follows().find_most_recent_articles(viewer_id, window)?;
            let articles_count = uow.follows().count(viewer_id)?;
            debug!(
                "feed for {}: {} of {} articles at offset {}",
                viewer_id,
                articles.len(),
                articles_count,
                window.offset
            );
            Ok(ArticleList {
                articles: self.hydrate_all(uow, articles, Some(viewer_id))?,
                articles_count,
            })
        })
    }

    /// Global listing narrowed by `filter`. `viewer_id` only decides the
    /// `favorited` flag of each article; it never filters.
    pub fn find_articles(
        &self,
        offset: i64,
        limit: i64,
        viewer_id: Option<i32>,
        filter: &ArticleFilter,
    ) -> Result<ArticleList> {
        let window = Window::new(offset, limit);
        self.data.unit_of_work(|uow| {
            let articles = uow.articles().find_articles(filter, window)?;
            let articles_count = uow.articles().count(filter)?;
            debug!(
                "listing {:?}: {} of {} articles at offset {}",
                filter,
                articles.len(),
                articles_count,
                window.offset
            );
            Ok(ArticleList {
                articles: self.hydrate_all(uow, articles, viewer_id)?,
                articles_count,
            })
        })
    }
}
