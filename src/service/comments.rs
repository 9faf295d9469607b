use chrono::Utc;
use comment::{HydratedComment, NewComment};
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
    /// Comments on the article `slug`, oldest first.
    ///
    /// Every comment carries the *article author's* profile, resolved once
    /// relative to `viewer_id`, not the profile of whoever wrote the comment.
    pub fn find_comments_by_slug(
        &self,
        slug: &str,
        viewer_id: Option<i32>,
    ) -> Result<Vec<HydratedComment>> {
        self.data.unit_of_work(|uow| {
            let article = self.find_article(uow, slug)?;
            let comments = uow.articles().find_comments(article.id)?;
            let author = self.author_profile(uow, article.author_id, viewer_id)?;
            Ok(comments
                .into_iter()
                .map(|comment| HydratedComment::from((comment, author.clone())))
                .collect())
        })
    }

    pub fn create_comment(&self, slug: &str, body: &str, author_id: i32) -> Result<HydratedComment> {
        let mut errors = ValidationError::default();
        errors.require("body", body, "can't be blank");
        errors.into_result()?;

        self.data.unit_of_work(|uow| {
            let article = self.find_article(uow, slug)?;
            let author = uow
                .users()
                .find_by_id(author_id)?
                .ok_or_else(|| Error::from(ErrorKind::UserNotFound))?;
            let now = Utc::now().naive_utc();
            let comment = uow.comments().create(&NewComment {
                article_id: article.id,
                author_id: author.id,
                body,
                created_at: now,
                updated_at: now,
            })?;
            let profile = self
                .profiles
                .get_profile(uow, &author.username, Some(author.id))?;
            info!("user {} commented on article {}", author.id, slug);
            Ok(HydratedComment::from((comment, profile)))
        })
    }

    /// Deletes comment `comment_id` on `slug` if `viewer_id` wrote it;
    /// anything else is `CommentNotFound`.
    pub fn delete_comment(&self, slug: &str, comment_id: i32, viewer_id: i32) -> Result<()> {
        self.data.unit_of_work(|uow| {
            let comment = uow
                .comments()
                .find_comment(slug, comment_id, viewer_id)?
                .ok_or_else(|| Error::from(ErrorKind::CommentNotFound))?;
            uow.comments().delete(&comment)?;
            info!("user {} deleted comment {} on {}", viewer_id, comment_id, slug);
            Ok(())
        })
    }
}
