use comment::{Comment, NewComment};
use diesel::prelude::*;
use diesel::{delete, insert_into};
use repository::CommentRepository;
use types::Result;

use super::schema::{articles, comments};
use super::{last_insert_id, DbUnitOfWork};

impl<'a> CommentRepository for DbUnitOfWork<'a> {
    fn create(&self, comment: &NewComment) -> Result<Comment> {
        insert_into(comments::table)
            .values(comment)
            .execute(self.connection)?;
        let id = last_insert_id(self.connection)?;
        Ok(comments::table.find(id).first::<Comment>(self.connection)?)
    }

    fn find_comment(&self, slug: &str, comment_id: i32, author_id: i32) -> Result<Option<Comment>> {
        let comment = comments::table
            .inner_join(articles::table)
            .filter(articles::slug.eq(slug))
            .filter(comments::id.eq(comment_id))
            .filter(comments::author_id.eq(author_id))
            .select(comments::all_columns)
            .first::<Comment>(self.connection)
            .optional()?;
        Ok(comment)
    }

    fn delete(&self, comment: &Comment) -> Result<()> {
        delete(comments::table.find(comment.id)).execute(self.connection)?;
        Ok(())
    }
}
