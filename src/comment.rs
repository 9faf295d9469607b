use chrono::NaiveDateTime;
use db::schema::comments;
use profile::Profile;
use utils::serialize_date;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Comment {
    pub id: i32,
    pub article_id: i32,
    pub author_id: i32,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[table_name = "comments"]
pub struct NewComment<'a> {
    pub article_id: i32,
    pub author_id: i32,
    pub body: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedComment {
    pub id: i32,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "serialize_date")]
    pub updated_at: NaiveDateTime,
    pub body: String,
    pub author: Profile,
}

impl From<(Comment, Profile)> for HydratedComment {
    fn from(comment_and_profile: (Comment, Profile)) -> Self {
        let (comment, author) = comment_and_profile;
        HydratedComment {
            id: comment.id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            body: comment.body,
            author,
        }
    }
}
