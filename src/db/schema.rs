table! {
    articles (id) {
        id -> Integer,
        author_id -> Integer,
        slug -> Text,
        title -> Text,
        description -> Text,
        body -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    article_tags (article_id, tag_id) {
        article_id -> Integer,
        tag_id -> Integer,
    }
}

table! {
    comments (id) {
        id -> Integer,
        article_id -> Integer,
        author_id -> Integer,
        body -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    favorites (article_id, user_id) {
        article_id -> Integer,
        user_id -> Integer,
    }
}

table! {
    follows (followed_id, follower_id) {
        followed_id -> Integer,
        follower_id -> Integer,
    }
}

table! {
    tags (id) {
        id -> Integer,
        name -> Text,
    }
}

table! {
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        bio -> Nullable<Text>,
        image -> Nullable<Text>,
    }
}

joinable!(article_tags -> articles (article_id));
joinable!(article_tags -> tags (tag_id));
joinable!(articles -> users (author_id));
joinable!(comments -> articles (article_id));
joinable!(favorites -> articles (article_id));
joinable!(favorites -> users (user_id));

allow_tables_to_appear_in_same_query!(
    article_tags,
    articles,
    comments,
    favorites,
    follows,
    tags,
    users,
);
