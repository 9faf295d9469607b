pub mod models;

pub use self::models::{FollowKey, NewUser, User};
