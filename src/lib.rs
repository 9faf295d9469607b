//! Article aggregation and feed composition for a social blogging backend.
//!
//! The service layer in [`service`] hydrates raw article and comment rows
//! into their public views and composes the personalized feed. Storage is
//! reached only through the traits in [`repository`]; [`db`] provides the
//! diesel implementation of those traits.

extern crate chrono;
#[macro_use]
extern crate diesel;
extern crate dotenv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate r2d2;
extern crate r2d2_diesel;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate slug;
extern crate uuid;

#[cfg(test)]
extern crate serde_json;

pub mod article;
pub mod comment;
pub mod db;
pub mod profile;
pub mod repository;
pub mod service;
pub mod slugs;
pub mod types;
pub mod users;
mod utils;

pub use article::{ArticleFilter, ArticleList, ArticlePatch, HydratedArticle};
pub use comment::HydratedComment;
pub use db::{Config, Database};
pub use profile::{FollowProfileResolver, Profile, ProfileResolver};
pub use repository::{DataSource, UnitOfWork};
pub use service::ArticlesService;
pub use slugs::{SlugProvider, TitleSlugProvider};
pub use types::{Error, ErrorKind, Result, ValidationError, Window};
