//! Taggery is a web app for managing a constrained tag vocabulary: tags,
//! inclusion and exclusion relations between them, and tag sets attached to
//! host entities.
//!
//! Unlike a flat vocabulary, every mutation passes through a consistency
//! layer. Inclusions form an acyclic graph that is propagated into tag sets
//! (tagging `Django` also tags `Python` and `Programming`), exclusions keep
//! incompatible tags out of the same set, and any operation that would break
//! those rules is rejected before anything is written.
//!
//! This library provides the tagging engine plus a small HTTP surface that
//! directly serves HTML pages for managing tags and their relations.

pub use app_state::AppState;
pub use error::Error;
pub use routing::build_router;

pub(crate) mod alert;
mod app_state;
pub mod database_id;
pub mod db;
pub mod endpoints;
mod error;
pub(crate) mod html;
pub(crate) mod navigation;
pub mod relation;
mod routing;
pub mod tag;
pub mod tagset;

#[cfg(test)]
pub(crate) mod test_utils;
