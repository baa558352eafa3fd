//! Database models shared across the portal repository.

pub mod application;
#[cfg(feature = "server")]
pub mod auth;
pub mod config;
pub mod lookup;
pub mod note;
pub mod profile;
pub mod status;
