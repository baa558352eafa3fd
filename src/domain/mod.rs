//! Domain aggregates exposed by the portal service layer.

pub mod application;
pub mod lookup;
pub mod note;
pub mod profile;
pub mod status;
pub mod types;
