//! DTO modules that bridge services with templates.

pub mod applications;
pub mod dashboard;
pub mod main;
