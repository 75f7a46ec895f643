//! Data models.

pub mod config;
pub mod extraction;
pub mod template;
