//! Lambda handlers and the event/response plumbing they share.

pub mod download;
pub mod helpers;
pub mod parsing;
pub mod profile;
pub mod upload;
