//! Endpoint catalog.
//!
//! Each function is a fixed binding of verb, path template and parameter
//! shape. It returns an [`Endpoint`](crate::endpoint::Endpoint) without
//! performing I/O; issue it with [`Session::execute`](crate::Session::execute)
//! or [`Session::execute_cancellable`](crate::Session::execute_cancellable).
//!
//! Conventions shared by every binding:
//! - `repo_id`, share tokens and numeric ids are inserted verbatim.
//! - Usernames and paths used as path segments are percent-encoded.
//! - Optional arguments left as `None` are not sent at all.

pub mod account;
pub mod comments;
pub mod dirs;
pub mod files;
pub mod groups;
pub mod misc;
pub mod repos;
pub mod reviews;
pub mod shares;
pub mod starred;
pub mod tags;
pub mod wikis;
