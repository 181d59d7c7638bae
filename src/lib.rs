//! Client library for the packagecloud.io API.
//!
//! packagecloud hosts deb, rpm and dsc package repositories behind a REST
//! API. This crate wraps that API in a small synchronous client: credential
//! resolution, authenticated requests, paginated package listing and the
//! package lifecycle operations (push, destroy, promote), plus the command
//! implementations the `pkgcloud` binary is assembled from.
//!
//! See <https://packagecloud.io/docs/api> for the API itself.
//!
//! # Modules
//!
//! - `actions`: implementations of the CLI commands
//! - `client`: the API client and its domain operations
//! - `commands`: CLI command and parameter definitions
//! - `credentials`: API token and base URL resolution
//! - `error`: error types surfaced by the client
//! - `format`: output formats for the CLI
//! - `model`: data models for packagecloud entities
//! - `pagination`: package listing pages and cursors
//! - `response`: HTTP status and body interpretation

pub mod actions;
pub mod client;
pub mod commands;
pub mod credentials;
pub mod error;
pub mod format;
pub mod model;
pub mod pagination;
pub mod response;
