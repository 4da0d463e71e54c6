//! Hearth - concurrent static file server
//!
//! Core library for request handling, file serving and the access log.

pub mod access_log;
pub mod config;
pub mod files;
pub mod http;
pub mod server;
