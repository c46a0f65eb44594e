//! Development server for DOM components
//!
//! Serves a synthetic HTML host document that wires a requested source file
//! into a bundler-built script tag, so the file can be rendered inside an
//! embedded web view. The `/_expo/@dom` endpoint is the core; everything else
//! is the plumbing a dev server needs around it (config, logging, transport).

pub mod bundler;
pub mod config;
pub mod dom;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
