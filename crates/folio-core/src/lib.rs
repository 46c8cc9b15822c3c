//! Core types and trait definitions for the Folio contact pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, mailer, API, and client crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod notify;
pub mod store;
pub mod submission;

pub use error::{Error, Result};
