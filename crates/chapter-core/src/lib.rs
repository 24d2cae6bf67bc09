//! Core types and trait definitions for the chapter site.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate depends on it.

// Native `async fn` in traits; the returned futures are declared `Send`
// explicitly where it matters.
#![allow(async_fn_in_trait)]

pub mod date;
pub mod document;
pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
