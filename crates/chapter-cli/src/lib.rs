//! Client side of the chapter site: the HTTP gateway to the API and the view
//! controller that turns a fetched collection into displayable state.
//!
//! The `chapter` binary layers a terminal UI on top of these.

// Native `async fn` in traits; `Gateway` declares its futures `Send`.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod view;
