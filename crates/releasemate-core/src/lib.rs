//! Core types and the consent state machine for ReleaseMate.
//!
//! No I/O happens here. The signature surface, storage backends, and the CLI
//! build on these types.

// Backends implement `ProjectStore` with native `async fn`.
#![allow(async_fn_in_trait)]

pub mod consent;
pub mod error;
pub mod form;
pub mod project;
pub mod release;
pub mod signature;
pub mod store;
pub mod subject;

pub use error::{Error, Result};
