//! An abstraction layer for remote question-answering backends.
//!
//! This crate establishes an unified protocol for the chat core to talk
//! to whatever service actually answers the questions, so that the core
//! can swap backends without modifying its own codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod query;
mod reply;

pub use error::*;
pub use provider::*;
pub use query::*;
pub use reply::*;
