//! Core logic of the chat widget: the conversation controller, the
//! transcript store, and the type-erased service client.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
mod service_client;
pub mod transcript;

pub use controller::{
    APOLOGY_TEXT, Controller, ControllerBuilder, FALLBACK_TEXT, Snapshot,
    WELCOME_TEXT,
};
pub use service_client::ServiceClient;
