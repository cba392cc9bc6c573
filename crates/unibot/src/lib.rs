//! An out-of-the-box campus Q&A chat session that wires the
//! conversation core to a question-answering backend.
//!
//! The crate includes a CLI front-end for chatting in the terminal. And
//! you can also use it as a library to embed the session into your own
//! host apps.

#![deny(missing_docs)]

mod session;

pub use session::{QuickLink, Session, SessionBuilder};

/// Re-exports of [`unibot_core`] crate.
pub mod core {
    pub use unibot_core::*;
}
