//! Transcript-related types.

use chrono::Local;

// 12-hour clock with AM/PM suffix, e.g. "03:42 PM".
const TIMESTAMP_FORMAT: &str = "%I:%M %p";

/// Who produced a message entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The remote question-answering service (or the controller speaking
    /// on its behalf, for welcome and error entries).
    Bot,
}

/// One record in the transcript.
///
/// Entries are immutable once created; the text, sender and timestamp
/// are all captured at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageEntry {
    text: String,
    sender: Sender,
    timestamp: String,
}

impl MessageEntry {
    #[inline]
    pub(crate) fn user(text: String) -> Self {
        Self::stamped(text, Sender::User)
    }

    #[inline]
    pub(crate) fn bot(text: String) -> Self {
        Self::stamped(text, Sender::Bot)
    }

    fn stamped(text: String, sender: Sender) -> Self {
        Self {
            text,
            sender,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Returns the message text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns who produced this entry.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the local time-of-day at which this entry was created.
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// An ordered, append-only log of message entries for one session.
///
/// The controller is the sole writer; everything else gets a read-only
/// view. Nothing is persisted, the transcript lives and dies with the
/// session.
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    #[inline]
    pub(crate) fn append(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    /// Returns all entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the transcript has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
