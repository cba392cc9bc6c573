use serde::{Deserialize, Serialize};

/// How the fake service should settle one query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// A successful reply carrying the given answer text.
    #[serde(rename = "answer")]
    Answer(String),
    /// A successful reply with no answer text at all.
    #[serde(rename = "empty")]
    Empty,
    /// A failed request.
    #[serde(rename = "failure")]
    Failure,
}
