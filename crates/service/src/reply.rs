/// A reply from the answer service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reply {
    /// The answer text. Absent when the service had nothing to say.
    pub response: Option<String>,
    /// The intent the service matched the query to, if it reported one.
    pub intent: Option<String>,
    /// The language the service detected, if it reported one.
    pub language: Option<String>,
}

impl Reply {
    /// Creates a reply with the given answer text.
    #[inline]
    pub fn with_response<S: Into<String>>(response: S) -> Self {
        Self {
            response: Some(response.into()),
            ..Default::default()
        }
    }

    /// Returns the answer text, treating an empty string the same as an
    /// absent one.
    #[inline]
    pub fn answer(&self) -> Option<&str> {
        self.response.as_deref().filter(|s| !s.is_empty())
    }
}
