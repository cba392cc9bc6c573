/// A query to be sent to the answer service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    /// The question text, exactly as the user submitted it. Whitespace
    /// trimming is left to the remote service.
    pub text: String,
}

impl Query {
    /// Creates a query with the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}
