/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The server answered with a non-success status code.
    Status,
    /// The request never reached the server, or the connection dropped.
    Network,
    /// The response body could not be decoded.
    MalformedReply,
    /// Any other errors.
    Other,
}
