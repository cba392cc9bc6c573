use std::error::Error;

use crate::error::ErrorKind;
use crate::query::Query;
use crate::reply::Reply;

/// The error type for an answer service.
pub trait ServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a remote question-answering service.
///
/// One call to [`AnswerService::send_query`] corresponds to exactly one
/// request on the wire. The service holds no conversation state on behalf
/// of the caller; each query stands alone, and any context tracking is up
/// to the remote side.
///
/// Once the service is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the service should be prepared for being dropped anytime.
pub trait AnswerService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: ServiceError;

    /// Sends a query to the service.
    fn send_query(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + 'static;
}
