use std::pin::Pin;
use std::sync::Arc;

use tracing::Instrument;
use unibot_service::{AnswerService, Query, Reply, ServiceError};

pub(crate) type SendQueryResult = Result<Reply, Box<dyn ServiceError>>;
type BoxedSendQueryFuture =
    Pin<Box<dyn Future<Output = SendQueryResult> + Send>>;
type HandlerFn = Arc<dyn Fn(Query) -> BoxedSendQueryFuture + Send + Sync>;

/// A wrapper around an answer service that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ServiceClient {
    handler_fn: HandlerFn,
}

impl ServiceClient {
    /// Creates a new `ServiceClient` backed by the given service.
    #[inline]
    pub fn new<S: AnswerService + 'static>(service: S) -> Self {
        // We have to erase the type `S`, since `ServiceClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |query| {
            trace!("got a query: {:?}", query);
            let fut = service.send_query(&query);
            Box::pin(
                async move {
                    match fut.await {
                        Ok(reply) => {
                            trace!("finished a query");
                            Ok(reply)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ServiceError>)
                        }
                    }
                }
                .instrument(trace_span!("service client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a query and returns the settled result.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the returned future abandons
    /// the underlying request.
    #[inline]
    pub async fn send_query(
        &self,
        query: Query,
    ) -> Result<Reply, Box<dyn ServiceError>> {
        (self.handler_fn)(query).await
    }
}

#[cfg(test)]
mod tests {
    use unibot_service::ErrorKind;
    use unibot_test_service::{PresetReply, TestAnswerService};

    use super::*;

    #[tokio::test]
    async fn test_send_query() {
        let mut service = TestAnswerService::default();
        for _ in 0..3 {
            service.add_reply(PresetReply::Answer("How are you?".to_owned()));
        }

        let client = ServiceClient::new(service);

        for _ in 0..3 {
            let reply = client.send_query(Query::new("Hi")).await.unwrap();
            assert_eq!(reply.answer(), Some("How are you?"));
        }
    }

    #[tokio::test]
    async fn test_error_handling() {
        let client = ServiceClient::new(TestAnswerService::default());
        let err = client.send_query(Query::new("Hi")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
