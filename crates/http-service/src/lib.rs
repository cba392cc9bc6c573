//! An answer service backed by a plain HTTP question-answering endpoint.
//!
//! The wire protocol is a single `POST <base_url>/chat` carrying a JSON
//! `{"text": ...}` body, answered with a JSON object whose optional
//! `response` field holds the answer.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use reqwest::{Client, header};
use unibot_service::{AnswerService, ErrorKind, Query, Reply, ServiceError};

pub use config::{EndpointConfig, EndpointConfigBuilder};

/// The fixed path of the chat endpoint, relative to the base URL.
const CHAT_PATH: &str = "/chat";

/// Error type for [`HttpAnswerService`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP-backed answer service.
#[derive(Clone, Debug)]
pub struct HttpAnswerService {
    client: Client,
    config: Arc<EndpointConfig>,
}

impl HttpAnswerService {
    /// Creates a new `HttpAnswerService` with the given configuration.
    #[inline]
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl AnswerService for HttpAnswerService {
    type Error = Error;

    fn send_query(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + 'static
    {
        let chat_req = proto::create_request(query);
        let resp_fut = self
            .client
            .post(format!("{}{}", self.config.base_url, CHAT_PATH))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&chat_req)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Network,
                    ));
                }
            };
            let resp = match resp.error_for_status() {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Status,
                    ));
                }
            };

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let is_valid_content_type = content_type
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| m.subtype() == mime::JSON)
                .unwrap_or(false);
            if !is_valid_content_type {
                return Err(Error::new(
                    format!("unexpected content type: {content_type:?}"),
                    ErrorKind::MalformedReply,
                ));
            }

            // Here we got a successful response.
            let raw = match resp.json::<proto::ChatReply>().await {
                Ok(raw) => raw,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::MalformedReply,
                    ));
                }
            };
            if let Some(intent) = &raw.intent {
                debug!("server matched intent: {intent}");
            }
            Ok(proto::into_reply(raw))
        }
    }
}
