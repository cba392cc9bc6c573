//! A local fake answer service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use unibot_service::{AnswerService, ErrorKind, Query, Reply, ServiceError};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
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

/// A local fake answer service for testing purpose.
///
/// Before sending queries, you need to script the replies, which is how
/// the service should settle each query in turn. The scripted replies
/// are consumed front to back, one per query; once the script runs out,
/// further queries fail with an error.
///
/// An optional artificial delay can be set to keep each request pending
/// for a while, which lets tests observe the in-flight window.
///
/// # Note
///
/// This type is not optimized for production use. You should only use
/// it for testing.
#[derive(Clone, Default)]
pub struct TestAnswerService {
    script: Arc<Mutex<VecDeque<PresetReply>>>,
    delay: Option<Duration>,
}

impl TestAnswerService {
    /// Appends a scripted reply for the next unanswered query.
    #[inline]
    pub fn add_reply(&mut self, preset: PresetReply) {
        self.script.lock().unwrap().push_back(preset);
    }

    /// Keeps every request pending for `duration` before settling it.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }
}

impl AnswerService for TestAnswerService {
    type Error = Error;

    fn send_query(
        &self,
        _query: &Query,
    ) -> impl Future<Output = Result<Reply, Self::Error>> + Send + 'static
    {
        let script = Arc::clone(&self.script);
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            let preset = script.lock().unwrap().pop_front();
            match preset {
                Some(PresetReply::Answer(text)) => {
                    Ok(Reply::with_response(text))
                }
                Some(PresetReply::Empty) => Ok(Reply::default()),
                Some(PresetReply::Failure) => Err(Error {
                    message: "scripted failure",
                    kind: ErrorKind::Network,
                }),
                None => Err(Error {
                    message: "no more scripted replies",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
