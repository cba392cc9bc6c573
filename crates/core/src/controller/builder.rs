use unibot_service::AnswerService;

use super::state::{BusyCallback, EntryCallback};
use super::{Controller, WELCOME_TEXT};
use crate::service_client::ServiceClient;
use crate::transcript::MessageEntry;

/// [`Controller`] builder.
pub struct ControllerBuilder {
    pub(crate) service_client: ServiceClient,
    pub(crate) welcome_text: String,
    pub(crate) on_entry: Option<EntryCallback>,
    pub(crate) on_busy: Option<BusyCallback>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified answer service.
    #[inline]
    pub fn with_answer_service<S: AnswerService + 'static>(
        service: S,
    ) -> Self {
        Self {
            service_client: ServiceClient::new(service),
            welcome_text: WELCOME_TEXT.to_owned(),
            on_entry: None,
            on_busy: None,
        }
    }

    /// Overrides the seeded welcome entry text.
    #[inline]
    pub fn with_welcome_text<S: Into<String>>(mut self, text: S) -> Self {
        self.welcome_text = text.into();
        self
    }

    /// Attaches a callback to be invoked for every appended entry,
    /// including the seeded welcome entry.
    #[inline]
    pub fn on_entry(
        mut self,
        on_entry: impl Fn(&MessageEntry) + Send + Sync + 'static,
    ) -> Self {
        self.on_entry = Some(Box::new(on_entry));
        self
    }

    /// Attaches a callback to be invoked when a request is dispatched
    /// (`true`) and when it settles (`false`).
    #[inline]
    pub fn on_busy(
        mut self,
        on_busy: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.on_busy = Some(Box::new(on_busy));
        self
    }

    /// Builds the controller.
    #[inline]
    pub fn build(self) -> Controller {
        Controller::spawn_from_builder(self)
    }
}
