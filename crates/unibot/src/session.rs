use unibot_core::transcript::MessageEntry;
use unibot_core::{Controller, ControllerBuilder};
use unibot_service::AnswerService;

/// A predefined shortcut query.
///
/// Triggering a quick link submits its query through exactly the same
/// path as typed input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuickLink {
    /// The label shown to the user.
    pub label: String,
    /// The query submitted when the link is triggered.
    pub query: String,
}

impl QuickLink {
    /// Creates a quick link.
    #[inline]
    pub fn new<L: Into<String>, Q: Into<String>>(label: L, query: Q) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
        }
    }
}

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    controller_builder: ControllerBuilder,
    quick_links: Vec<QuickLink>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified answer service.
    pub fn with_answer_service<S: AnswerService + 'static>(
        service: S,
    ) -> Self {
        let controller_builder =
            ControllerBuilder::with_answer_service(service);
        Self {
            controller_builder,
            quick_links: vec![],
        }
    }

    /// Overrides the welcome entry shown at session start.
    #[inline]
    pub fn with_welcome_text<S: Into<String>>(mut self, text: S) -> Self {
        self.controller_builder =
            self.controller_builder.with_welcome_text(text);
        self
    }

    /// Adds a quick link to the session.
    #[inline]
    pub fn with_quick_link(mut self, link: QuickLink) -> Self {
        self.quick_links.push(link);
        self
    }

    /// Attaches a callback to be invoked for every transcript entry.
    #[inline]
    pub fn on_entry(
        mut self,
        on_entry: impl Fn(&MessageEntry) + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_entry(on_entry);
        self
    }

    /// Attaches a callback to be invoked when a request starts or
    /// settles.
    #[inline]
    pub fn on_busy(
        mut self,
        on_busy: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_busy(on_busy);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        Session {
            controller: self.controller_builder.build(),
            quick_links: self.quick_links,
        }
    }
}

/// A chat session, like a widget window that displays messages and has
/// an input box.
///
/// The session holds a fully configured controller that you can use
/// directly, and it is basically a wrapper around [`Controller`] plus
/// the configured quick links.
pub struct Session {
    controller: Controller,
    quick_links: Vec<QuickLink>,
}

impl Session {
    /// Sends a typed message to the session.
    ///
    /// This goes through the draft path, so the input buffer is cleared
    /// once the submission is accepted.
    #[inline]
    pub fn send_message(&self, message: &str) {
        self.controller.set_draft(message);
        self.controller.submit_draft();
    }

    /// Returns the configured quick links.
    #[inline]
    pub fn quick_links(&self) -> &[QuickLink] {
        &self.quick_links
    }

    /// Triggers the quick link at `index`, submitting its query as if
    /// the user had typed it. Returns `false` when the index is out of
    /// range.
    pub fn trigger_quick_link(&self, index: usize) -> bool {
        let Some(link) = self.quick_links.get(index) else {
            return false;
        };
        self.controller.submit(link.query.clone());
        true
    }

    /// Returns the underlying controller.
    #[inline]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::timeout;
    use unibot_test_service::{PresetReply, TestAnswerService};

    use super::*;

    #[tokio::test]
    async fn test_quick_link_goes_through_submission_path() {
        let mut service = TestAnswerService::default();
        service.add_reply(PresetReply::Answer("₹60,000 per year".to_owned()));

        let (entry_tx, mut entry_rx) = mpsc::unbounded_channel();
        let session = SessionBuilder::with_answer_service(service)
            .with_quick_link(QuickLink::new(
                "Hostel Fee",
                "How much is the hostel fee for boys?",
            ))
            .on_entry(move |entry| {
                entry_tx.send(entry.text().to_owned()).ok();
            })
            .build();

        assert!(session.trigger_quick_link(0));
        assert!(!session.trigger_quick_link(1));

        let mut received = vec![];
        for _ in 0..3 {
            let text = timeout(Duration::from_millis(500), entry_rx.recv())
                .await
                .unwrap()
                .unwrap();
            received.push(text);
        }
        assert_eq!(received[1], "How much is the hostel fee for boys?");
        assert_eq!(received[2], "₹60,000 per year");
    }
}
