mod builder;
mod state;
#[cfg(test)]
mod tests;

use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

use crate::transcript::MessageEntry;
pub use builder::ControllerBuilder;
use state::{Command, ControllerState};

/// The seeded bot entry shown when a session starts. Overridable via
/// [`ControllerBuilder::with_welcome_text`].
pub const WELCOME_TEXT: &str = "Hello! I am the Anurag University \
    Assistant. I can help you with Admissions, Academics, Placements, and \
    Facilities. How can I assist you today?";

/// The bot entry substituted when a successful reply carries no answer.
pub const FALLBACK_TEXT: &str = "Sorry, I couldn't find a direct answer. \
    Try asking about Admissions, Placements, Academics, or Facilities.";

/// The bot entry appended when a request fails outright.
pub const APOLOGY_TEXT: &str = "My apologies, there was an issue \
    connecting to the knowledge service. Please check that the server is \
    running and reachable.";

/// The conversation controller: turns user input into outbound queries
/// and transcript entries.
///
/// The controller runs as a dedicated task draining a command mailbox,
/// so every transcript mutation happens on one task no matter which
/// thread the handle is used from. At most one request is in flight at
/// any time; a submission that arrives while a request is pending is
/// silently dropped, not queued.
///
/// Failures never escape: a failed or malformed request settles as a bot
/// entry with a fixed apology text, and the busy flag is always released
/// afterwards. The transcript is the only error-reporting channel.
#[derive(Clone)]
pub struct Controller {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl Controller {
    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder {
            service_client,
            welcome_text,
            on_entry,
            on_busy,
        } = builder;

        let mut state = ControllerState {
            service_client,
            transcript: Default::default(),
            draft: String::new(),
            current_stage: Default::default(),
            on_entry,
            on_busy,
        };
        state.seed_welcome(welcome_text);

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let weak_tx = cmd_tx.downgrade();
        tokio::spawn(
            run_controller(state, cmd_rx, weak_tx)
                .instrument(trace_span!("controller")),
        );
        Self { cmd_tx }
    }

    /// Submits a question exactly as if the user had typed and sent it.
    ///
    /// Quick links go through this path; the draft buffer is untouched.
    /// The call is a no-op when the text is blank or a request is
    /// already in flight.
    pub fn submit<S: Into<String>>(&self, text: S) {
        self.send(Command::Submit(text.into()));
    }

    /// Replaces the draft buffer with the given text.
    pub fn set_draft<S: Into<String>>(&self, text: S) {
        self.send(Command::SetDraft(text.into()));
    }

    /// Submits the current draft, clearing it if the submission is
    /// accepted.
    pub fn submit_draft(&self) {
        self.send(Command::SubmitDraft);
    }

    /// Returns a point-in-time copy of the observable state.
    ///
    /// The snapshot reflects every command sent on this handle before
    /// the call, since commands are processed in order.
    pub async fn snapshot(&self) -> Snapshot {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx));
        reply_rx
            .await
            .expect("controller task has been dropped too early")
    }

    #[inline]
    fn send(&self, cmd: Command) {
        self.cmd_tx
            .send(cmd)
            .expect("controller task has been dropped too early");
    }
}

/// A point-in-time copy of the state the rendering layer observes.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// The transcript entries, in insertion order.
    pub entries: Vec<MessageEntry>,
    /// Whether a request is currently in flight.
    pub busy: bool,
    /// The not-yet-submitted input buffer.
    pub draft: String,
}

async fn run_controller(
    mut state: ControllerState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    weak_tx: mpsc::WeakUnboundedSender<Command>,
) {
    debug!("started");
    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");
        state.handle(cmd, &weak_tx);
    }
    debug!("will terminate");
}
