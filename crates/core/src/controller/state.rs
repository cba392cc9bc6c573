use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;
use unibot_service::Query;

use super::{APOLOGY_TEXT, FALLBACK_TEXT, Snapshot};
use crate::service_client::{SendQueryResult, ServiceClient};
use crate::transcript::{MessageEntry, Transcript};

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(super) enum Stage {
    #[default]
    Idle,
    Busy,
}

pub(super) type EntryCallback = Box<dyn Fn(&MessageEntry) + Send + Sync>;
pub(super) type BusyCallback = Box<dyn Fn(bool) + Send + Sync>;

pub(super) struct ControllerState {
    pub(super) service_client: ServiceClient,
    pub(super) transcript: Transcript,
    pub(super) draft: String,
    pub(super) current_stage: Stage,

    pub(super) on_entry: Option<EntryCallback>,
    pub(super) on_busy: Option<BusyCallback>,
}

#[derive(Debug)]
pub(super) enum Command {
    Submit(String),
    SetDraft(String),
    SubmitDraft,
    Settled(SendQueryResult),
    Snapshot(oneshot::Sender<Snapshot>),
}

impl ControllerState {
    pub(super) fn handle(
        &mut self,
        cmd: Command,
        tx: &mpsc::WeakUnboundedSender<Command>,
    ) {
        match cmd {
            Command::Submit(text) => self.submit(text, false, tx),
            Command::SetDraft(text) => self.draft = text,
            Command::SubmitDraft => {
                let draft = self.draft.clone();
                self.submit(draft, true, tx);
            }
            Command::Settled(result) => self.finish_request(result),
            Command::Snapshot(reply_tx) => {
                reply_tx.send(self.snapshot()).ok();
            }
        }
    }

    pub(super) fn seed_welcome(&mut self, text: String) {
        self.push_entry(MessageEntry::bot(text));
    }

    fn submit(
        &mut self,
        text: String,
        from_draft: bool,
        tx: &mpsc::WeakUnboundedSender<Command>,
    ) {
        if self.current_stage != Stage::Idle {
            // A request is in flight; the submission is dropped, not
            // queued.
            trace!("busy, dropping submission");
            return;
        }
        if text.trim().is_empty() {
            return;
        }

        self.push_entry(MessageEntry::user(text.clone()));
        if from_draft {
            self.draft.clear();
        }
        self.set_stage(Stage::Busy);

        let client = self.service_client.clone();
        let tx = tx.clone();
        tokio::spawn(
            async move {
                let result = client.send_query(Query::new(text)).await;

                // The controller may be gone by the time we settle.
                let Some(tx) = tx.upgrade() else {
                    return;
                };
                tx.send(Command::Settled(result)).ok();
            }
            .instrument(trace_span!("chat request")),
        );
    }

    fn finish_request(&mut self, result: SendQueryResult) {
        let entry = match result {
            Ok(reply) => match reply.answer() {
                Some(answer) => MessageEntry::bot(answer.to_owned()),
                None => MessageEntry::bot(FALLBACK_TEXT.to_owned()),
            },
            Err(err) => {
                warn!("request failed: {err}");
                MessageEntry::bot(APOLOGY_TEXT.to_owned())
            }
        };
        self.push_entry(entry);

        // The busy flag must be released whichever way the request
        // settled, or the input affordance would stay disabled forever.
        self.set_stage(Stage::Idle);
    }

    fn push_entry(&mut self, entry: MessageEntry) {
        if let Some(on_entry) = &self.on_entry {
            on_entry(&entry);
        }
        self.transcript.append(entry);
    }

    fn set_stage(&mut self, stage: Stage) {
        if self.current_stage == stage {
            return;
        }
        self.current_stage = stage;
        if let Some(on_busy) = &self.on_busy {
            on_busy(stage == Stage::Busy);
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self.transcript.entries().to_vec(),
            busy: self.current_stage == Stage::Busy,
            draft: self.draft.clone(),
        }
    }
}
