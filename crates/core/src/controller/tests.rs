use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use unibot_test_service::{PresetReply, TestAnswerService};

use super::{
    APOLOGY_TEXT, Controller, ControllerBuilder, FALLBACK_TEXT, Snapshot,
    WELCOME_TEXT,
};
use crate::transcript::{MessageEntry, Sender};

const WAIT: Duration = Duration::from_millis(500);

/// Builds a controller that forwards every appended entry to a channel,
/// so tests can await appends deterministically.
fn observed_controller(
    service: TestAnswerService,
) -> (Controller, mpsc::UnboundedReceiver<MessageEntry>) {
    let (entry_tx, entry_rx) = mpsc::unbounded_channel();
    let controller = ControllerBuilder::with_answer_service(service)
        .on_entry(move |entry| {
            entry_tx.send(entry.clone()).ok();
        })
        .build();
    (controller, entry_rx)
}

async fn next_entry(
    entry_rx: &mut mpsc::UnboundedReceiver<MessageEntry>,
) -> MessageEntry {
    timeout(WAIT, entry_rx.recv())
        .await
        .expect("timed out waiting for an entry")
        .expect("controller dropped its entry channel")
}

fn texts(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.entries.iter().map(MessageEntry::text).collect()
}

#[tokio::test]
async fn test_initial_state() {
    let (controller, mut entries) =
        observed_controller(TestAnswerService::default());

    let welcome = next_entry(&mut entries).await;
    assert_eq!(welcome.sender(), Sender::Bot);
    assert_eq!(welcome.text(), WELCOME_TEXT);

    let snapshot = controller.snapshot().await;
    assert_eq!(texts(&snapshot), [WELCOME_TEXT]);
    assert!(!snapshot.busy);
    assert_eq!(snapshot.draft, "");
}

#[tokio::test]
async fn test_simple_turn() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("₹1,95,000 per year".to_owned()));
    let (controller, mut entries) = observed_controller(service);

    controller.submit("What is the tuition fee for B.Tech?");

    let _welcome = next_entry(&mut entries).await;
    let user = next_entry(&mut entries).await;
    assert_eq!(user.sender(), Sender::User);
    assert_eq!(user.text(), "What is the tuition fee for B.Tech?");
    let bot = next_entry(&mut entries).await;
    assert_eq!(bot.sender(), Sender::Bot);
    assert_eq!(bot.text(), "₹1,95,000 per year");

    let snapshot = controller.snapshot().await;
    assert_eq!(
        texts(&snapshot),
        [
            WELCOME_TEXT,
            "What is the tuition fee for B.Tech?",
            "₹1,95,000 per year",
        ]
    );
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn test_blank_submissions_are_ignored() {
    let (controller, _entries) =
        observed_controller(TestAnswerService::default());

    controller.submit("");
    controller.submit("   ");
    controller.submit("\t\n");

    // The snapshot command queues behind the rejected submissions, so
    // it observes their (absent) effects.
    let snapshot = controller.snapshot().await;
    assert_eq!(texts(&snapshot), [WELCOME_TEXT]);
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn test_submission_while_busy_is_dropped() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("answer to x".to_owned()));
    service.set_delay(Duration::from_millis(50));
    let (controller, mut entries) = observed_controller(service);

    controller.submit("x");
    controller.submit("y");

    let _welcome = next_entry(&mut entries).await;
    let user = next_entry(&mut entries).await;
    assert_eq!(user.text(), "x");
    let bot = next_entry(&mut entries).await;
    assert_eq!(bot.text(), "answer to x");

    // "y" must not appear anywhere, before or after settlement.
    let snapshot = controller.snapshot().await;
    assert_eq!(texts(&snapshot), [WELCOME_TEXT, "x", "answer to x"]);
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn test_busy_window() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("ok".to_owned()));
    let (busy_tx, mut busy_rx) = mpsc::unbounded_channel();
    let controller = ControllerBuilder::with_answer_service(service)
        .on_busy(move |busy| {
            busy_tx.send(busy).ok();
        })
        .build();

    assert!(!controller.snapshot().await.busy);

    controller.submit("q");
    let dispatched = timeout(WAIT, busy_rx.recv()).await.unwrap().unwrap();
    assert!(dispatched);
    let settled = timeout(WAIT, busy_rx.recv()).await.unwrap().unwrap();
    assert!(!settled);

    assert!(!controller.snapshot().await.busy);
}

#[tokio::test]
async fn test_failure_yields_apology_and_releases_busy() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Failure);
    service.add_reply(PresetReply::Answer("recovered".to_owned()));
    let (controller, mut entries) = observed_controller(service);

    controller.submit("fees?");

    let _welcome = next_entry(&mut entries).await;
    let _user = next_entry(&mut entries).await;
    let bot = next_entry(&mut entries).await;
    assert_eq!(bot.sender(), Sender::Bot);
    assert_eq!(bot.text(), APOLOGY_TEXT);

    let snapshot = controller.snapshot().await;
    assert!(!snapshot.busy);

    // The failed turn must not wedge the controller; the next
    // submission goes through normally.
    controller.submit("again?");
    let user = next_entry(&mut entries).await;
    assert_eq!(user.text(), "again?");
    let bot = next_entry(&mut entries).await;
    assert_eq!(bot.text(), "recovered");
}

#[tokio::test]
async fn test_empty_reply_falls_back() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Empty);
    let (controller, mut entries) = observed_controller(service);

    controller.submit("anything");

    let _welcome = next_entry(&mut entries).await;
    let _user = next_entry(&mut entries).await;
    let bot = next_entry(&mut entries).await;
    assert_eq!(bot.text(), FALLBACK_TEXT);
    assert_ne!(bot.text(), "");

    assert!(!controller.snapshot().await.busy);
}

#[tokio::test]
async fn test_turns_are_serialized() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("first answer".to_owned()));
    service.add_reply(PresetReply::Answer("second answer".to_owned()));
    let (controller, mut entries) = observed_controller(service);

    let _welcome = next_entry(&mut entries).await;

    controller.submit("first");
    let _user = next_entry(&mut entries).await;
    let _bot = next_entry(&mut entries).await;

    controller.submit("second");
    let _user = next_entry(&mut entries).await;
    let _bot = next_entry(&mut entries).await;

    // Each turn is a strict user-then-bot pair, with turn N fully
    // settled before turn N+1 begins.
    let snapshot = controller.snapshot().await;
    assert_eq!(
        texts(&snapshot),
        [WELCOME_TEXT, "first", "first answer", "second", "second answer"]
    );
}

#[tokio::test]
async fn test_draft_submission_clears_draft() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("ok".to_owned()));
    let (controller, mut entries) = observed_controller(service);

    controller.set_draft("What courses are offered for undergraduate?");
    controller.submit_draft();

    let _welcome = next_entry(&mut entries).await;
    let user = next_entry(&mut entries).await;
    assert_eq!(user.text(), "What courses are offered for undergraduate?");
    let _bot = next_entry(&mut entries).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.draft, "");
}

#[tokio::test]
async fn test_quick_link_submission_keeps_draft() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("ok".to_owned()));
    let (controller, mut entries) = observed_controller(service);

    controller.set_draft("half-typed question");
    controller.submit("What is the average placement salary?");

    let _welcome = next_entry(&mut entries).await;
    let _user = next_entry(&mut entries).await;
    let _bot = next_entry(&mut entries).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.draft, "half-typed question");
}

#[tokio::test]
async fn test_rejected_draft_submission_keeps_draft() {
    let mut service = TestAnswerService::default();
    service.add_reply(PresetReply::Answer("answer to x".to_owned()));
    service.set_delay(Duration::from_millis(50));
    let (controller, mut entries) = observed_controller(service);

    controller.submit("x");
    controller.set_draft("y");
    // Rejected while busy: no entry, and the draft stays intact.
    controller.submit_draft();

    let _welcome = next_entry(&mut entries).await;
    let _user = next_entry(&mut entries).await;
    let _bot = next_entry(&mut entries).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(texts(&snapshot), [WELCOME_TEXT, "x", "answer to x"]);
    assert_eq!(snapshot.draft, "y");
}
