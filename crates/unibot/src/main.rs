//! A terminal front-end for chatting with the campus Q&A service.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;
use unibot::core::transcript::{MessageEntry, Sender};
use unibot::{QuickLink, Session, SessionBuilder};
use unibot_http_service::{EndpointConfigBuilder, HttpAnswerService};

enum SessionEvent {
    Idle,
    Entry(MessageEntry),
}

const BAR_CHAR: &str = "▎";

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

fn quick_links() -> Vec<QuickLink> {
    vec![
        QuickLink::new("B.Tech Fee", "What is the tuition fee for B.Tech?"),
        QuickLink::new(
            "UG Programs",
            "What courses are offered for undergraduate?",
        ),
        QuickLink::new("Avg Salary", "What is the average placement salary?"),
        QuickLink::new("Hostel Fee", "How much is the hostel fee for boys?"),
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Resolved once at startup; which deployment to talk to is purely
    // an environment concern.
    let base_url = env::var("UNIBOT_SERVICE_URL")
        .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_owned());
    let config = EndpointConfigBuilder::with_base_url(base_url).build();
    let service = HttpAnswerService::new(config);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut builder = SessionBuilder::with_answer_service(service)
        .on_entry({
            let event_tx = event_tx.clone();
            move |entry| {
                event_tx.send(SessionEvent::Entry(entry.clone())).ok();
            }
        })
        .on_busy({
            let event_tx = event_tx.clone();
            move |busy| {
                if !busy {
                    event_tx.send(SessionEvent::Idle).ok();
                }
            }
        });
    for link in quick_links() {
        builder = builder.with_quick_link(link);
    }
    let session = builder.build();

    // The seeded welcome entry is the first thing to arrive.
    if let Some(SessionEvent::Entry(entry)) = event_rx.recv().await {
        print_entry(&entry);
    }
    print_quick_links(&session);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(index) = parse_quick_link(line) {
            if !session.trigger_quick_link(index) {
                println!("No such quick link.");
                continue;
            }
        } else {
            session.send_message(line);
        }

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message("💬 Looking that up...");
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = &progress_bar {
                progress_bar.finish_and_clear();
            }
            progress_bar = None;

            match event {
                SessionEvent::Entry(entry) => {
                    print_entry(&entry);
                }
                SessionEvent::Idle => {
                    break;
                }
            }
        }
    }
}

/// Parses `/N` into a zero-based quick link index.
fn parse_quick_link(line: &str) -> Option<usize> {
    let n: usize = line.strip_prefix('/')?.parse().ok()?;
    n.checked_sub(1)
}

fn print_entry(entry: &MessageEntry) {
    // User entries were just typed at the prompt; echoing them back
    // would only add noise.
    if entry.sender() != Sender::Bot {
        return;
    }
    println!(
        "{}🎓 {} {}",
        BAR_CHAR.bright_cyan(),
        entry.text().bright_white(),
        entry.timestamp().dimmed()
    );
}

fn print_quick_links(session: &Session) {
    println!("{}", "Quick links:".bold());
    for (i, link) in session.quick_links().iter().enumerate() {
        println!("  /{} {}", i + 1, link.label.bright_cyan());
    }
    println!();
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
