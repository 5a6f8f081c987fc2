//! Terminal frontend for the newschat client.
//!
//! Wires the file-backed session store and the HTTP backend into the
//! conversation manager, then runs a rustyline REPL: plain text is submitted
//! to the bot, `/reset` starts a fresh session, `/quit` exits. Rendering
//! stays here; the manager owns every state transition.

mod config;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use colored::Colorize;
use newschat_core::conversation::{ConversationManager, ConversationState, Sender, SubmitResult};
use newschat_infrastructure::{FileSessionStore, HttpChatBackend};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// CLI helper for rustyline that completes and hints the slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec!["/reset".to_string(), "/quit".to_string()],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Highlighter for CliHelper {}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    tracing::info!("using backend at {}", config.api_base_url);

    let store =
        Arc::new(FileSessionStore::default_location().context("could not set up session storage")?);
    let backend = Arc::new(
        HttpChatBackend::new(config.api_base_url.clone())
            .context("could not build the backend client")?,
    );
    let manager = Arc::new(ConversationManager::new(store, backend));

    spawn_activity_indicator(&manager);

    println!("{}", "=== newschat ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Connected to {}. Type '/reset' for a fresh session, '/quit' to exit.",
            config.api_base_url
        )
        .bright_black()
    );
    println!();

    manager.bootstrap().await;
    if let Some(id) = manager.session_id().await {
        println!("{}", format!("Session: {}...", short_id(&id)).bright_black());
    }
    let mut rendered = render_from(&manager.state().await, 0);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "/quit" || trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == "/reset" {
                    if manager.session_id().await.is_some() {
                        manager.reset().await;
                        rendered = render_from(&manager.state().await, 0);
                    } else {
                        println!("{}", "No active session".bright_black());
                    }
                    continue;
                }

                if manager.submit(trimmed).await == SubmitResult::Completed {
                    rendered = render_from(&manager.state().await, rendered);
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    manager.shutdown();
    Ok(())
}

/// Prints the log entries appended since the last render and returns the new
/// rendered count.
fn render_from(state: &ConversationState, rendered: usize) -> usize {
    for message in &state.messages[rendered.min(state.messages.len())..] {
        let stamp = format!("[{}]", message.timestamp).bright_black();
        match message.sender {
            Sender::User => println!("{} {}", stamp, message.text.green()),
            Sender::Bot => println!("{} {}", stamp, message.text.bright_blue()),
        }
    }
    state.messages.len()
}

/// Watches state transitions and prints a one-line notice when a request
/// starts: history loading during bootstrap, thinking while a send is
/// outstanding. This is the read-only subscription the manager publishes for.
fn spawn_activity_indicator(manager: &Arc<ConversationManager>) {
    let mut updates = manager.subscribe();
    tokio::spawn(async move {
        let mut was_sending = false;
        let mut was_loading = false;
        while updates.changed().await.is_ok() {
            let (is_sending, is_loading) = {
                let state = updates.borrow();
                (state.is_sending, state.is_loading_history)
            };
            if is_loading && !was_loading {
                println!("{}", "Loading history...".bright_black());
            }
            if is_sending && !was_sending {
                println!("{}", "(thinking...)".bright_black());
            }
            was_sending = is_sending;
            was_loading = is_loading;
        }
    });
}

/// First characters of the session id, enough to recognize it across runs.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
