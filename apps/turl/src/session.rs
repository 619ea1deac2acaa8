//! Interactive session: one workflow controller for the whole session so a
//! checked URL can be extended afterwards.

use std::time::Instant;

use anyhow::Result;
use client_core::{StatusView, WorkflowController, WorkflowEvent};
use shared::domain::LifetimeChoice;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

use crate::{
    clipboard::{CopyIndicator, SessionClipboard},
    render,
};

const HELP: &str = "\
commands:
  shorten <url> [lifetime] [length]   lifetime: 1, 7, 30, 365, forever (default 30)
  check <short-url>
  extend <lifetime>                   extends the last checked URL
  copy                                copy the last short URL
  status                              show the state of each operation
  endpoints
  help
  quit";

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Shorten {
        url: String,
        lifetime: LifetimeChoice,
        length: String,
    },
    Check {
        short_url: String,
    },
    Extend {
        lifetime: LifetimeChoice,
    },
    Copy,
    Status,
    Endpoints,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let parse_lifetime = |raw: Option<&&str>| -> Result<LifetimeChoice, String> {
        raw.map(|raw| raw.parse::<LifetimeChoice>().map_err(|err| err.to_string()))
            .unwrap_or(Ok(LifetimeChoice::default()))
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "shorten" => {
            let url = args.first().ok_or("usage: shorten <url> [lifetime] [length]")?;
            SessionCommand::Shorten {
                url: url.to_string(),
                lifetime: parse_lifetime(args.get(1))?,
                length: args.get(2).unwrap_or(&"6").to_string(),
            }
        }
        "check" => {
            let short_url = args.first().ok_or("usage: check <short-url>")?;
            SessionCommand::Check {
                short_url: short_url.to_string(),
            }
        }
        "extend" => {
            if args.is_empty() {
                return Err("usage: extend <lifetime>".to_string());
            }
            SessionCommand::Extend {
                lifetime: parse_lifetime(args.first())?,
            }
        }
        "copy" => SessionCommand::Copy,
        "status" => SessionCommand::Status,
        "endpoints" => SessionCommand::Endpoints,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn spawn_progress(mut events: broadcast::Receiver<WorkflowEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => eprintln!("{}", render::event_line(&event)),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

pub async fn run(workflow: &WorkflowController) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut copied = CopyIndicator::default();
    let mut clipboard = SessionClipboard::default();
    let progress = spawn_progress(workflow.subscribe_events());

    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            SessionCommand::Shorten {
                url,
                lifetime,
                length,
            } => {
                workflow.set_shorten_input(url).await;
                match workflow.shorten(lifetime.as_str(), &length).await {
                    Ok(outcome) => {
                        copied.reset();
                        println!("{}", render::shorten_outcome(&outcome));
                    }
                    Err(err) => println!("{}", render::into_report(err)),
                }
            }
            SessionCommand::Check { short_url } => {
                workflow.set_check_input(short_url).await;
                match workflow.check().await {
                    Ok(status) => println!("{}", StatusView::from(&status)),
                    Err(err) => println!("{}", render::into_report(err)),
                }
            }
            SessionCommand::Extend { lifetime } => match workflow.extend(lifetime.as_str()).await {
                Ok(status) => println!("Lifetime extended\n{}", StatusView::from(&status)),
                Err(err) => println!("{}", render::into_report(err)),
            },
            SessionCommand::Copy => {
                let snapshot = workflow.snapshot().await;
                match snapshot.shorten.result() {
                    Some(outcome) => match clipboard.copy(&outcome.short_url) {
                        Ok(()) => {
                            copied.mark_copied(Instant::now());
                            println!("Copied {}", outcome.short_url);
                        }
                        Err(err) => println!("failed to copy to clipboard: {err}"),
                    },
                    None => println!("nothing to copy yet; shorten a URL first"),
                }
            }
            SessionCommand::Status => {
                let snapshot = workflow.snapshot().await;
                println!(
                    "{}",
                    render::workflow_state(&snapshot, copied.is_copied(Instant::now()))
                );
            }
            SessionCommand::Endpoints => {
                print!("{}", render::endpoints(workflow.client().registry()));
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }

    progress.abort();
    Ok(())
}
