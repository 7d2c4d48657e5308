use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::Arc,
    thread,
};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, ClientSettings, RecapClient};
use crossbeam_channel::{bounded, select, unbounded};
use tracing_subscriber::EnvFilter;

use controller::{
    events::UiEvent,
    reducer::{RecapForm, RecapStatus},
};
use ui::{InputCommand, StoryboardApp};

const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Generate a narrative recap of a repository's activity over a date range.
#[derive(Parser, Debug)]
#[command(name = "storyboard", version)]
struct Args {
    /// Recap backend base address (overrides storyboard.toml and RECAP_API_BASE)
    #[arg(long)]
    api_base: Option<String>,
    /// Repository as owner/name
    #[arg(long)]
    repo: Option<String>,
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,
    /// Last day of the range (YYYY-MM-DD), defaults to today
    #[arg(long)]
    until: Option<String>,
    /// GitHub personal access token, used only for this request
    #[arg(long)]
    github_token: Option<String>,
    /// Read commands from stdin instead of submitting once
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn initial_form(&self) -> RecapForm {
        let mut form = RecapForm::default();
        if let Some(repo) = &self.repo {
            form.repo = repo.clone();
        }
        if let Some(since) = &self.since {
            form.since = since.clone();
        }
        if let Some(until) = &self.until {
            form.until = until.clone();
        }
        if let Some(token) = &self.github_token {
            form.github_token = token.clone();
        }
        form
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.api_base {
        Some(api_base) => ClientSettings::with_api_base(api_base.clone()),
        None => load_settings(),
    }
    .context("failed to resolve recap backend address")?;
    tracing::info!(api_base = %settings.api_base, "using recap backend");

    let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = unbounded();
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(RecapClient::new(&settings)));

    let mut app = StoryboardApp::new(args.initial_form(), cmd_tx, ui_rx);
    let code = if args.interactive {
        run_interactive(&mut app)?;
        ExitCode::SUCCESS
    } else {
        run_once(&mut app)?
    };

    app.shutdown();
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(code)
}

fn run_once(app: &mut StoryboardApp) -> Result<ExitCode> {
    app.submit();
    app.wait_until_settled()
        .context("backend worker stopped before the recap completed")?;
    tracing::debug!(submission = ?app.state().latest_submission(), "recap settled");
    print!("{}", app.render());
    io::stdout().flush().context("failed to write recap")?;
    Ok(match app.state().status() {
        RecapStatus::Error { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

enum Step {
    Input(Option<String>),
    Completion(Option<UiEvent>),
}

fn run_interactive(app: &mut StoryboardApp) -> Result<()> {
    let (line_tx, line_rx) = unbounded::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let ui_rx = app.ui_events().clone();
    println!("{}", ui::app::INTERACTIVE_HELP);
    print!("{}", app.render());
    loop {
        let step = select! {
            recv(line_rx) -> line => Step::Input(line.ok()),
            recv(ui_rx) -> event => Step::Completion(event.ok()),
        };

        let mut out = String::new();
        match step {
            Step::Input(None) => break,
            Step::Input(Some(line)) => {
                let Some(cmd) = InputCommand::parse(&line) else {
                    continue;
                };
                if !app.handle_input(cmd, &mut out) {
                    break;
                }
            }
            Step::Completion(None) => return Err(anyhow!("backend worker stopped")),
            Step::Completion(Some(event)) => {
                app.apply_event(event);
                app.process_ui_events();
                out.push_str(&app.render());
            }
        }
        print!("{out}");
        io::stdout().flush().context("failed to write output")?;
    }
    Ok(())
}
