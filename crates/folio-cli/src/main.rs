//! `folio`: terminal contact form for a Folio server.
//!
//! # Usage
//!
//! ```
//! folio --url http://localhost:3000
//! folio --config ~/.config/folio/config.toml
//! folio --name Ada --email ada@example.com --message "Hello"
//! ```
//!
//! With all three of `--name`, `--email` and `--message` the message is sent
//! once without opening the form. Otherwise any given fields prefill the form.

mod app;
mod client;
mod form;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result, bail};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::submission::Field;
use form::{ContactForm, ContactTransport, SubmitResult};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Send a message through a Folio contact server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the folio server (default: http://localhost:3000).
  #[arg(long, env = "FOLIO_URL")]
  url: Option<String>,

  #[arg(long)]
  name: Option<String>,

  #[arg(long)]
  email: Option<String>,

  #[arg(long)]
  message: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag overrides config file, which overrides the default.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };

  let client = ApiClient::new(api_config)?;
  let server = client.base_url().to_string();
  let form = ContactForm::new(client);

  let prefill = [
    (Field::Name, args.name),
    (Field::Email, args.email),
    (Field::Message, args.message),
  ];
  let one_shot = prefill.iter().all(|(_, v)| v.is_some());
  for (field, value) in prefill {
    if let Some(value) = value {
      form.update_field(field, value);
    }
  }

  if one_shot {
    return send_once(form).await;
  }

  let mut app = App::new(form, server);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Submit the prefilled form once and report the alert on stdout.
async fn send_once<T: ContactTransport>(form: ContactForm<T>) -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let result = form.submit().await;
  if let Some(alert) = form.take_alert() {
    println!("{}", alert.text());
  }
  match result {
    SubmitResult::Sent => Ok(()),
    SubmitResult::Failed | SubmitResult::Ignored => bail!("message was not sent"),
  }
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<T: ContactTransport + 'static>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<T>,
) -> Result<()> {
  loop {
    app.poll_alert();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Resize and everything else: redraw on the next iteration.
      _ => {}
    }
  }

  // Let an in-flight submission finish before the runtime shuts down.
  while app.form.is_submitting() {
    tokio::time::sleep(Duration::from_millis(20)).await;
  }
  Ok(())
}
