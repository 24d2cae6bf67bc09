//! `chapter`: terminal front end for the chapter site.
//!
//! # Usage
//!
//! ```text
//! chapter --url http://localhost:5000
//! chapter --config ~/.config/chapter/config.toml
//! chapter create event --title "Hack night" --date 2024-06-01 --status upcoming
//! chapter delete team-members 6f1c...
//! ```

mod app;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chapter_cli::client::{ApiClient, ApiConfig};
use chapter_core::{
  date::RecordDate,
  document::Document,
  record::{Event, EventStatus, NewEvent, NewNews, NewTeamMember, News, TeamMember},
};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
  event::{self, Event as TermEvent, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "chapter", about = "Terminal front end for the chapter site")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the chapter server (default: http://localhost:5000).
  #[arg(long, env = "CHAPTER_URL")]
  url: Option<String>,

  /// Request timeout in seconds (default: 30).
  #[arg(long, value_name = "SECS")]
  timeout: Option<u64>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a record.
  #[command(subcommand)]
  Create(CreateCmd),

  /// Delete a record by id.
  Delete {
    #[arg(value_enum)]
    collection: Collection,
    id:         String,
  },
}

#[derive(Subcommand, Debug)]
enum CreateCmd {
  Event {
    #[arg(long)]
    title:       String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[arg(long)]
    date:        Option<RecordDate>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image:       Option<String>,
    #[arg(long)]
    link:        Option<String>,
    #[arg(long, default_value_t = EventStatus::Upcoming)]
    status:      EventStatus,
  },
  News {
    #[arg(long)]
    title:       String,
    #[arg(long)]
    description: Option<String>,
    /// Category, e.g. "job" or "internship".
    #[arg(long = "type")]
    kind:        Option<String>,
    #[arg(long)]
    company:     Option<String>,
    #[arg(long)]
    location:    Option<String>,
    #[arg(long)]
    date:        Option<RecordDate>,
  },
  Member {
    #[arg(long)]
    name:     String,
    #[arg(long)]
    role:     Option<String>,
    #[arg(long)]
    image:    Option<String>,
    /// Mark as a team lead.
    #[arg(long)]
    lead:     bool,
    #[arg(long)]
    linkedin: Option<String>,
    #[arg(long)]
    twitter:  Option<String>,
    #[arg(long)]
    github:   Option<String>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Collection {
  Events,
  News,
  TeamMembers,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  timeout_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Diagnostics go to stderr and stay off unless RUST_LOG asks for them.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let defaults = ApiConfig::default();
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or(defaults.base_url),
    timeout:  args
      .timeout
      .or(file_cfg.timeout_secs)
      .map(Duration::from_secs)
      .unwrap_or(defaults.timeout),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Some(Command::Create(cmd)) => create(&client, cmd).await,
    Some(Command::Delete { collection, id }) => match collection {
      Collection::Events => delete::<Event>(&client, &id).await,
      Collection::News => delete::<News>(&client, &id).await,
      Collection::TeamMembers => delete::<TeamMember>(&client, &id).await,
    },
    None => run_tui(client).await,
  }
}

// ─── One-shot commands ────────────────────────────────────────────────────────

async fn create(client: &ApiClient, cmd: CreateCmd) -> Result<()> {
  match cmd {
    CreateCmd::Event { title, date, description, image, link, status } => {
      let draft = NewEvent { title, date, description, image, link, status };
      print_created(&client.create::<Event>(&draft).await?)
    }
    CreateCmd::News { title, description, kind, company, location, date } => {
      let draft = NewNews { title, description, kind, company, location, date };
      print_created(&client.create::<News>(&draft).await?)
    }
    CreateCmd::Member { name, role, image, lead, linkedin, twitter, github } => {
      let draft = NewTeamMember {
        name,
        role,
        image,
        is_lead: lead,
        linkedin,
        twitter,
        github,
      };
      print_created(&client.create::<TeamMember>(&draft).await?)
    }
  }
}

fn print_created<D: Serialize>(doc: &D) -> Result<()> {
  let json = serde_json::to_string_pretty(doc).context("serialising created record")?;
  println!("{json}");
  Ok(())
}

async fn delete<D: Document>(client: &ApiClient, id: &str) -> Result<()> {
  client.delete::<D>(id).await?;
  println!("{} {id} deleted", D::NOUN);
  Ok(())
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

async fn run_tui(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  app.start();
  let run_result = run_event_loop(&mut terminal, &mut app);

  // Closing the views abandons any fetch still in flight.
  drop(app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.poll();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding the worker to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Resizes and everything else just redraw.
      _ => {}
    }
  }
  Ok(())
}
