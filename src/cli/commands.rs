use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::models::{Event, SearchResult, SessionRecord, SortOrder, sort_sessions};
use crate::render::{EventCard, format_thousands, format_updated_at, session_badges};
use crate::search::filter_events;
use crate::store::SessionStore;
use crate::utils::terminal::single_line;
use crate::utils::{DEFAULT_AGENT, format_path_with_tilde, get_sessions_dir};

#[derive(Parser)]
#[command(name = "agent-session-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search agent conversation session logs", long_about = None)]
pub struct Cli {
    /// Sessions directory [default: $OPENCLAW_SESSIONS_DIR, else ~/.openclaw/agents/<AGENT>/sessions]
    #[arg(long, global = true, value_name = "DIR")]
    pub sessions_dir: Option<PathBuf>,

    /// Agent whose sessions directory is used when none is given
    #[arg(long, global = true, default_value = DEFAULT_AGENT)]
    pub agent: String,

    /// Registry file [default: <DIR>/sessions.json]
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sessions, newest first
    List {
        #[arg(long)]
        oldest_first: bool,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every event of one session
    Show {
        session_id: String,
        /// Only events containing this text (case-insensitive)
        #[arg(long, short)]
        filter: Option<String>,
        /// Print the raw events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search all session logs for a case-insensitive substring
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Show statistics about the sessions directory
    Stats,
    /// Open the interactive browser
    Browse,
}

impl Cli {
    fn store(&self) -> Result<SessionStore> {
        if self.agent.is_empty() || self.agent.contains(['/', '\\']) || self.agent == ".." {
            anyhow::bail!("Invalid agent name: {:?}", self.agent);
        }
        let dir = get_sessions_dir(self.sessions_dir.clone(), &self.agent)?;
        let store = SessionStore::new(dir);
        Ok(match &self.registry {
            Some(path) => store.with_registry(path),
            None => store,
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would corrupt the alternate screen
    let default_level = if matches!(cli.command, Some(Commands::Browse)) { "off" } else { "warn" };
    super::init_logging(default_level);

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let store = cli.store()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let res = execute(command, &store, &mut out);
    match res {
        Err(e) if is_broken_pipe(&e) => Ok(()),
        other => other,
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>().is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn execute(command: &Commands, store: &SessionStore, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::List { oldest_first, json } => {
            let mut sessions = store.list_sessions()?;
            let order = if *oldest_first { SortOrder::OldestFirst } else { SortOrder::NewestFirst };
            sort_sessions(&mut sessions, order);
            if *json {
                write_json(out, &sessions)
            } else {
                write_session_list(out, &sessions)
            }
        }
        Commands::Show { session_id, filter, json } => {
            let events = store.get_session(session_id)?;
            let shown = filter_events(&events, filter.as_deref().unwrap_or(""));
            if *json {
                write_json(out, &shown)
            } else {
                write_events(out, &shown, events.len())
            }
        }
        Commands::Search { query, json } => {
            let results = store.search(query)?;
            if *json {
                write_json(out, &results)
            } else {
                write_search_results(out, query, &results)
            }
        }
        Commands::Stats => {
            let sessions = store.list_sessions()?;
            write_stats(out, store, &sessions)
        }
        Commands::Browse => crate::tui::run_interactive(store.clone()),
    }
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn write_session_list(out: &mut impl Write, sessions: &[SessionRecord]) -> Result<()> {
    if sessions.is_empty() {
        writeln!(out, "No sessions found")?;
        return Ok(());
    }
    for session in sessions {
        let badges = session_badges(session);
        write!(
            out,
            "{}  {}  {}",
            format_updated_at(session.updated_at),
            single_line(&session.session_id, 80),
            single_line(session.title(), 80)
        )?;
        if !badges.is_empty() {
            write!(out, "  [{}]", badges.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_events(out: &mut impl Write, events: &[&Event], total: usize) -> Result<()> {
    for event in events {
        write!(out, "{}", EventCard::from_event(event).to_plain_text())?;
    }
    writeln!(out, "-- {} of {} events", events.len(), total)?;
    Ok(())
}

fn write_search_results(out: &mut impl Write, query: &str, results: &[SearchResult]) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "No matches for {:?}", query)?;
        return Ok(());
    }
    for result in results {
        let noun = if result.match_count == 1 { "match" } else { "matches" };
        writeln!(out, "{} ({} {})", result.session_id, result.match_count, noun)?;
        for m in &result.matches {
            writeln!(out, "  #{}: {}", m.line_number, single_line(&m.snippet, usize::MAX))?;
        }
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, store: &SessionStore, sessions: &[SessionRecord]) -> Result<()> {
    let synthesized = sessions.iter().filter(|s| s.from_file).count();
    let total_tokens: u64 = sessions.iter().filter_map(|s| s.total_tokens).sum();

    writeln!(out, "Agent Session Statistics")?;
    writeln!(out, "========================")?;
    writeln!(out, "Total sessions: {}", sessions.len())?;
    writeln!(out, "  From registry: {}", sessions.len() - synthesized)?;
    writeln!(out, "  From log files only: {}", synthesized)?;
    writeln!(out, "Total tokens: {}", format_thousands(total_tokens))?;
    writeln!(out)?;
    writeln!(out, "Sessions directory: {}", format_path_with_tilde(store.sessions_dir()))?;
    writeln!(out, "Registry: {}", format_path_with_tilde(store.registry_path()))?;

    let timestamps = sessions.iter().filter_map(|s| s.updated_at);
    if let Some(oldest) = timestamps.clone().min() {
        writeln!(out, "Oldest update: {}", format_updated_at(Some(oldest)))?;
    }
    if let Some(newest) = timestamps.max() {
        writeln!(out, "Newest update: {}", format_updated_at(Some(newest)))?;
    }

    Ok(())
}
