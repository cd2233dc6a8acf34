//! Console front-end.
//!
//! # Responsibility
//! - Resolve configuration from flags/environment and start logging.
//! - Feed stdin lines into `lazytask_core::Engine` and print framed replies.
//!
//! # Invariants
//! - Holds no task logic; every decision is made by the engine.
//! - Ends on `bye` or end of input, never on a command error.

use clap::builder::BoolishValueParser;
use clap::Parser;
use lazytask_core::config::{ALLOW_DUPLICATES_ENV, DATA_FILE_ENV, DEFAULT_DATA_FILE};
use lazytask_core::engine::reply::FAREWELL;
use lazytask_core::{default_log_level, init_logging, DuplicatePolicy, Engine, EngineConfig};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const RULE: &str = "____________________________________________________________";

#[derive(Parser, Debug)]
#[command(name = "lazytask")]
#[command(version)]
#[command(about = "Line-oriented task list with deadlines and events", long_about = None)]
struct Cli {
    /// Save file holding the task list
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Accept tasks identical to an existing one
    #[arg(long, env = ALLOW_DUPLICATES_ENV, value_parser = BoolishValueParser::new())]
    allow_duplicates: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "LAZYTASK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files (defaults to `<data dir>/logs`)
    #[arg(long, env = "LAZYTASK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Do not write log files
    #[arg(long)]
    no_log: bool,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let policy = if self.allow_duplicates {
            DuplicatePolicy::Allow
        } else {
            DuplicatePolicy::Reject
        };
        EngineConfig::new(&self.data_file).with_duplicate_policy(policy)
    }

    fn resolved_log_dir(&self) -> io::Result<PathBuf> {
        let dir = match &self.log_dir {
            Some(dir) => dir.clone(),
            None => self
                .data_file
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("logs"),
        };
        if dir.is_absolute() {
            Ok(dir)
        } else {
            Ok(std::env::current_dir()?.join(dir))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.no_log {
        start_logging(&cli);
    }

    let mut engine = Engine::open(&cli.engine_config());
    info!(
        "event=session_start module=cli status=ok task_count={}",
        engine.tasks().size()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session(&mut engine, stdin.lock(), &mut stdout.lock()) {
        Ok(()) => {
            info!("event=session_end module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=session_end module=cli status=error error={}", err);
            eprintln!("lazytask: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli) {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let result = cli
        .resolved_log_dir()
        .map_err(|err| err.to_string())
        .and_then(|dir| {
            let dir = dir.to_string_lossy().into_owned();
            init_logging(level, &dir).map_err(|err| err.to_string())
        });
    if let Err(err) = result {
        eprintln!("lazytask: logging disabled: {err}");
    }
}

/// Runs the read-reply loop until `bye` or end of input.
fn run_session(engine: &mut Engine, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    print_framed(out, &engine.greeting())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = engine.respond(&line);
        print_framed(out, &response.text)?;
        if response.exit {
            return Ok(());
        }
    }

    print_framed(out, FAREWELL)
}

fn print_framed(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    for line in text.lines() {
        writeln!(out, " {line}")?;
    }
    writeln!(out, "{RULE}")?;
    out.flush()
}
