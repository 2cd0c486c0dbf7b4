//! Command-line access to a playground's snapshot history.
//!
//! Provides the `timetravel` binary, which reads and writes the same SQLite
//! store the HTTP server uses. Every write goes through `HistoryStore`, so
//! the CLI and the server agree on ordering and failure behavior.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use timetravel_core::LineDiff;
use timetravel_storage::{
    HistoryStore, SqliteStore, StorageError, StoreConfig, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION,
};

/// Inspect and edit a playground's snapshot history.
#[derive(Parser)]
#[command(name = "timetravel", about = "Inspect and edit playground snapshot history")]
struct Cli {
    /// Path to the snapshot database file.
    #[arg(long, global = true, default_value = "timetravel.db")]
    db: PathBuf,

    /// Named store inside the database.
    #[arg(long, global = true, default_value = DEFAULT_STORE_NAME)]
    store: String,

    /// Store version to open with.
    #[arg(long = "db-version", global = true, default_value_t = DEFAULT_STORE_VERSION)]
    db_version: u32,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every snapshot as JSON, oldest first.
    List,

    /// Print the code of one snapshot.
    Show {
        /// Snapshot index (0 is the oldest).
        index: usize,
    },

    /// Save code as a new snapshot.
    Save {
        /// Read the code from this file instead of stdin.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete every snapshot.
    Clear,

    /// Print a unified diff between two snapshots.
    Diff {
        /// Older snapshot index.
        old: usize,

        /// Newer snapshot index (default: the newest snapshot).
        new: Option<usize>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("cannot read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// 1 = bad arguments or index, 3 = storage or I/O failure.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 1,
            CliError::Storage(_) | CliError::Input(_) | CliError::Output(_) => 3,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match run(&cli, std::io::stdin().lock()) {
        Ok(output) => {
            if !output.is_empty() {
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Executes `cli` and returns what should be printed to stdout.
fn run(cli: &Cli, stdin: impl Read) -> Result<String, CliError> {
    let config = StoreConfig::new(cli.store.clone(), cli.db_version);
    let mut history = open_history(&cli.db, config)?;

    let result = match &cli.command {
        Commands::List => run_list(&history),
        Commands::Show { index } => run_show(&history, *index),
        Commands::Save { file } => run_save(&mut history, file.as_deref(), stdin),
        Commands::Clear => run_clear(&mut history),
        Commands::Diff { old, new } => run_diff(&history, *old, *new),
    };
    history.close();
    result
}

fn open_history(path: &Path, config: StoreConfig) -> Result<HistoryStore<SqliteStore>, CliError> {
    let mut history = HistoryStore::new(SqliteStore::new(path, config));
    history.initialize()?;
    Ok(history)
}

fn run_list(history: &HistoryStore<SqliteStore>) -> Result<String, CliError> {
    let entries: Vec<serde_json::Value> = history
        .timeline()
        .snapshots()
        .iter()
        .enumerate()
        .map(|(index, s)| {
            serde_json::json!({
                "index": index,
                "timestamp": s.timestamp,
                "lines": s.line_count(),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}

fn run_show(history: &HistoryStore<SqliteStore>, index: usize) -> Result<String, CliError> {
    Ok(snapshot_code(history, index)?.to_string())
}

fn run_save(
    history: &mut HistoryStore<SqliteStore>,
    file: Option<&Path>,
    mut stdin: impl Read,
) -> Result<String, CliError> {
    let code = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    let snapshot = history.save(&code)?;
    let index = history.timeline().len() - 1;
    Ok(format!(
        "saved snapshot {} ({} lines) at {}",
        index,
        snapshot.line_count(),
        snapshot.timestamp.to_rfc3339()
    ))
}

fn run_clear(history: &mut HistoryStore<SqliteStore>) -> Result<String, CliError> {
    let removed = history.timeline().len();
    history.clear()?;
    Ok(format!("cleared {} snapshot(s)", removed))
}

fn run_diff(
    history: &HistoryStore<SqliteStore>,
    old: usize,
    new: Option<usize>,
) -> Result<String, CliError> {
    let new = match new {
        Some(index) => index,
        None => history
            .timeline()
            .len()
            .checked_sub(1)
            .ok_or_else(|| CliError::Usage("history is empty".to_string()))?,
    };
    let old_code = snapshot_code(history, old)?;
    let new_code = snapshot_code(history, new)?;
    Ok(LineDiff::unified(old_code, new_code))
}

fn snapshot_code(history: &HistoryStore<SqliteStore>, index: usize) -> Result<&str, CliError> {
    let timeline = history.timeline();
    let Some(snapshot) = timeline.snapshot(index) else {
        let message = format!("no snapshot {} (history has {})", index, timeline.len());
        return Err(CliError::Usage(message));
    };
    Ok(&snapshot.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(db: &Path, args: &[&str]) -> Cli {
        let db = db.to_str().unwrap();
        let mut argv = vec!["timetravel", "--db", db];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_with(db: &Path, args: &[&str], stdin: &str) -> Result<String, CliError> {
        run(&cli(db, args), stdin.as_bytes())
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let parsed = Cli::try_parse_from([
            "timetravel",
            "diff",
            "0",
            "--store",
            "notes",
            "--db-version",
            "2",
        ])
        .unwrap();
        assert_eq!(parsed.store, "notes");
        assert_eq!(parsed.db_version, 2);
        assert!(matches!(parsed.command, Commands::Diff { old: 0, new: None }));
    }

    #[test]
    fn save_list_show_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");

        let out = run_with(&db, &["save"], "let x = 1;\nlet y = 2;\n").unwrap();
        assert!(out.starts_with("saved snapshot 0 (2 lines)"), "{out}");

        let code_file = dir.path().join("code.js");
        std::fs::write(&code_file, "let x = 3;\n").unwrap();
        let file_arg = code_file.to_str().unwrap();
        run_with(&db, &["save", "--file", file_arg], "").unwrap();

        let out = run_with(&db, &["list"], "").unwrap();
        let list: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[1]["index"], 1);
        assert_eq!(list[1]["lines"], 1);

        assert_eq!(run_with(&db, &["show", "1"], "").unwrap(), "let x = 3;\n");
    }

    #[test]
    fn diff_defaults_to_newest() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");
        run_with(&db, &["save"], "a\n").unwrap();
        run_with(&db, &["save"], "a\nb\n").unwrap();

        let out = run_with(&db, &["diff", "0"], "").unwrap();
        assert!(out.contains("+b"), "{out}");
        assert!(run_with(&db, &["diff", "1", "1"], "").unwrap().is_empty());
    }

    #[test]
    fn bad_index_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");

        let err = run_with(&db, &["show", "0"], "").unwrap_err();
        assert_eq!(err.exit_code(), 1);
        let err = run_with(&db, &["diff", "0"], "").unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn clear_and_unopenable_store() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");
        run_with(&db, &["save"], "x").unwrap();
        assert_eq!(
            run_with(&db, &["clear"], "").unwrap(),
            "cleared 1 snapshot(s)"
        );
        assert_eq!(run_with(&db, &["list"], "").unwrap(), "[]");

        let missing = dir.path().join("no").join("such").join("dir.db");
        let err = run_with(&missing, &["list"], "").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn newer_store_version_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cli.db");
        run_with(&db, &["--db-version", "2", "save"], "x").unwrap();

        let err = run_with(&db, &["list"], "").unwrap_err();
        assert!(matches!(err, CliError::Storage(StorageError::Unavailable { .. })));
    }
}
