//! # tfs-cli
//!
//! Command-line front end for the TinyFS sandboxed filesystem client.
//!
//! Maps text commands onto [`FsClient`] calls:
//! - `tfs read/write/list/mkdir/delete/move/copy` — gated file operations
//! - `tfs exists/info` — defensive probes that never error on containment
//!
//! Exit codes: 0 success, 1 not-found/generic, 2 security error,
//! 3 cancelled by user, 4 other filesystem error, 5 unexpected error.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tfs_client::{FsClient, FsConfig, FsError};
use tfs_gate::ConfirmationGate;

/// TinyFS — sandboxed filesystem access for agents.
#[derive(Parser)]
#[command(name = "tfs", version, about)]
struct Cli {
    /// Workspace directory all operations are confined to.
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Automatically confirm all operations without prompting.
    #[arg(short = 'y', long)]
    auto_confirm: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a file and print its content.
    Read {
        /// Path to the file to read.
        path: String,
    },
    /// Write to a file.
    Write {
        /// Path to the file to write.
        path: String,
        /// Content to write; read from stdin when omitted.
        #[arg(short, long)]
        content: Option<String>,
    },
    /// List directory contents.
    List {
        /// Path to the directory to list.
        #[arg(default_value = ".")]
        path: String,
        /// Output in JSON format.
        #[arg(short, long)]
        json: bool,
    },
    /// Create a directory.
    Mkdir {
        /// Path to the directory to create.
        path: String,
    },
    /// Delete a file.
    Delete {
        /// Path to the file to delete.
        path: String,
    },
    /// Move a file.
    Move {
        /// Source path.
        source: String,
        /// Destination path.
        destination: String,
    },
    /// Copy a file.
    Copy {
        /// Source path.
        source: String,
        /// Destination path.
        destination: String,
    },
    /// Check whether a file or directory exists.
    Exists {
        /// Path to check.
        path: String,
        /// Restrict the check to one entry type.
        #[arg(short = 't', long = "type", value_enum)]
        entry_type: Option<EntryType>,
    },
    /// Show information about a file or directory.
    Info {
        /// Path to inspect.
        path: String,
        /// Output in JSON format.
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EntryType {
    File,
    Directory,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FsConfig::new(&cli.workspace).auto_confirm(cli.auto_confirm);
    let client = match FsClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(exit_code(&err));
        }
    };
    let client = if cli.auto_confirm {
        client
    } else {
        client.with_gate(ConfirmationGate::interactive(commands::prompt_confirm))
    };

    match commands::execute(&client, &cli.command) {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<FsError>() {
            Some(fs_err) => {
                match fs_err {
                    FsError::OutsideWorkspace { .. } => eprintln!("Security Error: {}", fs_err),
                    FsError::Cancelled { .. } => eprintln!("Operation Cancelled: {}", fs_err),
                    _ => eprintln!("Error: {}", fs_err),
                }
                ExitCode::from(exit_code(fs_err))
            }
            None => {
                eprintln!("Unexpected Error: {}", err);
                ExitCode::from(5)
            }
        },
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Map a filesystem error onto the exit code contract.
fn exit_code(err: &FsError) -> u8 {
    match err {
        FsError::NotFound { .. } => 1,
        FsError::OutsideWorkspace { .. } => 2,
        FsError::Cancelled { .. } => 3,
        FsError::IsADirectory { .. } | FsError::NotADirectory { .. } | FsError::Io { .. } => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn exit_codes_follow_the_contract() {
        assert_eq!(
            exit_code(&FsError::NotFound {
                path: PathBuf::from("a")
            }),
            1
        );
        assert_eq!(
            exit_code(&FsError::OutsideWorkspace {
                path: "../x".into(),
                root: PathBuf::from("/ws")
            }),
            2
        );
        assert_eq!(
            exit_code(&FsError::Cancelled {
                operation: "Write File".into()
            }),
            3
        );
        assert_eq!(
            exit_code(&FsError::IsADirectory {
                path: PathBuf::from("d")
            }),
            4
        );
        assert_eq!(
            exit_code(&FsError::Io {
                path: PathBuf::from("f"),
                source: std::io::Error::other("boom")
            }),
            4
        );
    }

    #[test]
    fn cli_parses_all_subcommands() {
        for args in [
            vec!["tfs", "read", "a.txt"],
            vec!["tfs", "write", "a.txt", "--content", "hi"],
            vec!["tfs", "list"],
            vec!["tfs", "-w", "/tmp/ws", "-y", "mkdir", "sub"],
            vec!["tfs", "delete", "a.txt"],
            vec!["tfs", "move", "a.txt", "b.txt"],
            vec!["tfs", "copy", "a.txt", "b.txt"],
            vec!["tfs", "exists", "a.txt", "--type", "file"],
            vec!["tfs", "info", "a.txt", "--json"],
        ] {
            Cli::try_parse_from(args).expect("should parse");
        }
    }
}
