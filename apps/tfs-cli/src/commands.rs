// commands.rs — Map parsed subcommands onto FsClient calls.
//
// Each arm prints the human-facing output the way the operation's consumers
// expect it; error-to-exit-code mapping lives in main.rs. `exists` and
// `info` return exit code 1 themselves when the target is absent, since
// absence is an answer there, not an error.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use tfs_client::{FileInfo, FsClient};

use crate::{Commands, EntryType};

/// Terminal confirmation prompt. Prints the operation and its details on
/// stderr (stdout stays clean for command output), reads one line, approves
/// on "y"/"yes".
pub fn prompt_confirm(operation: &str, details: &str) -> bool {
    eprintln!("{}", operation);
    eprintln!("{}", details);
    eprint!("Proceed? [y/N] ");
    let _ = io::stderr().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn execute(client: &FsClient, command: &Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Read { path } => {
            let content = client.read_file(path)?;
            print!("{}", content);
        }

        Commands::Write { path, content } => {
            let content = match content {
                Some(content) => content.clone(),
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            client.write_file(path, &content, true)?;
            println!("Successfully wrote to {}", path);
        }

        Commands::List { path, json } => {
            let mut entries = client.list_directory(path)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                // Directories first, then files, each sorted by name.
                entries.sort_by(|a, b| {
                    b.is_directory
                        .cmp(&a.is_directory)
                        .then_with(|| a.name.cmp(&b.name))
                });
                println!("Contents of {}:", path);
                for entry in &entries {
                    if entry.is_directory {
                        println!("  {}/", entry.name);
                    } else {
                        let size = entry
                            .size
                            .map(|bytes| format!("{} bytes", bytes))
                            .unwrap_or_else(|| "N/A".to_string());
                        println!("  {} ({})", entry.name, size);
                    }
                }
            }
        }

        Commands::Mkdir { path } => {
            client.create_directory(path, true)?;
            println!("Successfully created directory {}", path);
        }

        Commands::Delete { path } => {
            client.delete_file(path, true)?;
            println!("Successfully deleted {}", path);
        }

        Commands::Move {
            source,
            destination,
        } => {
            client.move_file(source, destination, true)?;
            println!("Successfully moved {} to {}", source, destination);
        }

        Commands::Copy {
            source,
            destination,
        } => {
            client.copy_file(source, destination, true)?;
            println!("Successfully copied {} to {}", source, destination);
        }

        Commands::Exists { path, entry_type } => {
            let (exists, kind) = match entry_type {
                Some(EntryType::File) => (client.file_exists(path), "file"),
                Some(EntryType::Directory) => (client.directory_exists(path), "directory"),
                None => (
                    client.file_exists(path) || client.directory_exists(path),
                    "path",
                ),
            };
            if exists {
                println!("The {} {} exists.", kind, path);
            } else {
                println!("The {} {} does not exist.", kind, path);
                return Ok(ExitCode::from(1));
            }
        }

        Commands::Info { path, json } => match client.file_info(path) {
            Some(info) => {
                if *json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_info(path, &info);
                }
            }
            None => {
                println!("No information available for {}", path);
                return Ok(ExitCode::from(1));
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn print_info(path: &str, info: &FileInfo) {
    println!("Information for {}:", path);
    println!("  Name: {}", info.name);
    println!(
        "  Type: {}",
        if info.is_directory { "Directory" } else { "File" }
    );
    if let Some(size) = info.size {
        println!("  Size: {} bytes", size);
    }
    if let Some(modified) = info.modified {
        println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
}
