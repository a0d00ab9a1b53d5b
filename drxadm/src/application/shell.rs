use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drx_core::AdminSession;
use rustyline::error::ReadlineError;

use super::handlers;
use crate::error::Result;
use crate::readline::basic_editor;

#[derive(Parser)]
#[command(name = "shell", author, version, about, long_about = None)]
struct Shell {
    #[command(subcommand)]
    cmd: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// List the active files of every company.
    Ls,
    /// Drop the cached listing and fetch a fresh one.
    Refresh,
    /// Decrypt one file and write the recovered content to disk.
    Get {
        /// Name of the encrypted file on the server.
        filename: String,

        /// Directory to write the recovered file into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Delete one encrypted file.
    Rm {
        /// Common name of the company that owns the file.
        common_name: String,

        /// Name of the encrypted file on the server.
        filename: String,
    },
    /// Delete every encrypted file of every company.
    Purge {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Exit the shell.
    #[command(alias = "q")]
    Quit,
}

/// Interactive loop over one connected session.
pub async fn run(session: AdminSession) -> Result<()> {
    println!(r#"Type "help" for command usage, "quit" or "q" to exit"#);

    let mut rl = basic_editor()?;
    loop {
        match rl.readline("drx> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                if let Err(e) = exec(&line, &session).await {
                    tracing::error!("{}", e);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Execute a line of input in the context of the shell program.
async fn exec(line: &str, session: &AdminSession) -> Result<()> {
    if line.trim().is_empty() {
        return Ok(());
    }
    let mut sanitized = shell_words::split(line.trim_end_matches(' '))?;
    sanitized.insert(0, String::from("shell"));
    match Shell::try_parse_from(sanitized) {
        Ok(program) => exec_program(program, session).await,
        // Pretty print clap parse errors and keep the loop alive.
        Err(e) => {
            e.print()?;
            Ok(())
        }
    }
}

async fn exec_program(program: Shell, session: &AdminSession) -> Result<()> {
    match program.cmd {
        ShellCommand::Ls => handlers::handle_ls(session).await,
        ShellCommand::Refresh => handlers::handle_refresh(session).await,
        ShellCommand::Get { filename, out } => {
            handlers::handle_get(session, &filename, &out).await
        }
        ShellCommand::Rm {
            common_name,
            filename,
        } => handlers::handle_rm(session, &common_name, &filename).await,
        ShellCommand::Purge { yes } => {
            handlers::handle_purge(session, yes, handlers::confirm_purge).await
        }
        ShellCommand::Quit => std::process::exit(0),
    }
}
