//! Prompt helpers shared by the command handlers and the shell.

use rustyline::Editor;
use rustyline::history::MemHistory;

use crate::error::Result;

pub fn basic_editor() -> Result<Editor<(), MemHistory>> {
    Ok(Editor::<(), MemHistory>::with_history(
        Default::default(),
        MemHistory::new(),
    )?)
}

/// Read a flag value (y/n).
pub fn read_flag(prompt: &str) -> Result<bool> {
    let mut rl = basic_editor()?;
    let line = rl.readline(prompt)?;
    Ok(line == "y" || line == "yes")
}
