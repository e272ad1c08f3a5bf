//! Presenting generated text
//!
//! Commands are printed under a banner. Scripts are written to a file named
//! by their `#filename:` marker line (or the fallback name) and made
//! executable.

use crate::error::{OutputError, OutputResult};
use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Line prefix carrying the intended script filename
pub const FILENAME_MARKER: &str = "#filename:";

/// Banner printed above a generated command
pub const COMMAND_BANNER: &str = "Generated Command:";

/// Permission bits for saved scripts
pub const SCRIPT_MODE: u32 = 0o755;

/// Where a script ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedScript {
    pub path: PathBuf,
    /// True when no usable marker was found
    pub used_fallback: bool,
}

/// Print a generated command under the banner
pub fn print_command<W: Write>(out: &mut W, command: &str) -> io::Result<()> {
    writeln!(out, "{}", COMMAND_BANNER.bold())?;
    writeln!(out, "{}", command)?;
    Ok(())
}

/// Find the filename named by the first marker line
///
/// Everything after the first `:` is the name. Only its final path component
/// is kept; empty names and `.`/`..` are ignored.
pub fn extract_filename(script: &str) -> Option<String> {
    script
        .lines()
        .filter(|line| line.starts_with(FILENAME_MARKER))
        .find_map(|line| {
            let (_, value) = line.split_once(':')?;
            sanitize_filename(value.trim())
        })
}

fn sanitize_filename(value: &str) -> Option<String> {
    let name = value.rsplit(|c: char| c == '/' || c == '\\').next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name.to_string()),
    }
}

/// Write `content` to `path` unchanged and mark it executable
pub fn write_executable(path: &Path, content: &str) -> OutputResult<()> {
    fs::write(path, content).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    set_executable(path)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> OutputResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE)).map_err(|e| {
        OutputError::Permissions {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
    })
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> OutputResult<()> {
    Ok(())
}

/// Decide where a script goes: its marker name, or `fallback` in `dir`
pub fn script_target(script: &str, dir: &Path, fallback: &str) -> SavedScript {
    let (name, used_fallback) = match extract_filename(script) {
        Some(name) => (name, false),
        None => (fallback.to_string(), true),
    };

    SavedScript {
        path: dir.join(name),
        used_fallback,
    }
}
