//! Shell and operating system detection
//!
//! The collected values only label the prompt; they never change behaviour.

use std::env;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};

/// Shells recognised from `$SHELL`
pub const SUPPORTED_SHELLS: &[&str] = &["zsh", "bash", "sh"];

/// Shell label used when `$SHELL` is unset or not recognised
pub const DEFAULT_SHELL: &str = "bash";

/// Shell label and OS descriptor for the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub shell: String,
    pub os: String,
}

impl SystemInfo {
    /// Collect from the current process environment and platform
    pub fn collect() -> Self {
        SystemInfo {
            shell: detect_shell(env::var("SHELL").ok().as_deref()),
            os: os_descriptor(os_family(), &os_release()),
        }
    }
}

/// Pick the shell label for a `$SHELL` value
///
/// Only the final path component is compared, so `/usr/bin/zsh` yields `zsh`
/// while `/usr/bin/fish` falls back to the default.
pub fn detect_shell(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .and_then(|v| Path::new(v).file_name())
        .and_then(|name| name.to_str())
        .and_then(|name| SUPPORTED_SHELLS.iter().find(|s| **s == name))
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Platform family name, in the form `uname -s` reports it
pub fn os_family() -> &'static str {
    match env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        other => other,
    }
}

/// Kernel release string, or `unknown`
///
/// `uname -r` on Unix; on Windows the build number from `ver`.
pub fn os_release() -> String {
    release_output()
        .and_then(|out| release_from_output(&out))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(windows))]
fn release_output() -> Option<String> {
    run_quiet(StdCommand::new("uname").arg("-r"))
}

#[cfg(windows)]
fn release_output() -> Option<String> {
    run_quiet(StdCommand::new("cmd").args(["/C", "ver"]))
}

fn run_quiet(command: &mut StdCommand) -> Option<String> {
    command
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
}

/// Pull the release out of `uname -r` or `ver` output
///
/// `ver` prints `Microsoft Windows [Version 10.0.19045.3570]`; only the
/// bracketed number is kept. Anything else is used as-is once trimmed.
pub fn release_from_output(output: &str) -> Option<String> {
    let output = output.trim();
    let release = match output.split_once("[Version ") {
        Some((_, rest)) => rest.split(']').next().unwrap_or(rest).trim(),
        None => output,
    };

    if release.is_empty() {
        None
    } else {
        Some(release.to_string())
    }
}

/// Format the OS descriptor line
pub fn os_descriptor(family: &str, release: &str) -> String {
    format!("Operating System: {}, Release: {}", family, release)
}
