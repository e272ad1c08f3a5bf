//! Prompt templates and assembly

use crate::system::SystemInfo;
use std::fmt;

/// Instruction sent for command mode
pub const COMMAND_INSTRUCTION: &str = "I want you to create a command from the text after \"Command:\", please only create and output the command nothing else.";

/// Instruction sent for script mode; asks the model for a filename marker
pub const SCRIPT_INSTRUCTION: &str = "I want you to create a script from the text after \"Script:\", please only create and output the script nothing else.\n\nPlease provide a good filename for the script. You can use the following comment line: `#filename:your_script_name.sh`";

/// What the user asked to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single command line, printed to stdout
    Command,
    /// A multi-line script, saved to an executable file
    Script,
}

impl Mode {
    /// Fixed instruction text for this mode
    pub fn instruction(self) -> &'static str {
        match self {
            Mode::Command => COMMAND_INSTRUCTION,
            Mode::Script => SCRIPT_INSTRUCTION,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Command => write!(f, "command"),
            Mode::Script => write!(f, "script"),
        }
    }
}

/// Build the final prompt text
///
/// Layout: instruction, blank line, then a fence tagged with the shell label
/// holding the OS descriptor and the user's text verbatim.
pub fn build_prompt(mode: Mode, system: &SystemInfo, input: &str) -> String {
    format!(
        "{}\n\n```{}\n{}\n{}\n```",
        mode.instruction(),
        system.shell,
        system.os,
        input
    )
}
