//! One generation pass: prompt, remote call, output
//!
//! Each stage returns its own error type so callers can tell "no output from
//! the service" apart from "could not save the script".

use crate::completion::{build_prompt, CompletionClient, CompletionRequest, Mode};
use crate::config::{ApiSettings, ScriptSettings};
use crate::credential::{ApiKey, Prompter};
use crate::error::{CmdgenError, CompletionError, CompletionResult, Result};
use crate::output::{print_command, script_target, write_executable, SavedScript};
use crate::runner::Context;
use crate::system::SystemInfo;
use std::io::{self, Write};

/// Text shown when no description was given on the command line
pub const INPUT_PROMPT: &str = "Please enter a string: ";

/// Printed before saving under the fallback name
pub const FALLBACK_NOTICE: &str =
    "Filename not found in the script content. Saving with fallback filename.";

/// What a successful pass produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Command printed to the output
    Printed(String),
    /// Script written to disk
    Saved(SavedScript),
}

/// Use the given description, or ask for one exactly once
pub fn resolve_input(text: Option<String>, prompter: &mut dyn Prompter) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    prompter.prompt(INPUT_PROMPT)?.ok_or_else(|| {
        CmdgenError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no description was entered",
        ))
    })
}

/// Sends prompts for one invocation
pub struct Generator<'a, C: CompletionClient> {
    client: &'a C,
    key: &'a ApiKey,
    api: &'a ApiSettings,
    system: &'a SystemInfo,
}

impl<'a, C: CompletionClient> Generator<'a, C> {
    pub fn new(client: &'a C, key: &'a ApiKey, api: &'a ApiSettings, system: &'a SystemInfo) -> Self {
        Generator {
            client,
            key,
            api,
            system,
        }
    }

    /// Make the single remote call for `input`
    pub fn generate(&self, mode: Mode, input: &str, ctx: &Context) -> CompletionResult<String> {
        let prompt = build_prompt(mode, self.system, input);
        ctx.print_debug(&format!(
            "Requesting a {} from model '{}' ({} chars of prompt)",
            mode,
            self.api.model,
            prompt.len()
        ));

        let request = CompletionRequest::generation(self.api, prompt);
        let text = self.client.complete(self.key, &request)?;
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Generate for `input` and print or save the result
///
/// A failed remote call returns before anything is printed or written.
pub fn run_request<C: CompletionClient, W: Write>(
    generator: &Generator<'_, C>,
    mode: Mode,
    input: &str,
    script: &ScriptSettings,
    ctx: &Context,
    out: &mut W,
) -> Result<Outcome> {
    let text = generator.generate(mode, input, ctx)?;

    match mode {
        Mode::Command => {
            print_command(out, &text)?;
            Ok(Outcome::Printed(text))
        }
        Mode::Script => {
            let saved = script_target(&text, &ctx.working_dir, &script.fallback_filename);
            if saved.used_fallback {
                writeln!(out, "{}", FALLBACK_NOTICE)?;
            }
            write_executable(&saved.path, &text)?;

            let name = saved
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| saved.path.display().to_string());
            writeln!(out, "Script saved as {}", name)?;
            ctx.print_debug(&format!("Wrote {}", saved.path.display()));

            Ok(Outcome::Saved(saved))
        }
    }
}
