//! Main CLI application

use crate::completion::{Mode, OpenAiClient, RemoteKeyValidator};
use crate::config::load_config;
use crate::credential::{CredentialResolver, StdinPrompter};
use crate::error::CmdgenError;
use crate::runner::{resolve_input, run_request, Context, Generator, Verbosity};
use crate::system::SystemInfo;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

/// Printed when `--script` has no description
pub const SCRIPT_USAGE: &str = "Please provide a string to generate the script.";

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    /// Description words joined by spaces; `None` when none were given
    pub text: Option<String>,
}

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with command line arguments
    pub fn run(mut self) -> Result<(), CmdgenError> {
        let matches = self.command.clone().get_matches();

        if let Some(shell) = matches.get_one::<Shell>("completions") {
            clap_complete::generate(*shell, &mut self.command, "cmdgen", &mut io::stdout());
            return Ok(());
        }

        let ctx = Context::new().with_verbosity(get_verbosity(&matches));
        let invocation = parse_invocation(&matches);

        // Nothing to generate: no credential lookup, no network
        if invocation.mode == Mode::Script && invocation.text.is_none() {
            println!("{}", SCRIPT_USAGE);
            println!("Usage: cmdgen --script <DESCRIPTION>...");
            return Ok(());
        }

        let (config, config_path) =
            load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
        match &config_path {
            Some(path) => ctx.print_debug(&format!("Loaded config from {}", path.display())),
            None => ctx.print_debug("No config file found, using defaults"),
        }

        let system = SystemInfo::collect();
        ctx.print_debug(&format!("Shell: {}; {}", system.shell, system.os));

        let client = OpenAiClient::new(&config.api)?;
        ctx.print_debug(&format!("Endpoint: {}", client.endpoint()));

        let mut prompter = StdinPrompter;
        let validator = RemoteKeyValidator::new(&client, &config.api);
        let key = CredentialResolver::from_env(&config.credential).resolve(
            &validator,
            &mut prompter,
            &ctx,
        )?;

        let input = resolve_input(invocation.text, &mut prompter)?;
        let generator = Generator::new(&client, &key, &config.api, &system);

        let mut stdout = io::stdout().lock();
        run_request(
            &generator,
            invocation.mode,
            &input,
            &config.script,
            &ctx,
            &mut stdout,
        )?;

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
///
/// Flags are only recognised before the first description word; everything
/// from there on is part of the description.
pub fn build_command() -> Command {
    Command::new("cmdgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a plain-language description into a shell command or script")
        .arg(
            Arg::new("script")
                .short('s')
                .long("script")
                .help("Generate a script and save it as an executable file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print results and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug output")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a cmdgen config file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print a shell completion script and exit")
                .value_parser(value_parser!(Shell)),
        )
        .arg(
            Arg::new("text")
                .value_name("DESCRIPTION")
                .help("What the command or script should do")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Read the mode and description from matches
pub fn parse_invocation(matches: &ArgMatches) -> Invocation {
    let mode = if matches.get_flag("script") {
        Mode::Script
    } else {
        Mode::Command
    };

    let text = matches
        .get_many::<String>("text")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.trim().is_empty());

    Invocation { mode, text }
}

/// Run the CLI application
pub fn run() -> Result<(), CmdgenError> {
    // Values already in the environment win over .env
    let _ = dotenvy::dotenv();

    App::new().run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(args: &[&str]) -> Invocation {
        let matches = build_command().get_matches_from(args);
        parse_invocation(&matches)
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(
            invocation(&["cmdgen"]),
            Invocation {
                mode: Mode::Command,
                text: None
            }
        );
    }

    #[test]
    fn test_words_are_joined() {
        let parsed = invocation(&["cmdgen", "list", "all", "files"]);
        assert_eq!(parsed.mode, Mode::Command);
        assert_eq!(parsed.text, Some("list all files".to_string()));
    }

    #[test]
    fn test_script_flag() {
        let parsed = invocation(&["cmdgen", "-s", "back", "up", "home"]);
        assert_eq!(parsed.mode, Mode::Script);
        assert_eq!(parsed.text, Some("back up home".to_string()));

        let parsed = invocation(&["cmdgen", "--script", "x"]);
        assert_eq!(parsed.mode, Mode::Script);
    }

    #[test]
    fn test_script_flag_without_text() {
        let parsed = invocation(&["cmdgen", "-s"]);
        assert_eq!(parsed.mode, Mode::Script);
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn test_flags_after_text_are_text() {
        let parsed = invocation(&["cmdgen", "grep", "-r", "-s", "foo"]);
        assert_eq!(parsed.mode, Mode::Command);
        assert_eq!(parsed.text, Some("grep -r -s foo".to_string()));
    }

    #[test]
    fn test_leading_unknown_short_is_text() {
        let parsed = invocation(&["cmdgen", "-la", "files"]);
        assert_eq!(parsed.mode, Mode::Command);
        assert_eq!(parsed.text, Some("-la files".to_string()));
    }

    #[test]
    fn test_leading_unknown_long_is_text() {
        let parsed = invocation(&["cmdgen", "--force", "delete", "branch"]);
        assert_eq!(parsed.mode, Mode::Command);
        assert_eq!(parsed.text, Some("--force delete branch".to_string()));

        let parsed = invocation(&["cmdgen", "-s", "--force", "x"]);
        assert_eq!(parsed.mode, Mode::Script);
        assert_eq!(parsed.text, Some("--force x".to_string()));
    }

    #[test]
    fn test_blank_text_is_none() {
        let parsed = invocation(&["cmdgen", "-s", " ", ""]);
        assert_eq!(parsed.text, None);
    }

    #[test]
    fn test_get_verbosity() {
        let matches = build_command().get_matches_from(["cmdgen", "-v", "x"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Verbose);

        let matches = build_command().get_matches_from(["cmdgen", "-q"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Quiet);

        let matches = build_command().get_matches_from(["cmdgen"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Normal);
    }

    #[test]
    fn test_config_path_argument() {
        let matches = build_command().get_matches_from(["cmdgen", "-c", "my.yml", "ls"]);
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("my.yml"))
        );
    }
}
