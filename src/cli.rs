//! Command line arguments for the `coco` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::synth::RunConfig;

pub const DEFAULT_VOICE: &str = "nova";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-tts";
pub const DEFAULT_FORMAT: &str = "mp3";

/// Exit code for usage errors and unreadable or malformed input.
pub const FATAL_EXIT_CODE: i32 = 1;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "coco", version, about = "Generate narrated audio files from a JSON script")]
#[command(after_help = "Example:\n  coco script.json --voice=shimmer --format=wav")]
pub struct Cli {
    /// JSON file holding an array of { "name", "content" } sections
    #[arg(value_name = "JSON_FILE")]
    pub json_file: PathBuf,

    /// Voice to use
    #[arg(long, default_value = DEFAULT_VOICE)]
    pub voice: String,

    /// OpenAI model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Output audio format (mp3, wav, pcm, ...)
    #[arg(long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Instructions for voice style. Can be a string or a path to a text file.
    #[arg(long, value_name = "STR_OR_PATH")]
    pub instructions: Option<String>,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// Unlike [`Parser::parse`], usage errors exit with [`FATAL_EXIT_CODE`]
    /// instead of clap's default. `--help` and `--version` still exit 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) => {
                let code = if e.use_stderr() { FATAL_EXIT_CODE } else { 0 };
                let _ = e.print();
                std::process::exit(code);
            }
        }
    }

    pub fn run_config(&self, instructions: String) -> RunConfig {
        RunConfig {
            voice: self.voice.clone(),
            model: self.model.clone(),
            format: self.format.clone(),
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_apply_when_only_the_file_is_given() {
        let cli = Cli::try_parse_from(["coco", "script.json"]).unwrap();
        assert_eq!(cli.json_file, PathBuf::from("script.json"));
        assert_eq!(cli.voice, "nova");
        assert_eq!(cli.model, "gpt-4o-mini-tts");
        assert_eq!(cli.format, "mp3");
        assert_eq!(cli.instructions, None);
    }

    #[test]
    fn equals_style_options_are_accepted() {
        let cli = Cli::try_parse_from([
            "coco",
            "script.json",
            "--voice=shimmer",
            "--format=wav",
            "--model=tts-1",
            "--instructions=Speak slowly.",
        ])
        .unwrap();
        assert_eq!(cli.voice, "shimmer");
        assert_eq!(cli.format, "wav");
        assert_eq!(cli.model, "tts-1");
        assert_eq!(cli.instructions.as_deref(), Some("Speak slowly."));
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let err = Cli::try_parse_from(["coco", "--voice=onyx"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn second_positional_is_rejected() {
        let err = Cli::try_parse_from(["coco", "a.json", "b.json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["coco", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn run_config_carries_the_flags() {
        let cli = Cli::try_parse_from(["coco", "s.json", "--voice=echo"]).unwrap();
        let config = cli.run_config("calm".to_string());
        assert_eq!(config.voice, "echo");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.instructions, "calm");
    }
}
