//! Narration style passed to the speech model.

use std::path::PathBuf;

use tracing::debug;

/// Used when no `--instructions` were given.
pub const DEFAULT_INSTRUCTIONS: &str = "Affect: A gentle, curious narrator with a British accent, guiding a magical, child-friendly adventure through a fairy tale world.

Tone: Magical, warm, and inviting, creating a sense of wonder and excitement for young listeners.

Pacing: Steady and measured, with slight pauses to emphasize magical moments and maintain the storytelling flow.

Emotion: Wonder, curiosity, and a sense of adventure, with a lighthearted and positive vibe throughout.

Pronunciation: Clear and precise, with an emphasis on storytelling, ensuring the words are easy to follow and enchanting to listen to.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionsOrigin {
    Default,
    File(PathBuf),
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    pub text: String,
    pub origin: InstructionsOrigin,
}

/// Resolves the instructions text. This never fails.
///
/// `source` is first tried as a path to a text file, decoded lossily as
/// UTF-8. If it cannot be read for any reason the string itself is used as
/// the instructions.
/// An empty string counts as no instructions.
pub fn resolve_instructions(source: Option<&str>) -> Instructions {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return Instructions {
            text: DEFAULT_INSTRUCTIONS.to_string(),
            origin: InstructionsOrigin::Default,
        };
    };

    match std::fs::read(source) {
        Ok(bytes) => Instructions {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            origin: InstructionsOrigin::File(PathBuf::from(source)),
        },
        Err(e) => {
            debug!("instructions are not a readable file ({e}), using them inline");
            Instructions {
                text: source.to_string(),
                origin: InstructionsOrigin::Inline,
            }
        }
    }
}

impl InstructionsOrigin {
    pub fn describe(&self) -> &'static str {
        match self {
            InstructionsOrigin::Default => "built-in",
            InstructionsOrigin::File(_) => "from file",
            InstructionsOrigin::Inline => "inline",
        }
    }
}
