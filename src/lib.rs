//! # Coco: narrate a script section by section
//! Reads a JSON array of `{ "name", "content" }` sections, asks the OpenAI
//! speech endpoint to narrate each one and writes the audio to
//! `<name>.<format>`.
//!
//! The pieces are usable on their own:
//! - [`instructions::resolve_instructions`] picks the narration style,
//! - [`sections::load_sections`] reads and validates the script,
//! - [`synth::run_sections`] drives any [`synth::SpeechSynthesizer`],
//!   for example [`openai::OpenAiSpeech`].
//!
//! ```no_run
//! use coco_speech::{instructions, openai, sections, synth};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let batch = sections::load_sections("script.json")?;
//!     let config = synth::RunConfig {
//!         voice: "nova".into(),
//!         model: "gpt-4o-mini-tts".into(),
//!         format: "mp3".into(),
//!         instructions: instructions::resolve_instructions(None).text,
//!     };
//!     let speech = openai::OpenAiSpeech::from_env();
//!     let report = synth::run_sections(&batch.sections, &config, &speech, ".");
//!     println!("{} file(s) written", report.succeeded);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod instructions;
pub mod openai;
pub mod sections;
pub mod synth;

pub use sections::{LoadError, Section, SectionBatch};
pub use synth::{RunConfig, RunReport, SpeechRequest, SpeechSynthesizer};
