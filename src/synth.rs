//! The per-section synthesis loop.
//!
//! Sections are handled strictly one after another: the request is sent, the
//! response is streamed into `<name>.<format>` and the file is closed before
//! the next section starts. A failing section is logged and recorded in the
//! [`RunReport`], it never stops the run.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use serde::Serialize;
use tracing::{error, info};

use crate::sections::Section;

/// Parameters shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub voice: String,
    pub model: String,
    pub format: String,
    pub instructions: String,
}

/// Body of one speech request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub input: &'a str,
    pub instructions: &'a str,
    pub response_format: &'a str,
}

impl<'a> SpeechRequest<'a> {
    pub fn new(config: &'a RunConfig, section: &'a Section) -> Self {
        Self {
            model: &config.model,
            voice: &config.voice,
            input: &section.content,
            instructions: &config.instructions,
            response_format: &config.format,
        }
    }
}

/// Turns text into audio.
///
/// The returned reader yields the encoded audio in arrival order and is read
/// exactly once, to the end.
pub trait SpeechSynthesizer {
    fn synthesize(&self, request: &SpeechRequest<'_>) -> color_eyre::Result<Box<dyn Read + Send>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<SectionFailure>,
}

/// `<output_dir>/<name>.<format>`. Sections sharing a name share a file.
pub fn output_path(output_dir: &Path, section: &Section, format: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", section.name, format))
}

/// Synthesizes every section in order and writes the audio to `output_dir`.
pub fn run_sections<S>(
    sections: &[Section],
    config: &RunConfig,
    synthesizer: &S,
    output_dir: impl AsRef<Path>,
) -> RunReport
where
    S: SpeechSynthesizer + ?Sized,
{
    let output_dir = output_dir.as_ref();
    let mut report = RunReport::default();

    for section in sections {
        let path = output_path(output_dir, section, &config.format);
        info!("Generating \"{}.{}\"...", section.name, config.format);
        report.attempted += 1;

        match synthesize_section(section, config, synthesizer, &path) {
            Ok(bytes) => {
                info!("Saved: {} ({bytes} bytes)", path.display());
                report.succeeded += 1;
            }
            Err(e) => {
                error!("Error generating audio for \"{}\": {e:#}", section.name);
                report.failures.push(SectionFailure {
                    name: section.name.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
    }

    info!("Done! Successfully created {} file(s).", report.succeeded);
    report
}

fn synthesize_section<S>(
    section: &Section,
    config: &RunConfig,
    synthesizer: &S,
    path: &Path,
) -> color_eyre::Result<u64>
where
    S: SpeechSynthesizer + ?Sized,
{
    let request = SpeechRequest::new(config, section);
    let audio = synthesizer.synthesize(&request)?;
    write_stream(audio, path)
}

/// Appends everything `reader` yields to a freshly created file at `path`.
///
/// A stream that breaks off leaves the bytes received so far on disk.
pub fn write_stream(mut reader: impl Read, path: &Path) -> color_eyre::Result<u64> {
    let file = File::create(path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let bytes = std::io::copy(&mut reader, &mut writer)
        .wrap_err_with(|| format!("stream interrupted while writing {}", path.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("failed to flush {}", path.display()))?;
    Ok(bytes)
}
