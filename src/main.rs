use coco_speech::cli::{Cli, FATAL_EXIT_CODE};
use coco_speech::instructions::{resolve_instructions, InstructionsOrigin};
use coco_speech::openai::OpenAiSpeech;
use coco_speech::{sections, synth};
use color_eyre::eyre::Report;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse_or_exit();
    let instructions = resolve_instructions(cli.instructions.as_deref());

    info!(
        "Coco CLI - Generating audio from {} using voice \"{}\" ({})",
        cli.json_file.display(),
        cli.voice,
        cli.format
    );
    match &instructions.origin {
        InstructionsOrigin::Default => {}
        InstructionsOrigin::File(path) => info!("Custom instructions: from file {}", path.display()),
        InstructionsOrigin::Inline => info!("Custom instructions: inline"),
    }

    let batch = match sections::load_sections(&cli.json_file) {
        Ok(batch) => batch,
        Err(e) => {
            let what = if e.is_parse_error() {
                "invalid script"
            } else {
                "unreadable script"
            };
            error!("{what}: {:#}", Report::new(e));
            std::process::exit(FATAL_EXIT_CODE);
        }
    };
    if !batch.skipped.is_empty() {
        info!(
            "{} of {} section(s) skipped as invalid",
            batch.skipped.len(),
            batch.sections.len() + batch.skipped.len()
        );
    }

    let config = cli.run_config(instructions.text);
    let speech = OpenAiSpeech::from_env();
    synth::run_sections(&batch.sections, &config, &speech, ".");

    Ok(())
}
