//! `t2t convert` command implementation.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use t2t_config::{CliSettings, Config, Target};
use t2t_engine::{HtmlBackend, LineProcessor, ManBackend, TargetBackend, WikiBackend};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Input files (default: read stdin).
    inputs: Vec<PathBuf>,

    /// Output format: html, man or wiki (overrides config).
    #[arg(short, long, env = "T2T_TARGET")]
    target: Option<Target>,

    /// Write one file per input into this directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover t2t.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or an input or output file
    /// cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            target: self.target,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let target = config.convert.target;

        tracing::info!(%target, inputs = self.inputs.len(), "Converting");

        if self.inputs.is_empty() {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(convert(target, &text).as_bytes())?;
            stdout.flush()?;
            return Ok(());
        }

        if let Some(dir) = &config.output_dir {
            std::fs::create_dir_all(dir).map_err(CliError::file(dir))?;
            let extension = config.extension(target);
            for input in &self.inputs {
                let written = convert_file(target, input, dir, &extension)?;
                output.success(&format!("Wrote {}", written.display()));
            }
            return Ok(());
        }

        let mut stdout = std::io::stdout().lock();
        for input in &self.inputs {
            let text = std::fs::read_to_string(input).map_err(CliError::file(input))?;
            stdout.write_all(convert(target, &text).as_bytes())?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Convert a whole document with a fresh driver for `target`.
pub(crate) fn convert(target: Target, text: &str) -> String {
    match target {
        Target::Html => render(HtmlBackend::new(), text),
        Target::Man => render(ManBackend::new(), text),
        Target::Wiki => render(WikiBackend::new(), text),
    }
}

fn render<B: TargetBackend>(backend: B, text: &str) -> String {
    LineProcessor::new(backend).process_text(text)
}

/// Convert `input` into `dir`, returning the written path.
fn convert_file(
    target: Target,
    input: &Path,
    dir: &Path,
    extension: &str,
) -> Result<PathBuf, CliError> {
    let text = std::fs::read_to_string(input).map_err(CliError::file(input))?;
    let path = output_path(dir, input, extension);
    std::fs::write(&path, convert(target, &text)).map_err(CliError::file(&path))?;
    tracing::debug!(input = %input.display(), output = %path.display(), "Converted file");
    Ok(path)
}

/// `<dir>/<input stem>.<extension>`.
fn output_path(dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map_or_else(|| OsString::from("output"), OsString::from);
    name.push(".");
    name.push(extension);
    dir.join(name)
}
