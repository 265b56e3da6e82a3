//! `t2t targets` command implementation.

use std::path::PathBuf;

use clap::Args;
use t2t_config::{Config, Target};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the targets command.
#[derive(Args)]
pub(crate) struct TargetsArgs {
    /// Path to configuration file (default: auto-discover t2t.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TargetsArgs {
    /// List every target with the file extension it writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        if let Some(line) = config_line(&config) {
            output.info(&line);
        }
        output.highlight("Supported targets:");
        for line in target_lines(&config) {
            output.info(&line);
        }
        Ok(())
    }
}

/// Which `t2t.toml` the extensions came from, if any.
fn config_line(config: &Config) -> Option<String> {
    config
        .config_path
        .as_ref()
        .map(|path| format!("Config: {}", path.display()))
}

fn target_lines(config: &Config) -> Vec<String> {
    Target::ALL
        .into_iter()
        .map(|target| {
            let marker = if target == config.convert.target {
                " (default)"
            } else {
                ""
            };
            format!("  {target:<6} .{}{marker}", config.extension(target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_line() {
        let mut config = Config::default();
        assert_eq!(config_line(&config), None);

        config.config_path = Some(PathBuf::from("/project/t2t.toml"));
        assert_eq!(config_line(&config).as_deref(), Some("Config: /project/t2t.toml"));
    }

    #[test]
    fn test_target_lines_default_config() {
        assert_eq!(
            target_lines(&Config::default()),
            vec![
                "  html   .html (default)",
                "  man    .1",
                "  wiki   .wiki",
            ]
        );
    }
}
