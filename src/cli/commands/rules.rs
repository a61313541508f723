use crate::config::ValidationConfig;
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::fs;

pub const ARG_CONFIG: &str = "config";
pub const ARG_MIN_PASSWORD_LENGTH: &str = "min-password-length";

#[derive(Debug, Clone)]
pub struct Options {
    pub config: ValidationConfig,
}

impl Options {
    /// Build the validation config from an optional JSON file plus flag overrides.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or is invalid, or the
    /// minimum password length is zero.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let mut config = match matches.get_one::<String>(ARG_CONFIG) {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file: {path}"))?;
                ValidationConfig::from_json(&json)
                    .with_context(|| format!("invalid config file: {path}"))?
            }
            None => ValidationConfig::default(),
        };

        if let Some(length) = matches.get_one::<usize>(ARG_MIN_PASSWORD_LENGTH) {
            config = config
                .with_min_password_length(*length)
                .with_context(|| format!("invalid --{ARG_MIN_PASSWORD_LENGTH}"))?;
        }

        Ok(Self { config })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_CONFIG)
                .short('c')
                .long(ARG_CONFIG)
                .help("Path to a JSON validation config")
                .env("PERMESI_FORMS_CONFIG_FILE"),
        )
        .arg(
            Arg::new(ARG_MIN_PASSWORD_LENGTH)
                .long(ARG_MIN_PASSWORD_LENGTH)
                .help("Minimum password length (default: 8)")
                .env("PERMESI_FORMS_MIN_PASSWORD_LENGTH")
                .value_parser(clap::value_parser!(usize)),
        )
}
