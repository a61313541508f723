use clap::{builder::PossibleValuesParser, Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_FORM: &str = "form";
pub const ARG_FORMAT: &str = "format";

/// Where the JSON form description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSource {
    Stdin,
    Path(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub source: FormSource,
    pub format: Format,
}

impl Options {
    /// Parse input arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the form path is blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let source = match matches.get_one::<String>(ARG_FORM).map(|v| v.trim()) {
            None | Some("-") => FormSource::Stdin,
            Some("") => anyhow::bail!("missing required argument: --{ARG_FORM}"),
            Some(path) => FormSource::Path(PathBuf::from(path)),
        };

        let format = match matches.get_one::<String>(ARG_FORMAT).map(String::as_str) {
            Some("json") => Format::Json,
            _ => Format::Text,
        };

        Ok(Self { source, format })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FORM)
                .short('f')
                .long(ARG_FORM)
                .help("Path to a JSON form description, '-' reads stdin")
                .env("PERMESI_FORMS_INPUT")
                .default_value("-"),
        )
        .arg(
            Arg::new(ARG_FORMAT)
                .long(ARG_FORMAT)
                .help("Report format")
                .env("PERMESI_FORMS_FORMAT")
                .value_parser(PossibleValuesParser::new(["text", "json"]))
                .default_value("text"),
        )
}
