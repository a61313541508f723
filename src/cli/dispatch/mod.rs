//! Maps validated CLI arguments to an action.

use crate::cli::actions::{check::Args, Action};
use crate::cli::commands::{input, rules};
use anyhow::Result;

/// Map validated CLI matches to a check action.
///
/// # Errors
/// Returns an error if arguments are missing or the validation config is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let input_opts = input::Options::parse(matches)?;
    let rules_opts = rules::Options::parse(matches)?;

    Ok(Action::Check(Args {
        source: input_opts.source,
        format: input_opts.format,
        config: rules_opts.config,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{self, input::FormSource};

    #[test]
    fn handler_builds_check_action() {
        let matches = commands::new().get_matches_from(vec![
            "permesi-forms",
            "--form",
            "-",
            "--format",
            "text",
            "--min-password-length",
            "9",
        ]);

        let Action::Check(args) = handler(&matches).unwrap();
        assert_eq!(args.source, FormSource::Stdin);
        assert_eq!(args.config.min_password_length, 9);
    }
}
