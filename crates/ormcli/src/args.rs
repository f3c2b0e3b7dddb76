//! Argument-combination guards for commands built on derived options.
//!
//! Useful when a command accepts several alternative selectors (say, a
//! primary key or a name) and exactly one, or at most one, of them must
//! be given.

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::error::{CliError, CliResult};

/// Count how many of `ids` the user actually provided on the command
/// line. Defaulted values do not count.
///
/// Panics if an id was never defined on the command, mirroring clap's
/// own lookup behavior.
fn count_provided(matches: &ArgMatches, ids: &[&str]) -> usize {
    ids.iter()
        .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .count()
}

/// Require exactly one of `ids` to be provided.
pub fn one_and_only_one(matches: &ArgMatches, ids: &[&str]) -> CliResult<()> {
    if count_provided(matches, ids) != 1 {
        return Err(CliError::Usage(format!(
            "One and only one of these options can be provided at a time: {ids:?}"
        )));
    }
    Ok(())
}

/// Allow at most one of `ids` to be provided (a mutually exclusive
/// group).
pub fn max_one(matches: &ArgMatches, ids: &[&str]) -> CliResult<()> {
    if count_provided(matches, ids) > 1 {
        return Err(CliError::Usage(format!(
            "At most one of these options can be provided at a time: {ids:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};

    fn matches(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .no_binary_name(true)
            .arg(Arg::new("pk").long("pk"))
            .arg(Arg::new("name").long("name"))
            .arg(Arg::new("all").long("all").action(ArgAction::SetTrue))
            .arg(Arg::new("limit").long("limit").default_value("10"))
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn one_and_only_one_accepts_exactly_one() {
        assert!(one_and_only_one(&matches(&["--pk", "1"]), &["pk", "name"]).is_ok());
        assert!(one_and_only_one(&matches(&["--all"]), &["pk", "all"]).is_ok());
    }

    #[test]
    fn one_and_only_one_rejects_none_and_several() {
        let err = one_and_only_one(&matches(&[]), &["pk", "name"]).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("pk"));
        assert!(err.to_string().contains("name"));

        let provided = matches(&["--pk", "1", "--name", "x"]);
        assert!(one_and_only_one(&provided, &["pk", "name"]).is_err());
    }

    #[test]
    fn max_one_allows_zero_or_one() {
        assert!(max_one(&matches(&[]), &["pk", "name"]).is_ok());
        assert!(max_one(&matches(&["--name", "x"]), &["pk", "name"]).is_ok());

        let provided = matches(&["--pk", "1", "--all"]);
        let err = max_one(&provided, &["pk", "all"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn defaulted_values_do_not_count_as_provided() {
        // --limit always has a value, but only via its default.
        assert!(one_and_only_one(&matches(&["--pk", "1"]), &["pk", "limit"]).is_ok());
        assert!(max_one(&matches(&["--pk", "1"]), &["pk", "limit"]).is_ok());
    }
}
