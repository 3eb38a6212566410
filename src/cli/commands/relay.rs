use crate::verifier::{DEFAULT_MAX_BODY_BYTES, latency::DEFAULT_MIN_LATENCY};
use clap::{Arg, Command};
use once_cell::sync::Lazy;

pub const ARG_MIN_LATENCY_MS: &str = "min-latency-ms";
pub const ARG_MAX_BODY_BYTES: &str = "max-body-bytes";

static DEFAULT_MIN_LATENCY_MS: Lazy<String> =
    Lazy::new(|| DEFAULT_MIN_LATENCY.as_millis().to_string());
static DEFAULT_MAX_BODY: Lazy<String> = Lazy::new(|| DEFAULT_MAX_BODY_BYTES.to_string());

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_MIN_LATENCY_MS)
                .long(ARG_MIN_LATENCY_MS)
                .help("Minimum response time for every verification, in milliseconds")
                .long_help(
                    "Minimum response time for every verification, in milliseconds. Keep it above the fastest \
                     verification outcome (a malformed hash) for the Argon2 work factor in use, and re-tune it \
                     whenever that work factor changes.",
                )
                .env("ARIA_MIN_LATENCY_MS")
                .default_value(DEFAULT_MIN_LATENCY_MS.as_str())
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_MAX_BODY_BYTES)
                .long(ARG_MAX_BODY_BYTES)
                .help("Maximum accepted request body size in bytes")
                .env("ARIA_MAX_BODY_BYTES")
                .default_value(DEFAULT_MAX_BODY.as_str())
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_relay_constants() {
        temp_env::with_vars_unset(["ARIA_MIN_LATENCY_MS", "ARIA_MAX_BODY_BYTES"], || {
            let matches = with_args(Command::new("relay")).get_matches_from(["relay"]);
            assert_eq!(
                matches.get_one::<u64>(ARG_MIN_LATENCY_MS).copied(),
                u64::try_from(DEFAULT_MIN_LATENCY.as_millis()).ok()
            );
            assert_eq!(
                matches
                    .get_one::<u64>(ARG_MAX_BODY_BYTES)
                    .and_then(|value| usize::try_from(*value).ok()),
                Some(DEFAULT_MAX_BODY_BYTES)
            );
        });
    }
}
