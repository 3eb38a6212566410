use crate::cli::{
    actions::{Action, server::Args},
    commands::{relay, secrets},
    globals::GlobalArgs,
};
use crate::verifier::latency::LatencyFloor;
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or out of range.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let request_secret = matches
        .get_one::<String>(secrets::ARG_REQUEST_SECRET)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --request-secret")?;
    let response_secret = matches
        .get_one::<String>(secrets::ARG_RESPONSE_SECRET)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --response-secret")?;

    let min_latency_ms = matches
        .get_one::<u64>(relay::ARG_MIN_LATENCY_MS)
        .copied()
        .context("missing argument: --min-latency-ms")?;
    let max_body_bytes = matches
        .get_one::<u64>(relay::ARG_MAX_BODY_BYTES)
        .copied()
        .context("missing argument: --max-body-bytes")?;
    let max_body_bytes =
        usize::try_from(max_body_bytes).context("--max-body-bytes does not fit in memory")?;

    Ok(Action::Server(Args {
        port,
        latency_floor: LatencyFloor::from_millis(min_latency_ms),
        max_body_bytes,
        globals: GlobalArgs::new(request_secret, response_secret),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;
    use std::time::Duration;

    #[test]
    fn handler_builds_server_action() {
        temp_env::with_vars_unset(["ARIA_MAX_BODY_BYTES", "ARIA_MIN_LATENCY_MS"], || {
            let matches = commands::new().get_matches_from(vec![
                "aria-verifier",
                "--port",
                "9000",
                "--request-secret",
                "in",
                "--response-secret",
                "out",
                "--min-latency-ms",
                "300",
            ]);

            let Action::Server(args) = handler(&matches).unwrap();
            assert_eq!(args.port, 9000);
            assert_eq!(args.latency_floor.duration(), Duration::from_millis(300));
            assert_eq!(args.max_body_bytes, 65536);
            assert_eq!(args.globals.request_secret.expose_secret(), "in");
            assert_eq!(args.globals.response_secret.expose_secret(), "out");
        });
    }
}
