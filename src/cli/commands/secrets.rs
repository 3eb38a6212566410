use clap::{Arg, Command, builder::NonEmptyStringValueParser};

pub const ARG_REQUEST_SECRET: &str = "request-secret";
pub const ARG_RESPONSE_SECRET: &str = "response-secret";

/// Both secrets are mandatory: without them the relay would run unauthenticated.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_REQUEST_SECRET)
                .long(ARG_REQUEST_SECRET)
                .help("HMAC secret used to verify X-Aria-Request-Sig on incoming requests")
                .env("ARIA_REQUEST_SECRET")
                .hide_env_values(true)
                .required(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new(ARG_RESPONSE_SECRET)
                .long(ARG_RESPONSE_SECRET)
                .help("HMAC secret used to sign X-Aria-Response-Sig on every response")
                .env("ARIA_RESPONSE_SECRET")
                .hide_env_values(true)
                .required(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
}
