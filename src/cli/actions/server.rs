use crate::{
    cli::globals::GlobalArgs,
    verifier::{self, RelayState, latency::LatencyFloor, password::VerificationService},
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub latency_floor: LatencyFloor,
    pub max_body_bytes: usize,
    pub globals: GlobalArgs,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the signing keys cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    if args.globals.secrets_identical() {
        warn!("Request and response secrets are identical; use a distinct secret per direction");
    }

    let state = Arc::new(RelayState::new(
        args.globals.signing_keys()?,
        VerificationService::default(),
        args.latency_floor,
    ));

    verifier::new(args.port, state, args.max_body_bytes).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        (
            "min_latency_ms",
            args.latency_floor.duration().as_millis().to_string(),
        ),
        ("max_body_bytes", args.max_body_bytes.to_string()),
        ("request_secret", "set".to_string()),
        ("response_secret", "set".to_string()),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    trimmed.chars().take(7).collect()
}

const BANNER: &str = r"
    /\
   /  \
  / /\ \
 / ____ \   A R I A   V E R I F I E R {VERSION}
/_/    \_\";
