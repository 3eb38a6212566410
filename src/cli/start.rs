use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;
use clap::ArgMatches;
use tracing::Level;

// -v, -vv, -vvv, -vvvv and beyond
const LEVELS: [Level; 4] = [Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];

/// Parse arguments, initialize telemetry and build the action to run.
///
/// Missing secrets make clap exit with a usage error here, before any socket is bound.
///
/// # Errors
///
/// Returns an error if telemetry initialization or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(verbosity_level(&matches))?;

    dispatch::handler(&matches)
}

/// `None` leaves the subscriber at its ERROR default.
fn verbosity_level(matches: &ArgMatches) -> Option<Level> {
    let count = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .unwrap_or(0);
    level_for(count)
}

fn level_for(count: u8) -> Option<Level> {
    let index = usize::from(count.checked_sub(1)?);
    LEVELS.get(index.min(LEVELS.len() - 1)).copied()
}
