pub mod server;

mod run;

/// What the binary was asked to do once arguments are parsed.
#[derive(Debug)]
pub enum Action {
    /// Serve the verification relay until shutdown.
    Server(server::Args),
}

impl Action {
    /// # Errors
    /// Returns an error if the relay cannot start or stops with a failure.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
