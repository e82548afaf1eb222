mod prune;

use crate::Cli;
use crate::CommandResult;
use prune::PruneCmd;

/// Subcommands of `graphql-prune`. Each one reports through a
/// [`CommandResult`] so `main` can print it and pick the exit code.
#[derive(Debug, clap::Parser)]
#[command(name = "graphql-prune")]
pub(crate) enum CommandEnum {
    /// Print the part of each query that the cache snapshot cannot satisfy.
    Prune(Box<PruneCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Prune(cmd) => cmd.run(cli).await,
        }
    }
}
