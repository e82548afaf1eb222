use clap::CommandFactory;
use crate::commands;

/// Prunes GraphQL queries down to what a JSON cache snapshot cannot answer.
#[derive(clap::Parser, Debug)]
#[command(name = "graphql-prune", version)]
pub(crate) struct Cli {
    /// With no subcommand, the help text is printed.
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Log pruning decisions at debug level (overrides `LOG_LEVEL`).",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
