use clap::{Args, Subcommand};

mod purge;

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Delete expired sessions
    Purge(purge::PurgeSessionsArgs),
}

pub(crate) async fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Purge(args) => purge::run(args).await,
    }
}
