use clap::{Parser, Subcommand};
use vitrine_app::database::{self, Db};

mod db;
mod session;
mod user;

#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Vitrine admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Session(session::SessionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Session(command) => session::run(command).await,
        }
    }
}

/// Connect using a CLI-supplied URL.
async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_user_create_with_role() {
        let cli = Cli::try_parse_from([
            "vitrine-app",
            "user",
            "create",
            "--database-url",
            "postgres://localhost/vitrine",
            "--email",
            "ada@example.com",
            "--password",
            "secret-password",
            "--role",
            "admin",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn rejects_unknown_role() {
        let cli = Cli::try_parse_from([
            "vitrine-app",
            "user",
            "create",
            "--database-url",
            "postgres://localhost/vitrine",
            "--email",
            "ada@example.com",
            "--password",
            "secret-password",
            "--role",
            "root",
        ]);

        assert!(cli.is_err());
    }
}
