use clap::Args;
use vitrine_app::auth::{PgAuthService, SessionPolicy};

#[derive(Debug, Args)]
pub(crate) struct PurgeSessionsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PurgeSessionsArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let purged = PgAuthService::new(db, SessionPolicy::default())
        .purge_expired_sessions()
        .await
        .map_err(|error| format!("failed to purge sessions: {error}"))?;

    println!("purged {purged} expired session(s)");

    Ok(())
}
