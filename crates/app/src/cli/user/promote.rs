use clap::Args;
use vitrine_app::auth::{PgAuthService, SessionPolicy};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email of the user to promote
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgAuthService::new(db, SessionPolicy::default())
        .promote_user(&args.email)
        .await
        .map_err(|error| format!("failed to promote {}: {error}", args.email))?;

    println!("{} is now {}", user.email, user.role);

    Ok(())
}
