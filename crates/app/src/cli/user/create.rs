use clap::{Args, ValueEnum};
use vitrine_app::auth::{Credentials, PgAuthService, SessionPolicy, UserRole};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Self::User,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "VITRINE_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Account role
    #[arg(long, value_enum, default_value = "user")]
    role: RoleArg,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let service = PgAuthService::new(db, SessionPolicy::default());

    let user = service
        .create_user(
            Credentials {
                email: args.email,
                password: args.password,
            },
            args.role.into(),
        )
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
