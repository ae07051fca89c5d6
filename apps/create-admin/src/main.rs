//! Administrative bootstrap: creates a user with the `admin` role.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tracing_subscriber::EnvFilter;

use quill_core::services::AuthGateway;
use quill_infra::database::connect;
use quill_infra::{Argon2PasswordService, DatabaseConfig, JwtTokenService, PostgresStore};

/// Create an administrator account in the configured database.
#[derive(Debug, Parser)]
#[command(name = "create-admin", version, about)]
struct Cli {
    /// Username of the new administrator
    #[arg(
        short,
        long,
        env = "ADMIN_USERNAME",
        default_value = "admin",
        value_parser = NonEmptyStringValueParser::new()
    )]
    username: String,

    /// Password of the new administrator
    #[arg(
        short,
        long,
        env = "ADMIN_PASSWORD",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let db = connect(&DatabaseConfig {
        url: cli.database_url,
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .context("failed to connect to the database")?;

    let auth = AuthGateway::new(
        Arc::new(PostgresStore::new(db)),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(JwtTokenService::from_env()),
    );

    let user = auth
        .create_admin(&cli.username, &cli.password)
        .await
        .with_context(|| format!("failed to create admin '{}'", cli.username))?;

    println!("Created admin: {} {}", user.id, user.username);
    Ok(())
}
