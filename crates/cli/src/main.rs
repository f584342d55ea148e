//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.
//! - `token`   — print a signed bearer token.
//!
//! Every flag can also come from the environment; a `.env` file in the
//! working directory is loaded first.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use db::pool::{create_pool, run_migrations};
use db::PoolConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobly", about = "Companies and jobs REST API", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    #[arg(long, env = "JOBLY_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

impl DatabaseArgs {
    fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(&self.database_url, self.max_connections)
    }
}

#[derive(Args)]
struct TokenArgs {
    /// HS256 signing secret.
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: String,
    /// Lifetime of issued tokens.
    #[arg(long, env = "JOBLY_TOKEN_TTL_SECS", default_value_t = 86_400)]
    token_ttl_secs: i64,
}

impl TokenArgs {
    fn keys(&self) -> auth::TokenKeys {
        auth::TokenKeys::from_secret(self.secret_key.as_bytes(), self.token_ttl_secs)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "JOBLY_BIND", default_value = "0.0.0.0:3001")]
        bind: String,
        /// Apply pending migrations before serving.
        #[arg(long)]
        migrate: bool,
        #[command(flatten)]
        database: DatabaseArgs,
        #[command(flatten)]
        tokens: TokenArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Print a signed token for `username`.
    Token {
        username: String,
        /// Grant admin rights (required for writes).
        #[arg(long)]
        admin: bool,
        #[command(flatten)]
        tokens: TokenArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, migrate, database, tokens } => {
            let pool = create_pool(&database.pool_config())
                .await
                .context("failed to connect to database")?;
            if migrate {
                run_migrations(&pool).await.context("migration failed")?;
            }
            info!("Starting API server on {bind}");
            api::serve(&bind, api::AppState::new(pool, tokens.keys()))
                .await
                .context("API server failed")?;
        }
        Command::Migrate { database } => {
            let mut config = database.pool_config();
            config.max_connections = 2;
            let pool = create_pool(&config)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Token { username, admin, tokens } => {
            let token = tokens.keys().issue(&username, admin)?;
            println!("{token}");
        }
    }

    Ok(())
}
