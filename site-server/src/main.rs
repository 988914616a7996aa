use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod test_support;

use application::auth_service::hash_password;
use data::blob_store::DynBlobStore;
use data::post_repository::DynPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use data::repositories::s3::blob_store::S3BlobStore;
use data::user_repository::{DynUserRepository, NewUser};
use domain::user::CreateUserRequest;
use infrastructure::blob::create_s3_client;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[derive(Debug, Parser)]
#[command(name = "site-server", version, about = "Nonprofit site with blog and admin panel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Give every post without a slug one derived from its title.
    MigrateSlugs,
    /// Create an admin account.
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        display_name: String,
        #[arg(long, default_value = "admin")]
        role: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let posts: DynPostRepository = Arc::new(PostgresPostRepository::new(pool.clone()));
    let users: DynUserRepository = Arc::new(PostgresUserRepository::new(pool));
    let s3 = create_s3_client(&settings.blob).await;
    let blobs: DynBlobStore = Arc::new(S3BlobStore::new(
        s3,
        settings.blob.bucket.clone(),
        settings.blob.public_base_url.clone(),
    ));
    let jwt = Arc::new(JwtService::new(&settings.auth_secret)?);

    let state = AppState::new(posts, users, blobs, jwt, settings.secure_cookies);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let backfilled = state.blog_service.backfill_slugs().await?;
            info!(backfilled, "startup slug backfill done");
            server::run_http(&settings, state).await?;
        }
        Command::MigrateSlugs => {
            let updated = state.blog_service.backfill_slugs().await?;
            println!("Updated {updated} post(s) with slugs.");
        }
        Command::CreateAdmin {
            username,
            display_name,
            role,
            password,
        } => {
            let req = CreateUserRequest {
                username,
                display_name,
                role,
                password,
            }
            .validate()?;
            let password_hash = hash_password(&req.password)?;
            state
                .user_service
                .create(NewUser {
                    username: req.username.clone(),
                    display_name: req.display_name,
                    role: req.role,
                    password_hash,
                })
                .await
                .with_context(|| format!("failed to create admin '{}'", req.username))?;
            println!("Created admin '{}'.", req.username);
        }
    }

    Ok(())
}
