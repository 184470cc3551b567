// issue_token.rs
// Provision a user account and print a signed API token for it

use anyhow::{bail, Context};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{env, str::FromStr};

use company_api::auth::accounts::{find_or_create_user, issue_token};
use company_api::common::migrations::run_migrations;
use company_api::common::AppConfig;

const DEFAULT_TTL_HOURS: i64 = 24;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let mut args = env::args().skip(1);
    let Some(username) = args.next() else {
        bail!("usage: issue_token <username> [hours]");
    };
    let hours = match args.next() {
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|h| *h > 0)
            .with_context(|| format!("hours must be a positive integer, got '{}'", raw))?,
        None => DEFAULT_TTL_HOURS,
    };

    let config = AppConfig::from_env();
    if config.uses_default_secret() {
        eprintln!("warning: JWT_SECRET is not set, signing with the placeholder secret");
    }

    if let Some(parent) = config.sqlite_parent_dir() {
        tokio::fs::create_dir_all(&parent).await?;
    }
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;

    run_migrations(&pool, false).await?;

    let user = find_or_create_user(&pool, &username).await?;
    let token = issue_token(&config.jwt_secret, &user.id, chrono::Duration::hours(hours))?;
    pool.close().await;

    eprintln!("User {} ({}), token valid for {}h", user.username, user.id, hours);
    println!("{}", token);

    Ok(())
}
