//! Seeds the default account — the one every new signup auto-follows.
//! Idempotent: an existing account with the same username is left alone.

use anyhow::Context;
use auth_adapters::ArgonCredentialHasher;
use domains::flags;
use domains::ports::CredentialHasher;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not defined")?;
    let username = std::env::var("SEED_USERNAME").unwrap_or_else(|_| "chirp".to_string());
    let email =
        std::env::var("SEED_EMAIL").unwrap_or_else(|_| format!("{username}@chirp.invalid"));
    let password = std::env::var("SEED_PASSWORD").context("SEED_PASSWORD must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("connecting to postgres")?;
    storage_adapters::postgres::MIGRATOR
        .run(&pool)
        .await
        .context("running migrations")?;

    let password_hash = ArgonCredentialHasher::new()
        .hash(&password)
        .await
        .context("hashing seed password")?;

    let account_flags = flags::set(flags::OFFICIAL, flags::VERIFIED);
    let inserted = sqlx::query(
        "INSERT INTO users (username, email, password_hash, flags) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT DO NOTHING",
    )
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(account_flags)
    .execute(&pool)
    .await
    .context("inserting default account")?;

    if inserted.rows_affected() == 1 {
        println!("created default account '{username}'");
    } else {
        println!("default account '{username}' already present");
    }
    Ok(())
}
