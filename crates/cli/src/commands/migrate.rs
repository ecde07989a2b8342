//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mealkit-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MEALKIT_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

use super::CommandError;

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns an error if the connection fails or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
