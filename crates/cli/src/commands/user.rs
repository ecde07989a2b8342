//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular user
//! mealkit-cli user create -e user@example.com -p <password>
//!
//! # Create an admin
//! mealkit-cli user create -e admin@example.com -p <password> --admin
//! ```
//!
//! # Environment Variables
//!
//! - `MEALKIT_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

use mealkit_api::services::auth::AuthService;

use super::CommandError;

/// Create a new user and print a one-time bearer token.
///
/// The raw token is printed exactly once; only its hash is stored, so it
/// cannot be recovered later.
///
/// # Errors
///
/// Returns an error if the email or password is rejected, the account
/// already exists, or a database operation fails.
pub async fn create(email: &str, password: &str, admin: bool) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let auth = AuthService::new(&pool);

    tracing::info!("Creating user: {} (admin: {})", email, admin);
    let user = auth.register(email, password, admin).await?;
    let token = auth.issue_token(&user).await?;

    tracing::info!("User created successfully! ID: {}", user.id);

    #[allow(clippy::print_stdout)]
    {
        println!("Bearer token (store this now, it will not be shown again):");
        println!("  {token}");
    }

    Ok(())
}
