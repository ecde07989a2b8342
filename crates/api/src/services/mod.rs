//! External service clients and domain services.

pub mod auth;
pub mod klarna;

pub use auth::AuthService;
pub use klarna::KlarnaClient;
