//! Authentication Module
//! Mission: Register users, issue session tokens and revoke them on logout

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod revocation;
pub mod session;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use password::PasswordHasher;
pub use revocation::RevocationRegistry;
pub use session::{SessionError, SessionService};
pub use user_store::UserStore;
