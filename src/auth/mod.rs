//! Authentication Module
//! Mission: Token-based authentication over a concurrent in-memory user store

pub mod api;
pub mod digest;
pub mod jwt;
pub mod keys;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use api::AuthState;
pub use jwt::JwtService;
pub use middleware::require_auth;
pub use user_store::UserStore;
