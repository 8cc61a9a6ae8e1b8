// quickpoll-api: Async Rust client for the QuickPoll service HTTP API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::AuthContext;
pub use client::PollClient;
pub use error::Error;
pub use transport::TransportConfig;
