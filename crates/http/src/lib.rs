//! Critique HTTP layer
//!
//! Session model and auth provider seam shared by the front-end, plus the
//! bearer-token API client that retries once after refreshing an expired
//! session.

#[macro_use]
extern crate tracing;

pub mod auth;
pub mod client;

pub use auth::{
    AuthError, MemorySessionStore, Session, SessionProvider, SessionStore, SupabaseAuth,
    SupabaseConfig,
};
pub use client::{decode, error::ClientError, ApiClient, ApiClientBuilder, RequestOptions};
