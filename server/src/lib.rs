// Life of a request:
// 1. HTTP request comes in
// 2. CORS / trace / timing middleware wrap it
// 3. For protected routes: bearer token verified, principal extracted
// 4. Handler runs (login: credential lookup, password check, token mint)
// 5. Response goes out with the elapsed-time header attached
//
// System components:
//  - Credential store (SQLite via sqlx)
//  - Session issuer / token verifier (HS256 JWTs)
//  - Axum router + middleware stack

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod auth;
pub mod config;
pub mod store;

mod e2e_tests;
#[cfg(test)]
mod testing;

pub use api::{AppState, create_router};
