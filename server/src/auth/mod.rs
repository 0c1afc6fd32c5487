//! Authentication module.
//!
//! This module provides password verification, session token minting and
//! verification, and the login flow that ties them together.
//!
//! # Pre-conditions
//! - The signing key must be configured before any token is minted.
//!
//! # Post-conditions
//! - Issued tokens carry the principal's username and an expiry.
//!
//! # Invariants
//! - Unknown usernames and wrong passwords are indistinguishable to callers.
//! - Token validity depends only on the signature and the expiry; no
//!   server-side session state exists.

pub mod password;
pub mod session;
pub mod token;

pub use session::{IssueError, SessionIssuer};
pub use token::{SigningKey, TokenError, mint_token, verify_token};
