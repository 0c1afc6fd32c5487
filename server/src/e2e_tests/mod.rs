//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the full router
//! (middleware included) against a fresh credential store.

#![cfg(test)]

mod helpers;

mod test_cors;
mod test_health_endpoints;
mod test_login;
mod test_predict;
mod test_protected_hello;
mod test_seed_rotation;
mod test_timing_header;
mod test_token_expiry;
mod test_wrong_key;
