//! Outbound HTTP plumbing shared by everything that talks to third parties.

pub mod client;

pub use client::build_http_client;
