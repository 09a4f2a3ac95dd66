//! Facebook Graph API access
//!
//! `FacebookClient` exposes one method per tool. Every method builds a single
//! `GraphRequest` and hands it to a `GraphTransport`, which is the only place
//! that touches the network.

pub mod client;
pub mod credential;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use client::FacebookClient;
pub use credential::{Credential, ACCESS_TOKEN_KEY};
pub use transport::{GraphTransport, HttpTransport};
