//! Conference Client - REST access to conference orders
//!
//! Provides the HTTP implementation of the order-update collaborator used by
//! conference sessions.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{ConferenceFilter, ConferenceList, HttpClient};
