//! Core domain + relay logic for the proxy bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! `DeliverySink` port (trait) implemented in the adapter crate; the relay
//! engine and the correlation store know nothing about the wire protocol.

pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod logging;
pub mod ports;
pub mod relay;
pub mod store;

pub use errors::{Error, Result};
