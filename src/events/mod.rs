//! Webhook event representation and routing.
//!
//! This module provides:
//! - `Envelope` - the normalized representation of one inbound webhook
//!   delivery, with path-addressable payload lookup
//! - `EventRouter` - the `(type, action)` demultiplexer that fans one
//!   envelope out to all registered handlers

pub mod envelope;
pub mod router;

pub use envelope::{Envelope, MissingField};
pub use router::{DispatchReport, EventContext, EventHandler, EventRouter, HandlerError};
