//! Admin authentication for TrailCall.
//!
//! The attendance core has no notion of who is calling it. This crate guards
//! the admin surface: a [`PinVerifier`] checks the shared admin PIN against a
//! configured SHA-256 digest, and an [`InMemorySessionStore`] hands out
//! expiring bearer tokens once the PIN is accepted. [`AdminGate`] ties the two
//! together.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod gate;
mod pin;
mod session;

pub use gate::AdminGate;
pub use pin::{PinVerifier, hash_pin};
pub use session::InMemorySessionStore;
