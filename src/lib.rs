//! Privacy threat simulation for an exposure-notification key exchange.
//!
//! Models how a passive observer co-located with users — on an office or
//! campus network, say — can deanonymize an otherwise pseudonymous
//! health-status signal. Devices upload short-lived temporary exposure
//! keys; the observer records which source address each key left from;
//! when a key is later republished in the public diagnosis-key feed
//! without batching or shuffling, the observer links it straight back to
//! the sender.
//!
//! The pipeline under test, in dependency order:
//!
//! 1. [`keys::KeyGenerator`] — unlinkable 16-byte ephemeral keys.
//! 2. [`channel::PublicationChannel`] — the client's daily upload.
//! 3. [`interceptor::Interceptor`] — passive capture into a durable
//!    key-to-identity log.
//! 4. [`publication::KeyPublicationService`] — diagnosis-key release,
//!    currently a byte-for-byte identity transform (the vulnerability).
//! 5. [`matcher::Matcher`] — lookup of a published key in the log.
//!
//! Successful resolution is the finding this crate exists to demonstrate,
//! not a malfunction. No defense mechanism is modeled.

#![forbid(unsafe_code)]

pub mod channel;
pub mod identity;
pub mod interceptor;
pub mod keys;
pub mod matcher;
pub mod publication;
pub mod scenario;
