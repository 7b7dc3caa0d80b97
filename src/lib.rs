//! VoiceLegal Server Library
//!
//! Thin HTTP backend that extracts text from uploaded PDFs, sends it to a
//! hosted model for legal-risk analysis, and relays results between the
//! browser extension, the dashboard, and the voice-assistant webhook.
//!
//! # Modules
//!
//! - `store`: expiring hand-off store and document registry
//! - `extract`: PDF text extraction via MuPDF
//! - `analysis`: hosted-model analysis with a deterministic fallback
//! - `routes`: the HTTP surface
//!
//! The server binary is in main.rs; everything is exposed here so the router
//! can be exercised in tests without binding a socket.

pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod store;
