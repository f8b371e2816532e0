//! # quill-ai: Generative-AI Text Helpers for Quill POS
//!
//! Best-effort text completions behind two features:
//!
//! - **Product descriptions** (inventory screen): short marketing copy for
//!   a product name, on the flash model tier.
//! - **Sales insights** (reports screen): three actionable observations
//!   over the serialized sales digest, on the pro model tier with a
//!   business-analyst system instruction.
//!
//! ## Contract
//! The public methods return plain strings, never errors:
//!
//! | Condition              | Returned string                  |
//! |------------------------|----------------------------------|
//! | No API key configured  | "AI service is not available."   |
//! | Transport/API failure  | "Failed to generate ..."         |
//! | Success                | the model's text                 |
//!
//! Failures are logged and swallowed here on purpose: these calls are
//! fire-and-forget decorations, and a failed completion must never block
//! or corrupt a billing operation.

pub mod client;
pub mod error;

pub use client::{
    AiClient, DESCRIPTION_FALLBACK, INSIGHTS_FALLBACK, UNAVAILABLE_FALLBACK,
};
pub use error::AiError;
