//! Internal representation of the conversation.
//!
//! These types are independent of any provider's wire format; providers
//! convert to and from them (see `providers::utils`).
pub mod content;
pub mod message;
pub mod tool;
