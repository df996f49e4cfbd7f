pub mod anthropic;
pub mod base;
