pub mod conversation;
pub mod errors;
pub mod providers;
pub mod schema;
pub mod tools;
