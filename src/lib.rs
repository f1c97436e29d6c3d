// Public API for integration tests and potential library usage

pub mod api;
pub mod config;
pub mod corpus;
pub mod housekeeping;
pub mod liveness;
pub mod protocol;
pub mod state;
pub mod types;
