pub mod config;
pub mod logging;

// Pipeline modules
pub mod fetch;
pub mod matcher;
pub mod pipeline;
