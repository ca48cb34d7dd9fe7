//! CLI command implementations

pub mod ask;
pub mod example;
pub mod schema;

pub use ask::run_ask;
pub use example::run_example;
pub use schema::run_schema;
