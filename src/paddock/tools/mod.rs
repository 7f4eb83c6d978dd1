pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod io;
pub mod model;
pub mod validate;

pub use error::{Result, ToolError};
