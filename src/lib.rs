//! Core library for the paddock-tools command line application.
//!
//! The library turns the championship database workbook into the JSON
//! documents consumed by the game's data layer. IO adapters live under
//! [`paddock::tools::io`], the in-memory sheet representation inside
//! [`paddock::tools::model`], column and season resolution in
//! [`paddock::tools::columns`], the per-entity normalisation in
//! [`paddock::tools::export`], and the run orchestration under
//! [`paddock::tools::ingest`]. [`paddock::tools::validate`] checks the
//! shape of the written documents.

pub mod paddock;

pub use paddock::tools::{
    Result, ToolError, columns, config, error, export, ingest, io, model, validate,
};
