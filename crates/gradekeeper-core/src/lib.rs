//! gradekeeper-core: grade aggregation engine, data model, and parsing.
//!
//! The engine modules (`scale`, `selection`, `component`, `course`, `block`)
//! are pure functions over immutable entity snapshots. Everything that touches
//! the filesystem lives in `parser`, `config`, and `report`.

pub mod block;
pub mod component;
pub mod config;
pub mod course;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scale;
pub mod selection;
