//! lessonkit-core — Sequencing game engine and resource library aggregation.
//!
//! This crate defines the data model, the ordered-sequence game, the resource
//! library pipeline, and the TOML loaders that feed them.

pub mod config;
pub mod error;
pub mod game;
pub mod library;
pub mod model;
pub mod parser;
pub mod traits;
