//! tunefacts library interface
//!
//! Song fact lookup: query parsing, catalog search and disambiguation, credit
//! normalization, deterministic producer checks and grounded prompts.

pub mod bootstrap;
pub mod context;
pub mod disambiguator;
pub mod error;
pub mod fact_check;
pub mod models;
pub mod normalizer;
pub mod query_parser;
pub mod resolver;
pub mod scoring;
pub mod services;
pub mod shell;

pub use crate::error::ResolveError;
pub use crate::resolver::{Selection, SongResolver, TurnReply};
