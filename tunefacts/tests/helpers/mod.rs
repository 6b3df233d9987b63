//! Test Helper Utilities
//!
//! Scripted collaborators and catalog fixtures for pipeline tests

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

pub use fakes::{FakeCatalog, FakeGenerator, ScriptedPrompt, SearchCall};
pub use fixtures::{bohemian_rhapsody, candidate, skeletons};
