//! Integration tests for lutforge crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the grading pipeline, the analysis adapter, and the `.cube`
//! codec.
