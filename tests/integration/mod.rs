//! Integration tests for the numeq-rs library
//!
//! This module organizes all integration tests that test the library as a whole,
//! rather than individual components.

// A numerical routine checked end to end
pub mod analysis_workflow;

// Configuration files and the configured comparer
pub mod configured_suite;
