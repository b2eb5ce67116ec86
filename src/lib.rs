//! # numeq-rs
//!
//! `numeq-rs` is a Rust library of tolerance-based comparers for testing
//! numerical code: scalars, complex numbers, arrays, named matrices, index
//! partitions, categorical data, order-insensitive collections, object state
//! and random samples.
//!
//! The library provides:
//! - `check_*` comparers that return a [`ComparisonError`] describing the first
//!   difference found
//! - Panicking `assert_*` helpers and macros for use inside `#[test]`
//! - A [`MatrixLike`] abstraction over `ndarray`, `nalgebra` and `faer`
//!   matrices, plus dense, sparse and view matrices with row/column names
//! - Chi-square and Kolmogorov-Smirnov goodness-of-fit checks for samplers
//!
//! ## Basic Usage
//!
//! ```
//! use ndarray::array;
//! use numeq_rs::matrix::{check_matrices, DenseMatrix};
//! use numeq_rs::scalar::check_scalar;
//!
//! assert!(check_scalar(&0.3, &(0.1 + 0.2), 1e-10).is_ok());
//!
//! let expected = array![[1.0, 2.0], [3.0, 4.0]];
//! let actual = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0 + 1e-12]]).unwrap();
//! assert!(check_matrices(Some(&expected), Some(&actual), 1e-10).is_ok());
//! ```

// Public modules
pub mod error;

// Comparers
pub mod array;
pub mod categorical;
pub mod decomposition;
pub mod matcher;
pub mod matrix;
pub mod partition;
pub mod scalar;

// Object state and samplers
pub mod inspect;
pub mod stats;

// Configuration and assertions
pub mod assert;
pub mod config;

// Re-exports for convenience
pub use config::{Comparer, ComparisonConfig};
pub use error::{ComparisonError, Result};
pub use inspect::{Inspect, StateSnapshot};
pub use matrix::{DenseMatrix, MatrixLike, MatrixView, SparseMatrix};
pub use partition::{IndexCollection, IndexPartition, PartitionMode};
pub use scalar::{ApproxEq, Tolerance};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
