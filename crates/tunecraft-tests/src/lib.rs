//! Tunecraft End-to-End Test Infrastructure
//!
//! This crate drives the HTTP API over real sockets and checks that audio
//! rendering and mock generation are reproducible:
//!
//! - **Serve**: start the server on an ephemeral port and exercise every route
//! - **Determinism**: verify byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tunecraft-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use tunecraft_tests::verify_determinism;
//!
//! let result = verify_determinism(|| synthesize_tone(&spec).unwrap().into_bytes(), 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod harness;

pub use determinism::{compute_hash, verify_determinism, DeterminismResult, DiffInfo};
pub use harness::{HttpResponse, TestServer};
