//! Common test utilities for REST API testing.
//!
//! - [`harness`] - test server over a seeded memory backend
//! - [`fixtures`] - material record fixtures
//! - [`assertions`] - HTTP response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod harness;
