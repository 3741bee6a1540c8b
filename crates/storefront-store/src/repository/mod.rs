//! # Repository Pattern
//!
//! SQL lives here and nowhere else.
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - String key to JSON value storage

pub mod kv;
