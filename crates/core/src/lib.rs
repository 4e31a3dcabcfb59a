//! Core domain types and shared logic for the sortstash array service.
//!
//! This crate defines the canonical building blocks used across all other
//! crates:
//! - Application configuration
//! - Session token generation and at-rest hashing
//! - Integer sequence generation and storage encoding
//! - The Shell sort engine

pub mod config;
pub mod error;
pub mod sequence;
pub mod sort;
pub mod token;

pub use config::{AppConfig, AuthConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use sequence::{decode_elements, encode_elements, random_sequence};
pub use sort::shell_sort;
pub use token::{generate_token, hash_token};

/// Upper bound (exclusive) for randomly generated array values.
pub const RANDOM_VALUE_BOUND: i64 = 100;
