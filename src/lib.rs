//! # keycanon
//!
//! Two independent helpers:
//!
//! - **Canonical key order**: recursively sort the object keys of a
//!   [`serde_json::Value`] so structurally equal data serializes identically,
//!   whatever the original insertion order.
//! - **RSA signatures**: generate 4096-bit RSA key pairs as PEM text, sign text
//!   with PKCS#1 v1.5 over a SHA-1 digest, and verify base64 signatures.
//!
//! ## Quick Start
//!
//! ```rust
//! use keycanon::canonicalize::{canonicalize, sort_keys};
//! use serde_json::json;
//!
//! let value = json!({ "b": [{ "z": 1, "y": 2 }], "a": null });
//! assert_eq!(canonicalize(&value), r#"{"a":null,"b":[{"y":2,"z":1}]}"#);
//! assert_eq!(sort_keys(&sort_keys(&value)), sort_keys(&value));
//! ```
//!
//! ```rust,no_run
//! use keycanon::crypto::{generate_key_pair, sign, verify};
//!
//! let key_pair = generate_key_pair().unwrap();
//! let signature = sign(&key_pair.private_key_pem, "hello world").unwrap();
//! verify(&key_pair.public_key_pem, "hello world", &signature).unwrap();
//! ```
//!
//! ## Compatibility
//!
//! The private key PEM block is labeled `RSA PRIVATE KEY` while its body is
//! PKCS#8, matching keys issued by earlier tooling. Use
//! [`core::PrivateKeyLabel::Pkcs8`] to write the standard `PRIVATE KEY` label.
//! Parsing accepts either label.
//!
//! SHA-1 is kept so existing signatures keep verifying.
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`error::Result`]; the [`error::Error`]
//! variants identify which step failed.

pub mod canonicalize;
pub mod core;
pub mod crypto;
pub mod error;

pub use crate::core::{KeyGenOptions, KeyPair, PrivateKeyLabel};
pub use crate::error::{Error, Result};
