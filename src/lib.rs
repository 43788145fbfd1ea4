//! A Rust implementation of RFC 4122 Universally Unique IDentifiers
//!
//! ```rust
//! use rfc4122::{Uuid, V5};
//!
//! let uuid = rfc4122::uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = rfc4122::uuid1();
//! println!("{}", uuid); // e.g. "3343a72a-4771-11ee-8001-00b0d063c226"
//!
//! let uuid = V5::create(Uuid::NAMESPACE_DNS, "www.example.com");
//! assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Parsing
//!
//! [`Uuid::parse`] accepts the canonical `8-4-4-4-12` form as well as any other hyphenation or
//! letter case, and classifies the result by its version:
//!
//! ```rust
//! use rfc4122::{ParseError, Uuid, V4};
//!
//! let x: Uuid = "FA06067F602D404AA34C45C6A7744011".parse()?;
//! assert!(matches!(x, Uuid::V4(_)));
//! assert_eq!(x.to_string(), "fa06067f-602d-404a-a34c-45c6a7744011");
//!
//! assert_eq!(
//!     V4::parse("00000000-0000-0000-0000-000000000000"),
//!     Err(ParseError::VersionMismatch { expected: 4 })
//! );
//! # Ok::<(), ParseError>(())
//! ```
//!
//! # Versions
//!
//! - [`V1`]: Gregorian timestamp, clock sequence, and node; see [`v1`] and [`node`].
//! - [`V3`] and [`V5`]: MD5 and SHA-1 hashes of a namespace UUID and a name.
//! - [`V4`]: 122 random bits.
//! - [`Uuid::NIL`] and [`Uuid::MAX`]: the all-zero and all-one special values.
//!
//! The generators take their random numbers, clock, and node from the caller through the
//! [`source::RandSource`], [`source::TimeSource`], and [`node::NodeProvider`] traits. The
//! [`uuid1`] and [`uuid4`] functions wrap them around a process-wide state.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: Enables the process-wide state and the [`uuid1`] and [`uuid4`] functions.
//!
//! Optional features:
//!
//! - `serde`: Enables serialization/deserialization of UUIDs, as strings in human-readable
//!   formats and as 16-byte arrays in others.
//! - `uuid`: Enables conversions between this crate's types and `uuid::Uuid`.
//!
//! # Logging
//!
//! The node and clock sequence logic emits [`tracing`] events at the `warn`, `debug`, and `trace` levels;
//! no subscriber is installed by this crate.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bytes;
pub use bytes::ByteBuf;

mod error;
pub use error::{InputError, ParseError, RangeError};

mod uuid;
pub use uuid::{Unknown, Uuid, Variant, V1, V3, V4, V5};

pub mod node;
pub mod source;
pub mod v1;

mod v3;
mod v4;
mod v5;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid4};
