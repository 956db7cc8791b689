// SPDX-License-Identifier: Apache-2.0
//! Registry-driven codec for flattened tagged unions.
//!
//! A closed set of concrete variants of one base type is encoded to and
//! decoded from a single object whose discriminant field identifies the
//! variant, with the variant's own fields written as siblings of the
//! discriminant rather than nested under it:
//!
//! ```text
//! { "step_type": "group", "name": "warmup", "loops": 2 }
//! ```
//!
//! Configuration is a persistent, immutable [`TagRegistry`]; the runtime
//! [`PolyCodec`] it builds scans for the discriminant through an isolated
//! lookahead branch, dispatches to the matching [`VariantCodec`], and on
//! encode writes the discriminant first before flattening the variant's
//! fields into the same object.
//!
//! For best performance the discriminant should be the first field in the
//! object; otherwise the whole object is rescanned from the start once the
//! variant is known.
//!
//! # Design
//!
//! Dispatch and configuration are deliberately separated from the document
//! model. Cursors, sinks, and tokens live in splice-doc; this crate never
//! sees wire text.
//!
//! # Crate Features
//!
//! - `std` (default): Enables std library. Disable for no_std contexts.

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

mod codec;
mod error;
mod registry;
mod tag;

pub use codec::{PolyCodec, VariantCodec};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use registry::TagRegistry;
pub use tag::{Tagged, TypeKey};
