//! Bundle manifest model and content codec
//!
//! A [`Manifest`] is the ordered list of named, encoded [`Resource`]
//! fragments shipped in a bundle. A [`Codec`] turns one fragment's encoded
//! content back into raw bytes.

pub mod codec;
pub mod error;
pub mod manifest;

pub use codec::{Codec, Encoding, StandardCodec};
pub use error::{Error, Result};
pub use manifest::{Manifest, Resource};
