//! Application layer: codec and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod codec;
pub mod error;
pub mod error_ext;
pub mod services;

pub use codec::{decode, decode_with, encode, EncodeOptions};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
