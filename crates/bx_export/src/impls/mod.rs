//! [`Export`](crate::Export) implementations for standard and third-party
//! types.
//!
//! - `native`: text and primitive scalars.
//! - `wrappers`: `Option`, references and smart pointers.
//! - `collections`: sequences and maps.
//! - `time`: dates as epoch milliseconds.
//! - `url`: `url::Url` as text (feature `url`).

mod collections;
mod native;
mod time;
mod wrappers;

#[cfg(feature = "url")]
mod url;
