//! Low-level memory utilities shared by XSlice crates.
//!
//! Backing memory is always allocated with 16-byte alignment and
//! zero-filled, so any plain-old-data element type up to that
//! alignment can be read from it directly.
pub mod alloc;
pub mod byte_repr;
pub mod error;
