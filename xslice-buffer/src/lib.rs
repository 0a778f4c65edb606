//! Growable contiguous buffer of XSlice.
//!
//! Elements live in reference-counted backing stores. A [`View`] is a
//! window `(store, offset, length, capacity)` into one store and is cheap
//! to clone. Views over the same store alias each other until an append
//! runs out of capacity and moves the appending view into a new store.
pub mod error;
pub mod grow;
pub mod map;
pub mod slot;
pub mod store;
pub mod view;

pub use grow::{grow, GrowPolicy};
pub use map::KeyMap;
pub use slot::Slot;
pub use view::{copy_into, View};
pub use xslice_common::byte_repr::ByteRepr;
