//! Item tree reconstruction.
//!
//! The remote listing is flat: folders name their children by id and
//! nothing names its parent. [`build`] turns that into an owned [`Item`]
//! tree with derived slash-separated paths.

mod builder;
mod item;

pub use builder::{BuiltTree, build, build_from_root};
pub use item::{Item, join_path};
