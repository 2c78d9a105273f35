//! Filesystem utilities for morio.
//!
//! Variable files and rendered configuration are replaced atomically, and
//! module state transitions are renames that refuse to clobber a sibling.

pub mod atomic;
mod rename;

pub use atomic::{atomic_write, atomic_write_file};
pub use rename::rename_no_clobber;
