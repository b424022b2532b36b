//! Filesystem module.
//!
//! Provides:
//! - The per-account directory layout
//! - Extension-based sorting of downloaded files
//! - Working directory cleanup
//! - Folder name validation

pub mod cleanup;
pub mod naming;
pub mod paths;
pub mod sorter;

pub use cleanup::{remove_working_dir, Cleanup};
pub use naming::sanitize_path_component;
pub use paths::{ensure_dir, AccountLayout};
pub use sorter::{move_files, SortOutcome};
