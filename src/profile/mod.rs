//! Profile access module.
//!
//! This module provides:
//! - The access strategy (public or authenticated) chosen from settings
//! - The provider/context seam over the scraping library
//! - An instaloader-backed provider

pub mod access;
pub mod instaloader;
pub mod provider;

pub use access::{Access, Credentials};
pub use instaloader::{Instaloader, InstaloaderProfile, InstaloaderSession};
pub use provider::{ProfileContext, ProfileProvider};
