//! URL handling module for Sumi-Harvest
//!
//! This module provides URL canonicalization and domain (network location)
//! extraction. A string that fails canonicalization never enters the
//! frontier or the content store.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::{canonicalize_url, parse_absolute_url};
