//! Common utilities for the Laurel certificate renderer.
//!
//! This crate provides shared infrastructure used by all Laurel components:
//! - **Warning System** - colored, deduplicated terminal diagnostics
//! - **Images** - decoded RGBA backdrops shared between loading and rendering

pub mod image;
pub mod warning;
