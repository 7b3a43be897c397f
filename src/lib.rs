//! OBS Studio plugin registering the Subsampling Detector video filter.
//!
//! libobs is resolved from the host process at load time, so this library has
//! no link-time dependency on OBS. The filter logic itself lives in
//! `subsampling-detector-core`.

#![allow(clippy::missing_safety_doc)]

pub mod api;
pub mod config;
pub mod ffi;
pub mod filter;
pub mod host;
pub mod logger;
pub mod module;

pub use module::*;
