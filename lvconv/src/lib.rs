//! Application layer for the `lvconv` converter.
//!
//! Wires real decoders and rasterizers into [`lvconv_core`]: the `image`
//! crate for raster input, `swash` for glyph rasterization, TOML job files
//! for configuration, and collision-free output writing.

#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod decode;
pub mod output;
pub mod preview;
pub mod raster;
