//! Types shared by the palette, width, and page crates.

pub mod domain;
pub mod error;
pub mod protocol;
