#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod build;
mod component;
mod error;
mod parse;
mod prerelease;
mod range;
mod version;

pub use build::*;
pub use component::*;
pub use error::*;
pub use prerelease::*;
pub use range::*;
pub use version::*;
