#![doc = include_str!("../README.md")]

pub mod error;
mod reader;
mod writer;

pub use error::*;
pub use reader::*;
pub use writer::*;

/// Width in bytes of every integer in the wire format.
pub const SIZE_OF_I32: usize = size_of::<i32>();
