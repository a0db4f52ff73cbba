#![doc = include_str!("../README.md")]

pub use rawbuf::{Error as RawBufError, SIZE_OF_I32};

mod error;
#[cfg(feature = "serde")]
mod serialize;
mod tracker;
mod traits;
mod variants;

use variants::*;

pub use error::*;
pub use tracker::*;
pub use traits::*;
pub use variants::*;
