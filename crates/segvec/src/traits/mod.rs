mod bytes;
mod var_bytes;

pub use bytes::*;
pub use var_bytes::*;
