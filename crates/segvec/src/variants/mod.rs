mod fixed;
mod promotion;
mod variable;

pub use fixed::*;
pub(crate) use promotion::*;
pub use variable::*;
