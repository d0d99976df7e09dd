mod candidate;
mod flow;

pub use candidate::*;
pub use flow::*;
