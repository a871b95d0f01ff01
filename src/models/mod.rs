mod stats;
mod weather;

pub use stats::*;
pub use weather::*;
