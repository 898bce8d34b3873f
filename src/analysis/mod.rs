pub mod summary;
pub mod tradeoff;

pub use summary::summarize;
pub use tradeoff::{tradeoff, Tradeoff, BALANCED_FACTORS};
