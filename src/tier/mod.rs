pub mod resolver;
pub mod types;

pub use resolver::{PickRange, RoundFallbacks, TierConfig, TierResolver, DEFAULT_ROUND3_CUTOFF};
pub use types::{Tier, TierSet, TierTable};
