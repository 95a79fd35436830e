pub mod record;
pub mod stats;

pub use record::PlayerRecord;
pub use stats::{Awards, DraftSlot, FirstStint, PlayerStats};
