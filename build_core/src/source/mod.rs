//! StatSource - Trait and implementations for modifier providers

mod bonus_page;
mod equipment;
mod replay;
mod talent_page;

pub use bonus_page::BonusPage;
pub use equipment::{Enchantment, EquipmentSet, MAX_ITEMS};
pub use replay::{apply_events, load_events, parse_events, EventReplayer, ItemEvent, ItemEventKind};
pub use talent_page::{row_capacity, RankedTalent, TalentPage, MAX_TALENT_POINTS, TALENT_ROWS};

use crate::build::StatAccumulator;

/// Anything that contributes modifiers to a build
pub trait StatSource: Send + Sync {
    /// Identifier used when tracing which sources were applied
    fn id(&self) -> &str;

    /// Add this source's modifiers to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
