//! Build - A champion at a level with items, runes and masteries

mod aggregator;
mod definition;
mod query;
mod stat_value;

pub use aggregator::StatAccumulator;
pub use definition::{BuildDefinition, Selection};
pub use query::StatQuery;
pub use stat_value::{grow, StatValue};

use crate::catalog::{Catalog, Character};
use crate::error::BuildError;
use crate::source::{BonusPage, EquipmentSet, StatSource, TalentPage};
use crate::types::{Attribute, CatalogRef};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Highest user-facing level
pub const MAX_LEVEL: u32 = 18;

/// A fully populated build
///
/// Every query recomputes from the current selections, so nothing goes
/// stale after a setter. Setters replace one part wholesale and leave the
/// build untouched when they fail.
#[derive(Debug, Clone)]
pub struct Build {
    catalog: Arc<Catalog>,
    champion: Arc<Character>,
    /// Zero-based level index
    level_index: u32,
    items: EquipmentSet,
    runes: BonusPage,
    masteries: TalentPage,
}

impl Build {
    /// Level 1 champion with nothing selected
    pub fn new(catalog: Arc<Catalog>, champion: impl Into<CatalogRef>) -> Result<Self, BuildError> {
        let champion = catalog.characters.resolve(&champion.into())?;
        Ok(Build {
            items: EquipmentSet::new(Arc::clone(&catalog)),
            runes: BonusPage::new(Arc::clone(&catalog)),
            masteries: TalentPage::new(Arc::clone(&catalog)),
            catalog,
            champion,
            level_index: 0,
        })
    }

    /// Build every part of a definition
    pub fn from_definition(catalog: Arc<Catalog>, definition: &BuildDefinition) -> Result<Self, BuildError> {
        let mut build = Self::new(catalog, definition.champion.clone())?;
        build.set_level(definition.level)?;
        build.set_items(definition.items.iter().cloned())?;
        build.set_runes(definition.runes.iter().map(|s| (s.key.clone(), s.count)))?;
        build.set_masteries(definition.masteries.iter().map(|s| (s.key.clone(), s.count)))?;
        Ok(build)
    }

    /// The current selections as a definition
    pub fn definition(&self) -> BuildDefinition {
        BuildDefinition {
            champion: CatalogRef::Id(self.champion.id),
            level: self.level(),
            items: self.items.refs(),
            runes: self.runes.selection().into_iter().map(Into::into).collect(),
            masteries: self.masteries.selection().into_iter().map(Into::into).collect(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    // === Setters ===

    /// Set the 1-based level
    pub fn set_level(&mut self, level: u32) -> Result<(), BuildError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(BuildError::LevelOutOfRange(level));
        }
        self.level_index = level - 1;
        Ok(())
    }

    pub fn set_champion(&mut self, champion: impl Into<CatalogRef>) -> Result<(), BuildError> {
        self.champion = self.catalog.characters.resolve(&champion.into())?;
        debug!(champion = %self.champion.name, "champion set");
        Ok(())
    }

    /// Replace the items with `items`, in order
    pub fn set_items<I, R>(&mut self, items: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = R>,
        R: Into<CatalogRef>,
    {
        self.items = EquipmentSet::from_refs(Arc::clone(&self.catalog), items)?;
        Ok(())
    }

    /// Take a prepared item set; it must share this build's catalog
    pub fn set_item_set(&mut self, items: EquipmentSet) -> Result<(), BuildError> {
        self.check_catalog(items.catalog(), "item set")?;
        self.items = items;
        Ok(())
    }

    /// Replace the runes with (rune, count) pairs
    pub fn set_runes<I, R>(&mut self, runes: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        self.runes = BonusPage::from_selection(Arc::clone(&self.catalog), runes)?;
        Ok(())
    }

    pub fn set_rune_page(&mut self, runes: BonusPage) -> Result<(), BuildError> {
        self.check_catalog(runes.catalog(), "rune page")?;
        self.runes = runes;
        Ok(())
    }

    /// Replace the masteries with (talent, points) pairs
    pub fn set_masteries<I, R>(&mut self, masteries: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        self.masteries = TalentPage::from_selection(Arc::clone(&self.catalog), masteries)?;
        Ok(())
    }

    pub fn set_mastery_page(&mut self, masteries: TalentPage) -> Result<(), BuildError> {
        self.check_catalog(masteries.catalog(), "mastery page")?;
        self.masteries = masteries;
        Ok(())
    }

    fn check_catalog(&self, catalog: &Arc<Catalog>, part: &'static str) -> Result<(), BuildError> {
        if Arc::ptr_eq(&self.catalog, catalog) {
            Ok(())
        } else {
            debug!(part, "rejected part from another catalog");
            Err(BuildError::CatalogMismatch(part))
        }
    }

    // === Accessors ===

    pub fn champion(&self) -> &Arc<Character> {
        &self.champion
    }

    /// 1-based level
    pub fn level(&self) -> u32 {
        self.level_index + 1
    }

    pub fn items(&self) -> &EquipmentSet {
        &self.items
    }

    pub fn runes(&self) -> &BonusPage {
        &self.runes
    }

    pub fn masteries(&self) -> &TalentPage {
        &self.masteries
    }

    /// Total gold of the items
    pub fn cost(&self) -> u32 {
        self.items.cost()
    }

    // === Stat queries ===

    /// Coefficients summed across items, runes and masteries
    pub fn accumulate(&self) -> StatAccumulator {
        let sources: [&dyn StatSource; 3] = [&self.items, &self.runes, &self.masteries];
        let mut stats = StatAccumulator::new();
        for source in sources {
            stats.apply_source(source);
        }
        stats
    }

    fn value_with(&self, stats: &StatAccumulator, attribute: Attribute) -> StatValue {
        StatValue::new(self.base(attribute), stats.get(attribute), self.level_index)
    }

    /// Base value and summed coefficients of one attribute
    pub fn value(&self, attribute: Attribute) -> StatValue {
        self.value_with(&self.accumulate(), attribute)
    }

    /// Champion base at the current level
    pub fn base(&self, attribute: Attribute) -> f64 {
        let growth = self.champion.stats.get(attribute);
        grow(growth.flat, growth.per_level, self.level())
    }

    pub fn total(&self, attribute: Attribute) -> f64 {
        self.value(attribute).compute()
    }

    /// Total minus base
    pub fn bonus(&self, attribute: Attribute) -> f64 {
        self.total(attribute) - self.base(attribute)
    }

    pub fn percent(&self, attribute: Attribute) -> f64 {
        self.accumulate().get(attribute).percent
    }

    pub fn percent_base(&self, attribute: Attribute) -> f64 {
        self.accumulate().get(attribute).percent_base
    }

    pub fn percent_bonus(&self, attribute: Attribute) -> f64 {
        self.accumulate().get(attribute).percent_bonus
    }

    /// Answer a key such as "armor", "bonus_armor" or "percent_base_attack_speed"
    pub fn query(&self, key: &str) -> Result<f64, BuildError> {
        let (query, attribute) = StatQuery::parse(key, self.catalog.schema())?;
        Ok(self.answer(query, attribute))
    }

    pub fn answer(&self, query: StatQuery, attribute: Attribute) -> f64 {
        match query {
            StatQuery::Total => self.total(attribute),
            StatQuery::Base => self.base(attribute),
            StatQuery::Bonus => self.bonus(attribute),
            StatQuery::Percent => self.percent(attribute),
            StatQuery::PercentBase => self.percent_base(attribute),
            StatQuery::PercentBonus => self.percent_bonus(attribute),
        }
    }

    /// Total, bonus and base of every basic attribute, rounded to three decimals
    pub fn stats(&self) -> BTreeMap<String, f64> {
        let accumulated = self.accumulate();
        let mut snapshot = BTreeMap::new();
        for attribute in &self.catalog.schema().basic {
            let value = self.value_with(&accumulated, *attribute);
            let total = value.compute();
            snapshot.insert(StatQuery::Total.key(*attribute), round3(total));
            snapshot.insert(StatQuery::Bonus.key(*attribute), round3(total - value.base));
            snapshot.insert(StatQuery::Base.key(*attribute), round3(value.base));
        }
        snapshot
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
