//! BonusPage - Runes selected with a count

use crate::build::StatAccumulator;
use crate::catalog::{Catalog, Rune};
use crate::error::BuildError;
use crate::source::StatSource;
use crate::types::CatalogRef;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Unconstrained (rune, count) selections
#[derive(Debug, Clone)]
pub struct BonusPage {
    catalog: Arc<Catalog>,
    runes: BTreeMap<u32, (Arc<Rune>, u32)>,
}

impl BonusPage {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        BonusPage {
            catalog,
            runes: BTreeMap::new(),
        }
    }

    pub fn from_selection<I, R>(catalog: Arc<Catalog>, selection: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        let mut page = Self::new(catalog);
        page.update(selection)?;
        Ok(page)
    }

    /// Set the count of each named rune; zero removes it
    ///
    /// Every reference is resolved before anything changes.
    pub fn update<I, R>(&mut self, selection: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        let resolved = selection
            .into_iter()
            .map(|(key, count)| Ok((self.catalog.runes.resolve(&key.into())?, count)))
            .collect::<Result<Vec<_>, BuildError>>()?;
        for (rune, count) in resolved {
            if count == 0 {
                self.runes.remove(&rune.id);
            } else {
                self.runes.insert(rune.id, (rune, count));
            }
        }
        Ok(())
    }

    pub fn merge(&mut self, other: &BonusPage) -> Result<(), BuildError> {
        self.update(other.selection())
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Count of a rune, zero when absent
    pub fn count(&self, id: u32) -> u32 {
        self.runes.get(&id).map_or(0, |(_, count)| *count)
    }

    /// Sum of all counts
    pub fn total(&self) -> u32 {
        self.runes.values().map(|(_, count)| count).sum()
    }

    pub fn selection(&self) -> Vec<(CatalogRef, u32)> {
        self.runes
            .iter()
            .map(|(id, (_, count))| (CatalogRef::Id(*id), *count))
            .collect()
    }

    /// (rune, count) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<Rune>, u32)> {
        self.runes.values().map(|(rune, count)| (rune, *count))
    }

    /// One entry per counted instance
    pub fn instances(&self) -> impl Iterator<Item = &Arc<Rune>> {
        self.runes
            .values()
            .flat_map(|(rune, count)| std::iter::repeat(rune).take(*count as usize))
    }

    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }
}

impl StatSource for BonusPage {
    fn id(&self) -> &str {
        "runes"
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for rune in self.instances() {
            stats.add_record(&rune.stats);
        }
    }
}
