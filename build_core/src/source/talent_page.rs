//! TalentPage - Talents (masteries) selected at a rank, with tree validation

use crate::build::StatAccumulator;
use crate::catalog::{Catalog, Talent, TalentTree};
use crate::error::BuildError;
use crate::modifier::ModifierRecord;
use crate::source::StatSource;
use crate::types::CatalogRef;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Maximum points across a whole page
pub const MAX_TALENT_POINTS: u32 = 30;
/// Rows per tree
pub const TALENT_ROWS: u32 = 6;

/// Points a row can hold: odd rows take five, even rows one
pub fn row_capacity(row: u32) -> u32 {
    if row % 2 == 1 {
        5
    } else {
        1
    }
}

/// A talent resolved at the number of points invested in it
#[derive(Debug, Clone)]
pub struct RankedTalent {
    talent: Arc<Talent>,
    points: u32,
    stats: ModifierRecord,
}

impl RankedTalent {
    pub fn new(talent: Arc<Talent>, points: u32) -> Self {
        let stats = talent.at_rank(points);
        RankedTalent {
            talent,
            points,
            stats,
        }
    }

    pub fn talent(&self) -> &Arc<Talent> {
        &self.talent
    }

    pub fn id(&self) -> u32 {
        self.talent.id
    }

    pub fn name(&self) -> &str {
        &self.talent.name
    }

    pub fn tree(&self) -> TalentTree {
        self.talent.tree
    }

    pub fn row(&self) -> u32 {
        self.talent.row()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Modifiers at the invested rank
    pub fn stats(&self) -> &ModifierRecord {
        &self.stats
    }
}

impl StatSource for RankedTalent {
    fn id(&self) -> &str {
        &self.talent.name
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add_record(&self.stats);
    }
}

/// A validated selection of talents and the points in each
///
/// A page never holds an invalid selection: every update is checked before
/// it is committed.
#[derive(Debug, Clone)]
pub struct TalentPage {
    catalog: Arc<Catalog>,
    talents: BTreeMap<u32, RankedTalent>,
}

impl TalentPage {
    /// Create an empty page
    pub fn new(catalog: Arc<Catalog>) -> Self {
        TalentPage {
            catalog,
            talents: BTreeMap::new(),
        }
    }

    /// Create a page from (talent, points) pairs
    pub fn from_selection<I, R>(catalog: Arc<Catalog>, selection: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        let mut page = Self::new(catalog);
        page.update(selection)?;
        Ok(page)
    }

    /// Merge (talent, points) pairs into the page
    ///
    /// Talents already on the page take the new points, zero points removes
    /// a talent. The merged page is validated as a whole; on failure the page
    /// is unchanged.
    pub fn update<I, R>(&mut self, selection: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = (R, u32)>,
        R: Into<CatalogRef>,
    {
        let mut talents = self.talents.clone();
        for (key, points) in selection {
            let talent = self.catalog.talents.resolve(&key.into())?;
            if points == 0 {
                talents.remove(&talent.id);
            } else if points > talent.max_rank() {
                debug!(talent = %talent.name, points, "mastery rank out of range");
                return Err(BuildError::RankOutOfRange {
                    talent: talent.name.clone(),
                    points,
                    max: talent.max_rank(),
                });
            } else {
                talents.insert(talent.id, RankedTalent::new(talent, points));
            }
        }
        check_viability(talents.values())?;
        self.talents = talents;
        Ok(())
    }

    /// Merge every selection of another page into this one
    pub fn merge(&mut self, other: &TalentPage) -> Result<(), BuildError> {
        self.update(other.selection())
    }

    /// Catalog the page resolves talents against
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Points invested in a talent, zero when it is not on the page
    pub fn points(&self, id: u32) -> u32 {
        self.talents.get(&id).map_or(0, RankedTalent::points)
    }

    /// Points invested across the page
    pub fn total_points(&self) -> u32 {
        self.talents.values().map(RankedTalent::points).sum()
    }

    /// Points per tree
    pub fn tree_points(&self, tree: TalentTree) -> u32 {
        self.talents
            .values()
            .filter(|t| t.tree() == tree)
            .map(RankedTalent::points)
            .sum()
    }

    /// (talent id, points) pairs in id order
    pub fn selection(&self) -> Vec<(CatalogRef, u32)> {
        self.talents
            .iter()
            .map(|(id, ranked)| (CatalogRef::Id(*id), ranked.points))
            .collect()
    }

    /// Rank-resolved talents in id order
    pub fn iter(&self) -> impl Iterator<Item = &RankedTalent> {
        self.talents.values()
    }

    pub fn len(&self) -> usize {
        self.talents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talents.is_empty()
    }

    /// Re-run structural validation
    pub fn check_viability(&self) -> Result<(), BuildError> {
        check_viability(self.talents.values())
    }
}

/// Validate point budget, row capacities and top-down row filling
fn check_viability<'a>(talents: impl Iterator<Item = &'a RankedTalent>) -> Result<(), BuildError> {
    let mut rows = [[0u32; TALENT_ROWS as usize]; 3];
    let mut total = 0;
    for talent in talents {
        let row = talent.row();
        if !(1..=TALENT_ROWS).contains(&row) {
            return Err(BuildError::InvalidRow {
                id: talent.id(),
                row,
            });
        }
        rows[talent.tree().index()][(row - 1) as usize] += talent.points();
        total += talent.points();
    }

    if total > MAX_TALENT_POINTS {
        debug!(points = total, "mastery page over budget");
        return Err(BuildError::TalentBudgetExceeded {
            points: total,
            max: MAX_TALENT_POINTS,
        });
    }

    for tree in TalentTree::all() {
        let mut first_open_row = None;
        for (index, &points) in rows[tree.index()].iter().enumerate() {
            let row = index as u32 + 1;
            let capacity = row_capacity(row);
            if points > capacity {
                debug!(%tree, row, points, "mastery row overfilled");
                return Err(BuildError::RowOverfilled {
                    tree: *tree,
                    row,
                    points,
                    max: capacity,
                });
            }
            if points > 0 {
                if let Some(missing) = first_open_row {
                    debug!(%tree, row, missing, "mastery row skipped");
                    return Err(BuildError::MissingPrerequisite {
                        tree: *tree,
                        row,
                        missing,
                    });
                }
            }
            if points < capacity && first_open_row.is_none() {
                first_open_row = Some(row);
            }
        }
    }
    Ok(())
}

impl StatSource for TalentPage {
    fn id(&self) -> &str {
        "masteries"
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for talent in self.talents.values() {
            talent.apply(stats);
        }
    }
}
