//! EventReplayer - Rebuild an equipment set from an item event log

use crate::catalog::Catalog;
use crate::config::{self, ConfigError, ReplayConfig};
use crate::error::BuildError;
use crate::source::EquipmentSet;
use crate::types::CatalogRef;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Kind of item event
///
/// Variants are declared in alphabetical order of their wire names; the
/// derived ordering is the tie-break between events sharing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemEventKind {
    #[serde(rename = "ITEM_DESTROYED")]
    Destroyed,
    #[serde(rename = "ITEM_PURCHASED")]
    Purchased,
    #[serde(rename = "ITEM_SOLD")]
    Sold,
    #[serde(rename = "ITEM_UNDO")]
    Undo,
}

/// One entry of a match timeline's item events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEvent {
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub kind: ItemEventKind,
    #[serde(default)]
    pub participant: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_before: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_after: Option<CatalogRef>,
}

impl ItemEvent {
    fn with_item(timestamp: u64, kind: ItemEventKind, item: impl Into<CatalogRef>) -> Self {
        ItemEvent {
            timestamp,
            kind,
            participant: 0,
            item: Some(item.into()),
            item_before: None,
            item_after: None,
        }
    }

    pub fn purchased(timestamp: u64, item: impl Into<CatalogRef>) -> Self {
        Self::with_item(timestamp, ItemEventKind::Purchased, item)
    }

    pub fn sold(timestamp: u64, item: impl Into<CatalogRef>) -> Self {
        Self::with_item(timestamp, ItemEventKind::Sold, item)
    }

    pub fn destroyed(timestamp: u64, item: impl Into<CatalogRef>) -> Self {
        Self::with_item(timestamp, ItemEventKind::Destroyed, item)
    }

    /// An undo; the item it names (if any) is informational only
    pub fn undo(timestamp: u64) -> Self {
        ItemEvent {
            timestamp,
            kind: ItemEventKind::Undo,
            participant: 0,
            item: None,
            item_before: None,
            item_after: None,
        }
    }

    pub fn for_participant(mut self, participant: u32) -> Self {
        self.participant = participant;
        self
    }

    /// Whether the event names an item in any of its item fields
    pub fn references_item(&self) -> bool {
        self.item.is_some() || self.item_before.is_some() || self.item_after.is_some()
    }

    fn sort_key(&self) -> (u64, ItemEventKind) {
        (self.timestamp, self.kind)
    }
}

/// Parse an event log from a JSON array
pub fn parse_events(content: &str) -> Result<Vec<ItemEvent>, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Load an event log from a JSON file
pub fn load_events(path: &Path) -> Result<Vec<ItemEvent>, ConfigError> {
    config::load_json(path)
}

/// Replays purchase/sell/destroy/undo events into an [`EquipmentSet`]
#[derive(Debug, Clone)]
pub struct EventReplayer {
    catalog: Arc<Catalog>,
    consumables: Vec<String>,
}

impl EventReplayer {
    /// Replayer dropping the default consumables
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, &ReplayConfig::default())
    }

    pub fn with_config(catalog: Arc<Catalog>, config: &ReplayConfig) -> Self {
        Self::with_consumables(catalog, config.consumables.iter().cloned())
    }

    pub fn with_consumables(catalog: Arc<Catalog>, consumables: impl IntoIterator<Item = String>) -> Self {
        EventReplayer {
            catalog,
            consumables: consumables.into_iter().collect(),
        }
    }

    /// Whether an item reference names a filtered consumable
    pub fn is_consumable(&self, key: &CatalogRef) -> bool {
        let name = match key {
            CatalogRef::Name(name) => Some(name.as_str()),
            CatalogRef::Id(id) => self.catalog.items.by_id(*id).map(|item| item.name.as_str()),
        };
        name.map_or(false, |name| self.consumables.iter().any(|c| c == name))
    }

    fn keeps(&self, event: &ItemEvent) -> bool {
        event.item.as_ref().map_or(true, |item| !self.is_consumable(item))
    }

    /// Drop consumables and order by (timestamp, kind)
    ///
    /// The sort is stable so events with equal keys keep their log order.
    pub fn prepare(&self, events: impl IntoIterator<Item = ItemEvent>) -> Vec<ItemEvent> {
        let mut events: Vec<ItemEvent> = events.into_iter().filter(|e| self.keeps(e)).collect();
        events.sort_by_key(ItemEvent::sort_key);
        events
    }

    /// Item events of one participant across timeline frames
    ///
    /// Each frame is ordered on its own; frames keep their given order.
    pub fn participant_events(&self, frames: &[Vec<ItemEvent>], participant: u32) -> Vec<ItemEvent> {
        let mut events = Vec::new();
        for frame in frames {
            let mut frame: Vec<&ItemEvent> = frame
                .iter()
                .filter(|e| e.participant == participant && e.references_item() && self.keeps(e))
                .collect();
            frame.sort_by_key(|e| e.sort_key());
            events.extend(frame.into_iter().cloned());
        }
        events
    }

    /// Prepare the log and replay it onto an empty set
    pub fn replay(&self, events: impl IntoIterator<Item = ItemEvent>) -> Result<EquipmentSet, BuildError> {
        let events = self.prepare(events);
        let mut set = EquipmentSet::new(Arc::clone(&self.catalog));
        apply_events(&mut set, &events)?;
        debug!(events = events.len(), items = set.len(), "replayed item events");
        Ok(set)
    }
}

/// Apply already-ordered events to a set
///
/// UNDO inverts the event right before it. Undoing an undo does nothing.
pub fn apply_events(set: &mut EquipmentSet, events: &[ItemEvent]) -> Result<(), BuildError> {
    for (position, event) in events.iter().enumerate() {
        trace!(position, kind = ?event.kind, item = ?event.item, "item event");
        match event.kind {
            ItemEventKind::Purchased => set.add(event_item(event, position)?)?,
            ItemEventKind::Destroyed | ItemEventKind::Sold => {
                set.remove(event_item(event, position)?)?;
            }
            ItemEventKind::Undo => {
                let previous = position
                    .checked_sub(1)
                    .and_then(|index| events.get(index))
                    .ok_or(BuildError::NothingToUndo(position))?;
                match previous.kind {
                    ItemEventKind::Purchased => {
                        set.remove(event_item(previous, position - 1)?)?;
                    }
                    ItemEventKind::Destroyed | ItemEventKind::Sold => {
                        set.add(event_item(previous, position - 1)?)?
                    }
                    ItemEventKind::Undo => {}
                }
            }
        }
    }
    Ok(())
}

fn event_item(event: &ItemEvent, position: usize) -> Result<CatalogRef, BuildError> {
    event.item.clone().ok_or(BuildError::MissingEventItem {
        kind: event.kind,
        position,
    })
}
