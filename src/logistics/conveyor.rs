use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::error::{ConveyorError, Result};
use crate::logistics::builder::ConveyorBuilder;
use crate::logistics::slot::{SlotArena, SlotId};
use crate::types::{EMPTY_MARKER, ItemValue, SLOT_WIDTH};

/// Where a belt starts and how many positions it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BeltEntry {
    pub(crate) entry: SlotId,
    pub(crate) length: usize,
}

/**
 * A set of named belts whose slot chains may meet at shared junction slots.
 *
 * The topology is fixed once built; only slot values change. Every insertion and every read of
 * slot values goes through one mutex over the whole slot arena, so at most one traversal runs at a
 * time across all belts. Junction slots carry no locking of their own.
 */
#[derive(Debug)]
pub struct ConveyorSystem {
    belts: BTreeMap<String, BeltEntry>,
    junction_count: usize,
    slots: Mutex<SlotArena>,
}

impl ConveyorSystem {
    /// Starts declaring a new system.
    pub fn builder() -> ConveyorBuilder {
        ConveyorBuilder::new()
    }

    pub(crate) fn from_parts(
        arena: SlotArena,
        belts: BTreeMap<String, BeltEntry>,
        junction_count: usize,
    ) -> Self {
        Self {
            belts,
            junction_count,
            slots: Mutex::new(arena),
        }
    }

    // A panic cannot leave a slot half-written, so a poisoned lock still guards valid values.
    fn lock(&self) -> MutexGuard<'_, SlotArena> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn entry(&self, belt: &str) -> Result<BeltEntry> {
        self.belts
            .get(belt)
            .copied()
            .ok_or_else(|| ConveyorError::UnknownBelt(vec![belt.to_owned()]))
    }

    /// Inserts `value` at the entry of `belt`, shifting every value on its path one slot towards
    /// the exit. Returns the value pushed out of the path's last slot, if there was one.
    pub fn insert(&self, belt: &str, value: ItemValue) -> Result<Option<ItemValue>> {
        let BeltEntry { entry, .. } = self.entry(belt)?;

        let evicted = self.lock().push(entry, belt, value);
        trace!(belt, value, ?evicted, "inserted item");
        Ok(evicted)
    }

    /// Returns the values along `belt`'s path, entry first.
    pub fn snapshot(&self, belt: &str) -> Result<Vec<Option<ItemValue>>> {
        let BeltEntry { entry, .. } = self.entry(belt)?;

        let slots = self.lock();
        Ok(slots.walk(entry, belt).map(|(_, slot)| slot.value()).collect())
    }

    /// Renders every belt on its own line, in belt-name order. Empty slots show as `X` and
    /// junction slots are wrapped in braces.
    pub fn render(&self) -> String {
        let slots = self.lock();
        let mut out = String::new();

        for (name, belt) in &self.belts {
            out.push_str(name);
            out.push_str(": ");
            for (_, slot) in slots.walk(belt.entry, name) {
                let value = slot
                    .value()
                    .map_or_else(|| EMPTY_MARKER.to_string(), |v| v.to_string());
                let (open, close) = if slot.is_junction() { ("{", "}") } else { ("", "") };
                // Writing into a String cannot fail.
                let _ = write!(out, "{open}{value:<width$}{close} ", width = SLOT_WIDTH);
            }
            out.push('\n');
        }

        out
    }

    /// Returns the registered belt names in ascending order.
    pub fn belt_names(&self) -> Vec<&str> {
        self.belts.keys().map(String::as_str).collect()
    }

    pub fn contains_belt(&self, belt: &str) -> bool {
        self.belts.contains_key(belt)
    }

    /// Returns the declared length of `belt`.
    pub fn belt_length(&self, belt: &str) -> Result<usize> {
        self.entry(belt).map(|b| b.length)
    }

    /// Returns how many distinct junction slots the system holds.
    pub fn junction_count(&self) -> usize {
        self.junction_count
    }

    /// Returns the total number of slots, private and shared.
    pub fn slot_count(&self) -> usize {
        self.lock().len()
    }
}

impl fmt::Display for ConveyorSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
