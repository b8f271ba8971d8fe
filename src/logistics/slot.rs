use std::collections::BTreeMap;

use crate::types::ItemValue;

/// Stable handle of a slot inside a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw arena index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/**
 * A single cell on one or more belt paths. A private slot belongs to exactly one belt and has a
 * single successor. A junction slot is shared by every belt wired through its position: it holds
 * one value for all of them and picks the successor by belt name. A belt mapped to `None` (or not
 * mapped at all) treats the junction as the last cell of its path.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Private {
        value: Option<ItemValue>,
        next: Option<SlotId>,
    },
    Junction {
        value: Option<ItemValue>,
        routes: BTreeMap<String, Option<SlotId>>,
    },
}

impl Slot {
    /// Creates an empty private slot pointing at `next`.
    pub fn private(next: Option<SlotId>) -> Self {
        Slot::Private { value: None, next }
    }

    /// Creates an empty junction slot with no belts routed through it yet.
    pub fn junction() -> Self {
        Slot::Junction {
            value: None,
            routes: BTreeMap::new(),
        }
    }

    /// Returns the value currently held by the slot.
    pub fn value(&self) -> Option<ItemValue> {
        match self {
            Slot::Private { value, .. } | Slot::Junction { value, .. } => *value,
        }
    }

    /// Overwrites the value held by the slot.
    pub fn set_value(&mut self, new_value: Option<ItemValue>) {
        match self {
            Slot::Private { value, .. } | Slot::Junction { value, .. } => *value = new_value,
        }
    }

    /// Stores `new_value` and hands back whatever the slot held before.
    pub fn replace_value(&mut self, new_value: Option<ItemValue>) -> Option<ItemValue> {
        let previous = self.value();
        self.set_value(new_value);
        previous
    }

    /// Returns the next slot along `belt`'s path, or `None` if this slot ends that path.
    /// Private slots ignore the belt name.
    pub fn successor(&self, belt: &str) -> Option<SlotId> {
        match self {
            Slot::Private { next, .. } => *next,
            Slot::Junction { routes, .. } => routes.get(belt).copied().flatten(),
        }
    }

    /// Routes `belt` through this junction towards `next`. Returns `false` (and does nothing)
    /// on a private slot, which cannot carry per-belt routes.
    pub fn connect(&mut self, belt: &str, next: Option<SlotId>) -> bool {
        match self {
            Slot::Private { .. } => false,
            Slot::Junction { routes, .. } => {
                routes.insert(belt.to_owned(), next);
                true
            }
        }
    }

    pub fn is_junction(&self) -> bool {
        matches!(self, Slot::Junction { .. })
    }

    /// Returns the names of belts routed through this slot. Empty for private slots.
    pub fn routed_belts(&self) -> impl Iterator<Item = &str> {
        let routes = match self {
            Slot::Private { .. } => None,
            Slot::Junction { routes, .. } => Some(routes),
        };
        routes.into_iter().flat_map(|r| r.keys().map(String::as_str))
    }
}

/// Central storage for every slot of a conveyor system. Slots are only ever appended, so a
/// [`SlotId`] handed out by the arena stays valid for the arena's whole lifetime.
#[derive(Debug, Default, Clone)]
pub struct SlotArena {
    slots: Vec<Slot>,
}

impl SlotArena {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Allocates an empty private slot whose successor is `next`.
    pub fn alloc_private(&mut self, next: Option<SlotId>) -> SlotId {
        self.alloc(Slot::private(next))
    }

    /// Allocates an empty junction slot.
    pub fn alloc_junction(&mut self) -> SlotId {
        self.alloc(Slot::junction())
    }

    fn alloc(&mut self, slot: Slot) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(slot);
        id
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pushes `value` into the slot at `entry` and shifts every value along `belt`'s path one
    /// slot downstream. Returns the value displaced from the path's last slot, which is `None`
    /// until enough items have been pushed to fill the path up to that point.
    pub fn push(&mut self, entry: SlotId, belt: &str, value: ItemValue) -> Option<ItemValue> {
        let mut carried = Some(value);
        let mut current = entry;

        loop {
            let slot = &mut self.slots[current.0];
            carried = slot.replace_value(carried);
            match slot.successor(belt) {
                Some(next) => current = next,
                None => return carried,
            }
        }
    }

    /// Walks `belt`'s path starting at `entry`, yielding every slot up to and including the
    /// last one.
    pub fn walk<'a>(&'a self, entry: SlotId, belt: &'a str) -> PathIter<'a> {
        PathIter {
            arena: self,
            belt,
            next: Some(entry),
        }
    }
}

/// Iterator over the slots of one belt's path, entry first.
pub struct PathIter<'a> {
    arena: &'a SlotArena,
    belt: &'a str,
    next: Option<SlotId>,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (SlotId, &'a Slot);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let slot = self.arena.get(id)?;
        self.next = slot.successor(self.belt);
        Some((id, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(arena: &mut SlotArena, length: usize) -> SlotId {
        let mut next = None;
        for _ in 0..length {
            next = Some(arena.alloc_private(next));
        }
        next.expect("length must be non-zero")
    }

    #[test]
    fn private_slot_ignores_belt_name() {
        let mut arena = SlotArena::new();
        let tail = arena.alloc_private(None);
        let head = arena.alloc_private(Some(tail));

        let slot = arena.get(head).unwrap();
        assert_eq!(slot.successor("A"), Some(tail));
        assert_eq!(slot.successor("anything"), Some(tail));
        assert!(!slot.is_junction());
    }

    #[test]
    fn junction_routes_by_belt() {
        let mut arena = SlotArena::new();
        let after_b = arena.alloc_private(None);
        let junction = arena.alloc_junction();

        let slot = arena.get_mut(junction).unwrap();
        assert!(slot.connect("A", None));
        assert!(slot.connect("B", Some(after_b)));

        let slot = arena.get(junction).unwrap();
        assert!(slot.is_junction());
        assert_eq!(slot.successor("A"), None);
        assert_eq!(slot.successor("B"), Some(after_b));
        // Belts never routed through the junction end there as well.
        assert_eq!(slot.successor("C"), None);
        assert_eq!(slot.routed_belts().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn connect_is_rejected_on_private_slot() {
        let mut slot = Slot::private(None);
        assert!(!slot.connect("A", None));
        assert_eq!(slot.routed_belts().count(), 0);
    }

    #[test]
    fn replace_value_returns_previous() {
        let mut slot = Slot::junction();
        assert_eq!(slot.replace_value(Some(4)), None);
        assert_eq!(slot.replace_value(None), Some(4));
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn push_shifts_values_fifo() {
        let mut arena = SlotArena::new();
        let entry = chain(&mut arena, 3);

        assert_eq!(arena.push(entry, "A", 1), None);
        assert_eq!(arena.push(entry, "A", 2), None);
        assert_eq!(arena.push(entry, "A", 3), None);
        assert_eq!(arena.push(entry, "A", 4), Some(1));

        let values: Vec<_> = arena.walk(entry, "A").map(|(_, s)| s.value()).collect();
        assert_eq!(values, vec![Some(4), Some(3), Some(2)]);
    }

    #[test]
    fn single_slot_path_evicts_immediately_after_first_push() {
        let mut arena = SlotArena::new();
        let entry = arena.alloc_private(None);

        assert_eq!(arena.push(entry, "A", 10), None);
        assert_eq!(arena.push(entry, "A", 11), Some(10));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn walk_follows_belt_specific_route() {
        let mut arena = SlotArena::new();
        let b_tail = arena.alloc_private(None);
        let junction = arena.alloc_junction();
        arena.get_mut(junction).unwrap().connect("A", None);
        arena.get_mut(junction).unwrap().connect("B", Some(b_tail));
        let a_entry = arena.alloc_private(Some(junction));

        assert_eq!(arena.walk(a_entry, "A").count(), 2);
        assert_eq!(arena.walk(junction, "B").count(), 2);
        assert_eq!(
            arena.walk(a_entry, "B").map(|(id, _)| id).collect::<Vec<_>>(),
            vec![a_entry, junction, b_tail]
        );
    }
}
