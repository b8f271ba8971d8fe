use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::error::{ConveyorError, OutOfBounds, Result};
use crate::logistics::conveyor::{BeltEntry, ConveyorSystem};
use crate::logistics::slot::{SlotArena, SlotId};

/// A junction declared at `position`. An empty belt list fuses every belt reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct JunctionDecl {
    position: usize,
    belts: Vec<String>,
}

/**
 * Collects belt and junction declarations and turns them into a [`ConveyorSystem`].
 *
 * Junctions are keyed by position only: once any declaration exists for a position, every
 * registered belt long enough to reach it is wired through the same shared slot, whether or not
 * the declaration names it. The belt list of a declaration is only used for validation.
 */
#[derive(Debug, Clone, Default)]
pub struct ConveyorBuilder {
    belts: BTreeMap<String, usize>,
    junctions: Vec<JunctionDecl>,
}

impl ConveyorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a belt with `length` slots.
    /// Fails if the length is zero or the name is already taken.
    pub fn add_belt(mut self, name: impl Into<String>, length: usize) -> Result<Self> {
        let name = name.into();
        if length < 1 {
            return Err(ConveyorError::InvalidLength { belt: name, length });
        }
        if self.belts.contains_key(&name) {
            return Err(ConveyorError::DuplicateBelt(name));
        }

        debug!(belt = %name, length, "registered belt");
        self.belts.insert(name, length);
        Ok(self)
    }

    /// Registers several belts at once, stopping at the first rejected entry.
    pub fn add_belts<I, S>(self, belts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        belts
            .into_iter()
            .try_fold(self, |builder, (name, length)| builder.add_belt(name, length))
    }

    /// Declares a junction at `position` for the named belts. Several declarations may share a
    /// position; all of them are validated.
    pub fn declare_junction<I, S>(mut self, position: usize, belts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.junctions.push(JunctionDecl {
            position,
            belts: belts.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Fuses every belt that reaches `position`.
    pub fn fuse_all_at(self, position: usize) -> Self {
        self.declare_junction(position, std::iter::empty::<String>())
    }

    /// Validates the declarations and wires every belt's slot chain.
    pub fn build(self) -> Result<ConveyorSystem> {
        self.check_unknown_belts()?;
        self.check_out_of_bounds()?;

        let positions: BTreeSet<usize> = self.junctions.iter().map(|j| j.position).collect();
        let mut arena = SlotArena::new();
        let mut junctions: BTreeMap<usize, SlotId> = BTreeMap::new();
        let mut belts = BTreeMap::new();

        for (name, &length) in &self.belts {
            // Chains are built exit first so each slot can point at the one after it.
            let mut next: Option<SlotId> = None;
            for position in (0..length).rev() {
                if !positions.contains(&position) {
                    next = Some(arena.alloc_private(next));
                    continue;
                }

                let junction = *junctions.entry(position).or_insert_with(|| {
                    debug!(position, "created junction slot");
                    arena.alloc_junction()
                });
                if let Some(slot) = arena.get_mut(junction) {
                    slot.connect(name, next);
                }
                if !self.intends_fusion(position, name) {
                    debug!(belt = %name, position, "belt fused into junction it was not named in");
                }
                next = Some(junction);
            }

            // Registered lengths are non-zero, so every chain has an entry.
            let Some(entry) = next else {
                continue;
            };
            belts.insert(name.clone(), BeltEntry { entry, length });
        }

        debug!(
            belts = belts.len(),
            junctions = junctions.len(),
            slots = arena.len(),
            "built conveyor system"
        );
        Ok(ConveyorSystem::from_parts(arena, belts, junctions.len()))
    }

    /// Returns `true` if some declaration at `position` names `belt` or fuses all belts.
    fn intends_fusion(&self, position: usize, belt: &str) -> bool {
        self.junctions
            .iter()
            .filter(|j| j.position == position)
            .any(|j| j.belts.is_empty() || j.belts.iter().any(|b| b == belt))
    }

    fn check_unknown_belts(&self) -> Result<()> {
        let mut unknown: Vec<String> = Vec::new();
        for name in self.junctions.iter().flat_map(|j| &j.belts) {
            if !self.belts.contains_key(name) && !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }

        if unknown.is_empty() {
            return Ok(());
        }

        warn!(?unknown, "junctions reference unknown belts");
        Err(ConveyorError::UnknownBelt(unknown))
    }

    fn check_out_of_bounds(&self) -> Result<()> {
        let mut out_of_bounds = Vec::new();
        for junction in &self.junctions {
            for belt in &junction.belts {
                let Some(&length) = self.belts.get(belt) else {
                    continue;
                };
                if length > junction.position {
                    continue;
                }

                out_of_bounds.push(OutOfBounds {
                    position: junction.position,
                    belt: belt.clone(),
                    length,
                });
            }
        }

        if out_of_bounds.is_empty() {
            return Ok(());
        }

        warn!(count = out_of_bounds.len(), "junctions placed past belt ends");
        Err(ConveyorError::OutOfBoundsPosition(out_of_bounds))
    }
}
