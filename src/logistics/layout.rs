//! Declarative description of a conveyor system.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logistics::builder::ConveyorBuilder;
use crate::logistics::conveyor::ConveyorSystem;

/// A belt to register: its name and number of slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeltSpec {
    pub name: String,
    pub length: usize,
}

/// A junction at `position`. An empty `belts` list fuses every belt reaching the position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JunctionSpec {
    pub position: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub belts: Vec<String>,
}

/// The full set of declarations for one conveyor system, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConveyorLayout {
    pub belts: Vec<BeltSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub junctions: Vec<JunctionSpec>,
}

impl ConveyorLayout {
    pub fn new() -> Self {
        Self {
            belts: Vec::new(),
            junctions: Vec::new(),
        }
    }

    pub fn with_belt(mut self, name: impl Into<String>, length: usize) -> Self {
        self.belts.push(BeltSpec {
            name: name.into(),
            length,
        });
        self
    }

    pub fn with_junction<I, S>(mut self, position: usize, belts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.junctions.push(JunctionSpec {
            position,
            belts: belts.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Replays the layout into a builder, failing on the first rejected belt.
    pub fn into_builder(self) -> Result<ConveyorBuilder> {
        let builder = ConveyorBuilder::new()
            .add_belts(self.belts.into_iter().map(|b| (b.name, b.length)))?;

        Ok(self
            .junctions
            .into_iter()
            .fold(builder, |builder, j| builder.declare_junction(j.position, j.belts)))
    }

    pub fn build(self) -> Result<ConveyorSystem> {
        self.into_builder()?.build()
    }
}

impl Default for ConveyorLayout {
    fn default() -> Self {
        Self::new()
    }
}
