//! Belts, slots and the junctions that fuse them.

pub mod builder;
pub mod conveyor;
pub mod layout;
pub mod slot;


// Re-export the main types for easier access
pub use builder::ConveyorBuilder;
pub use conveyor::ConveyorSystem;
pub use layout::{BeltSpec, ConveyorLayout, JunctionSpec};
pub use slot::{PathIter, Slot, SlotArena, SlotId};
