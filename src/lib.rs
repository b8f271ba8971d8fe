//! Fixed-capacity conveyor belts that can be fused at chosen positions.
//!
//! Each belt is a chain of slots from entry (position 0) to exit. Declaring a junction at a
//! position replaces that position with a single slot shared by every belt reaching it, so items
//! pushed along one belt can surface on another.
//!
//! ```
//! use cross_conveyor::ConveyorSystem;
//!
//! let system = ConveyorSystem::builder()
//!     .add_belt("A", 3)?
//!     .add_belt("B", 3)?
//!     .declare_junction(2, ["A", "B"])
//!     .build()?;
//!
//! assert_eq!(system.insert("A", 1)?, None);
//! assert_eq!(system.snapshot("B")?, vec![None, None, None]);
//! # Ok::<(), cross_conveyor::ConveyorError>(())
//! ```

pub mod error;
pub mod logistics;
pub mod types;

pub use error::{ConveyorError, OutOfBounds, Result};
pub use logistics::{ConveyorBuilder, ConveyorLayout, ConveyorSystem};
pub use types::ItemValue;
