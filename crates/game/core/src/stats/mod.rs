//! Stat Aggregator.
//!
//! A character's derived stats are rebuilt from base attributes and every
//! active modifier source by [`recompute`]. The pipeline is fixed-order and
//! non-incremental; see [`pipeline`] for the stage list.
//!
//! ## Bonus Stack
//!
//! Within one channel, bonuses apply as:
//! `Flat → %Inc → More → Less → Clamp`
//!
//! Curses are not negative bonuses. They are penalties applied when the
//! affected stat is finalized, after all positive stacking.

mod accumulator;
mod bonus;
mod channel;
mod derived;
mod modifier;
pub mod pipeline;
mod registry;

pub use accumulator::{Accumulator, CursePenalties, EquipmentTotals};
pub use bonus::{Bonus, BonusStack, StatBounds, apply_penalty};
pub use channel::{SpecialKey, SpecialValues, StatChannel, StatFlags};
pub use derived::DerivedStats;
pub use modifier::{Curse, CurseKind, Modifier, ModifierSource};
pub use pipeline::{aggregate, recompute};
pub use registry::{Contribution, SourceTable, modifier_sources};
