//! Stat system: base tables, modifiers and the derived snapshot.
//!
//! # Pipeline
//!
//! ```text
//! [ Base StatTable ] --(ordered ActiveModifiers)--> [ Derived StatTable ]
//! ```
//!
//! Each modifier is applied to the *running* value of its stat in insertion
//! order. Mixing kinds on one stat is therefore order sensitive, while two
//! modifiers of the same kind commute.
//!
//! ```
//! # use progression_core::stats::*;
//! let base = StatTable::default().with(StatKey::MovementSpeed, 10.0);
//! let derived = recompute(
//!     &base,
//!     &[
//!         ActiveModifier::add(StatKey::MovementSpeed, 10.0, 0.0),
//!         ActiveModifier::multiply(StatKey::MovementSpeed, 1.5, 0.0),
//!     ],
//! );
//! assert_eq!(derived[StatKey::MovementSpeed], 30.0);
//! ```

pub mod engine;
pub mod key;
pub mod modifier;
pub mod table;

pub use engine::{ApplyOutcome, StatModifierEngine, recompute};
pub use key::StatKey;
pub use modifier::{ActiveModifier, ModifierDuration, ModifierKey, ModifierKind, ModifierOp};
pub use table::StatTable;
#[cfg(feature = "serde")]
pub use table::StatOverrides;
