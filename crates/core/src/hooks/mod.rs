//! Hook system
//!
//! Detours host instance methods by substituting the body held in their
//! method slot. The replacement receives an [`Original`] bound to the
//! pre-hook body and decides what runs before and after it.
//!
//! ```ignore
//! let table = ReplacementTable::new().with(
//!     "Pause",
//!     |orig: Original<GameManager, (), ()>, gm: &mut GameManager, args: ()| {
//!         // pre-logic
//!         orig.call(gm, args);
//!         // post-logic
//!     },
//! );
//! let mut registry = HookRegistry::new(table);
//! let key = registry.register(&host, "GameManager", "Pause", None)?;
//! ```

pub mod error;
pub mod original;
pub mod registry;
pub mod replacement;

pub use error::{HookError, ResolutionError};
pub use original::Original;
pub use registry::{HookDescriptor, HookKey, HookRegistry};
pub use replacement::{Replacement, ReplacementFn, ReplacementTable};
