// Character system
//
// This module contains everything related to the animated fighters:
// - Actor data and the roster that owns them
// - Idle / one-shot action state
// - Switching between actions with timed reversion
// - The fighter line-up and where their clips come from

pub mod action;
pub mod actor;
pub mod fighters;
pub mod switcher;

// Re-export commonly used types
pub use actor::{ActorId, ActorRoster};
pub use fighters::{FighterSpec, FIGHTERS};
pub use switcher::{ActionSwitcher, TriggerOutcome};
