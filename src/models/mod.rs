//! Simulation domain models.
//!
//! Passive data shared by both engines. Engines never create or destroy
//! entities; they mutate process/resource/action state and produce a
//! [`Schedule`] or [`Timeline`].
//!
//! | Model | Scheduling | Synchronization |
//! |-------|-----------|-----------------|
//! | Process | input, mutated | referenced by pid |
//! | Resource | - | input, mutated |
//! | Action | - | input, mutated |
//! | Schedule | output | - |
//! | Timeline | - | output |

mod action;
mod process;
mod resource;
mod schedule;
mod timeline;

pub use action::{Action, ActionState, ActionType};
pub use process::Process;
pub use resource::Resource;
pub use schedule::{Schedule, ScheduleInterval};
pub use timeline::{AccessEvent, EventLabel, Timeline, HOLD_CYCLES};
