//! Randomized group generation.
//!
//! Assigns a roster to fixed-size groups for a sequence of projects while
//! keeping repeat pairings to a minimum. Uses randomized round-robin filling
//! with an escalating tolerance for repeat pairings ("repairings").
//!
//! # Components
//!
//! - [`Member`]: roster entry plus a collaboration ledger
//! - [`Attempt`]: one attempt's roster and counters; owns ledger updates
//! - [`Group`], [`Project`]: membership bookkeeping
//! - [`FillQueue`]: FIFO of groups still short of members
//! - [`TeamGenerator`]: fill algorithm and budget escalation loop
//!
//! # State
//!
//! All state lives in one attempt and is rebuilt from the request on every
//! retry. Random choices go through an injected [`rand::Rng`].

mod attempt;
mod engine;
mod group;
mod member;
mod project;
mod queue;

pub use attempt::Attempt;
pub use engine::{
    AttemptOutcome, AttemptSummary, GenerationResult, GroupingRequest, TeamGenerator,
    fill_project,
};
pub use group::Group;
pub use member::{Member, MemberIndex};
pub use project::{GroupIndex, Project};
pub use queue::FillQueue;
