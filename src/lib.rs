//! Collaboration group generation for the U-Engine ecosystem.
//!
//! Assigns a roster to fixed-size groups for a sequence of projects so that
//! members work with as many different partners as possible. Repeat
//! pairings ("repairings") are tolerated only when the roster leaves no
//! alternative, and the tolerance rises one step at a time until a complete
//! grouping fits.
//!
//! # Modules
//!
//! - **`models`**: Serializable types: `Participant`, `GroupAssignment`,
//!   `ProjectGrouping`, `ClassGrouping`
//! - **`sizing`**: Group size partitioning for a roster
//! - **`generator`**: Ledger bookkeeping, fill algorithm, retry loop
//! - **`kpi`**: Pairing statistics for finished groupings
//! - **`validation`**: Input integrity checks (empty roster, duplicate IDs, group size)
//! - **`config`**, **`error`**: Generator settings and error types
//!
//! # Architecture
//!
//! Parsing rosters, rendering reports and command-line handling live
//! outside this crate. Everything here works on in-memory values and is
//! single-threaded; randomness is injected so runs can be reproduced.

pub mod config;
pub mod error;
pub mod generator;
pub mod kpi;
pub mod models;
pub mod sizing;
pub mod validation;

pub use config::GroupingConfig;
pub use error::GroupingError;
pub use generator::{GenerationResult, GroupingRequest, TeamGenerator};
