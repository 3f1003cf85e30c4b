//! Grouping domain models.
//!
//! Serializable types exchanged with the outside world: the roster going in
//! and the groupings coming out. Prior groupings use the same types as
//! generated ones.
//!
//! # Domain Mappings
//!
//! | u-grouping | Classroom | Workshop | Hackathon |
//! |------------|-----------|----------|-----------|
//! | Participant | Student | Attendee | Hacker |
//! | GroupAssignment | Project Team | Breakout Table | Team |
//! | ProjectGrouping | Assignment | Session | Round |
//! | ClassGrouping | Semester Plan | Event Plan | Event Plan |

mod grouping;
mod participant;

pub use grouping::{ClassGrouping, GroupAssignment, ProjectGrouping};
pub use participant::Participant;
