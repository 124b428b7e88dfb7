//! Seat boards and their enclosures.
//!
//! Every seat owns an identical board of seven enclosures. Enclosure
//! identity is per seat: seat 0's king enclosure and seat 1's king enclosure
//! are separate storage with the same rule.
//!
//! ## Key Types
//!
//! - `EnclosureId`: Fixed id 1-7, decides kind and die tags
//! - `EnclosureKind`: Placement/scoring rule of an enclosure
//! - `Board`: One seat's placements grouped by enclosure

pub mod enclosure;
pub mod layout;

pub use enclosure::{Area, EnclosureId, EnclosureKind, Side};
pub use layout::{Board, Occupant};
