//! Bag distribution.
//!
//! - Round-start deal of one exact-size bag per seat
//! - End-of-cycle rotation (pass hands, or full reshuffle)

pub mod distributor;

pub use distributor::{bag_quota, BagDistributor, DealReport, Signature};
