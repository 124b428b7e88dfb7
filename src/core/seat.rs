//! Seat identification and per-seat data storage.
//!
//! ## SeatId
//!
//! Type-safe seat index. A game has 2-5 seats, numbered from 0.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `SeatId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::RotationDirection;

/// Seat index within a game (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId(pub u8);

impl SeatId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a game with `seat_count` seats.
    ///
    /// ```
    /// use dino_draft::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(3).collect();
    /// assert_eq!(seats, vec![SeatId::new(0), SeatId::new(1), SeatId::new(2)]);
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count as u8).map(SeatId)
    }

    /// The seat after this one in turn order.
    #[must_use]
    pub fn next(self, seat_count: usize) -> SeatId {
        SeatId(((self.index() + 1) % seat_count) as u8)
    }

    /// The seat that receives this seat's hand when bags are passed.
    ///
    /// Clockwise passes to `i + 1`, counterclockwise to `i - 1` (mod N).
    ///
    /// ```
    /// use dino_draft::core::{RotationDirection, SeatId};
    ///
    /// let seat = SeatId::new(0);
    /// assert_eq!(seat.pass_target(3, RotationDirection::Clockwise), SeatId::new(1));
    /// assert_eq!(seat.pass_target(3, RotationDirection::Counterclockwise), SeatId::new(2));
    /// ```
    #[must_use]
    pub fn pass_target(self, seat_count: usize, direction: RotationDirection) -> SeatId {
        let i = self.index();
        let target = match direction {
            RotationDirection::Clockwise => (i + 1) % seat_count,
            RotationDirection::Counterclockwise => (i + seat_count - 1) % seat_count,
        };
        SeatId(target as u8)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use dino_draft::core::{SeatId, SeatMap};
///
/// let mut points: SeatMap<u32> = SeatMap::with_value(3, 0);
/// points[SeatId::new(1)] += 7;
/// assert_eq!(points[SeatId::new(1)], 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(seat_count: usize, factory: impl Fn(SeatId) -> T) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");
        assert!(seat_count <= u8::MAX as usize, "Too many seats");

        let data = (0..seat_count as u8).map(|i| factory(SeatId(i))).collect();

        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(seat_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(seat_count, |_| value.clone())
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's entry, or `None` if the seat does not exist.
    #[must_use]
    pub fn get(&self, seat: SeatId) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Iterate over (SeatId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<SeatId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: SeatId) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<SeatId> for SeatMap<T> {
    fn index_mut(&mut self, seat: SeatId) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}
