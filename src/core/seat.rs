//! Seat identification and per-seat data storage.
//!
//! ## SeatId
//!
//! Type-safe seat index. A table holds 2-6 seats.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `SeatId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. Seat indices are 0-based and follow turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

    /// The seat after this one in turn order.
    ///
    /// ```
    /// use golf_engine::core::SeatId;
    ///
    /// assert_eq!(SeatId::new(1).next(3), SeatId::new(2));
    /// assert_eq!(SeatId::new(2).next(3), SeatId::new(0));
    /// ```
    #[must_use]
    pub const fn next(self, seat_count: usize) -> Self {
        Self(((self.0 as usize + 1) % seat_count) as u8)
    }

    /// Iterate over all seat IDs for a table with `seat_count` seats.
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count as u8).map(SeatId)
    }

    /// Every other seat in turn order, starting with the one after `self`.
    pub fn others_in_turn_order(self, seat_count: usize) -> impl Iterator<Item = SeatId> {
        (1..seat_count).map(move |offset| SeatId(((self.index() + offset) % seat_count) as u8))
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use golf_engine::core::{SeatId, SeatMap};
///
/// let mut totals: SeatMap<i32> = SeatMap::with_value(3, 0);
/// totals[SeatId::new(1)] += 12;
/// assert_eq!(totals[SeatId::new(1)], 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(seat_count: usize, factory: impl FnMut(SeatId) -> T) -> Self {
        let data = SeatId::all(seat_count).map(factory).collect();
        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(seat_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(seat_count, |_| value.clone())
    }

    /// Create a new SeatMap with default values.
    pub fn with_default(seat_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(seat_count, |_| T::default())
    }

    /// Wrap an existing per-seat vector.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data, or `None` for an unknown seat.
    #[must_use]
    pub fn get(&self, seat: SeatId) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: SeatId) -> Option<&mut T> {
        self.data.get_mut(seat.index())
    }

    /// Iterate over (SeatId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over mutable values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// View the values as a slice in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_id_basics() {
        assert_eq!(SeatId::new(3).index(), 3);
        assert_eq!(format!("{}", SeatId::new(0)), "Seat 0");
    }

    #[test]
    fn test_others_in_turn_order_wraps() {
        let order: Vec<_> = SeatId::new(2).others_in_turn_order(4).collect();
        assert_eq!(order, vec![SeatId::new(3), SeatId::new(0), SeatId::new(1)]);
    }

    #[test]
    fn test_seat_map_new() {
        let map: SeatMap<usize> = SeatMap::new(4, |s| s.index() * 10);
        assert_eq!(map[SeatId::new(3)], 30);
        assert_eq!(map.seat_count(), 4);
        assert!(map.get(SeatId::new(4)).is_none());
    }

    #[test]
    fn test_seat_map_serialization() {
        let map: SeatMap<i32> = SeatMap::new(2, |s| s.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: SeatMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
