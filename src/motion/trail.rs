use std::collections::VecDeque;

use crate::foundation::core::Point;

/// Bounded history of recent positions; front is the oldest, back the newest.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    capacity: usize,
    points: VecDeque<Point>,
}

impl TrailBuffer {
    /// A zero capacity is bumped to one; callers disable trails by not creating a buffer.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append the newest position, evicting the oldest once full.
    pub fn push(&mut self, p: Point) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    /// Drop all history at once.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn oldest(&self) -> Option<Point> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Oldest to newest, paired with an opacity ramp in `(0, 1]` that reaches 1 at the newest.
    pub fn faded(&self) -> impl ExactSizeIterator<Item = (Point, f32)> + '_ {
        let n = self.points.len() as f32;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, &p)| (p, (i as f32 + 1.0) / n))
    }
}
