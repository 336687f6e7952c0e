//! Trail body: head position, velocity, and bounded position history.
//!
//! The history is ordered newest-first: index 0 is always the current head
//! sample. The simulation step is the only writer; the renderer reads the
//! history as segments.

use glam::DVec2;
use std::collections::VecDeque;

/// Head state plus a bounded history of past head positions.
#[derive(Debug, Clone)]
pub struct TrailBody {
    head: DVec2,
    velocity: DVec2,
    points: VecDeque<DVec2>,
}

impl TrailBody {
    /// Creates a body at `start` with zero velocity and a history of `len`
    /// copies of the start position.
    pub fn new(start: DVec2, len: usize) -> Self {
        let mut body = Self {
            head: start,
            velocity: DVec2::ZERO,
            points: VecDeque::with_capacity(len + 1),
        };
        body.reset(start, len);
        body
    }

    /// Re-seeds the body: head at `start`, zero velocity, history filled
    /// with `len` copies of `start`.
    pub fn reset(&mut self, start: DVec2, len: usize) {
        self.head = start;
        self.velocity = DVec2::ZERO;
        self.points.clear();
        self.points.extend(std::iter::repeat(start).take(len));
    }

    /// Current head position in pixel space.
    pub fn head(&self) -> DVec2 {
        self.head
    }

    /// Current velocity in pixels per step.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Number of history samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the history holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// History samples, newest first.
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    /// Sample at history index (0 = head), if present.
    pub fn point(&self, index: usize) -> Option<DVec2> {
        self.points.get(index).copied()
    }

    /// Moves the head to `position` with the given velocity and records the
    /// new sample at the front, trimming the back to `max_len`.
    pub(crate) fn advance(&mut self, position: DVec2, velocity: DVec2, max_len: usize) {
        self.head = position;
        self.velocity = velocity;
        self.points.push_front(position);
        self.points.truncate(max_len);
    }
}
