//! Trail buffer and marker geometry
//!
//! Pure state: pointer samples go in, marker positions/sizes/opacities come
//! out. The component feeds it from DOM events and an animation frame loop.

use crate::config::CursorConfig;

pub const TRAIL_LENGTH: usize = CursorConfig::TRAIL_LENGTH;

/// Viewport position in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Move toward `target` by `factor` of the remaining gap
    #[must_use]
    pub fn chase(self, target: Self, factor: f64) -> Self {
        Self {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }
}

/// Chase factor for trail entry `index`
pub fn speed(index: usize) -> f64 {
    CursorConfig::BASE_SPEED - CursorConfig::SPEED_STEP * index as f64
}

/// One lagging marker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailMarker {
    pub center: Point,
    pub size: f64,
    pub opacity: f64,
}

/// The marker drawn at the live pointer position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeadMarker {
    pub center: Point,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailState {
    pointer: Point,
    visible: bool,
    hovering: bool,
    // Empty until the first pointer sample, then always TRAIL_LENGTH long
    trail: Vec<Point>,
}

impl TrailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    pub fn is_initialized(&self) -> bool {
        !self.trail.is_empty()
    }

    /// Record a pointer sample; the first one seeds every trail entry
    pub fn pointer_moved(&mut self, point: Point, hovering: bool) {
        self.pointer = point;
        self.visible = true;
        self.hovering = hovering;
        if self.trail.is_empty() {
            self.trail = vec![point; TRAIL_LENGTH];
        }
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    /// Advance one frame: entry 0 chases the pointer, every later entry
    /// chases its already-updated predecessor
    pub fn tick(&mut self) {
        let mut target = self.pointer;
        for (index, entry) in self.trail.iter_mut().enumerate() {
            *entry = entry.chase(target, speed(index));
            target = *entry;
        }
    }

    pub fn markers(&self) -> Vec<TrailMarker> {
        let len = self.trail.len() as f64;
        self.trail
            .iter()
            .enumerate()
            .map(|(index, &center)| {
                let index = index as f64;
                let distance = center.distance_to(self.pointer);
                let distance_factor = (1.0 - distance / CursorConfig::MAX_DISTANCE).max(0.0);
                let base_opacity = (1.0 - index / len) * CursorConfig::OPACITY_GAIN;

                TrailMarker {
                    center,
                    size: CursorConfig::TRAIL_BASE_SIZE - index * CursorConfig::TRAIL_SIZE_STEP,
                    opacity: if self.visible {
                        base_opacity * distance_factor
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }

    pub fn lead(&self) -> LeadMarker {
        LeadMarker {
            center: self.pointer,
            size: if self.hovering {
                CursorConfig::LEAD_HOVER_SIZE
            } else {
                CursorConfig::LEAD_SIZE
            },
            opacity: if self.visible { 1.0 } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_first_sample_seeds_whole_trail() {
        let mut state = TrailState::new();
        assert!(!state.is_initialized());

        let p = Point::new(120.0, 48.5);
        state.pointer_moved(p, false);

        assert_eq!(state.trail().len(), TRAIL_LENGTH);
        assert!(state.trail().iter().all(|&entry| entry == p));
    }

    #[test]
    fn test_later_samples_do_not_reseed() {
        let mut state = TrailState::new();
        state.pointer_moved(Point::new(0.0, 0.0), false);
        state.pointer_moved(Point::new(300.0, 300.0), false);

        assert_eq!(state.trail().len(), TRAIL_LENGTH);
        assert!(state.trail().iter().all(|&entry| entry == Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_speeds_strictly_decrease() {
        assert!(close(speed(0), 0.92));
        for index in 1..TRAIL_LENGTH {
            assert!(close(speed(index), 0.92 - 0.022 * index as f64));
            assert!(speed(index) < speed(index - 1));
        }
    }

    #[test]
    fn test_tick_moves_head_by_base_speed() {
        let p = Point::new(10.0, 20.0);
        let q = Point::new(110.0, -30.0);

        let mut state = TrailState::new();
        state.pointer_moved(p, false);
        state.pointer_moved(q, false);
        state.tick();

        let head = state.trail()[0];
        assert!(close(head.x, p.x + 0.92 * (q.x - p.x)));
        assert!(close(head.y, p.y + 0.92 * (q.y - p.y)));
        assert!(head.distance_to(q) < p.distance_to(q));
    }

    #[test]
    fn test_tick_chases_updated_predecessor() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(100.0, 0.0);

        let mut state = TrailState::new();
        state.pointer_moved(p, false);
        state.pointer_moved(q, false);
        state.tick();

        let head = state.trail()[0];
        let second = state.trail()[1];
        assert!(close(second.x, head.x * speed(1)));

        // Every entry moves toward the pointer, and the trail stays ordered
        for pair in state.trail().windows(2) {
            assert!(pair[0].x >= pair[1].x);
        }
        assert!(state.trail()[TRAIL_LENGTH - 1].x > 0.0);
    }

    #[test]
    fn test_tick_before_first_sample_is_noop() {
        let mut state = TrailState::new();
        state.tick();
        assert!(state.trail().is_empty());
        assert!(state.markers().is_empty());
    }

    #[test]
    fn test_still_pointer_collapses_trail() {
        let p = Point::new(50.0, 50.0);
        let mut state = TrailState::new();
        state.pointer_moved(p, false);
        for _ in 0..10 {
            state.tick();
        }
        assert!(state.trail().iter().all(|&entry| entry == p));
    }

    #[test]
    fn test_hidden_trail_has_zero_opacity() {
        let mut state = TrailState::new();
        state.pointer_moved(Point::new(5.0, 5.0), true);
        state.pointer_left();

        assert!(!state.is_visible());
        assert!(state.markers().iter().all(|marker| marker.opacity == 0.0));
        assert_eq!(state.lead().opacity, 0.0);
    }

    #[test]
    fn test_marker_geometry() {
        let p = Point::new(0.0, 0.0);
        let mut state = TrailState::new();
        state.pointer_moved(p, false);

        let markers = state.markers();
        assert_eq!(markers.len(), TRAIL_LENGTH);
        assert!(close(markers[0].size, 40.0));
        assert!(close(markers[10].size, 32.0));
        assert!(close(markers[0].opacity, 2.5));
        assert!(close(
            markers[7].opacity,
            (1.0 - 7.0 / TRAIL_LENGTH as f64) * 2.5
        ));
    }

    #[test]
    fn test_distance_fades_markers() {
        let mut state = TrailState::new();
        state.pointer_moved(Point::new(0.0, 0.0), false);
        // Pointer jumps away without any frame elapsing
        state.pointer_moved(Point::new(100.0, 0.0), false);
        let markers = state.markers();
        assert!(close(markers[0].opacity, 2.5 * 0.5));

        state.pointer_moved(Point::new(400.0, 0.0), false);
        assert!(state.markers().iter().all(|marker| marker.opacity == 0.0));
    }

    #[test]
    fn test_lead_marker_grows_on_hover() {
        let mut state = TrailState::new();
        state.pointer_moved(Point::new(1.0, 2.0), false);
        assert_eq!(state.lead().size, 24.0);
        assert_eq!(state.lead().opacity, 1.0);

        state.pointer_moved(Point::new(1.0, 2.0), true);
        assert_eq!(state.lead().size, 40.0);
        assert_eq!(state.lead().center, Point::new(1.0, 2.0));
    }
}
