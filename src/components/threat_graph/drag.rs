use super::types::{Point, Size};

/// What a drag started on and where it was when the pointer went down.
#[derive(Clone, Debug, PartialEq)]
pub struct DragGrip<T> {
	pub target: T,
	pub pointer_start: Point,
	/// Position of the dragged entity at pointer-down, in its own space.
	pub origin: Point,
}

/// Idle/Dragging state machine for one class of draggable entity.
#[derive(Clone, Debug, PartialEq)]
pub enum DragTrack<T> {
	Idle,
	Dragging(DragGrip<T>),
}

impl<T> Default for DragTrack<T> {
	fn default() -> Self {
		DragTrack::Idle
	}
}

impl<T> DragTrack<T> {
	/// Starts a drag. Refused while another drag on this track is live.
	pub fn begin(&mut self, target: T, pointer_start: Point, origin: Point) -> bool {
		if self.is_dragging() {
			return false;
		}
		*self = DragTrack::Dragging(DragGrip {
			target,
			pointer_start,
			origin,
		});
		true
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self, DragTrack::Dragging(_))
	}

	pub fn grip(&self) -> Option<&DragGrip<T>> {
		match self {
			DragTrack::Dragging(grip) => Some(grip),
			DragTrack::Idle => None,
		}
	}

	pub fn target(&self) -> Option<&T> {
		self.grip().map(|g| &g.target)
	}

	pub fn end(&mut self) -> Option<DragGrip<T>> {
		match std::mem::take(self) {
			DragTrack::Dragging(grip) => Some(grip),
			DragTrack::Idle => None,
		}
	}
}

/// Canvas drags are scale-invariant: the screen delta is divided by the zoom.
pub fn node_drag_position(origin: Point, delta: Point, scale: f64) -> Point {
	origin.offset(delta.x / scale, delta.y / scale)
}

/// Window drags move in screen space and stay inside `[0, screen - window]`.
/// When the screen is smaller than the window the window pins to 0.
pub fn window_drag_position(origin: Point, delta: Point, screen: Size, window: Size) -> Point {
	let moved = origin.offset(delta.x, delta.y);
	Point::new(
		moved.x.min(screen.width - window.width).max(0.0),
		moved.y.min(screen.height - window.height).max(0.0),
	)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn node_drag_divides_by_scale() {
		let p = node_drag_position(Point::new(200.0, 150.0), Point::new(40.0, 20.0), 2.0);
		assert_eq!(p, Point::new(220.0, 160.0));
	}

	#[rstest]
	#[case(Point::new(-500.0, 0.0), 0.0)]
	#[case(Point::new(50.0, 0.0), 150.0)]
	#[case(Point::new(5000.0, 0.0), 1024.0 - 384.0)]
	fn window_drag_clamps_x(#[case] delta: Point, #[case] expected_x: f64) {
		let p = window_drag_position(
			Point::new(100.0, 100.0),
			delta,
			Size::new(1024.0, 768.0),
			Size::new(384.0, 100.0),
		);
		assert_eq!(p.x, expected_x);
		assert_eq!(p.y, 100.0);
	}

	#[test]
	fn window_drag_clamps_y_to_height_sentinel() {
		let p = window_drag_position(
			Point::new(100.0, 100.0),
			Point::new(0.0, 10_000.0),
			Size::new(1024.0, 768.0),
			Size::new(384.0, 100.0),
		);
		assert_eq!(p.y, 668.0);
	}

	#[test]
	fn tiny_screen_pins_window_to_origin() {
		let p = window_drag_position(
			Point::new(10.0, 10.0),
			Point::new(30.0, 30.0),
			Size::new(200.0, 50.0),
			Size::new(384.0, 100.0),
		);
		assert_eq!(p, Point::ORIGIN);
	}

	#[test]
	fn track_refuses_second_begin() {
		let mut track = DragTrack::default();
		assert!(track.begin("a", Point::ORIGIN, Point::ORIGIN));
		assert!(!track.begin("b", Point::ORIGIN, Point::ORIGIN));
		assert_eq!(track.target(), Some(&"a"));
	}

	#[test]
	fn end_returns_to_idle_once() {
		let mut track = DragTrack::default();
		track.begin(7, Point::new(10.0, 10.0), Point::new(1.0, 2.0));
		let grip = track.end().expect("was dragging");
		assert_eq!(grip.origin, Point::new(1.0, 2.0));
		assert_eq!(grip.pointer_start, Point::new(10.0, 10.0));
		assert!(track.end().is_none());
		assert!(track.grip().is_none());
	}
}
