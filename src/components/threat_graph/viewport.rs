use super::types::Point;

/// Pan/zoom transform applied to the canvas: `screen = graph * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub scale: f64,
	pub offset: Point,
	min_scale: f64,
	max_scale: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(0.5, 3.0)
	}
}

impl Viewport {
	pub fn new(min_scale: f64, max_scale: f64) -> Self {
		Self {
			scale: 1.0,
			offset: Point::ORIGIN,
			min_scale,
			max_scale: max_scale.max(min_scale),
		}
	}

	fn set_scale(&mut self, scale: f64) {
		if scale.is_nan() {
			return;
		}
		self.scale = scale.clamp(self.min_scale, self.max_scale);
	}

	pub fn zoom_by(&mut self, step: f64) {
		self.set_scale(self.scale + step);
	}

	/// Additive wheel zoom: `scale += delta_y * sensitivity`.
	pub fn zoom_by_wheel(&mut self, delta_y: f64, sensitivity: f64) {
		self.set_scale(self.scale + delta_y * sensitivity);
	}

	pub fn reset(&mut self) {
		self.scale = 1.0;
		self.offset = Point::ORIGIN;
	}

	pub fn pan_to(&mut self, offset: Point) {
		self.offset = offset;
	}

	pub fn graph_to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.scale + self.offset.x, p.y * self.scale + self.offset.y)
	}

	pub fn screen_to_graph(&self, p: Point) -> Point {
		Point::new(
			(p.x - self.offset.x) / self.scale,
			(p.y - self.offset.y) / self.scale,
		)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(1.0, 10_000.0, 0.5)]
	#[case(1.0, -10_000.0, 3.0)]
	#[case(1.0, -500.0, 1.5)]
	#[case(2.9, -1e12, 3.0)]
	#[case(0.6, f64::INFINITY, 0.5)]
	fn wheel_zoom_stays_in_bounds(#[case] start: f64, #[case] delta: f64, #[case] expected: f64) {
		let mut vp = Viewport::default();
		vp.scale = start;
		vp.zoom_by_wheel(delta, -0.001);
		assert!((vp.scale - expected).abs() < 1e-9, "got {}", vp.scale);
	}

	#[test]
	fn button_steps_clamp() {
		let mut vp = Viewport::default();
		for _ in 0..20 {
			vp.zoom_by(0.2);
		}
		assert_eq!(vp.scale, 3.0);
		for _ in 0..20 {
			vp.zoom_by(-0.2);
		}
		assert_eq!(vp.scale, 0.5);
	}

	#[test]
	fn nan_delta_leaves_scale_alone() {
		let mut vp = Viewport::default();
		vp.zoom_by_wheel(f64::NAN, -0.001);
		assert_eq!(vp.scale, 1.0);
	}

	#[test]
	fn reset_restores_identity() {
		let mut vp = Viewport::default();
		vp.zoom_by(1.0);
		vp.pan_to(Point::new(-40.0, 75.0));
		vp.reset();
		assert_eq!(vp.scale, 1.0);
		assert_eq!(vp.offset, Point::ORIGIN);
	}

	#[test]
	fn transforms_round_trip() {
		let mut vp = Viewport::default();
		vp.zoom_by(1.0);
		vp.pan_to(Point::new(30.0, -10.0));
		let screen = vp.graph_to_screen(Point::new(200.0, 150.0));
		assert_eq!(screen, Point::new(430.0, 290.0));
		assert_eq!(vp.screen_to_graph(screen), Point::new(200.0, 150.0));
	}
}
