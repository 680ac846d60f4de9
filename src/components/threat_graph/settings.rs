use super::types::{Point, Size};

/// Tunables for the graph view. `Default` reproduces the dashboard's stock behaviour.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSettings {
	/// Smallest allowed zoom.
	pub min_scale: f64,
	/// Largest allowed zoom.
	pub max_scale: f64,
	/// Scale change per zoom button press.
	pub zoom_step: f64,
	/// Multiplied with the wheel `delta_y` and added to the scale.
	pub wheel_sensitivity: f64,
	/// Hit radius of a node in canvas units.
	pub node_radius: f64,
	/// Screen distance a background drag must cover before it counts as a pan
	/// instead of a click.
	pub pan_click_slop: f64,
	/// Screen position of the first detail window.
	pub window_origin: Point,
	/// Offset added per already-open window.
	pub window_cascade_step: f64,
	/// Width of a detail window and the height kept on screen while dragging it.
	pub window_size: Size,
	/// Footprint of the summary panel used for clamping.
	pub panel_size: Size,
	/// Minimum gap between the summary panel and the canvas edge.
	pub panel_margin: f64,
	/// Offset of the summary panel from the selected node's screen position.
	pub panel_anchor: Point,
}

impl Default for GraphSettings {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			zoom_step: 0.2,
			wheel_sensitivity: -0.001,
			node_radius: 25.0,
			pan_click_slop: 3.0,
			window_origin: Point::new(100.0, 100.0),
			window_cascade_step: 50.0,
			window_size: Size::new(384.0, 100.0),
			panel_size: Size::new(340.0, 300.0),
			panel_margin: 20.0,
			panel_anchor: Point::new(50.0, -150.0),
		}
	}
}
