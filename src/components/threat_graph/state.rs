use log::debug;

use super::drag::{DragTrack, node_drag_position, window_drag_position};
use super::settings::GraphSettings;
use super::store::GraphStore;
use super::types::{GraphData, GraphNode, NodeId, Point, Size};
use super::viewport::Viewport;
use super::windows::WindowManager;

/// What a canvas drag holds: a node, or the background (which pans the view).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasTarget {
	Node(NodeId),
	Background,
}

/// Single owner of everything the graph view mutates. Pointer handlers call in here and
/// the canvas and overlays re-derive from it.
#[derive(Clone, Debug)]
pub struct ThreatGraphState {
	pub settings: GraphSettings,
	pub store: GraphStore,
	pub viewport: Viewport,
	pub hovered: Option<NodeId>,
	pub selected: Option<NodeId>,
	pub canvas_drag: DragTrack<CanvasTarget>,
	pub window_drag: DragTrack<NodeId>,
	pub windows: WindowManager,
	/// Canvas size in CSS pixels.
	pub surface: Size,
	/// Browser viewport size; floating overlays clamp against this.
	pub screen: Size,
	pan_moved: bool,
	suppress_click: bool,
}

impl ThreatGraphState {
	pub fn new(data: &GraphData, settings: GraphSettings, surface: Size, screen: Size) -> Self {
		let store = GraphStore::new(data);
		debug!(
			"graph state with {} nodes, {} edges",
			store.len(),
			store.edges().len()
		);
		Self {
			viewport: Viewport::new(settings.min_scale, settings.max_scale),
			windows: WindowManager::new(settings.window_origin, settings.window_cascade_step),
			settings,
			store,
			hovered: None,
			selected: None,
			canvas_drag: DragTrack::Idle,
			window_drag: DragTrack::Idle,
			surface,
			screen,
			pan_moved: false,
			suppress_click: false,
		}
	}

	pub fn resize(&mut self, surface: Size, screen: Size) {
		self.surface = surface;
		self.screen = screen;
	}

	pub fn node_at_position(&self, canvas_point: Point) -> Option<NodeId> {
		let p = self.viewport.screen_to_graph(canvas_point);
		self.store
			.node_at(p, self.settings.node_radius)
			.map(|n| n.id.clone())
	}

	// -- hover / selection --

	/// Sets the hovered node. Ignored while a canvas drag is in progress.
	pub fn hover_node(&mut self, id: Option<NodeId>) {
		if self.canvas_drag.is_dragging() {
			return;
		}
		self.hovered = id;
	}

	/// Hover follows the pointer except while something on the canvas is being dragged.
	pub fn pointer_move_canvas(&mut self, canvas_point: Point) {
		if self.canvas_drag.is_dragging() {
			return;
		}
		let hit = self.node_at_position(canvas_point);
		if hit != self.hovered {
			self.hover_node(hit);
		}
	}

	pub fn hovered_node(&self) -> Option<&GraphNode> {
		self.hovered.as_ref().and_then(|id| self.store.get(id))
	}

	pub fn select_node(&mut self, id: &NodeId) -> bool {
		if !self.store.contains(id) {
			return false;
		}
		if self.selected.as_ref() != Some(id) {
			debug!("selected node {id}");
			self.selected = Some(id.clone());
		}
		true
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	/// Stale selections resolve to nothing.
	pub fn selected_node(&self) -> Option<&GraphNode> {
		self.selected.as_ref().and_then(|id| self.store.get(id))
	}

	/// Click on empty canvas. Ignored when it is the tail end of a pan.
	pub fn canvas_click(&mut self) {
		if std::mem::take(&mut self.suppress_click) {
			return;
		}
		self.clear_selection();
	}

	/// Routes a canvas click to the node under the pointer, or to the background.
	pub fn click_at(&mut self, canvas_point: Point) {
		match self.node_at_position(canvas_point) {
			Some(id) => {
				self.suppress_click = false;
				self.select_node(&id);
			}
			None => self.canvas_click(),
		}
	}

	/// Top-left of the summary panel for the selected node, kept on screen.
	pub fn summary_panel_position(&self) -> Option<Point> {
		let node = self.selected_node()?;
		let s = &self.settings;
		let anchor = self.viewport.graph_to_screen(node.position);
		Some(Point::new(
			(anchor.x + s.panel_anchor.x)
				.max(s.panel_margin)
				.min(self.screen.width - s.panel_size.width),
			(anchor.y + s.panel_anchor.y)
				.max(s.panel_margin)
				.min(self.screen.height - s.panel_size.height),
		))
	}

	// -- viewport --

	pub fn wheel(&mut self, delta_y: f64) {
		self.viewport
			.zoom_by_wheel(delta_y, self.settings.wheel_sensitivity);
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_by(self.settings.zoom_step);
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_by(-self.settings.zoom_step);
	}

	pub fn reset_view(&mut self) {
		self.viewport.reset();
	}

	// -- canvas drag track --

	/// Pointer-down on the canvas grabs the node under it, or the background.
	pub fn pointer_down_canvas(&mut self, canvas_point: Point, client: Point) -> bool {
		let (target, origin) = match self
			.node_at_position(canvas_point)
			.and_then(|id| self.store.get(&id).map(|n| (id, n.position)))
		{
			Some((id, position)) => (CanvasTarget::Node(id), position),
			None => (CanvasTarget::Background, self.viewport.offset),
		};
		if !self.canvas_drag.begin(target, client, origin) {
			return false;
		}
		self.pan_moved = false;
		self.suppress_click = false;
		true
	}

	pub fn dragged_node(&self) -> Option<&NodeId> {
		match self.canvas_drag.target() {
			Some(CanvasTarget::Node(id)) => Some(id),
			_ => None,
		}
	}

	pub fn drag_move(&mut self, client: Point) -> bool {
		let Some(grip) = self.canvas_drag.grip() else {
			return false;
		};
		let delta = client.delta_from(grip.pointer_start);
		match &grip.target {
			CanvasTarget::Node(id) => {
				let position = node_drag_position(grip.origin, delta, self.viewport.scale);
				let id = id.clone();
				self.store.reposition(&id, position)
			}
			CanvasTarget::Background => {
				let offset = grip.origin.offset(delta.x, delta.y);
				if delta.length() > self.settings.pan_click_slop {
					self.pan_moved = true;
				}
				self.viewport.pan_to(offset);
				true
			}
		}
	}

	/// Ends the canvas drag, leaving the last computed position in place.
	pub fn drag_release(&mut self) -> Option<CanvasTarget> {
		let grip = self.canvas_drag.end()?;
		if grip.target == CanvasTarget::Background && std::mem::take(&mut self.pan_moved) {
			self.suppress_click = true;
		}
		Some(grip.target)
	}

	// -- detail windows --

	pub fn open_window(&mut self, id: &NodeId) -> bool {
		if !self.store.contains(id) {
			return false;
		}
		if !self.windows.open(id.clone()) {
			return false;
		}
		// Cascaded spots can run past the screen edge; keep them in the same bounds as a drag.
		let cascaded = self.windows.position(id);
		let clamped = window_drag_position(
			cascaded,
			Point::ORIGIN,
			self.screen,
			self.settings.window_size,
		);
		self.windows.move_to(id, clamped);
		debug!("opened detail window for {id} at ({}, {})", clamped.x, clamped.y);
		true
	}

	pub fn close_window(&mut self, id: &NodeId) -> bool {
		if self.window_drag.target() == Some(id) {
			self.window_drag.end();
		}
		let closed = self.windows.close(id);
		if closed {
			debug!("closed detail window for {id}");
		}
		closed
	}

	/// Open windows whose node still exists, bottom to top.
	pub fn window_entries(&self) -> Vec<(NodeId, Point)> {
		self.windows
			.open_ids()
			.iter()
			.filter(|id| self.store.contains(id))
			.map(|id| (id.clone(), self.windows.position(id)))
			.collect()
	}

	pub fn begin_window_drag(&mut self, id: &NodeId, client: Point) -> bool {
		if !self.windows.is_open(id) {
			return false;
		}
		let origin = self.windows.position(id);
		self.window_drag.begin(id.clone(), client, origin)
	}

	pub fn window_drag_move(&mut self, client: Point) -> bool {
		let Some(grip) = self.window_drag.grip() else {
			return false;
		};
		let position = window_drag_position(
			grip.origin,
			client.delta_from(grip.pointer_start),
			self.screen,
			self.settings.window_size,
		);
		let id = grip.target.clone();
		self.windows.move_to(&id, position)
	}

	pub fn window_drag_release(&mut self) -> Option<NodeId> {
		self.window_drag.end().map(|grip| grip.target)
	}

	pub fn dragged_window(&self) -> Option<&NodeId> {
		self.window_drag.target()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sample::sample_analysis;

	fn state() -> ThreatGraphState {
		ThreatGraphState::new(
			&sample_analysis(),
			GraphSettings::default(),
			Size::new(1024.0, 768.0),
			Size::new(1280.0, 800.0),
		)
	}

	fn id(s: &str) -> NodeId {
		NodeId::from(s)
	}

	#[test]
	fn dragging_a_node_at_scale_two() {
		let mut s = state();
		s.viewport.zoom_by(1.0);
		// node "1" sits at (200, 150); on screen at scale 2 that's (400, 300).
		assert!(s.pointer_down_canvas(Point::new(400.0, 300.0), Point::new(500.0, 500.0)));
		assert_eq!(s.dragged_node(), Some(&id("1")));
		assert!(s.drag_move(Point::new(540.0, 520.0)));
		assert_eq!(s.drag_release(), Some(CanvasTarget::Node(id("1"))));
		assert_eq!(s.store.get(&id("1")).unwrap().position, Point::new(220.0, 160.0));
	}

	#[test]
	fn hover_is_frozen_during_a_drag() {
		let mut s = state();
		s.pointer_move_canvas(Point::new(400.0, 100.0));
		assert_eq!(s.hovered, Some(id("2")));
		s.pointer_down_canvas(Point::new(400.0, 100.0), Point::new(400.0, 100.0));
		s.pointer_move_canvas(Point::new(5.0, 5.0));
		assert_eq!(s.hovered, Some(id("2")));
		s.drag_release();
		s.pointer_move_canvas(Point::new(5.0, 5.0));
		assert_eq!(s.hovered, None);
	}

	#[test]
	fn direct_hover_is_ignored_during_a_drag() {
		let mut s = state();
		assert!(s.pointer_down_canvas(Point::new(200.0, 150.0), Point::new(200.0, 150.0)));
		s.hover_node(Some(id("4")));
		assert_eq!(s.hovered, None);
		s.drag_release();
		s.hover_node(Some(id("4")));
		assert_eq!(s.hovered, Some(id("4")));
	}

	#[test]
	fn background_drag_pans_and_swallows_the_click() {
		let mut s = state();
		s.select_node(&id("4"));
		s.pointer_down_canvas(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
		s.drag_move(Point::new(65.0, -35.0));
		s.drag_release();
		assert_eq!(s.viewport.offset, Point::new(60.0, -40.0));
		s.click_at(Point::new(5.0, 5.0));
		assert_eq!(s.selected, Some(id("4")));
		s.click_at(Point::new(5.0, 5.0));
		assert_eq!(s.selected, None);
	}

	#[test]
	fn still_background_press_is_a_click() {
		let mut s = state();
		s.select_node(&id("1"));
		s.pointer_down_canvas(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
		s.drag_move(Point::new(6.0, 6.0));
		s.drag_release();
		s.click_at(Point::new(5.0, 5.0));
		assert_eq!(s.selected, None);
	}

	#[test]
	fn selecting_twice_keeps_the_same_node() {
		let mut s = state();
		s.click_at(Point::new(600.0, 150.0));
		assert_eq!(s.selected, Some(id("4")));
		s.click_at(Point::new(600.0, 150.0));
		assert_eq!(s.selected, Some(id("4")));
	}

	#[test]
	fn unknown_ids_fail_soft() {
		let mut s = state();
		assert!(!s.select_node(&id("ghost")));
		assert!(!s.open_window(&id("ghost")));
		s.hover_node(Some(id("ghost")));
		assert!(s.hovered_node().is_none());
		s.selected = Some(id("ghost"));
		assert!(s.selected_node().is_none());
		assert!(s.summary_panel_position().is_none());
		s.canvas_click();
		assert_eq!(s.selected, None);
	}

	#[test]
	fn summary_panel_tracks_the_node_and_clamps() {
		let mut s = state();
		s.select_node(&id("1"));
		assert_eq!(s.summary_panel_position(), Some(Point::new(250.0, 20.0)));
		s.select_node(&id("4"));
		s.viewport.zoom_by(2.0);
		// (600 * 3 + 50, 150 * 3 - 150) -> clamp x to 1280 - 340.
		assert_eq!(s.summary_panel_position(), Some(Point::new(940.0, 300.0)));
	}

	#[test]
	fn windows_cascade_and_drag_within_screen() {
		let mut s = state();
		assert!(s.open_window(&id("1")));
		assert!(s.open_window(&id("2")));
		let entries = s.window_entries();
		assert_eq!(entries[0], (id("1"), Point::new(100.0, 100.0)));
		assert_eq!(entries[1], (id("2"), Point::new(150.0, 150.0)));

		assert!(s.begin_window_drag(&id("2"), Point::new(0.0, 0.0)));
		assert!(!s.begin_window_drag(&id("1"), Point::new(0.0, 0.0)));
		s.window_drag_move(Point::new(5000.0, -5000.0));
		assert_eq!(s.window_drag_release(), Some(id("2")));
		assert_eq!(s.windows.position(&id("2")), Point::new(1280.0 - 384.0, 0.0));
	}

	#[test]
	fn cascaded_windows_stay_on_a_small_screen() {
		let mut s = state();
		s.resize(Size::new(400.0, 300.0), Size::new(400.0, 300.0));
		for n in ["1", "2", "3", "4"] {
			assert!(s.open_window(&id(n)));
		}
		let positions: Vec<Point> = s.window_entries().into_iter().map(|(_, p)| p).collect();
		assert_eq!(
			positions,
			vec![
				Point::new(16.0, 100.0),
				Point::new(16.0, 150.0),
				Point::new(16.0, 200.0),
				Point::new(16.0, 200.0),
			]
		);
	}

	#[test]
	fn window_and_canvas_tracks_are_independent() {
		let mut s = state();
		s.open_window(&id("3"));
		assert!(s.begin_window_drag(&id("3"), Point::ORIGIN));
		assert!(s.pointer_down_canvas(Point::new(5.0, 5.0), Point::ORIGIN));
		assert_eq!(s.dragged_window(), Some(&id("3")));
		assert_eq!(s.canvas_drag.target(), Some(&CanvasTarget::Background));
	}

	#[test]
	fn closing_a_dragged_window_ends_the_drag() {
		let mut s = state();
		s.open_window(&id("3"));
		s.begin_window_drag(&id("3"), Point::ORIGIN);
		assert!(s.close_window(&id("3")));
		assert!(s.dragged_window().is_none());
		assert!(!s.window_drag_move(Point::new(10.0, 10.0)));
		assert!(s.window_entries().is_empty());
	}

	#[test]
	fn reset_after_zoom_and_pan() {
		let mut s = state();
		s.wheel(-800.0);
		s.zoom_in();
		s.pointer_down_canvas(Point::new(5.0, 5.0), Point::ORIGIN);
		s.drag_move(Point::new(30.0, 30.0));
		s.drag_release();
		s.reset_view();
		assert_eq!(s.viewport.scale, 1.0);
		assert_eq!(s.viewport.offset, Point::ORIGIN);
	}
}
