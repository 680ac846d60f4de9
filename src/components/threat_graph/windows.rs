use std::collections::HashMap;

use super::types::{NodeId, Point};

/// Floating detail windows. Open order doubles as stacking order.
#[derive(Clone, Debug, Default)]
pub struct WindowManager {
	open: Vec<NodeId>,
	positions: HashMap<NodeId, Point>,
	origin: Point,
	cascade_step: f64,
}

impl WindowManager {
	pub fn new(origin: Point, cascade_step: f64) -> Self {
		Self {
			open: Vec::new(),
			positions: HashMap::new(),
			origin,
			cascade_step,
		}
	}

	/// Opens a window for `id`. A window without a stored position lands one
	/// cascade step further per window already open. Returns `false` if it was open.
	pub fn open(&mut self, id: NodeId) -> bool {
		if self.is_open(&id) {
			return false;
		}
		if !self.positions.contains_key(&id) {
			let step = self.cascade_step * self.open.len() as f64;
			self.positions.insert(id.clone(), self.origin.offset(step, step));
		}
		self.open.push(id);
		true
	}

	/// Closes the window and forgets where it was.
	pub fn close(&mut self, id: &NodeId) -> bool {
		let Some(i) = self.open.iter().position(|o| o == id) else {
			return false;
		};
		self.open.remove(i);
		self.positions.remove(id);
		true
	}

	pub fn is_open(&self, id: &NodeId) -> bool {
		self.open.contains(id)
	}

	pub fn open_ids(&self) -> &[NodeId] {
		&self.open
	}

	/// Stored position, or the origin for a window that never got one.
	pub fn position(&self, id: &NodeId) -> Point {
		self.positions.get(id).copied().unwrap_or(self.origin)
	}

	/// Stacking rank of an open window; later windows sit on top.
	pub fn stack_index(&self, id: &NodeId) -> Option<usize> {
		self.open.iter().position(|o| o == id)
	}

	pub fn move_to(&mut self, id: &NodeId, position: Point) -> bool {
		if !self.is_open(id) {
			return false;
		}
		self.positions.insert(id.clone(), position);
		true
	}
}
