use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent};

/// Document-level `mousemove`/`mouseup` listeners for one drag. Listeners attach when
/// the session is created and detach when it is dropped, so pointer-up, unmount and a
/// replaced session all clean up the same way.
pub struct DragSession {
	_listeners: [EventListener; 2],
}

/// Where a component parks the live session for one drag track.
pub type DragSlot = StoredValue<Option<DragSession>, LocalStorage>;

impl DragSession {
	/// Attaches both listeners to the document. `None` outside a browser.
	pub fn attach(
		mut on_move: impl FnMut(&MouseEvent) + 'static,
		mut on_release: impl FnMut(&MouseEvent) + 'static,
	) -> Option<Self> {
		let document = web_sys::window()?.document()?;
		let moving = EventListener::new(&document, "mousemove", move |ev: &Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				on_move(ev);
			}
		});
		let releasing = EventListener::new(&document, "mouseup", move |ev: &Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				on_release(ev);
			}
		});
		Some(Self {
			_listeners: [moving, releasing],
		})
	}
}

pub fn new_slot() -> DragSlot {
	let slot = StoredValue::new_local(None);
	on_cleanup(move || {
		// Unmounting mid-drag must not leave listeners on the document.
		let _ = slot.try_set_value(None);
	});
	slot
}
