use gloo::events::EventListener;
use leptos::prelude::*;
use log::{error, info, warn};
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::error::{context_2d, screen_size};
use super::overlays::{GraphControls, NodeDetailWindow, NodeSummaryPanel};
use super::render;
use super::session::{self, DragSession, DragSlot};
use super::settings::GraphSettings;
use super::state::ThreatGraphState;
use super::types::{GraphData, Point, Size};

const FALLBACK_SURFACE: Size = Size {
	width: 800.0,
	height: 600.0,
};

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn surface_size(canvas: &HtmlCanvasElement) -> Size {
	canvas
		.parent_element()
		.map(|p| Size::new(p.client_width() as f64, p.client_height() as f64))
		.filter(|s| s.width > 0.0 && s.height > 0.0)
		.unwrap_or(FALLBACK_SURFACE)
}

fn current_screen(fallback: Size) -> Size {
	screen_size().unwrap_or_else(|err| {
		warn!("using fallback screen size: {err}");
		fallback
	})
}

fn fit_canvas(canvas: &HtmlCanvasElement, state: RwSignal<ThreatGraphState>) {
	let surface = surface_size(canvas);
	canvas.set_width(surface.width as u32);
	canvas.set_height(surface.height as u32);
	state.update(|s| {
		let screen = current_screen(s.screen);
		s.resize(surface, screen);
	});
}

/// Hands a started canvas drag its document listeners.
fn track_canvas_drag(state: RwSignal<ThreatGraphState>, slot: DragSlot) {
	let session = DragSession::attach(
		move |ev| {
			let client = client_point(ev);
			state.maybe_update(|s| s.drag_move(client));
		},
		move |_| {
			state.update(|s| {
				s.drag_release();
			});
			slot.set_value(None);
		},
	);
	if session.is_none() {
		warn!("no document to track the drag on");
		state.update(|s| {
			s.drag_release();
		});
	}
	slot.set_value(session);
}

/// Interactive analysis graph: canvas, zoom controls, summary panel and detail windows.
#[component]
pub fn ThreatGraphView(
	/// Nodes and connections to show. Positions are the starting layout.
	data: GraphData,
	/// Overrides for the stock zoom, hit-test and window tunables.
	#[prop(optional)]
	settings: Option<GraphSettings>,
) -> impl IntoView {
	let screen = current_screen(Size::new(1280.0, 800.0));
	let state = RwSignal::new(ThreatGraphState::new(
		&data,
		settings.unwrap_or_default(),
		FALLBACK_SURFACE,
		screen,
	));
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let canvas_drag = session::new_slot();
	let window_drag = session::new_slot();
	let resize_listener = StoredValue::new_local(None::<EventListener>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		fit_canvas(&canvas, state);

		if resize_listener.with_value(Option::is_none) {
			if let Some(window) = web_sys::window() {
				let listener = EventListener::new(&window, "resize", move |_| {
					fit_canvas(&canvas, state);
				});
				resize_listener.set_value(Some(listener));
			}
		}
		info!("graph canvas mounted");
	});

	// Redraw whenever anything in the state changes.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		match context_2d(&canvas) {
			Ok(ctx) => state.with(|s| render::render(s, &ctx)),
			Err(err) => error!("cannot draw graph: {err}"),
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (local, client) = (canvas_point(&canvas, &ev), client_point(&ev));
		let started = state
			.try_update(|s| s.pointer_down_canvas(local, client))
			.unwrap_or(false);
		if started {
			ev.prevent_default();
			track_canvas_drag(state, canvas_drag);
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let local = canvas_point(&canvas, &ev);
		state.maybe_update(|s| {
			let before = s.hovered.clone();
			s.pointer_move_canvas(local);
			s.hovered != before
		});
	};

	let on_mouseleave = move |_: MouseEvent| {
		state.maybe_update(|s| {
			if s.canvas_drag.is_dragging() || s.hovered.is_none() {
				return false;
			}
			s.hover_node(None);
			true
		});
	};

	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let local = canvas_point(&canvas, &ev);
		state.update(|s| s.click_at(local));
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state.update(|s| s.wheel(ev.delta_y()));
	};

	let cursor = move || {
		state.with(|s| {
			let cursor = if s.canvas_drag.is_dragging() {
				"grabbing"
			} else if s.hovered.is_some() {
				"pointer"
			} else {
				"grab"
			};
			format!("display: block; cursor: {cursor};")
		})
	};

	view! {
		<div
			class="threat-graph"
			style="position: relative; width: 100%; height: 100%; overflow: hidden;"
		>
			<canvas
				node_ref=canvas_ref
				class="threat-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				style=cursor
			/>
			<GraphControls state=state />
			<NodeSummaryPanel state=state />
			<For
				each=move || state.with(|s| s.window_entries())
				key=|(id, _)| id.clone()
				children=move |(id, _)| {
					view! { <NodeDetailWindow state=state drag_slot=window_drag id=id /> }
				}
			/>
		</div>
	}
}
