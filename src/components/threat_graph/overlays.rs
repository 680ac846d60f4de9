use leptos::prelude::*;
use web_sys::MouseEvent;

use super::session::{DragSession, DragSlot};
use super::state::ThreatGraphState;
use super::types::{GraphNode, NodeId, Point, RiskLevel};

const BUTTON_STYLE: &str = "width: 40px; height: 40px; border-radius: 8px; background: #1b1e27; \
	border: 1px solid #3a3f4b; color: #e5e7eb; font-weight: 700; cursor: pointer;";

fn risk_badge(risk: RiskLevel) -> impl IntoView {
	let style = format!(
		"display: inline-block; padding: 2px 10px; border-radius: 9999px; font-size: 12px; \
		 text-transform: uppercase; background: {}; color: {};",
		risk.color_alpha(0.125),
		risk.color()
	);
	view! { <span style=style>{risk.name()}</span> }
}

/// Zoom in/out/reset buttons in the top-right corner.
#[component]
pub fn GraphControls(state: RwSignal<ThreatGraphState>) -> impl IntoView {
	let percent = move || state.with(|s| format!("{:.0}%", s.viewport.scale * 100.0));

	view! {
		<div style="position: absolute; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; align-items: center;">
			<button style=BUTTON_STYLE title="Zoom In" on:click=move |_| state.update(|s| s.zoom_in())>
				"+"
			</button>
			<button style=BUTTON_STYLE title="Zoom Out" on:click=move |_| state.update(|s| s.zoom_out())>
				"\u{2212}"
			</button>
			<button
				style=BUTTON_STYLE
				title="Reset View"
				on:click=move |_| state.update(|s| s.reset_view())
			>
				<span style="font-size: 11px;">"Reset"</span>
			</button>
			<span style="font-size: 11px; color: #9ca3af;">{percent}</span>
		</div>
	}
}

/// Summary card anchored next to the selected node. Clicking it opens the detail window.
#[component]
pub fn NodeSummaryPanel(state: RwSignal<ThreatGraphState>) -> impl IntoView {
	let summary = move || {
		state.with(|s| {
			let node = s.selected_node()?.clone();
			s.summary_panel_position().map(|pos| (node, pos))
		})
	};

	move || {
		summary().map(|(node, pos): (GraphNode, Point)| {
			let id = node.id.clone();
			let extra = node.details.metadata.len() > 2;
			let preview = node
				.details
				.metadata
				.iter()
				.take(2)
				.map(|(k, v)| {
					view! {
						<div style="display: flex; justify-content: space-between; gap: 8px; font-size: 12px;">
							<span style="color: #9ca3af;">{format!("{k}:")}</span>
							<span style="font-family: monospace; white-space: nowrap; overflow-x: auto;">{v.clone()}</span>
						</div>
					}
				})
				.collect_view();
			let style = format!(
				"position: absolute; left: {}px; top: {}px; width: 320px; z-index: 50; \
				 background: #161922; border: 1px solid #3a3f4b; border-radius: 12px; \
				 padding: 16px; color: #e5e7eb; cursor: pointer;",
				pos.x, pos.y
			);

			view! {
				<div style=style on:click=move |_| {
					state.update(|s| {
						s.open_window(&id);
					})
				}>
					<h3 style="margin: 0; white-space: nowrap; overflow-x: auto;">{node.label.clone()}</h3>
					<p style="margin: 0 0 12px; color: #9ca3af; text-transform: capitalize;">{node.kind.name()}</p>
					<p style="margin: 0; color: #9ca3af; font-size: 13px;">"Description"</p>
					<p style="margin: 0 0 8px; font-size: 14px;">{node.details.description.clone()}</p>
					<p style="margin: 0; color: #9ca3af; font-size: 13px;">"Risk Level"</p>
					{risk_badge(node.details.risk)}
					<p style="margin: 8px 0 4px; color: #9ca3af; font-size: 13px;">"Metadata"</p>
					{preview}
					{extra.then(|| view! { <p style="margin: 4px 0 0; font-size: 12px; color: #9ca3af;">"... and more"</p> })}
					<p style="margin: 12px 0 0; padding-top: 8px; border-top: 1px solid #3a3f4b; text-align: center; font-size: 12px; color: #9ca3af;">
						"Click to expand details"
					</p>
				</div>
			}
		})
	}
}

/// Starts a window drag and hands the document listeners to `slot`.
fn grab_window(state: RwSignal<ThreatGraphState>, slot: DragSlot, id: &NodeId, ev: &MouseEvent) {
	let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
	if !state.try_update(|s| s.begin_window_drag(id, client)).unwrap_or(false) {
		return;
	}
	let session = DragSession::attach(
		move |ev| {
			let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
			state.maybe_update(|s| s.window_drag_move(client));
		},
		move |_| {
			state.update(|s| {
				s.window_drag_release();
			});
			slot.set_value(None);
		},
	);
	if session.is_none() {
		state.update(|s| {
			s.window_drag_release();
		});
	}
	slot.set_value(session);
}

/// A floating, draggable window with everything known about one node.
#[component]
pub fn NodeDetailWindow(
	state: RwSignal<ThreatGraphState>,
	drag_slot: DragSlot,
	id: NodeId,
) -> impl IntoView {
	let Some(node) = state.with_untracked(|s| s.store.get(&id).cloned()) else {
		return None;
	};

	let style = {
		let id = id.clone();
		move || {
			state.with(|s| {
				let pos = s.windows.position(&id);
				let z = 100 + s.windows.stack_index(&id).unwrap_or(0);
				format!(
					"position: fixed; left: {}px; top: {}px; width: {}px; max-height: 80vh; \
					 z-index: {z}; background: #11131a; border: 1px solid #3a3f4b; \
					 border-radius: 12px; color: #e5e7eb; box-shadow: 0 10px 30px rgb(0 0 0 / 0.4);",
					pos.x, pos.y, s.settings.window_size.width
				)
			})
		}
	};
	let header_cursor = {
		let id = id.clone();
		move || {
			let grabbing = state.with(|s| s.dragged_window() == Some(&id));
			format!(
				"display: flex; gap: 12px; align-items: center; padding: 16px; \
				 border-bottom: 1px solid #3a3f4b; background: #161922; cursor: {};",
				if grabbing { "grabbing" } else { "grab" }
			)
		}
	};
	let on_header_down = {
		let id = id.clone();
		move |ev: MouseEvent| {
			ev.stop_propagation();
			ev.prevent_default();
			grab_window(state, drag_slot, &id, &ev);
		}
	};
	let on_close = move |_: MouseEvent| {
		state.update(|s| {
			s.close_window(&id);
		});
	};

	let metadata = node
		.details
		.metadata
		.iter()
		.map(|(k, v)| {
			view! {
				<div style="background: #1b1e27; border-radius: 8px; padding: 12px;">
					<p style="margin: 0 0 4px; font-size: 12px; color: #9ca3af;">{k.clone()}</p>
					<p style="margin: 0; font-family: monospace; font-size: 14px; white-space: nowrap; overflow-x: auto;">{v.clone()}</p>
				</div>
			}
		})
		.collect_view();

	Some(view! {
		<div style=style>
			<button
				style="position: absolute; top: -8px; right: -8px; width: 32px; height: 32px; border-radius: 9999px; border: none; background: hsl(0 84% 60%); color: white; cursor: pointer;"
				on:click=on_close
			>
				"\u{00d7}"
			</button>
			<div style=header_cursor on:mousedown=on_header_down>
				<span style=format!("font-weight: 700; color: {};", node.details.risk.color())>
					{node.kind.glyph()}
				</span>
				<div style="min-width: 0; flex: 1;">
					<h3 style="margin: 0; white-space: nowrap; overflow-x: auto;">{node.label.clone()}</h3>
					<p style="margin: 0; color: #9ca3af; text-transform: capitalize;">{node.kind.name()}</p>
				</div>
			</div>
			<div style="padding: 16px; overflow-y: auto; max-height: calc(80vh - 80px); display: flex; flex-direction: column; gap: 16px;">
				<div>
					<p style="margin: 0 0 8px; color: #9ca3af; font-size: 14px;">"Description"</p>
					<p style="margin: 0; font-size: 14px; white-space: nowrap; overflow-x: auto;">{node.details.description.clone()}</p>
				</div>
				<div>
					<p style="margin: 0 0 8px; color: #9ca3af; font-size: 14px;">"Risk Level"</p>
					{risk_badge(node.details.risk)}
				</div>
				<div>
					<p style="margin: 0 0 12px; color: #9ca3af; font-size: 14px;">"Metadata"</p>
					<div style="display: flex; flex-direction: column; gap: 12px;">{metadata}</div>
				</div>
			</div>
		</div>
	})
}
