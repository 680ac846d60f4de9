use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ThreatGraphState;
use super::types::GraphNode;

const BACKGROUND: &str = "#11131a";
const EDGE_COLOR: &str = "hsl(217 91% 60% / 0.4)";
const CARD: &str = "#1b1e27";
const FOREGROUND: &str = "#e5e7eb";
const MUTED: &str = "#9ca3af";
const POPOVER: &str = "#1f2330";
const BORDER: &str = "#3a3f4b";

const NODE_BODY: f64 = 25.0;

fn dash(ctx: &CanvasRenderingContext2d, on: f64, off: f64) {
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(on),
		&JsValue::from_f64(off),
	));
}

fn solid(ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn circle(ctx: &CanvasRenderingContext2d, r: f64) {
	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, r, 0.0, 2.0 * PI);
}

/// Draws the whole graph. Holds no state of its own.
pub fn render(state: &ThreatGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.surface.width, state.surface.height);
	ctx.save();
	let vp = &state.viewport;
	let _ = ctx.translate(vp.offset.x, vp.offset.y);
	let _ = ctx.scale(vp.scale, vp.scale);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ThreatGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = state.store.nodes();
	let hovered = state.hovered.as_ref();

	for edge in state.store.edges() {
		let (src, tgt) = (&nodes[edge.source], &nodes[edge.target]);
		let highlighted = hovered.is_some_and(|h| *h == src.id || *h == tgt.id);

		ctx.save();
		if highlighted {
			let risk = src.details.risk;
			ctx.set_stroke_style_str(&risk.color_alpha(0.8));
			ctx.set_line_width(4.0);
			ctx.set_shadow_color(risk.color());
			ctx.set_shadow_blur(8.0);
		} else {
			ctx.set_stroke_style_str(EDGE_COLOR);
			ctx.set_line_width(2.0);
		}
		ctx.begin_path();
		ctx.move_to(src.position.x, src.position.y);
		ctx.line_to(tgt.position.x, tgt.position.y);
		ctx.stroke();
		ctx.restore();
	}
}

fn draw_nodes(state: &ThreatGraphState, ctx: &CanvasRenderingContext2d) {
	let (hovered, selected, dragged) = (
		state.hovered.as_ref(),
		state.selected.as_ref(),
		state.dragged_node(),
	);

	for node in state.store.nodes() {
		let is_hovered = hovered == Some(&node.id);
		let is_selected = selected == Some(&node.id);
		let is_dragged = dragged == Some(&node.id);
		draw_node(ctx, node, is_hovered, is_selected, is_dragged);
	}

	// Tooltip last so no neighbour paints over it.
	if let Some(node) = state.hovered_node() {
		draw_tooltip(ctx, node);
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	is_hovered: bool,
	is_selected: bool,
	is_dragged: bool,
) {
	let risk = node.details.risk;
	let lifted = is_hovered && !is_dragged;
	let zoom = if lifted {
		1.15
	} else if is_selected {
		1.05
	} else {
		1.0
	};

	ctx.save();
	let _ = ctx.translate(node.position.x, node.position.y);
	let _ = ctx.scale(zoom, zoom);

	// glow
	circle(ctx, if lifted { 40.0 } else { 35.0 });
	ctx.set_fill_style_str(&risk.color_alpha(if lifted { 0.3 } else { 0.2 }));
	ctx.fill();
	if lifted {
		circle(ctx, 30.0);
		ctx.set_fill_style_str(&risk.color_alpha(0.4));
		ctx.fill();
	}

	ctx.save();
	if is_hovered || is_dragged {
		ctx.set_shadow_color(risk.color());
		ctx.set_shadow_blur(15.0);
	} else if is_selected {
		ctx.set_shadow_color(risk.color());
		ctx.set_shadow_blur(8.0);
	}
	circle(ctx, NODE_BODY);
	ctx.set_fill_style_str(CARD);
	ctx.fill();
	ctx.set_stroke_style_str(risk.color());
	ctx.set_line_width(if is_selected { 4.0 } else { 3.0 });
	ctx.stroke();
	ctx.restore();

	if is_selected {
		circle(ctx, 30.0);
		ctx.set_stroke_style_str(&risk.color_alpha(0.8));
		ctx.set_line_width(2.0);
		dash(ctx, 4.0, 4.0);
		ctx.stroke();
		solid(ctx);
	}

	let emphasis = is_hovered || is_dragged;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(risk.color());
	ctx.set_font(&format!("bold {}px sans-serif", if emphasis { 12 } else { 10 }));
	let _ = ctx.fill_text(node.kind.glyph(), 0.0, 0.0);

	ctx.set_fill_style_str(FOREGROUND);
	ctx.set_font(&format!("500 {}px sans-serif", if emphasis { 14 } else { 12 }));
	let _ = ctx.fill_text(&node.short_label(), 0.0, 45.0);

	ctx.restore();
}

fn draw_tooltip(ctx: &CanvasRenderingContext2d, node: &GraphNode) {
	ctx.save();
	let _ = ctx.translate(node.position.x, node.position.y);

	ctx.begin_path();
	ctx.rect(-60.0, -80.0, 120.0, 30.0);
	ctx.set_fill_style_str(POPOVER);
	ctx.fill();
	ctx.set_stroke_style_str(BORDER);
	ctx.set_line_width(1.0);
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_text_baseline("alphabetic");
	ctx.set_fill_style_str(FOREGROUND);
	ctx.set_font("500 10px sans-serif");
	let _ = ctx.fill_text(&node.details.risk.name().to_uppercase(), 0.0, -68.0);
	ctx.set_fill_style_str(MUTED);
	ctx.set_font("9px sans-serif");
	let _ = ctx.fill_text("Click to select", 0.0, -58.0);

	ctx.restore();
}
