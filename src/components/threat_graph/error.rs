use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::types::Size;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
	#[error("no browser window")]
	NoWindow,
	#[error("window size unavailable")]
	NoWindowSize,
	#[error("getContext(\"2d\") failed: {0}")]
	Context(String),
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("2d context has an unexpected type")]
	NotContext2d,
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.get_context("2d")
		.map_err(|e| CanvasError::Context(format!("{e:?}")))?
		.ok_or(CanvasError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| CanvasError::NotContext2d)
}

/// Inner size of the browser window in CSS pixels.
pub fn screen_size() -> Result<Size, CanvasError> {
	let window = web_sys::window().ok_or(CanvasError::NoWindow)?;
	let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).ok_or(CanvasError::NoWindowSize)
	};
	Ok(Size::new(dim(window.inner_width())?, dim(window.inner_height())?))
}
