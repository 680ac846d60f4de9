use leptos::prelude::*;

use crate::components::threat_graph::ThreatGraphView;
use crate::sample::sample_analysis;

/// Analysis graph page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph" style="position: fixed; inset: 0; background: #11131a;">
				<ThreatGraphView data=sample_analysis() />
				<div class="graph-overlay" style="position: absolute; top: 16px; left: 16px; color: #e5e7eb; pointer-events: none;">
					<h1 style="margin: 0; font-size: 20px;">"Behaviour Graph"</h1>
					<p class="subtitle" style="margin: 4px 0 0; color: #9ca3af; font-size: 13px;">
						"Drag nodes to reposition. Scroll to zoom. Drag the background to pan. Click a node for details."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
