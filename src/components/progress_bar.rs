//! Progress Bar Component

use leptos::prelude::*;

/// Horizontal bar with a "N% Completed" caption
#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-wrapper">
            <div class="progress-bar">
                <div class="progress-fill" style:width=move || format!("{}%", percent.get())></div>
            </div>
            <p class="progress-text">{move || format!("{}% Completed", percent.get())}</p>
        </div>
    }
}
