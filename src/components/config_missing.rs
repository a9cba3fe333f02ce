//! Shown when the build carries no gateway settings

use leptos::prelude::*;

#[component]
pub fn ConfigMissing(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="config-missing">
            <h2>"VisionNest is not configured"</h2>
            <p>{message}</p>
            <p class="muted">
                "Rebuild with VISION_NEST_SUPABASE_URL and VISION_NEST_SUPABASE_ANON_KEY set."
            </p>
        </div>
    }
}
