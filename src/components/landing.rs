//! Landing Page
//!
//! Wordmark and tagline; the call to action fades in after a short delay.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::models::Page;

const CTA_DELAY_MS: u32 = 3_000;
const SPARKLES: usize = 14;

#[component]
pub fn Landing() -> impl IntoView {
    let ctx = use_app_context();
    let (show_cta, set_show_cta) = signal(false);

    spawn_local(async move {
        TimeoutFuture::new(CTA_DELAY_MS).await;
        // The page may already be gone
        let _ = set_show_cta.try_set(true);
    });

    let sparkles = (0..SPARKLES)
        .map(|i| {
            // Spread without a random source: golden-ratio steps over the viewport
            let top = (i as f32 * 61.8) % 100.0;
            let left = (i as f32 * 38.2 + 7.0) % 100.0;
            let size = 4 + (i % 4) * 2;
            let style = format!(
                "top:{top:.1}%;left:{left:.1}%;width:{size}px;height:{size}px;animation-duration:{}s",
                6 + i % 6
            );
            view! { <span class="sparkle" style=style></span> }
        })
        .collect_view();

    view! {
        <div class="landing">
            <div class="sparkle-layer">{sparkles}</div>
            <h1 class="landing-logo wordmark" class:raised=move || show_cta.get()>
                "Vision"<span class="wordmark-accent">"Nest"</span>
            </h1>
            <p class="tagline">"Pin your progress. Watch it bloom."</p>
            <Show when=move || show_cta.get()>
                <button class="cta-btn" on:click=move |_| ctx.navigate(Page::Login)>
                    "Get Started"
                </button>
            </Show>
        </div>
    }
}
