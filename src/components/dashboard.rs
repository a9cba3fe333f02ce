//! Dashboard Page
//!
//! Greeting and the user's visions. A stored session that the gateway no
//! longer honours sends the user back to the landing page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use vision_core::commands;
use vision_core::gateway::IdentityService;

use crate::context::{use_app_context, use_services};
use crate::models::Page;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let services = use_services();
    let store = use_app_store();
    let (loading, set_loading) = signal(true);

    {
        let gateway = services.gateway.clone();
        spawn_local(async move {
            match gateway.current_user().await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    // A failed token refresh has already ended the session
                    if ctx.session.get_untracked().is_some() {
                        log::info!("stored session expired");
                        ctx.end_session(&store);
                    }
                    return;
                }
                Err(e) => log::warn!("session check failed: {}", e),
            }
            let summaries = commands::load_vision_summaries(&*gateway).await;
            store.visions().set(summaries);
            let _ = set_loading.try_set(false);
        });
    }

    let on_sign_out = move |_| {
        let gateway = services.gateway.clone();
        ctx.end_session(&store);
        spawn_local(async move {
            commands::sign_out(&*gateway).await;
        });
    };

    view! {
        <div class="dashboard">
            <h1 class="greeting">
                "Hey " {move || ctx.username().unwrap_or_default()} " 👋"
            </h1>
            <header class="dashboard-header">
                <h2 class="brand">"VisionNest"</h2>
                <button class="sign-out-btn" on:click=on_sign_out>"Sign out"</button>
            </header>

            <main class="dashboard-main">
                <div class="card">
                    <h3 class="section-title">"Your Visions"</h3>
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <p class="muted">"Loading..."</p> }
                    >
                        <Show
                            when=move || !store.visions().read().is_empty()
                            fallback=|| view! { <p class="muted">"No visions yet."</p> }
                        >
                            <table class="vision-table">
                                <thead>
                                    <tr>
                                        <th>"Vision"</th>
                                        <th>"Description"</th>
                                        <th>"Progress"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || store.visions().get()
                                        key=|summary| summary.vision.id.clone()
                                        children=move |summary| {
                                            let vision = summary.vision;
                                            let id = vision.id.clone();
                                            let progress = summary
                                                .progress
                                                .map(|percent| format!("{}%", percent))
                                                .unwrap_or_else(|| "–".to_string());
                                            view! {
                                                <tr
                                                    class="vision-row"
                                                    on:click=move |_| ctx.navigate(Page::Vision(id.clone()))
                                                >
                                                    <td>{vision.title}</td>
                                                    <td>{vision.description.unwrap_or_default()}</td>
                                                    <td class="vision-progress">{progress}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </Show>
                    </Show>
                </div>
            </main>
        </div>
    }
}
