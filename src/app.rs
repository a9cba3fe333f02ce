//! VisionNest Frontend App
//!
//! Root component: builds the gateway, restores a stored session and switches
//! between pages.

use leptos::prelude::*;
use reactive_stores::Store;
use vision_core::gateway::IdentityService;
use vision_core::GatewayConfig;

use crate::components::{ConfigMissing, Dashboard, Landing, LoginForm, VisionDetail};
use crate::context::{AppContext, AppServices};
use crate::models::Page;
use crate::session_store;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let config = match GatewayConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("gateway not configured: {}", e);
            return view! { <ConfigMissing message=e.to_string() /> }.into_any();
        }
    };
    let services = AppServices::new(config);

    let restored = session_store::load();
    if let Some(session) = &restored {
        log::info!("restored session for {}", session.display_name());
        services.gateway.restore_session(session.clone());
    }
    let start = if restored.is_some() { Page::Dashboard } else { Page::Landing };

    let (page, set_page) = signal(start);
    let (session, set_session) = signal(restored);
    let ctx = AppContext::new((page, set_page), (session, set_session));
    provide_context(ctx);

    services.gateway.on_session_change(move |change| match change {
        Some(session) => {
            log::debug!("session renewed for {}", session.display_name());
            ctx.replace_session(session.clone());
        }
        None => {
            log::info!("session expired");
            ctx.expire_session(&store);
        }
    });
    provide_context(services);

    view! {
        <div class="app-layout">
            {move || match page.get() {
                Page::Landing => view! { <Landing /> }.into_any(),
                Page::Login => view! { <LoginForm /> }.into_any(),
                Page::Dashboard => view! { <Dashboard /> }.into_any(),
                Page::Vision(id) => view! { <VisionDetail vision_id=id /> }.into_any(),
            }}
        </div>
    }
    .into_any()
}
