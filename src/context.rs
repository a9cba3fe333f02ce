//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use vision_core::commands::ToggleController;
use vision_core::gateway::{SupabaseClient, SESSION_EXPIRED};
use vision_core::GatewayConfig;

use crate::dialog::alert;
use crate::models::{Page, Session};
use crate::session_store;
use crate::store::{store_clear, AppStore};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Signed-in session - read
    pub session: ReadSignal<Option<Session>>,
    /// Signed-in session - write
    set_session: WriteSignal<Option<Session>>,
}

impl AppContext {
    pub fn new(
        page: (ReadSignal<Page>, WriteSignal<Page>),
        session: (ReadSignal<Option<Session>>, WriteSignal<Option<Session>>),
    ) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
            session: session.0,
            set_session: session.1,
        }
    }

    /// Go to a page; pages behind sign-in fall back to the login form
    pub fn navigate(&self, page: Page) {
        if page.requires_session() && self.session.get_untracked().is_none() {
            log::debug!("no session, redirecting {:?} to login", page);
            self.set_page.set(Page::Login);
            return;
        }
        self.set_page.set(page);
    }

    /// Keep a fresh session and enter the dashboard
    pub fn begin_session(&self, session: Session) {
        session_store::save(&session);
        self.set_session.set(Some(session));
        self.set_page.set(Page::Dashboard);
    }

    /// Forget the session and all user data
    pub fn end_session(&self, store: &AppStore) {
        session_store::clear();
        store_clear(store);
        self.set_session.set(None);
        self.set_page.set(Page::Landing);
    }

    /// Keep a refreshed session without changing page
    pub fn replace_session(&self, session: Session) {
        session_store::save(&session);
        self.set_session.set(Some(session));
    }

    /// The gateway could not renew the session: forget it and ask for a new
    /// sign-in
    pub fn expire_session(&self, store: &AppStore) {
        session_store::clear();
        store_clear(store);
        self.set_session.set(None);
        self.set_page.set(Page::Login);
        alert(SESSION_EXPIRED);
    }

    /// Greeting name for the signed-in user
    pub fn username(&self) -> Option<String> {
        self.session.with(|session| session.as_ref().map(Session::display_name))
    }
}

/// Gateway handles shared by every component
#[derive(Clone)]
pub struct AppServices {
    pub gateway: Arc<SupabaseClient>,
    pub toggles: Arc<ToggleController>,
}

impl AppServices {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            gateway: Arc::new(SupabaseClient::new(config)),
            toggles: Arc::new(ToggleController::new()),
        }
    }
}

/// Get the services from context
pub fn use_services() -> AppServices {
    expect_context::<AppServices>()
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
