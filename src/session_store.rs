//! Session persistence
//!
//! The session survives a page reload through browser local storage. It is
//! written on sign-in and token refresh, and removed on sign-out or expiry.

use vision_core::domain::Session;
use web_sys::Storage;

const SESSION_KEY: &str = "vision-nest.session";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load() -> Option<Session> {
    let raw = storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding unreadable stored session: {}", e);
            clear();
            None
        }
    }
}

pub fn save(session: &Session) {
    let Some(storage) = storage() else {
        log::debug!("local storage unavailable, session not persisted");
        return;
    };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if let Err(e) = storage.set_item(SESSION_KEY, &raw) {
                log::warn!("persisting session failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("serializing session failed: {}", e),
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
