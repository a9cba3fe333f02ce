//! Blocking browser dialogs

/// Show a blocking alert. Used for authentication outcomes and session expiry.
pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("no window for alert: {}", message);
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        log::warn!("alert failed: {:?}", e);
    }
}
