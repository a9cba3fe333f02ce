//! New Task Form Component
//!
//! Single text field; blank titles never reach the gateway.

use leptos::prelude::*;
use leptos::task::spawn_local;
use vision_core::commands;

use crate::context::use_services;
use crate::models::VisionId;
use crate::store::{use_app_store, TasksCell};

#[component]
pub fn NewTaskForm(vision_id: VisionId) -> impl IntoView {
    let services = use_services();
    let store = use_app_store();
    let vision_id = StoredValue::new(vision_id);
    let (new_title, set_new_title) = signal(String::new());

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get_untracked();
        if title.trim().is_empty() {
            return;
        }
        let gateway = services.gateway.clone();
        let vision_id = vision_id.get_value();
        spawn_local(async move {
            if commands::add_task(&*gateway, &TasksCell(store), &vision_id, &title).await.is_some() {
                let _ = set_new_title.try_set(String::new());
            }
        });
    };

    view! {
        <form class="add-wrapper" on:submit=create_task>
            <input
                type="text"
                placeholder="Add new task..."
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <button type="submit" class="add-btn">"+ Add"</button>
        </form>
    }
}
