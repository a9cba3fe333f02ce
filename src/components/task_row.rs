//! Task Row Component
//!
//! Checkbox, read-only title and delete. Completed tasks also offer an
//! attachment upload and, once something is attached, a gallery button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use vision_core::commands::{self, ToggleOutcome};
use wasm_bindgen_futures::JsFuture;

use crate::components::DeleteConfirmButton;
use crate::context::use_services;
use crate::models::Task;
use crate::store::{use_app_store, AppStateStoreFields, ImagesCell, TasksCell};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[component]
pub fn TaskRow(task: Task, #[prop(into)] on_view_images: Callback<Vec<String>>) -> impl IntoView {
    let services = use_services();
    let store = use_app_store();
    let id = StoredValue::new(task.id.clone());
    let title = task.title.clone();

    let completed = move || id.with_value(|id| store.tasks().read().completed_of(id).unwrap_or(false));
    let image_count = move || id.with_value(|id| store.images().read().count(id));

    let on_toggle = {
        let services = services.clone();
        move |_| {
            let Some(previous) = id.with_value(|id| store.tasks().read_untracked().completed_of(id)) else {
                return;
            };
            let services = services.clone();
            let task_id = id.get_value();
            spawn_local(async move {
                let outcome = services
                    .toggles
                    .toggle(&*services.gateway, &TasksCell(store), &task_id, previous)
                    .await;
                if outcome == ToggleOutcome::Ignored {
                    // The browser already flipped the box; re-sync it with the store
                    store.tasks().update(|_| {});
                }
            });
        }
    };

    let on_delete = {
        let services = services.clone();
        Callback::new(move |_| {
            let gateway = services.gateway.clone();
            let task_id = id.get_value();
            spawn_local(async move {
                commands::delete_task(&*gateway, &TasksCell(store), &ImagesCell(store), &task_id).await;
            });
        })
    };

    let on_file = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            log::debug!("no file selected");
            return;
        };
        // Let the same file be picked again later
        input.set_value("");

        let gateway = services.gateway.clone();
        let task_id = id.get_value();
        spawn_local(async move {
            let bytes = match read_file_bytes(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("reading {} failed: {}", file.name(), e);
                    return;
                }
            };
            let content_type = match file.type_() {
                t if t.is_empty() => FALLBACK_CONTENT_TYPE.to_string(),
                t => t,
            };
            match commands::upload_task_image(&*gateway, &ImagesCell(store), &task_id, &file.name(), bytes, &content_type).await {
                Ok(path) => log::info!("uploaded {}", path),
                Err(e) => log::warn!("upload for task {} failed: {}", task_id, e),
            }
        });
    };

    let on_view = move |_| {
        let urls = id.with_value(|id| store.images().read_untracked().get(id).to_vec());
        on_view_images.run(urls);
    };

    view! {
        <div class="task-block">
            <div class="task-row">
                <input type="checkbox" prop:checked=completed on:change=on_toggle />
                <input
                    type="text"
                    class="task-title"
                    class:done=completed
                    readonly
                    prop:value=title
                />
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>

            <Show when=completed>
                <div class="upload-section">
                    <label class="upload-btn">
                        "Upload Image"
                        <input type="file" accept="image/*" hidden on:change=on_file.clone() />
                    </label>
                    <Show when=move || { image_count() > 0 }>
                        <button class="view-btn" on:click=on_view>
                            {move || format!("View Images ({})", image_count())}
                        </button>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
