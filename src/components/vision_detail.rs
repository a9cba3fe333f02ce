//! Vision Detail Page
//!
//! Title, progress and the first tasks of one vision. Everything shown here
//! is rebuilt from the gateway whenever the page opens.

use leptos::prelude::*;
use leptos::task::spawn_local;
use vision_core::commands;
use vision_core::state::{SharedState, MAX_VISIBLE_TASKS};

use crate::components::{ImageGallery, ImagePreview, NewTaskForm, ProgressBar, TaskRow};
use crate::context::{use_app_context, use_services};
use crate::models::{Page, VisionId};
use crate::store::{store_open_vision, use_app_store, AppStateStoreFields, ImagesCell, TasksCell};

#[component]
pub fn VisionDetail(vision_id: VisionId) -> impl IntoView {
    let ctx = use_app_context();
    let services = use_services();
    let store = use_app_store();
    let (loaded, set_loaded) = signal(false);
    let (gallery, set_gallery) = signal::<Option<Vec<String>>>(None);
    let (preview, set_preview) = signal::<Option<String>>(None);

    // Nothing from a previously opened vision may leak into this one
    store_open_vision(&store, &vision_id);

    {
        let gateway = services.gateway.clone();
        let vision_id = vision_id.clone();
        spawn_local(async move {
            let vision = commands::load_vision(&*gateway, &vision_id).await;
            if !TasksCell(store).read_with(|tasks| tasks.is_showing(&vision_id)) {
                log::debug!("vision {} was left before it loaded", vision_id);
                return;
            }
            store.vision().set(vision);
            let _ = set_loaded.try_set(true);
            commands::sync_tasks(&*gateway, &TasksCell(store), &ImagesCell(store), &vision_id).await;
        });
    }

    let progress = Signal::derive(move || store.tasks().read().progress());
    let truncated = move || store.tasks().read().is_truncated();
    let on_view_images = Callback::new(move |urls: Vec<String>| set_gallery.set(Some(urls)));

    view! {
        <div class="vision-page">
            <button class="back-btn" on:click=move |_| ctx.navigate(Page::Dashboard)>"← Dashboard"</button>
            {move || match (loaded.get(), store.vision().get()) {
                (false, _) => view! { <p class="loading">"Loading..."</p> }.into_any(),
                (true, None) => view! { <p class="loading">"Vision not found."</p> }.into_any(),
                (true, Some(vision)) => {
                    let vision_id = vision.id.clone();
                    view! {
                        <div class="card">
                            <h2 class="vision-title">{vision.title}</h2>
                            <p class="vision-description">{vision.description.unwrap_or_default()}</p>

                            <ProgressBar percent=progress />
                            <NewTaskForm vision_id=vision_id />

                            <For
                                each=move || store.tasks().read().visible().to_vec()
                                key=|task| task.id.clone()
                                children=move |task| view! { <TaskRow task=task on_view_images=on_view_images /> }
                            />

                            <Show when=truncated>
                                <p class="note">
                                    {format!("Showing first {} tasks for focus 🎯", MAX_VISIBLE_TASKS)}
                                </p>
                            </Show>
                        </div>
                    }
                    .into_any()
                }
            }}
            <ImageGallery images=gallery set_images=set_gallery set_preview=set_preview />
            <ImagePreview preview=preview set_preview=set_preview />
        </div>
    }
}
