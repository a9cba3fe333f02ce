//! Image Gallery Components
//!
//! Modal grid of a task's attachments and a fullscreen single-image preview.
//! Clicking the backdrop closes either one.

use leptos::prelude::*;

#[component]
pub fn ImageGallery(
    images: ReadSignal<Option<Vec<String>>>,
    set_images: WriteSignal<Option<Vec<String>>>,
    set_preview: WriteSignal<Option<String>>,
) -> impl IntoView {
    let close = move |_| set_images.set(None);

    view! {
        <Show when=move || images.with(Option::is_some)>
            <div class="modal-overlay" on:click=close>
                <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                    <h3>"Uploaded Images"</h3>
                    <div class="modal-grid">
                        {move || {
                            images
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .map(|url| {
                                    let src = url.clone();
                                    view! {
                                        <img
                                            class="modal-image"
                                            src=src
                                            on:click=move |_| set_preview.set(Some(url.clone()))
                                        />
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                    <button class="close-btn" on:click=close>"Close"</button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn ImagePreview(
    preview: ReadSignal<Option<String>>,
    set_preview: WriteSignal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || {
            preview.get().map(|url| {
                view! {
                    <div class="preview-overlay" on:click=move |_| set_preview.set(None)>
                        <img class="preview-image" src=url />
                    </div>
                }
            })
        }}
    }
}
