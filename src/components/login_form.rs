//! Login Form Component
//!
//! One form for both sign-in and sign-up. Authentication outcomes are the
//! only errors shown to the user.

use leptos::prelude::*;
use leptos::task::spawn_local;
use vision_core::commands;

use crate::context::{use_app_context, use_services};
use crate::dialog::alert;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let services = use_services();

    let (is_signup, set_is_signup) = signal(false);
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);

        let gateway = services.gateway.clone();
        let signup = is_signup.get_untracked();
        let name = full_name.get_untracked();
        let mail = email.get_untracked();
        let pass = password.get_untracked();

        spawn_local(async move {
            if signup {
                match commands::sign_up(&*gateway, &mail, &pass, &name).await {
                    Ok(()) => {
                        alert("Signup successful! Please login.");
                        set_is_signup.set(false);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            } else {
                match commands::sign_in(&*gateway, &mail, &pass).await {
                    Ok(session) => {
                        set_password.set(String::new());
                        ctx.begin_session(session);
                    }
                    Err(e) => alert(&e.user_message()),
                }
            }
            let _ = set_busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h2 class="login-title">
                    {move || if is_signup.get() { "Create your VisionNest" } else { "Welcome back" }}
                </h2>

                <form class="login-form" on:submit=on_submit>
                    <Show when=move || is_signup.get()>
                        <input
                            type="text"
                            placeholder="Full Name"
                            required
                            prop:value=move || full_name.get()
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>
                        {move || if is_signup.get() { "Sign Up" } else { "Login" }}
                    </button>
                </form>

                <p class="login-toggle" on:click=move |_| set_is_signup.update(|s| *s = !*s)>
                    {move || {
                        if is_signup.get() {
                            "Already have an account? Login"
                        } else {
                            "New here? Create an account"
                        }
                    }}
                </p>
            </div>
        </div>
    }
}
