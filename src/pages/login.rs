//! Login page with a username/password form.
//!
//! Submission is disabled while a login call is outstanding, so no two
//! concurrent logins are issued from the form. Failures surface inline.

use leptos::prelude::*;

use crate::state::auth::AuthContext;

/// Login page — on success the public route gate redirects to the
/// signed-in role's home.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let pending = move || auth.state().login_pending;
    let error = move || auth.state().login_error.map(|e| e.to_string());

    let submit = move || {
        let user = username.get();
        let pass = password.get();
        if user.trim().is_empty() || pass.is_empty() || pending() {
            return;
        }
        auth.spawn_login(user.trim().to_owned(), pass);
    };

    view! {
        <div class="login-page">
            <h1>"Savora"</h1>
            <p>"Sign in to manage or discover stores"</p>
            <form
                class="login-page__form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <label class="login-page__label">
                    "Username"
                    <input
                        class="login-page__input"
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-page__label">
                    "Password"
                    <input
                        class="login-page__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error().is_some()>
                    <p class="login-page__error">{error}</p>
                </Show>
                <button class="btn btn--primary" type="submit" prop:disabled=pending>
                    {move || if pending() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <p class="login-page__register">
                "No account yet? " <a href="/register">"Register"</a>
            </p>
        </div>
    }
}
