//! Registration page with role selection and per-field server validation.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::auth::RegisterError;
use crate::net::types::Role;

/// Registration page — navigates to `/login` once the account is created.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let nickname = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User);
    let submitting = RwSignal::new(false);
    let error: RwSignal<Option<RegisterError>> = RwSignal::new(None);

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();
    #[cfg(not(feature = "hydrate"))]
    let _ = use_navigate();

    let field_error = move |field: &'static str| {
        error.with(|err| match err {
            Some(RegisterError::Validation(fields)) => fields
                .iter()
                .find(|f| f.field == field)
                .map(|f| f.message.clone()),
            _ => None,
        })
    };

    let banner = move || {
        error.with(|err| match err {
            Some(RegisterError::Conflict | RegisterError::Network(_)) => {
                err.as_ref().map(ToString::to_string)
            }
            _ => None,
        })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() || username.get().trim().is_empty() || password.get().is_empty() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use crate::net::auth::{AuthApi, HttpAuthApi};
            use crate::net::types::RegisterRequest;

            let payload = RegisterRequest {
                username: username.get().trim().to_owned(),
                password: password.get(),
                role: Some(role.get()),
                nickname: non_empty(&nickname.get()),
                email: non_empty(&email.get()),
                phone: None,
            };
            let navigate = navigate.clone();
            submitting.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match HttpAuthApi.register(&payload).await {
                    Ok(_) => navigate("/login", leptos_router::NavigateOptions::default()),
                    Err(err) => {
                        error.set(Some(err));
                        submitting.set(false);
                    }
                }
            });
        }
    };

    let text_field = move |label: &'static str,
                           kind: &'static str,
                           value: RwSignal<String>,
                           field: &'static str| {
        view! {
            <label class="register-page__label">
                {label}
                <input
                    class="register-page__input"
                    type=kind
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
                <Show when=move || field_error(field).is_some()>
                    <span class="register-page__field-error">
                        {move || field_error(field)}
                    </span>
                </Show>
            </label>
        }
    };

    view! {
        <div class="register-page">
            <h1>"Create an account"</h1>
            <form class="register-page__form" on:submit=on_submit>
                {text_field("Username", "text", username, "username")}
                {text_field("Password", "password", password, "password")}
                {text_field("Nickname", "text", nickname, "nickname")}
                {text_field("Email", "email", email, "email")}
                <label class="register-page__label">
                    "I am a"
                    <select
                        class="register-page__select"
                        on:change=move |ev| {
                            role.set(if event_target_value(&ev) == "OWNER" {
                                Role::Owner
                            } else {
                                Role::User
                            });
                        }
                    >
                        <option value="USER">"Customer"</option>
                        <option value="OWNER">"Store Owner"</option>
                    </select>
                </label>
                <Show when=move || banner().is_some()>
                    <p class="register-page__error">{banner}</p>
                </Show>
                <button
                    class="btn btn--primary"
                    type="submit"
                    prop:disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Creating..." } else { "Register" }}
                </button>
            </form>
            <p class="register-page__login">
                "Already registered? " <a href="/login">"Sign in"</a>
            </p>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
