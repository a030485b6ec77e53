//! Owner account page with profile details and logout.

use leptos::prelude::*;

use crate::components::nav::RoleNav;
use crate::state::auth::AuthContext;

#[component]
pub fn OwnerMyPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();

    view! {
        <div class="my-page">
            <header class="my-page__header">
                <h1>"My Page"</h1>
            </header>

            {move || {
                auth.current_user().map(|user| {
                    view! {
                        <dl class="my-page__profile">
                            <dt>"Username"</dt>
                            <dd>{user.username}</dd>
                            {user.nickname.map(|n| view! { <dt>"Nickname"</dt><dd>{n}</dd> })}
                            {user.email.map(|e| view! { <dt>"Email"</dt><dd>{e}</dd> })}
                        </dl>
                    }
                })
            }}

            <button class="btn my-page__logout" on:click=move |_| auth.spawn_logout()>
                "Log Out"
            </button>

            <RoleNav/>
        </div>
    }
}
