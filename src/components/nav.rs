//! Bottom navigation, one link set per role.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::auth::AuthContext;

/// Role-specific navigation bar. Renders nothing when signed out.
#[component]
pub fn RoleNav() -> impl IntoView {
    let auth = expect_context::<AuthContext>();

    move || match auth.current_role() {
        Some(Role::Owner) => view! {
            <nav class="role-nav">
                <a class="role-nav__link" href="/owner">"Stores"</a>
                <a class="role-nav__link" href="/owner/ai-feedback">"AI Feedback"</a>
                <a class="role-nav__link" href="/owner/mypage">"My Page"</a>
            </nav>
        }
        .into_any(),
        Some(Role::User) => view! {
            <nav class="role-nav">
                <a class="role-nav__link" href="/customer/main">"Browse"</a>
                <a class="role-nav__link" href="/customer/mypage">"My Page"</a>
            </nav>
        }
        .into_any(),
        None => ().into_any(),
    }
}
