//! Route gate components wrapping every routed page.
//!
//! Both variants evaluate [`crate::state::gate::evaluate`] against the shared
//! auth context on every phase change. While bootstrap is in flight they
//! render a neutral placeholder; a `Redirect` outcome navigates in an effect
//! and keeps the placeholder up until the router swaps the page out.

use leptos::children::ChildrenFn;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::AuthContext;
use crate::state::gate::{GateOutcome, RouteAccess, evaluate};

/// Admits only authenticated users whose role matches exactly.
#[component]
pub fn ProtectedRoute(required_role: Role, children: ChildrenFn) -> impl IntoView {
    gate(RouteAccess::Protected(required_role), children)
}

/// Admits only visitors who are not signed in (login/register).
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    gate(RouteAccess::PublicOnly, children)
}

fn gate(access: RouteAccess, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    let outcome = Memo::new(move |_| evaluate(&auth.phase(), access));

    Effect::new(move || {
        if let GateOutcome::Redirect(path) = outcome.get() {
            navigate(path, NavigateOptions::default());
        }
    });

    move || match outcome.get() {
        GateOutcome::Render => children().into_any(),
        GateOutcome::Pending | GateOutcome::Redirect(_) => view! {
            <div class="route-gate__pending">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
    }
}
