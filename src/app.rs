//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::route_gate::{ProtectedRoute, PublicRoute};
use crate::net::types::Role;
use crate::pages::customer::main::CustomerMainPage;
use crate::pages::customer::my_page::CustomerMyPage;
use crate::pages::customer::store_detail::StoreDetailPage;
use crate::pages::login::LoginPage;
use crate::pages::owner::ai_feedback::AiFeedbackPage;
use crate::pages::owner::main::OwnerMainPage;
use crate::pages::owner::my_page::OwnerMyPage;
use crate::pages::register::RegisterPage;
use crate::state::auth::AuthContext;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Creates the auth context for this mount, kicks off silent session
/// restoration, and sets up client-side routing with the route gates.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // One auth context per app mount; every gate decision waits on its
    // bootstrap via the Initializing phase.
    let auth = AuthContext::new();
    provide_context(auth);
    auth.spawn_bootstrap();

    view! {
        <Stylesheet id="leptos" href="/pkg/savora.css"/>
        <Title text="Savora"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/login"/> }/>

                // Public-only routes
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <PublicRoute><RegisterPage/></PublicRoute> }
                />

                // Customer routes (/customer is an alias of /customer/main)
                <Route
                    path=StaticSegment("customer")
                    view=|| view! {
                        <ProtectedRoute required_role=Role::User>
                            <CustomerMainPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(StaticSegment("customer"), StaticSegment("main"))
                    view=|| view! {
                        <ProtectedRoute required_role=Role::User>
                            <CustomerMainPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(StaticSegment("customer"), StaticSegment("mypage"))
                    view=|| view! {
                        <ProtectedRoute required_role=Role::User>
                            <CustomerMyPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(
                        StaticSegment("customer"),
                        StaticSegment("store"),
                        ParamSegment("store_id"),
                    )
                    view=|| view! {
                        <ProtectedRoute required_role=Role::User>
                            <StoreDetailPage/>
                        </ProtectedRoute>
                    }
                />

                // Owner routes
                <Route
                    path=StaticSegment("owner")
                    view=|| view! {
                        <ProtectedRoute required_role=Role::Owner>
                            <OwnerMainPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(StaticSegment("owner"), StaticSegment("ai-feedback"))
                    view=|| view! {
                        <ProtectedRoute required_role=Role::Owner>
                            <AiFeedbackPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(
                        StaticSegment("owner"),
                        StaticSegment("ai-feedback"),
                        ParamSegment("store_id"),
                    )
                    view=|| view! {
                        <ProtectedRoute required_role=Role::Owner>
                            <AiFeedbackPage/>
                        </ProtectedRoute>
                    }
                />
                <Route
                    path=(StaticSegment("owner"), StaticSegment("mypage"))
                    view=|| view! {
                        <ProtectedRoute required_role=Role::Owner>
                            <OwnerMyPage/>
                        </ProtectedRoute>
                    }
                />
            </Routes>
        </Router>
    }
}
