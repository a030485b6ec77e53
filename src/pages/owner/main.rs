//! Owner dashboard listing the owner's stores.

use leptos::prelude::*;

use crate::components::nav::RoleNav;
use crate::components::store_card::StoreCard;

/// Owner home — shows the owner's stores with an empty-state prompt when
/// none are registered yet.
#[component]
pub fn OwnerMainPage() -> impl IntoView {
    let stores = LocalResource::new(|| crate::net::stores::fetch_my_stores());

    view! {
        <div class="owner-main-page">
            <header class="owner-main-page__header">
                <h1>"My Stores"</h1>
            </header>

            <Suspense fallback=move || view! { <p>"Loading stores..."</p> }>
                {move || {
                    stores.get().map(|result| match result {
                        None => view! {
                            <p class="owner-main-page__error">
                                "Could not load your stores. Please try again."
                            </p>
                        }
                        .into_any(),
                        Some(list) if list.is_empty() => view! {
                            <div class="owner-main-page__empty">
                                <p>"No stores registered yet."</p>
                            </div>
                        }
                        .into_any(),
                        Some(list) => view! {
                            <div class="owner-main-page__cards">
                                {list
                                    .into_iter()
                                    .map(|store| {
                                        let href =
                                            format!("/owner/ai-feedback/{}", store.id);
                                        view! { <StoreCard store=store href=href/> }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>

            <RoleNav/>
        </div>
    }
}
