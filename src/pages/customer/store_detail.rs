//! Store detail page for customers.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::nav::RoleNav;

/// Store detail — loads the store named by the `:store_id` path segment.
#[component]
pub fn StoreDetailPage() -> impl IntoView {
    let params = use_params_map();

    let store = LocalResource::new(move || {
        let id = params
            .read()
            .get("store_id")
            .and_then(|raw| raw.parse::<i64>().ok());
        async move {
            match id {
                Some(id) => crate::net::stores::fetch_store(id).await,
                None => None,
            }
        }
    });

    view! {
        <div class="store-detail-page">
            <header class="store-detail-page__header">
                <a class="store-detail-page__back" href="/customer/main">"Back"</a>
            </header>

            <Suspense fallback=move || view! { <p>"Loading store..."</p> }>
                {move || {
                    store.get().map(|result| match result {
                        None => view! {
                            <p class="store-detail-page__error">"Store not found."</p>
                        }
                        .into_any(),
                        Some(store) => view! {
                            <article class="store-detail-page__body">
                                <h1>{store.name}</h1>
                                {store
                                    .category
                                    .map(|c| view! { <p class="store-detail-page__category">{c}</p> })}
                                {store
                                    .address
                                    .map(|a| view! { <p class="store-detail-page__address">{a}</p> })}
                                {store
                                    .rating
                                    .map(|r| view! {
                                        <p class="store-detail-page__rating">
                                            {format!("Rating: {r:.1}")}
                                        </p>
                                    })}
                            </article>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>

            <RoleNav/>
        </div>
    }
}
