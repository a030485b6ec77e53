//! Reusable card component for store list items.

use leptos::prelude::*;

use crate::net::types::Store;

/// A clickable card representing a store in a list.
#[component]
pub fn StoreCard(store: Store, href: String) -> impl IntoView {
    view! {
        <a class="store-card" href=href>
            <span class="store-card__name">{store.name}</span>
            {store
                .category
                .map(|c| view! { <span class="store-card__category">{c}</span> })}
            {store
                .rating
                .map(|r| view! { <span class="store-card__rating">{format!("{r:.1}")}</span> })}
        </a>
    }
}
