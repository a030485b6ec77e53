//! Customer home: browse stores.

use leptos::prelude::*;

use crate::components::nav::RoleNav;
use crate::components::store_card::StoreCard;

#[component]
pub fn CustomerMainPage() -> impl IntoView {
    let stores = LocalResource::new(|| crate::net::stores::fetch_stores());

    view! {
        <div class="customer-main-page">
            <header class="customer-main-page__header">
                <h1>"Discover Stores"</h1>
            </header>

            <Suspense fallback=move || view! { <p>"Loading stores..."</p> }>
                {move || {
                    stores.get().map(|result| match result {
                        None => view! {
                            <p class="customer-main-page__error">
                                "Could not load stores. Please try again."
                            </p>
                        }
                        .into_any(),
                        Some(list) if list.is_empty() => {
                            view! { <p>"No stores around yet."</p> }.into_any()
                        }
                        Some(list) => view! {
                            <div class="customer-main-page__cards">
                                {list
                                    .into_iter()
                                    .map(|store| {
                                        let href = format!("/customer/store/{}", store.id);
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
