//! AI feedback list for the owner's store.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::nav::RoleNav;
use crate::net::types::Feedback;

/// AI feedback page — operational suggestions for one store.
///
/// The store comes from the `:store_id` path segment; without one (the nav
/// link) it falls back to the owner's first store.
#[component]
pub fn AiFeedbackPage() -> impl IntoView {
    let params = use_params_map();

    let feedback = LocalResource::new(move || {
        let id = params
            .read()
            .get("store_id")
            .and_then(|raw| raw.parse::<i64>().ok());
        async move {
            let id = match id {
                Some(id) => id,
                None => crate::net::stores::fetch_my_stores().await?.first()?.id,
            };
            crate::net::stores::fetch_ai_feedback(id).await
        }
    });

    view! {
        <div class="ai-feedback-page">
            <header class="ai-feedback-page__header">
                <a class="ai-feedback-page__back" href="/owner">"Back"</a>
                <h1>"AI Feedback"</h1>
            </header>

            <Suspense fallback=move || view! { <p>"Loading feedback..."</p> }>
                {move || {
                    feedback.get().map(|result| match result {
                        None => view! {
                            <p class="ai-feedback-page__error">
                                "Could not load feedback. Please try again."
                            </p>
                        }
                        .into_any(),
                        Some(items) if items.is_empty() => {
                            view! { <p>"No AI feedback yet."</p> }.into_any()
                        }
                        Some(items) => view! {
                            <ul class="ai-feedback-page__list">
                                {items
                                    .into_iter()
                                    .map(feedback_item)
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                        .into_any(),
                    })
                }}
            </Suspense>

            <RoleNav/>
        </div>
    }
}

fn feedback_item(item: Feedback) -> impl IntoView {
    view! {
        <li class="ai-feedback-page__item">
            <p class="ai-feedback-page__summary">{item.summary}</p>
            {item
                .created_at
                .map(|ts| view! { <span class="ai-feedback-page__date">{ts}</span> })}
        </li>
    }
}
