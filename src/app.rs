use leptos::logging::error;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, DetailRow, Pagination, SummaryRow};
use crate::components::detailed_table::DetailedTable;
use crate::components::subscribe_modal::{SubscribeModal, SubscribeTarget};
use crate::components::summary_table::SummaryTable;
use crate::query::TransferQuery;
use crate::url_state::{params, UrlStatePort};

/// The transfer-requests dashboard.
///
/// Owns the combined filter/sort/page state and the fetch effect; the
/// tables underneath are presentational. Each response fully replaces the
/// previous summary/detail/pagination state, and a failed refresh keeps
/// the last good view on screen.
#[component]
pub fn TransferRequestsApp<U>(
    /// Port for mirroring filter state into the page URL.
    url_state: U,
    /// Record filter seeded from the mount container, if any.
    initial_record: Option<String>,
) -> impl IntoView
where
    U: UrlStatePort + Copy + Send + Sync + 'static,
{
    let (query, set_query) = signal(TransferQuery::with_record(initial_record));
    let (summary, set_summary) = signal::<Vec<SummaryRow>>(Vec::new());
    let (details, set_details) = signal::<Vec<DetailRow>>(Vec::new());
    let (pagination, set_pagination) = signal::<Option<Pagination>>(None);
    let (loading, set_loading) = signal(false);
    let (fetch_error, set_fetch_error) = signal::<Option<String>>(None);
    let (modal_target, set_modal_target) = signal::<Option<SubscribeTarget>>(None);

    // Monotonic sequence guard: only the most recently issued request may
    // write its response into view state.
    let latest_request = StoredValue::new(0u64);

    // Dedup on value so setting a slot to its current content does not
    // refetch.
    let query_key = Memo::new(move |_| query.get());

    Effect::new(move |_| {
        let q = query_key.get();
        let seq = latest_request.get_value() + 1;
        latest_request.set_value(seq);
        set_loading.set(true);
        spawn_local(async move {
            let result = api::fetch_transfer_requests(&q).await;
            if latest_request.get_value() != seq {
                // Superseded while in flight.
                return;
            }
            match result {
                Ok(content) => {
                    let pages = content.pagination_or_default(q.page, q.per_page);
                    let total_pages = pages.pages;
                    set_summary.set(content.summary);
                    set_details.set(content.details);
                    set_pagination.set(Some(pages));
                    set_fetch_error.set(None);
                    if total_pages > 0 && q.page > total_pages {
                        set_query.update(|state| state.clamp_page(total_pages));
                    }
                }
                Err(e) => {
                    error!("failed to load transfer requests: {e}");
                    set_fetch_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let on_record_filter = Callback::new(move |value: String| {
        url_state.set(params::RECORD_ID, &value);
        set_query.update(|q| q.set_record_filter(value));
    });
    let on_status_filters = Callback::new(move |values: Vec<String>| {
        url_state.set(params::STATUS, &values.join(","));
        set_query.update(|q| q.set_status_filters(values));
    });
    let on_action_filters = Callback::new(move |values: Vec<String>| {
        url_state.set(params::ACTION, &values.join(","));
        set_query.update(|q| q.set_action_filters(values));
    });
    let on_sort = Callback::new(move |field: String| set_query.update(|q| q.toggle_sort(&field)));
    let on_page = Callback::new(move |page: u32| set_query.update(|q| q.set_page(page)));
    let on_subscribe =
        Callback::new(move |target: SubscribeTarget| set_modal_target.set(Some(target)));
    let close_modal = Callback::new(move |_: ()| set_modal_target.set(None));
    let on_summary_row = Callback::new(move |status: String| {
        url_state.set(params::STATUS, &status);
        set_query.update(|q| q.set_status_filters(vec![status]));
    });

    view! {
        <div class="transfer-requests">
            <style>{include_str!("app.css")}</style>
            <h2>"Transfer Requests"</h2>
            {move || {
                fetch_error
                    .get()
                    .map(|e| view! {
                        <div class="error-banner">
                            <span>"Failed to refresh transfer requests: " {e}</span>
                            <button class="dismiss" on:click=move |_| set_fetch_error.set(None)>
                                "\u{2715}"
                            </button>
                        </div>
                    })
            }}
            <h3>"Summary"</h3>
            <SummaryTable summary=summary on_row_click=on_summary_row />
            <h3>"Details"</h3>
            <DetailedTable
                summary=summary
                details=details
                pagination=pagination
                query=query
                loading=loading
                on_sort=on_sort
                on_page=on_page
                on_record_filter=on_record_filter
                on_status_filters=on_status_filters
                on_action_filters=on_action_filters
                on_subscribe=on_subscribe
            />
            {move || {
                modal_target
                    .get()
                    .map(|target| view! { <SubscribeModal target=target on_close=close_modal /> })
            }}
        </div>
    }
}
