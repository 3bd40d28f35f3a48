use leptos::prelude::*;

use crate::api;
use crate::components::filter_select::FilterSelect;
use crate::components::pagination::Pagination;
use crate::components::subscribe_modal::SubscribeTarget;
use crate::format::{abbreviate_number, format_bytes, format_timestamp};
use crate::query::{sort_indicator, TransferQuery};

/// Unique values in first-seen order; the filter dropdowns follow whatever
/// the current summary response contains.
fn distinct<I: IntoIterator<Item = String>>(values: I) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Paginated per-request table with sortable headers, a filter row and the
/// subscribe entry point.
///
/// While a fetch is in flight every interactive control is disabled and
/// the body collapses to a single loading row.
#[component]
pub fn DetailedTable(
    summary: ReadSignal<Vec<api::SummaryRow>>,
    details: ReadSignal<Vec<api::DetailRow>>,
    pagination: ReadSignal<Option<api::Pagination>>,
    query: ReadSignal<TransferQuery>,
    loading: ReadSignal<bool>,
    on_sort: Callback<String>,
    on_page: Callback<u32>,
    on_record_filter: Callback<String>,
    on_status_filters: Callback<Vec<String>>,
    on_action_filters: Callback<Vec<String>>,
    on_subscribe: Callback<SubscribeTarget>,
) -> impl IntoView {
    let (hovered_row, set_hovered_row) = signal::<Option<String>>(None);

    let action_options = Signal::derive(move || {
        distinct(
            summary
                .get()
                .into_iter()
                .map(|entry| entry.action)
                .filter(|action| !action.is_empty()),
        )
    });
    let status_options =
        Signal::derive(move || distinct(summary.get().into_iter().map(|entry| entry.status)));
    let action_selected = Signal::derive(move || query.with(|q| q.action_filters.clone()));
    let status_selected = Signal::derive(move || query.with(|q| q.status_filters.clone()));

    let loading_signal: Signal<bool> = loading.into();
    let pagination_signal: Signal<Option<api::Pagination>> = pagination.into();

    let sortable_header = move |label: &'static str, field: &'static str, rowspan: &'static str| {
        view! {
            <th
                class="sortable"
                rowspan=rowspan
                class:sorted=move || query.with(|q| q.sort_field.as_deref() == Some(field))
                on:click=move |_| {
                    if !loading.get() {
                        on_sort.run(field.to_string());
                    }
                }
            >
                {label}
                {move || query.with(|q| sort_indicator(q, field))}
            </th>
        }
    };

    view! {
        <div class="detail-table-wrap">
            <style>{include_str!("detailed_table.css")}</style>
            <table class="detail-table" class:loading=move || loading.get()>
                <thead>
                    <tr>
                        <th>"Record"</th>
                        <th>"Action"</th>
                        {sortable_header("Status", "status", "1")}
                        {sortable_header("Request date", "created_at", "2")}
                        {sortable_header("Started date", "started_at", "2")}
                        {sortable_header("# files", "num_record_files", "2")}
                        {sortable_header("Size", "record_size", "2")}
                        {sortable_header("# successful transfers", "num_transfers", "2")}
                        {sortable_header("Size of issued transfers", "size", "2")}
                        {sortable_header("Completion date", "completed_at", "2")}
                        <th rowspan="2">"Subscribe"</th>
                    </tr>
                    <tr class="filter-row">
                        <th>
                            <input
                                type="text"
                                class="record-filter"
                                placeholder="Filter by record"
                                prop:value=move || query.with(|q| q.record_filter.clone())
                                on:input=move |ev| {
                                    if loading.get() {
                                        return;
                                    }
                                    on_record_filter.run(event_target_value(&ev));
                                }
                                disabled=move || loading.get()
                            />
                        </th>
                        <th>
                            <FilterSelect
                                id="action-filter"
                                placeholder="Filter by action"
                                options=action_options
                                selected=action_selected
                                disabled=loading_signal
                                on_change=on_action_filters
                            />
                        </th>
                        <th>
                            <FilterSelect
                                id="status-filter"
                                placeholder="Filter by status"
                                options=status_options
                                selected=status_selected
                                disabled=loading_signal
                                on_change=on_status_filters
                            />
                        </th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if loading.get() {
                            return view! {
                                <tr class="placeholder-row">
                                    <td colspan="11" class="loading-cell">
                                        "Loading transfer requests..."
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        let items = details.get();
                        if items.is_empty() {
                            return view! {
                                <tr class="placeholder-row">
                                    <td colspan="11">"No transfer requests found."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        items
                            .into_iter()
                            .map(|item| {
                                let record_href = format!("/record/{}", item.recid);
                                let created = item
                                    .created_at
                                    .as_deref()
                                    .map(format_timestamp)
                                    .unwrap_or_default();
                                let started = item
                                    .started_at
                                    .as_deref()
                                    .map(format_timestamp)
                                    .unwrap_or_default();
                                let completed = item
                                    .completed_at
                                    .as_deref()
                                    .map(format_timestamp)
                                    .unwrap_or_default();
                                let successful = abbreviate_number(item.successful_transfers());
                                let subscribe_target =
                                    item.completed_at.is_none().then(|| SubscribeTarget {
                                        recid: item.recid.clone(),
                                        transfer_id: item.id.clone(),
                                    });
                                let num_hot = item.num_hot_files;
                                let num_cold = item.num_cold_files;
                                let failed = item.num_failed_transfers.unwrap_or(0);
                                let single_file = item.file.is_some();
                                let enter_id = item.id.clone();
                                let popover_id = item.id.clone();
                                view! {
                                    <tr
                                        class="detail-row"
                                        on:mouseenter=move |_| {
                                            set_hovered_row.set(Some(enter_id.clone()))
                                        }
                                        on:mouseleave=move |_| set_hovered_row.set(None)
                                    >
                                        <td class="record-cell">
                                            <a href=record_href>{item.recid.clone()}</a>
                                            {move || {
                                                (hovered_row.get().as_deref()
                                                    == Some(popover_id.as_str()))
                                                    .then(|| {
                                                        view! {
                                                            <div class="row-popover">
                                                                {num_hot
                                                                    .map(|n| view! {
                                                                        <div>{format!("{n} files on hot")}</div>
                                                                    })}
                                                                {num_cold
                                                                    .map(|n| view! {
                                                                        <div>{format!("{n} files on cold")}</div>
                                                                    })}
                                                                {(num_hot.is_some() || num_cold.is_some())
                                                                    .then(|| view! {
                                                                        <div class="popover-divider"></div>
                                                                    })}
                                                                <div>
                                                                    {if single_file {
                                                                        "One file requested"
                                                                    } else {
                                                                        "All files requested"
                                                                    }}
                                                                </div>
                                                                {(failed > 0)
                                                                    .then(|| view! {
                                                                        <div class="popover-divider"></div>
                                                                        <div>
                                                                            {format!(
                                                                                "{} failed transfers",
                                                                                abbreviate_number(failed),
                                                                            )}
                                                                        </div>
                                                                    })}
                                                            </div>
                                                        }
                                                    })
                                            }}
                                        </td>
                                        <td>{item.action.clone()}</td>
                                        <td>{item.status.clone()}</td>
                                        <td>{created}</td>
                                        <td>{started}</td>
                                        <td class="numeric">
                                            {abbreviate_number(item.num_record_files)}
                                        </td>
                                        <td class="numeric">{format_bytes(item.record_size)}</td>
                                        <td class="numeric">{successful}</td>
                                        <td class="numeric">{format_bytes(item.size)}</td>
                                        <td>{completed}</td>
                                        <td>
                                            {subscribe_target
                                                .map(|target| view! {
                                                    <button
                                                        class="btn subscribe-btn"
                                                        disabled=move || loading.get()
                                                        on:click=move |_| on_subscribe.run(target.clone())
                                                    >
                                                        "Subscribe"
                                                    </button>
                                                })}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
                <tfoot>
                    <tr>
                        <th colspan="11">
                            {move || format!("Showing {} entries", details.get().len())}
                        </th>
                    </tr>
                </tfoot>
            </table>
            <Pagination pagination=pagination_signal disabled=loading_signal on_page=on_page />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::distinct;

    #[test]
    fn distinct_preserves_first_seen_order() {
        let values = ["stage", "archive", "stage", "clean", "archive"]
            .into_iter()
            .map(str::to_string);
        assert_eq!(distinct(values), vec!["stage", "archive", "clean"]);
    }

    #[test]
    fn distinct_of_nothing_is_empty() {
        assert_eq!(distinct(Vec::<String>::new()), Vec::<String>::new());
    }
}
