use leptos::prelude::*;

use crate::api::SummaryRow;
use crate::format::{abbreviate_number, format_bytes};

/// Aggregate counts per (action, status) pair, exactly as the server
/// reported them.
#[component]
pub fn SummaryTable(
    summary: ReadSignal<Vec<SummaryRow>>,
    /// Invoked with the row's status when a row is clicked.
    #[prop(optional, into)]
    on_row_click: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <div class="summary-table-wrap">
            <style>{include_str!("summary_table.css")}</style>
            <table class="summary-table">
                <thead>
                    <tr>
                        <th>"Action"</th>
                        <th>"Status"</th>
                        <th>"Count"</th>
                        <th>"Number of files"</th>
                        <th>"Size"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || summary.get()
                        key=|row| (row.action.clone(), row.status.clone())
                        children=move |row: SummaryRow| {
                            let status = row.status.clone();
                            view! {
                                <tr
                                    class="summary-row"
                                    class:clickable=on_row_click.is_some()
                                    on:click=move |_| {
                                        if let Some(callback) = on_row_click {
                                            callback.run(status.clone());
                                        }
                                    }
                                >
                                    <td>{row.action.clone()}</td>
                                    <td>{row.status.clone()}</td>
                                    <td class="numeric">{abbreviate_number(row.count)}</td>
                                    <td class="numeric">{abbreviate_number(row.files)}</td>
                                    <td class="numeric">{format_bytes(row.size)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
