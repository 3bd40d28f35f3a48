use leptos::prelude::*;

/// One slot in the page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Windowed page list: one boundary page at each end, two siblings around
/// the current page, ellipsis for the gaps. A gap of a single page shows
/// that page instead of an ellipsis.
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    const BOUNDARY: u32 = 1;
    const SIBLINGS: u32 = 2;

    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut keep = std::collections::BTreeSet::new();
    for page in 1..=BOUNDARY.min(total) {
        keep.insert(page);
    }
    for page in total.saturating_sub(BOUNDARY - 1).max(1)..=total {
        keep.insert(page);
    }
    let low = current.saturating_sub(SIBLINGS).max(1);
    let high = (current + SIBLINGS).min(total);
    for page in low..=high {
        keep.insert(page);
    }

    let mut items = Vec::new();
    let mut previous: Option<u32> = None;
    for page in keep {
        if let Some(last) = previous {
            if page == last + 2 {
                items.push(PageItem::Page(last + 1));
            } else if page > last + 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

#[component]
pub fn Pagination(
    pagination: Signal<Option<crate::api::Pagination>>,
    disabled: Signal<bool>,
    on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <style>{include_str!("pagination.css")}</style>
            {move || {
                let info = pagination.get()?;
                let current = info.current_page;
                let total = info.pages;
                let go = move |page: u32| {
                    if !disabled.get() && page >= 1 && page <= total && page != current {
                        on_page.run(page);
                    }
                };
                let items = page_items(current, total)
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(page) => view! {
                            <button
                                class="page-btn"
                                class:active=page == current
                                disabled=move || disabled.get()
                                on:click=move |_| go(page)
                            >
                                {page}
                            </button>
                        }
                        .into_any(),
                        PageItem::Ellipsis => {
                            view! { <span class="page-ellipsis">"..."</span> }.into_any()
                        }
                    })
                    .collect::<Vec<_>>();
                Some(view! {
                    <button
                        class="page-btn"
                        disabled=move || disabled.get() || current <= 1
                        on:click=move |_| go(current.saturating_sub(1))
                    >
                        "\u{2039}"
                    </button>
                    {items}
                    <button
                        class="page-btn"
                        disabled={move || disabled.get() || current >= total}
                        on:click=move |_| go(current + 1)
                    >
                        "\u{203A}"
                    </button>
                })
            }}
        </div>
    }
}
