use leptos::prelude::*;

/// A searchable multi-select dropdown.
///
/// Used for the action and status filter cells: a text input filters the
/// option list, options toggle in and out of the selection, and the option
/// list itself follows whatever the current summary response contains.
#[component]
pub fn FilterSelect(
    /// Unique ID for this select instance.
    id: &'static str,
    /// Placeholder text shown when nothing is selected.
    placeholder: &'static str,
    /// All available options.
    options: Signal<Vec<String>>,
    /// The currently selected values.
    selected: Signal<Vec<String>>,
    /// Disables opening and editing while a fetch is in flight.
    disabled: Signal<bool>,
    /// Callback with the full new selection after a toggle or clear.
    on_change: Callback<Vec<String>>,
) -> impl IntoView {
    let (is_open, set_is_open) = signal(false);
    let (search_text, set_search_text) = signal(String::new());

    let filtered_options = move || {
        let query = search_text.get().to_lowercase();
        let all = options.get();
        if query.is_empty() {
            all
        } else {
            all.into_iter()
                .filter(|option| option.to_lowercase().contains(&query))
                .collect()
        }
    };

    let display_label = move || {
        let current = selected.get();
        match current.len() {
            0 => placeholder.to_string(),
            1 => current[0].clone(),
            n => format!("{n} selected"),
        }
    };

    let toggle_value = move |value: String| {
        let mut current = selected.get();
        if let Some(position) = current.iter().position(|v| v == &value) {
            current.remove(position);
        } else {
            current.push(value);
        }
        on_change.run(current);
    };

    let on_clear = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        on_change.run(Vec::new());
        set_search_text.set(String::new());
    };

    let open = move || {
        if !disabled.get() {
            set_is_open.set(true);
            set_search_text.set(String::new());
        }
    };

    // Close when clicking anywhere outside the component.
    let container_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        if !is_open.get() {
            return;
        }

        let el = container_ref.get();
        if el.is_none() {
            return;
        }
        let container = el.unwrap();

        let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            if let Some(target) = ev.target() {
                if let Some(node) = target.dyn_ref::<web_sys::Node>() {
                    if !container.contains(Some(node)) {
                        set_is_open.set(false);
                    }
                }
            }
        });

        let window = web_sys::window().unwrap();
        let _ = window
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());

        closure.forget();
    });

    let dropdown_id = format!("{}-dropdown", id);

    view! {
        <div
            class="filter-select"
            class:open=move || is_open.get()
            class:disabled=move || disabled.get()
            node_ref=container_ref
        >
            <style>{include_str!("filter_select.css")}</style>

            {move || {
                if is_open.get() {
                    view! {
                        <input
                            type="text"
                            class="fs-search"
                            placeholder="Type to filter..."
                            prop:value=move || search_text.get()
                            on:input=move |ev| set_search_text.set(event_target_value(&ev))
                            autofocus=true
                        />
                    }
                    .into_any()
                } else {
                    let has_selection = !selected.get().is_empty();
                    let label = display_label();

                    if has_selection {
                        view! {
                            <div class="fs-display has-value" on:click=move |_| open()>
                                <span class="fs-display-text">{label}</span>
                                <button class="fs-clear" on:click=on_clear title="Clear selection">
                                    "\u{2715}"
                                </button>
                                <span class="fs-chevron">"\u{25BE}"</span>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="fs-display" on:click=move |_| open()>
                                <span class="fs-display-text placeholder">{label}</span>
                                <span class="fs-chevron">"\u{25BE}"</span>
                            </div>
                        }
                        .into_any()
                    }
                }
            }}

            {move || {
                if !is_open.get() {
                    return view! { <div style="display:none"></div> }.into_any();
                }

                let visible = filtered_options();
                if visible.is_empty() {
                    return view! {
                        <div class="fs-dropdown">
                            <div class="fs-empty">"No matching values"</div>
                        </div>
                    }
                    .into_any();
                }

                let current = selected.get();
                let option_views: Vec<_> = visible
                    .into_iter()
                    .map(|option| {
                        let is_selected = current.contains(&option);
                        let value = option.clone();
                        view! {
                            <div
                                class="fs-option"
                                class:selected=is_selected
                                on:mousedown=move |_| toggle_value(value.clone())
                            >
                                <span class="fs-check">
                                    {if is_selected { "\u{2713}" } else { "" }}
                                </span>
                                {option}
                            </div>
                        }
                    })
                    .collect();

                view! {
                    <div class="fs-dropdown" id={dropdown_id.clone()}>
                        <div class="fs-options">{option_views}</div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
