use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::format::is_valid_email;

/// The (record, transfer) pair a subscription applies to. Exists only
/// while the modal is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeTarget {
    pub recid: String,
    pub transfer_id: String,
}

/// Email-subscription dialog for one transfer request.
///
/// The email draft lives inside the component, so closing the modal
/// discards it. On a failed submission the modal stays open with an inline
/// error so the user can retry.
#[component]
pub fn SubscribeModal(target: SubscribeTarget, on_close: Callback<()>) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (error_message, set_error_message) = signal::<Option<String>>(None);
    let (is_submitting, set_is_submitting) = signal(false);

    let submit = {
        let recid = target.recid.clone();
        let transfer_id = target.transfer_id.clone();
        move |_| {
            let address = email.get();
            if !is_valid_email(&address) {
                set_error_message.set(Some("Please enter a valid email address.".to_string()));
                return;
            }
            set_is_submitting.set(true);
            set_error_message.set(None);
            let recid = recid.clone();
            let transfer_id = transfer_id.clone();
            spawn_local(async move {
                match api::subscribe(&recid, &transfer_id, address.trim()).await {
                    Ok(()) => {
                        on_close.run(());
                    }
                    Err(e) => {
                        set_error_message.set(Some(format!("Error subscribing: {e}")));
                        set_is_submitting.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            on:click=move |_| {
                if !is_submitting.get() {
                    on_close.run(());
                }
            }
        >
            <style>{include_str!("subscribe_modal.css")}</style>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <h3>"Subscribe for Updates"</h3>
                <p>"Enter your email to subscribe to updates for this record."</p>
                <input
                    type="email"
                    class="modal-email"
                    placeholder="Enter your email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    disabled=move || is_submitting.get()
                />
                {move || {
                    error_message
                        .get()
                        .map(|e| view! { <div class="error-message">{e}</div> })
                }}
                <div class="modal-actions">
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| on_close.run(())
                        disabled=move || is_submitting.get()
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=submit
                        disabled=move || is_submitting.get()
                    >
                        {move || if is_submitting.get() { "Subscribing..." } else { "Subscribe" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
