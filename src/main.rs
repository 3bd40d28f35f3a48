mod api;
mod app;
mod components;
mod format;
mod query;
mod url_state;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use app::TransferRequestsApp;
use url_state::BrowserUrlState;

/// The host page opts in by providing this container; without it the
/// widget simply does not mount.
const MOUNT_SELECTOR: &str = "#transfer-requests-app";

fn main() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(container) = document.query_selector(MOUNT_SELECTOR).ok().flatten() else {
        return;
    };
    let initial_record = container.get_attribute("data-record-id");
    let Ok(container) = container.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };
    leptos::mount::mount_to(container, move || {
        view! {
            <TransferRequestsApp url_state=BrowserUrlState initial_record=initial_record />
        }
    })
    .forget();
}
