//! Mirrors the active filters into the page URL so a filtered view can be
//! shared or bookmarked.
//!
//! Writes use history *replacement*: typing in a filter must not grow the
//! back-button stack. The URL is written, never read back after mount.

/// Query-string keys mirrored by the dashboard.
pub mod params {
    pub const RECORD_ID: &str = "record_id";
    pub const ACTION: &str = "action";
    pub const STATUS: &str = "status";
}

/// Read/write access to the page's query string. Setting an empty value
/// removes the key.
pub trait UrlStatePort {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// The real browser location, via `history.replaceState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserUrlState;

impl UrlStatePort for BrowserUrlState {
    fn get(&self, key: &str) -> Option<String> {
        let window = web_sys::window()?;
        let href = window.location().href().ok()?;
        let url = web_sys::Url::new(&href).ok()?;
        url.search_params().get(key)
    }

    fn set(&self, key: &str, value: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(href) = window.location().href() else {
            return;
        };
        let Ok(url) = web_sys::Url::new(&href) else {
            return;
        };
        if value.is_empty() {
            url.search_params().delete(key);
        } else {
            url.search_params().set(key, value);
        }
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                "",
                Some(&url.href()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory stand-in for the browser location.
    #[derive(Debug, Default)]
    struct MemoryUrlState {
        params: Mutex<BTreeMap<String, String>>,
    }

    impl UrlStatePort for MemoryUrlState {
        fn get(&self, key: &str) -> Option<String> {
            self.params.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            let mut params = self.params.lock().unwrap();
            if value.is_empty() {
                params.remove(key);
            } else {
                params.insert(key.to_string(), value.to_string());
            }
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let port = MemoryUrlState::default();
        port.set(params::RECORD_ID, "CMS");
        assert_eq!(port.get(params::RECORD_ID).as_deref(), Some("CMS"));
    }

    #[test]
    fn unset_keys_read_as_none() {
        let port = MemoryUrlState::default();
        assert_eq!(port.get(params::STATUS), None);
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let port = MemoryUrlState::default();
        port.set(params::STATUS, "running");
        port.set(params::STATUS, "done,failed");
        assert_eq!(port.get(params::STATUS).as_deref(), Some("done,failed"));
    }

    #[test]
    fn empty_value_removes_the_key() {
        let port = MemoryUrlState::default();
        port.set(params::ACTION, "stage");
        port.set(params::ACTION, "");
        assert_eq!(port.get(params::ACTION), None);
    }
}
