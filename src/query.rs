//! Filter, sort and pagination state for the transfer-requests view.
//!
//! The server owns filtering and ordering; this module only holds the
//! requested state and serializes it into the query string understood by
//! `/transfer_requests_content`.

/// Rows requested per page. The backend treats this as an upper bound.
pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The complete request state for one view of the transfer-requests table.
///
/// Every mutator except `set_page` resets `page` to 1: changing what is
/// filtered or how it is ordered invalidates the previous page position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub status_filters: Vec<String>,
    pub action_filters: Vec<String>,
    pub record_filter: String,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for TransferQuery {
    fn default() -> Self {
        Self {
            status_filters: Vec::new(),
            action_filters: Vec::new(),
            record_filter: String::new(),
            sort_field: None,
            sort_direction: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl TransferQuery {
    /// Initial state, optionally seeded with a record filter taken from the
    /// mount container's `data-record-id` attribute.
    pub fn with_record(record: Option<String>) -> Self {
        Self {
            record_filter: record.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set_record_filter(&mut self, value: String) {
        self.record_filter = value;
        self.page = 1;
    }

    pub fn set_status_filters(&mut self, values: Vec<String>) {
        self.status_filters = values;
        self.page = 1;
    }

    pub fn set_action_filters(&mut self, values: Vec<String>) {
        self.action_filters = values;
        self.page = 1;
    }

    /// Single-column sort. Clicking the active field flips the direction,
    /// clicking a new field starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let direction = match (self.sort_field.as_deref(), self.sort_direction) {
            (Some(current), Some(dir)) if current == field => dir.toggled(),
            _ => SortDirection::Asc,
        };
        self.sort_field = Some(field.to_string());
        self.sort_direction = Some(direction);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Pull the page back into `[1, total_pages]` once the server has told
    /// us how many pages actually exist.
    pub fn clamp_page(&mut self, total_pages: u32) {
        if total_pages > 0 && self.page > total_pages {
            self.page = total_pages;
        }
    }

    /// Serialize into the query string consumed by the content endpoint.
    /// A parameter is present exactly when its filter carries a value.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![
            format!("page={}", self.page),
            format!("per_page={}", self.per_page),
        ];
        if let (Some(field), Some(direction)) = (&self.sort_field, self.sort_direction) {
            parts.push(format!("sort={}", urlencoding::encode(field)));
            parts.push(format!("direction={}", direction.as_str()));
        }
        if !self.status_filters.is_empty() {
            parts.push(format!(
                "status={}",
                urlencoding::encode(&self.status_filters.join(","))
            ));
        }
        if !self.action_filters.is_empty() {
            parts.push(format!(
                "action={}",
                urlencoding::encode(&self.action_filters.join(","))
            ));
        }
        let record = self.record_filter.trim();
        if !record.is_empty() {
            parts.push(format!("record={}", urlencoding::encode(record)));
        }
        parts.join("&")
    }
}

/// Header decoration for the column currently sorted on.
pub fn sort_indicator(query: &TransferQuery, field: &str) -> &'static str {
    match (query.sort_field.as_deref(), query.sort_direction) {
        (Some(current), Some(SortDirection::Asc)) if current == field => " \u{25B2}",
        (Some(current), Some(SortDirection::Desc)) if current == field => " \u{25BC}",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_serializes_to_page_and_per_page_only() {
        let query = TransferQuery::default();
        assert_eq!(query.to_query_string(), "page=1&per_page=20");
    }

    #[test]
    fn with_record_seeds_the_record_filter() {
        let query = TransferQuery::with_record(Some("CMS".to_string()));
        assert_eq!(query.record_filter, "CMS");
        assert_eq!(query.page, 1);

        let query = TransferQuery::with_record(None);
        assert_eq!(query.record_filter, "");
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let mut query = TransferQuery::default();
        query.set_page(7);
        query.set_record_filter("CMS".to_string());
        assert_eq!(query.page, 1);

        query.set_page(7);
        query.set_status_filters(vec!["done".to_string()]);
        assert_eq!(query.page, 1);

        query.set_page(7);
        query.set_action_filters(vec!["stage".to_string()]);
        assert_eq!(query.page, 1);

        query.set_page(7);
        query.toggle_sort("created_at");
        assert_eq!(query.page, 1);
    }

    #[test]
    fn set_page_does_not_disturb_filters() {
        let mut query = TransferQuery::default();
        query.set_record_filter("CMS".to_string());
        query.set_page(3);
        assert_eq!(query.page, 3);
        assert_eq!(query.record_filter, "CMS");
    }

    #[test]
    fn set_page_floors_at_one() {
        let mut query = TransferQuery::default();
        query.set_page(0);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn toggle_sort_flips_direction_on_the_same_field() {
        let mut query = TransferQuery::default();
        query.toggle_sort("status");
        assert_eq!(query.sort_field.as_deref(), Some("status"));
        assert_eq!(query.sort_direction, Some(SortDirection::Asc));

        query.toggle_sort("status");
        assert_eq!(query.sort_direction, Some(SortDirection::Desc));

        query.toggle_sort("status");
        assert_eq!(query.sort_direction, Some(SortDirection::Asc));
    }

    #[test]
    fn toggle_sort_on_a_new_field_starts_ascending() {
        let mut query = TransferQuery::default();
        query.toggle_sort("status");
        query.toggle_sort("status");
        assert_eq!(query.sort_direction, Some(SortDirection::Desc));

        query.toggle_sort("created_at");
        assert_eq!(query.sort_field.as_deref(), Some("created_at"));
        assert_eq!(query.sort_direction, Some(SortDirection::Asc));
    }

    #[test]
    fn clamp_page_respects_the_reported_page_count() {
        let mut query = TransferQuery::default();
        query.set_page(9);
        query.clamp_page(4);
        assert_eq!(query.page, 4);

        query.clamp_page(0);
        assert_eq!(query.page, 4);

        query.set_page(2);
        query.clamp_page(4);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn empty_filters_are_omitted_from_the_query_string() {
        let mut query = TransferQuery::default();
        query.set_record_filter("   ".to_string());
        assert_eq!(query.to_query_string(), "page=1&per_page=20");
    }

    #[test]
    fn populated_filters_are_all_serialized() {
        let mut query = TransferQuery::default();
        query.set_status_filters(vec!["done".to_string(), "failed".to_string()]);
        query.set_action_filters(vec!["stage".to_string()]);
        query.set_record_filter("CMS".to_string());
        query.toggle_sort("created_at");
        query.set_page(2);
        assert_eq!(
            query.to_query_string(),
            "page=2&per_page=20&sort=created_at&direction=asc&status=done%2Cfailed&action=stage&record=CMS"
        );
    }

    #[test]
    fn record_filter_is_trimmed_and_percent_encoded() {
        let mut query = TransferQuery::default();
        query.set_record_filter("  open data  ".to_string());
        assert_eq!(
            query.to_query_string(),
            "page=1&per_page=20&record=open%20data"
        );
    }

    #[test]
    fn sort_indicator_marks_only_the_active_field() {
        let mut query = TransferQuery::default();
        assert_eq!(sort_indicator(&query, "status"), "");

        query.toggle_sort("status");
        assert_eq!(sort_indicator(&query, "status"), " \u{25B2}");
        assert_eq!(sort_indicator(&query, "created_at"), "");

        query.toggle_sort("status");
        assert_eq!(sort_indicator(&query, "status"), " \u{25BC}");
    }
}
