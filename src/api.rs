//! HTTP layer for the transfer-requests backend.
//!
//! The server is the source of truth for filtering, ordering and paging;
//! each response fully replaces the previous view state.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::query::TransferQuery;

pub const TRANSFER_REQUESTS_URL: &str = "/transfer_requests_content";

pub fn record_subscribe_url(recid: &str) -> String {
    format!("/record/{recid}/subscribe")
}

/// Aggregate counts for one (action, status) pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryRow {
    pub action: String,
    pub status: String,
    pub count: u64,
    pub files: u64,
    pub size: u64,
}

/// One transfer request as returned by the content endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailRow {
    pub id: String,
    pub recid: String,
    pub action: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub num_record_files: u64,
    pub record_size: u64,
    pub num_transfers: u64,
    #[serde(default)]
    pub num_failed_transfers: Option<u64>,
    pub size: u64,
    #[serde(default)]
    pub num_hot_files: Option<u64>,
    #[serde(default)]
    pub num_cold_files: Option<u64>,
    #[serde(default)]
    pub file: Option<String>,
}

impl DetailRow {
    /// The failed count is only reported once transfers have been issued.
    pub fn successful_transfers(&self) -> u64 {
        match self.num_failed_transfers {
            Some(failed) => self.num_transfers.saturating_sub(failed),
            None => self.num_transfers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferRequestsContent {
    #[serde(default)]
    pub summary: Vec<SummaryRow>,
    #[serde(default)]
    pub details: Vec<DetailRow>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl TransferRequestsContent {
    /// Older backends omit `pagination`; fall back to a single page holding
    /// whatever was returned.
    pub fn pagination_or_default(&self, requested_page: u32, per_page: u32) -> Pagination {
        self.pagination.clone().unwrap_or(Pagination {
            total: self.details.len() as u64,
            pages: 1,
            current_page: requested_page,
            per_page,
        })
    }
}

pub async fn fetch_transfer_requests(
    query: &TransferQuery,
) -> Result<TransferRequestsContent, String> {
    let url = format!("{}?{}", TRANSFER_REQUESTS_URL, query.to_query_string());
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    if !response.ok() {
        return Err(format!("server returned {}", response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read response: {e}"))?;
    serde_json::from_str(&body).map_err(|e| format!("failed to parse response: {e}"))
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
    transfer_id: &'a str,
}

/// Registers an email for completion notification of one transfer request.
pub async fn subscribe(recid: &str, transfer_id: &str, email: &str) -> Result<(), String> {
    let request = Request::post(&record_subscribe_url(recid))
        .json(&SubscribeBody { email, transfer_id })
        .map_err(|e| format!("failed to encode request: {e}"))?;
    let response = request
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    if response.ok() {
        return Ok(());
    }
    // Prefer the server's own error text when it sends one.
    let body = response.text().await.unwrap_or_default();
    if body.is_empty() {
        Err(format!("server returned {}", response.status()))
    } else {
        Err(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_with_all_fields_parses() {
        let body = r#"{
            "summary": [
                {"action": "stage", "status": "completed", "count": 5, "files": 20, "size": 1073741824}
            ],
            "details": [
                {
                    "id": "42", "recid": "5500", "action": "stage", "status": "running",
                    "created_at": "2024-03-01T12:00:00", "started_at": "2024-03-01T12:05:00",
                    "completed_at": null,
                    "num_record_files": 12, "record_size": 2048,
                    "num_transfers": 10, "num_failed_transfers": 2, "size": 1024,
                    "num_hot_files": 3, "num_cold_files": 9, "file": null
                }
            ],
            "pagination": {"total": 31, "pages": 2, "current_page": 1, "per_page": 20}
        }"#;
        let content: TransferRequestsContent = serde_json::from_str(body).unwrap();
        assert_eq!(content.summary.len(), 1);
        assert_eq!(content.summary[0].action, "stage");
        assert_eq!(content.details[0].num_failed_transfers, Some(2));
        assert_eq!(content.pagination.as_ref().unwrap().pages, 2);
    }

    #[test]
    fn optional_detail_fields_default_to_none() {
        let body = r#"{
            "summary": [],
            "details": [
                {
                    "id": "7", "recid": "900", "action": "stage", "status": "submitted",
                    "num_record_files": 1, "record_size": 10,
                    "num_transfers": 0, "size": 0
                }
            ]
        }"#;
        let content: TransferRequestsContent = serde_json::from_str(body).unwrap();
        let row = &content.details[0];
        assert_eq!(row.created_at, None);
        assert_eq!(row.completed_at, None);
        assert_eq!(row.num_failed_transfers, None);
        assert_eq!(row.num_hot_files, None);
        assert_eq!(row.file, None);
    }

    #[test]
    fn missing_pagination_falls_back_to_a_single_page() {
        let body = r#"{
            "summary": [],
            "details": [
                {"id": "1", "recid": "1", "action": "stage", "status": "done",
                 "num_record_files": 1, "record_size": 1, "num_transfers": 1, "size": 1},
                {"id": "2", "recid": "2", "action": "stage", "status": "done",
                 "num_record_files": 1, "record_size": 1, "num_transfers": 1, "size": 1}
            ]
        }"#;
        let content: TransferRequestsContent = serde_json::from_str(body).unwrap();
        let pagination = content.pagination_or_default(3, 20);
        assert_eq!(pagination.total, 2);
        assert_eq!(pagination.pages, 1);
        assert_eq!(pagination.current_page, 3);
        assert_eq!(pagination.per_page, 20);
    }

    #[test]
    fn server_pagination_wins_over_the_fallback() {
        let body = r#"{
            "summary": [], "details": [],
            "pagination": {"total": 100, "pages": 5, "current_page": 2, "per_page": 20}
        }"#;
        let content: TransferRequestsContent = serde_json::from_str(body).unwrap();
        let pagination = content.pagination_or_default(9, 50);
        assert_eq!(pagination.pages, 5);
        assert_eq!(pagination.current_page, 2);
    }

    #[test]
    fn successful_transfers_subtracts_reported_failures() {
        let body = r#"{"id": "1", "recid": "1", "action": "stage", "status": "running",
                       "num_record_files": 1, "record_size": 1,
                       "num_transfers": 10, "num_failed_transfers": 4, "size": 1}"#;
        let row: DetailRow = serde_json::from_str(body).unwrap();
        assert_eq!(row.successful_transfers(), 6);
    }

    #[test]
    fn successful_transfers_without_a_failed_count() {
        let body = r#"{"id": "1", "recid": "1", "action": "stage", "status": "running",
                       "num_record_files": 1, "record_size": 1,
                       "num_transfers": 10, "size": 1}"#;
        let row: DetailRow = serde_json::from_str(body).unwrap();
        assert_eq!(row.successful_transfers(), 10);
    }

    #[test]
    fn subscribe_url_embeds_the_record_id() {
        assert_eq!(record_subscribe_url("5500"), "/record/5500/subscribe");
    }
}
