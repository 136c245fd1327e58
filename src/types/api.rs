//! Wire types for the backend bulk-import endpoint

use serde::{Deserialize, Serialize};

use super::customer::CustomerImportRecord;

/// Request body: one chunk's worth of records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportRequest {
    pub customers: Vec<CustomerImportRecord>,
}

/// Per-record failure entry as declared by the endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedImportEntry {
    pub customer: CustomerImportRecord,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Authoritative per-record outcome lists, present when the backend
/// distinguishes individual records within an accepted chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportData {
    #[serde(default)]
    pub success: Vec<CustomerImportRecord>,
    #[serde(default)]
    pub failed: Vec<FailedImportEntry>,
}

/// Response envelope. When `data` is absent the top-level `success` flag
/// governs the whole chunk's fate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<BulkImportData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_without_data_section() {
        let json = r#"{"success": true}"#;
        let resp: BulkImportResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
        assert!(resp.data.is_none());
    }

    #[test]
    fn response_parses_with_per_record_outcomes() {
        let json = r#"{
            "success": true,
            "data": {
                "success": [],
                "failed": [{"customer": {
                    "name": "홍길동", "phone": "", "email": "", "address": "",
                    "notes": "", "categories": ["일반"], "buyTypes": [],
                    "buyPriceRanges": {
                        "sale": {"min": null, "max": null},
                        "monthlyRent": {
                            "monthlyRent": {"min": null, "max": null},
                            "deposit": {"min": null, "max": null}
                        },
                        "jeonse": {"min": null, "max": null}
                    },
                    "businessNumber": "", "budget": null, "preferredArea": "",
                    "lastContactDate": "2026-01-15T09:00:00Z"
                }, "reason": "중복 고객"}]
            }
        }"#;
        let resp: BulkImportResponse = serde_json::from_str(json).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data.failed.len(), 1);
        assert_eq!(data.failed[0].reason.as_deref(), Some("중복 고객"));
        assert_eq!(data.failed[0].customer.name, "홍길동");
    }

    #[test]
    fn rejection_response_carries_message() {
        let json = r#"{"success": false, "message": "요청이 너무 큽니다"}"#;
        let resp: BulkImportResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("요청이 너무 큽니다"));
    }
}
