//! Display-name to table-identifier resolution.

use serde_json::Value;

use crate::error::ClientError;
use crate::http::NocoClient;

impl NocoClient {
    /// Resolve a table's display title to its internal identifier.
    ///
    /// Lists every table in the configured base on each call; nothing is
    /// cached, so renames and freshly created tables are picked up
    /// immediately at the cost of one extra round trip per operation.
    pub async fn resolve_table_id(&self, table_name: &str) -> Result<String, ClientError> {
        let path = format!("/api/v2/meta/bases/{}/tables", self.base_id());
        let listing = self
            .get_json(&path)
            .await
            .map_err(|e| ClientError::operation("retrieving table ID", e))?;

        match find_table_id(&listing, table_name) {
            Some(id) => Ok(id),
            None => Err(ClientError::TableNotFound {
                name: table_name.to_string(),
            }),
        }
    }
}

/// First table in the listing whose title matches exactly. The remote
/// service does not disambiguate duplicate titles; the first listed entry
/// wins.
fn find_table_id(listing: &Value, table_name: &str) -> Option<String> {
    listing
        .get("list")?
        .as_array()?
        .iter()
        .find(|table| table.get("title").and_then(Value::as_str) == Some(table_name))
        .and_then(|table| table.get("id").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Value {
        json!({
            "list": [
                { "id": "tbl_a1", "title": "Customers" },
                { "id": "tbl_b2", "title": "Orders" },
                { "id": "tbl_c3", "title": "Orders" },
            ]
        })
    }

    #[test]
    fn matches_exact_title() {
        assert_eq!(
            find_table_id(&listing(), "Customers").as_deref(),
            Some("tbl_a1")
        );
    }

    #[test]
    fn first_match_wins_on_duplicate_titles() {
        assert_eq!(
            find_table_id(&listing(), "Orders").as_deref(),
            Some("tbl_b2")
        );
    }

    #[test]
    fn no_match_for_absent_or_case_mismatched_title() {
        assert_eq!(find_table_id(&listing(), "customers"), None);
        assert_eq!(find_table_id(&listing(), "Invoices"), None);
    }

    #[test]
    fn tolerates_missing_list_field() {
        assert_eq!(find_table_id(&json!({}), "Customers"), None);
    }
}
