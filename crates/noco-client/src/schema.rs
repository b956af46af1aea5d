//! Schema operations: table listing, metadata, column changes, table
//! creation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ClientError;
use crate::http::NocoClient;

/// Column type tags accepted when creating a table. `ID` is reserved for
/// the auto-inserted identifier column and never accepted from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    SingleLineText,
    Number,
    Checkbox,
    DateTime,
    #[serde(rename = "ID")]
    Id,
}

/// A column descriptor as the remote service expects it: display title plus
/// the `uidt` type tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub title: String,
    pub uidt: ColumnType,
}

/// Build the create-table request body. When no supplied column is titled
/// exactly `Id`, an identifier column is injected at the front of the list,
/// so every created table has a recognizable primary identifier regardless
/// of caller input.
pub fn create_table_payload(table_name: &str, columns: &[TableColumn]) -> Value {
    let mut columns = columns.to_vec();
    if !columns.iter().any(|column| column.title == "Id") {
        columns.insert(
            0,
            TableColumn {
                title: "Id".to_string(),
                uidt: ColumnType::Id,
            },
        );
    }
    json!({ "title": table_name, "columns": columns })
}

impl NocoClient {
    /// Display titles of every table in the configured base. An empty base
    /// yields an empty list, not an error.
    pub async fn list_tables(&self) -> Result<Vec<String>, ClientError> {
        let path = format!("/api/v2/meta/bases/{}/tables", self.base_id());
        let listing = self
            .get_json(&path)
            .await
            .map_err(|e| ClientError::operation("listing tables", e))?;

        let titles = listing
            .get("list")
            .and_then(Value::as_array)
            .map(|tables| {
                tables
                    .iter()
                    .filter_map(|table| table.get("title").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(titles)
    }

    /// Full table descriptor (columns, views, …) exactly as the remote
    /// service reports it; nothing is reshaped here.
    pub async fn table_metadata(&self, table_name: &str) -> Result<Value, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;
        self.get_json(&format!("/api/v2/meta/tables/{table_id}"))
            .await
            .map_err(|e| ClientError::operation("retrieving table metadata", e))
    }

    /// Add a column. The type tag is an open string at this layer;
    /// unsupported tags are rejected by the remote service, not locally.
    pub async fn add_column(
        &self,
        table_name: &str,
        column_name: &str,
        column_type: &str,
    ) -> Result<Value, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;
        let body = json!({ "title": column_name, "uidt": column_type });
        self.post_json(&format!("/api/v2/meta/tables/{table_id}/columns"), &body)
            .await
            .map_err(|e| ClientError::operation("adding column", e))
    }

    /// Remove a column by its identifier. Operates on the column id
    /// directly; no table resolution. Irreversible on the remote side.
    pub async fn remove_column(&self, column_id: &str) -> Result<Value, ClientError> {
        self.delete_json(&format!("/api/v2/meta/columns/{column_id}"), None)
            .await
            .map_err(|e| ClientError::operation("removing column", e))
    }

    /// Create a table with the given columns (identifier column injected
    /// when absent, see [`create_table_payload`]).
    pub async fn create_table(
        &self,
        table_name: &str,
        columns: &[TableColumn],
    ) -> Result<Value, ClientError> {
        let path = format!("/api/v2/meta/bases/{}/tables", self.base_id());
        let body = create_table_payload(table_name, columns);
        self.post_json(&path, &body)
            .await
            .map_err(|e| ClientError::operation("creating table", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_types_serialize_to_remote_tags() {
        let tags: Vec<Value> = [
            ColumnType::SingleLineText,
            ColumnType::Number,
            ColumnType::Checkbox,
            ColumnType::DateTime,
            ColumnType::Id,
        ]
        .iter()
        .map(|t| json!(t))
        .collect();
        assert_eq!(
            tags,
            vec![
                json!("SingleLineText"),
                json!("Number"),
                json!("Checkbox"),
                json!("DateTime"),
                json!("ID"),
            ]
        );
    }

    #[test]
    fn injects_id_column_at_front_when_absent() {
        let columns = vec![
            TableColumn {
                title: "Name".into(),
                uidt: ColumnType::SingleLineText,
            },
            TableColumn {
                title: "Age".into(),
                uidt: ColumnType::Number,
            },
        ];
        let payload = create_table_payload("Shinobi", &columns);
        assert_eq!(
            payload,
            json!({
                "title": "Shinobi",
                "columns": [
                    { "title": "Id", "uidt": "ID" },
                    { "title": "Name", "uidt": "SingleLineText" },
                    { "title": "Age", "uidt": "Number" },
                ]
            })
        );
    }

    #[test]
    fn keeps_caller_supplied_id_column_unmodified() {
        let columns = vec![
            TableColumn {
                title: "Id".into(),
                uidt: ColumnType::Number,
            },
            TableColumn {
                title: "Name".into(),
                uidt: ColumnType::SingleLineText,
            },
        ];
        let payload = create_table_payload("Shinobi", &columns);
        assert_eq!(
            payload,
            json!({
                "title": "Shinobi",
                "columns": [
                    { "title": "Id", "uidt": "Number" },
                    { "title": "Name", "uidt": "SingleLineText" },
                ]
            })
        );
    }
}
