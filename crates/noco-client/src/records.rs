//! Record operations: read, create, update, delete, and their bulk variants.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::bulk::{BulkItem, BulkSequence, BulkStep};
use crate::error::ClientError;
use crate::http::NocoClient;

/// Optional read parameters for the records endpoint.
///
/// `filters` follows the remote service's own grammar of
/// `(column,operator,value)` tuples combined with `~and`/`~or`/`~not`; it is
/// appended verbatim as the `where` parameter and never parsed locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Comma-separated column names, `-` prefix for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Comma-separated projection list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl RecordQuery {
    /// Build the query string, appending only supplied parameters in the
    /// fixed order where, limit, offset, sort, fields.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(filters) = &self.filters {
            params.push(format!("where={filters}"));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if let Some(offset) = self.offset {
            params.push(format!("offset={offset}"));
        }
        if let Some(sort) = &self.sort {
            params.push(format!("sort={sort}"));
        }
        if let Some(fields) = &self.fields {
            params.push(format!("fields={fields}"));
        }
        params.join("&")
    }
}

/// Result of a record operation: the effective input (for traceability)
/// alongside the raw remote payload, which is not normalized in any way.
#[derive(Debug, Clone, Serialize)]
pub struct CallTrace {
    pub input: Value,
    pub output: Value,
}

/// One-element batch of `data` with `Id` forced to `row_id`. The records
/// endpoint is batch-oriented even for single-row updates, and the supplied
/// row id always overrides any `Id` present in the data.
pub fn update_payload(row_id: i64, data: &Value) -> Value {
    let mut record = match data {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    record.insert("Id".to_string(), json!(row_id));
    Value::Array(vec![Value::Object(record)])
}

impl NocoClient {
    /// Read records with optional filtering, pagination, sorting and field
    /// projection. No default limit is applied here; the remote service's
    /// own default kicks in when `limit` is omitted.
    pub async fn get_records(
        &self,
        table_name: &str,
        query: &RecordQuery,
    ) -> Result<CallTrace, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;

        let query_string = query.to_query_string();
        let path = if query_string.is_empty() {
            format!("/api/v2/tables/{table_id}/records")
        } else {
            format!("/api/v2/tables/{table_id}/records?{query_string}")
        };
        let output = self.get_json(&path).await?;

        let mut input = serde_json::Map::new();
        input.insert("tableName".to_string(), json!(table_name));
        if let Ok(Value::Object(options)) = serde_json::to_value(query) {
            input.extend(options);
        }

        Ok(CallTrace {
            input: Value::Object(input),
            output,
        })
    }

    /// Insert record(s); `data` is posted verbatim (single object or array,
    /// per remote service convention).
    pub async fn create_records(
        &self,
        table_name: &str,
        data: Value,
    ) -> Result<CallTrace, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;
        let output = self
            .post_json(&format!("/api/v2/tables/{table_id}/records"), &data)
            .await?;
        Ok(CallTrace {
            input: data,
            output,
        })
    }

    /// Update a single row by id.
    pub async fn update_record(
        &self,
        table_name: &str,
        row_id: i64,
        data: Value,
    ) -> Result<CallTrace, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;
        let payload = update_payload(row_id, &data);
        let output = self
            .patch_json(&format!("/api/v2/tables/{table_id}/records"), &payload)
            .await?;
        Ok(CallTrace {
            input: data,
            output,
        })
    }

    /// Delete a single row. The remote service expects the row id in the
    /// request body, not the URL path.
    pub async fn delete_record(&self, table_name: &str, row_id: i64) -> Result<Value, ClientError> {
        let table_id = self.resolve_table_id(table_name).await?;
        self.delete_json(
            &format!("/api/v2/tables/{table_id}/records"),
            Some(&json!({ "Id": row_id })),
        )
        .await
    }

    /// Insert each item in input order, fail-fast on the first item missing
    /// its record data. Items that already ran are not rolled back.
    pub async fn create_records_bulk(
        &self,
        table_name: &str,
        items: Vec<BulkItem<Value>>,
    ) -> Result<Vec<CallTrace>, ClientError> {
        let mut sequence = BulkSequence::new(items);
        let mut results = Vec::new();
        loop {
            match sequence.next_step() {
                BulkStep::Execute(data) => {
                    results.push(self.create_records(table_name, data).await?);
                }
                BulkStep::Abort { index } => {
                    return Err(ClientError::InvalidArgument(format!(
                        "bulk item {index} is missing its record data"
                    )));
                }
                BulkStep::Finished => return Ok(results),
            }
        }
    }

    /// Delete each row in input order, fail-fast on the first item missing
    /// its row id.
    pub async fn delete_records_bulk(
        &self,
        table_name: &str,
        items: Vec<BulkItem<i64>>,
    ) -> Result<Vec<Value>, ClientError> {
        let mut sequence = BulkSequence::new(items);
        let mut results = Vec::new();
        loop {
            match sequence.next_step() {
                BulkStep::Execute(row_id) => {
                    results.push(self.delete_record(table_name, row_id).await?);
                }
                BulkStep::Abort { index } => {
                    return Err(ClientError::InvalidArgument(format!(
                        "bulk item {index} is missing its row id"
                    )));
                }
                BulkStep::Finished => return Ok(results),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_produces_empty_string() {
        assert_eq!(RecordQuery::default().to_query_string(), "");
    }

    #[test]
    fn pagination_only() {
        let query = RecordQuery {
            limit: Some(20),
            offset: Some(40),
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "limit=20&offset=40");
    }

    #[test]
    fn all_parameters_in_fixed_order() {
        let query = RecordQuery {
            filters: Some("(age,gt,30)~and(status,eq,active)".into()),
            limit: Some(10),
            offset: Some(5),
            sort: Some("-created_at".into()),
            fields: Some("id,name".into()),
        };
        assert_eq!(
            query.to_query_string(),
            "where=(age,gt,30)~and(status,eq,active)&limit=10&offset=5&sort=-created_at&fields=id,name"
        );
    }

    #[test]
    fn filter_text_is_passed_through_verbatim() {
        let query = RecordQuery {
            filters: Some("(name,like,%smith%)".into()),
            ..Default::default()
        };
        assert_eq!(query.to_query_string(), "where=(name,like,%smith%)");
    }

    #[test]
    fn update_payload_forces_id_from_row_id() {
        let payload = update_payload(2, &json!({ "Id": 99, "Title": "x" }));
        assert_eq!(payload, json!([{ "Id": 2, "Title": "x" }]));
    }

    #[test]
    fn update_payload_wraps_plain_data_in_batch() {
        let payload = update_payload(7, &json!({ "Title": "sasuke-updated" }));
        assert_eq!(payload, json!([{ "Id": 7, "Title": "sasuke-updated" }]));
    }

    #[test]
    fn update_payload_tolerates_non_object_data() {
        let payload = update_payload(1, &json!("stray"));
        assert_eq!(payload, json!([{ "Id": 1 }]));
    }
}
