//! Tool execution engine.
//!
//! Validates inbound call arguments against the declared input schema,
//! coerces them into typed argument structs, dispatches to the matching
//! client operation and shapes the result into the response envelope.

use noco_client::{BulkItem, ClientError, ColumnType, NocoClient, RecordQuery, TableColumn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::protocol::{ToolContent, ToolDefinition};

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,
    /// The result content.
    pub content: Vec<ToolContent>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Create a successful result: a single JSON-encoded text payload.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(text) => Self {
                success: true,
                content: vec![ToolContent::Text {
                    text,
                    mime_type: Some("application/json".to_string()),
                }],
                error: None,
            },
            Err(e) => Self::error(format!("failed to serialize result: {e}")),
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            content: vec![ToolContent::Text {
                text: message.clone(),
                mime_type: None,
            }],
            error: Some(message),
        }
    }
}

/// The tool executor maps tool calls onto NocoDB operations.
pub struct ToolExecutor {
    client: NocoClient,
}

impl ToolExecutor {
    pub fn new(client: NocoClient) -> Self {
        Self { client }
    }

    /// Execute a tool call.
    pub async fn execute(&self, tool: &ToolDefinition, arguments: Value) -> ExecutionResult {
        if let Err(reason) = validate_arguments(tool, &arguments) {
            return ExecutionResult::error(reason);
        }

        match self.dispatch(&tool.name, arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(tool = %tool.name, error = %e, "tool call failed");
                ExecutionResult::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> Result<ExecutionResult, ClientError> {
        match name {
            "nocodb-get-records" => {
                let args: GetRecordsArgs = parse_args(arguments)?;
                let trace = self.client.get_records(&args.table_name, &args.query).await?;
                Ok(ExecutionResult::json(&trace))
            }
            "nocodb-get-list-tables" => {
                let tables = self.client.list_tables().await?;
                Ok(ExecutionResult::json(&tables))
            }
            "nocodb-post-records" => {
                let args: PostRecordsArgs = parse_args(arguments)?;
                let trace = self.client.create_records(&args.table_name, args.data).await?;
                Ok(ExecutionResult::json(&trace))
            }
            "nocodb-post-records-bulk" => {
                let args: PostRecordsBulkArgs = parse_args(arguments)?;
                let items = args
                    .upload_items
                    .into_iter()
                    .map(|item| match item.get("data") {
                        Some(data) if !data.is_null() => BulkItem::Ready(data.clone()),
                        _ => BulkItem::Missing,
                    })
                    .collect();
                let traces = self.client.create_records_bulk(&args.table_name, items).await?;
                Ok(ExecutionResult::json(&traces))
            }
            "nocodb-patch-records" => {
                let args: PatchRecordsArgs = parse_args(arguments)?;
                // A stringified payload is parsed before use; a parse
                // failure is reported as a normal result so the agent can
                // correct its input and retry.
                let data = match args.data {
                    Value::String(text) => match serde_json::from_str(&text) {
                        Ok(value) => value,
                        Err(_) => {
                            return Ok(ExecutionResult::json(&json!({
                                "error": "Data must be a valid JSON object or stringified JSON object"
                            })));
                        }
                    },
                    other => other,
                };
                let trace = self
                    .client
                    .update_record(&args.table_name, args.row_id, data)
                    .await?;
                Ok(ExecutionResult::json(&trace))
            }
            "nocodb-delete-records" => {
                let args: DeleteRecordsArgs = parse_args(arguments)?;
                let output = self.client.delete_record(&args.table_name, args.row_id).await?;
                Ok(ExecutionResult::json(&output))
            }
            "nocodb-delete-records-bulk" => {
                let args: DeleteRecordsBulkArgs = parse_args(arguments)?;
                let items = args
                    .delete_rows_id
                    .into_iter()
                    .map(|item| match item.get("rowId").and_then(Value::as_i64) {
                        Some(row_id) => BulkItem::Ready(row_id),
                        None => BulkItem::Missing,
                    })
                    .collect();
                let outputs = self.client.delete_records_bulk(&args.table_name, items).await?;
                Ok(ExecutionResult::json(&outputs))
            }
            "nocodb-get-table-metadata" => {
                let args: TableNameArgs = parse_args(arguments)?;
                let metadata = self.client.table_metadata(&args.table_name).await?;
                Ok(ExecutionResult::json(&metadata))
            }
            "nocodb-alter-table-add-column" => {
                let args: AddColumnArgs = parse_args(arguments)?;
                let result = self
                    .client
                    .add_column(&args.table_name, &args.column_name, &args.column_type)
                    .await?;
                Ok(ExecutionResult::json(&result))
            }
            "nocodb-alter-table-remove-column" => {
                let args: RemoveColumnArgs = parse_args(arguments)?;
                let result = self.client.remove_column(&args.column_id).await?;
                Ok(ExecutionResult::json(&result))
            }
            "nocodb-create-table" => {
                let args: CreateTableArgs = parse_args(arguments)?;
                if args.data.iter().any(|column| column.uidt == ColumnType::Id) {
                    return Err(ClientError::InvalidArgument(
                        "column type 'ID' is reserved for the auto-inserted identifier column"
                            .to_string(),
                    ));
                }
                let result = self.client.create_table(&args.table_name, &args.data).await?;
                Ok(ExecutionResult::json(&result))
            }
            other => Ok(ExecutionResult::error(format!("Tool not found: {other}"))),
        }
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ClientError> {
    serde_json::from_value(arguments)
        .map_err(|e| ClientError::InvalidArgument(format!("invalid arguments: {e}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetRecordsArgs {
    table_name: String,
    #[serde(flatten)]
    query: RecordQuery,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecordsArgs {
    table_name: String,
    data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecordsBulkArgs {
    table_name: String,
    upload_items: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchRecordsArgs {
    table_name: String,
    row_id: i64,
    data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRecordsArgs {
    table_name: String,
    row_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRecordsBulkArgs {
    table_name: String,
    delete_rows_id: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableNameArgs {
    table_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddColumnArgs {
    table_name: String,
    column_name: String,
    column_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveColumnArgs {
    column_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTableArgs {
    table_name: String,
    data: Vec<TableColumn>,
}

/// Validate arguments against the tool's declared input schema: required
/// fields, primitive types and enum membership of top-level properties.
fn validate_arguments(tool: &ToolDefinition, arguments: &Value) -> Result<(), String> {
    let schema = &tool.input_schema;

    if let Some(required) = schema["required"].as_array() {
        for requirement in required {
            if let Some(field) = requirement.as_str() {
                if arguments.get(field).is_none() {
                    return Err(format!("Missing required field: {}", field));
                }
            }
        }
    }

    if let Some(properties) = schema["properties"].as_object() {
        for (field, property) in properties {
            let Some(value) = arguments.get(field) else {
                continue;
            };

            if let Some(allowed) = property["enum"].as_array() {
                if !allowed.contains(value) {
                    return Err(format!(
                        "Invalid value for '{}': {:?}. Allowed: {:?}",
                        field, value, allowed
                    ));
                }
            }

            if let Some(expected) = property["type"].as_str() {
                if !check_type(value, expected) {
                    return Err(format!(
                        "Invalid type for '{}': expected {}, got {:?}",
                        field, expected, value
                    ));
                }
            }
        }
    }

    Ok(())
}

fn check_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_tools;
    use noco_client::ConnectionConfig;

    fn tool(name: &str) -> ToolDefinition {
        builtin_tools().into_iter().find(|t| t.name == name).unwrap()
    }

    fn executor() -> ToolExecutor {
        let config = ConnectionConfig::new("http://localhost:8080", "base1", "token1");
        ToolExecutor::new(NocoClient::new(config).unwrap())
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = validate_arguments(&tool("nocodb-get-records"), &json!({})).unwrap_err();
        assert!(err.contains("tableName"));
    }

    #[test]
    fn rejects_wrong_argument_type() {
        let err = validate_arguments(
            &tool("nocodb-get-records"),
            &json!({ "tableName": "T", "limit": "twenty" }),
        )
        .unwrap_err();
        assert!(err.contains("limit"));
    }

    #[test]
    fn accepts_valid_arguments() {
        assert!(
            validate_arguments(
                &tool("nocodb-get-records"),
                &json!({ "tableName": "T", "limit": 20, "offset": 40 }),
            )
            .is_ok()
        );
    }

    #[tokio::test]
    async fn missing_required_field_fails_before_dispatch() {
        let result = executor()
            .execute(&tool("nocodb-get-records"), json!({}))
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("tableName"));
    }

    #[tokio::test]
    async fn invalid_string_update_payload_yields_non_failing_error_result() {
        let result = executor()
            .execute(
                &tool("nocodb-patch-records"),
                json!({ "tableName": "T", "rowId": 2, "data": "{invalid" }),
            )
            .await;
        assert!(result.success, "parse failure must not register as a tool failure");
        let ToolContent::Text { text, .. } = &result.content[0];
        assert!(text.contains("Data must be a valid JSON object"));
    }

    #[tokio::test]
    async fn bulk_delete_aborts_on_first_item_missing_row_id() {
        let result = executor()
            .execute(
                &tool("nocodb-delete-records-bulk"),
                json!({ "tableName": "T", "deleteRowsId": [{}, { "rowId": 2 }] }),
            )
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("missing its row id"));
    }

    #[tokio::test]
    async fn bulk_create_aborts_on_first_item_missing_data() {
        let result = executor()
            .execute(
                &tool("nocodb-post-records-bulk"),
                json!({ "tableName": "T", "uploadItems": [{}] }),
            )
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("missing its record data"));
    }

    #[tokio::test]
    async fn create_table_rejects_caller_supplied_id_type() {
        let result = executor()
            .execute(
                &tool("nocodb-create-table"),
                json!({
                    "tableName": "T",
                    "data": [{ "title": "Custom", "uidt": "ID" }]
                }),
            )
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("reserved"));
    }
}
