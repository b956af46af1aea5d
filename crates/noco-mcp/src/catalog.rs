//! The static tool catalog.
//!
//! One [`ToolDefinition`] per NocoDB operation, with the agent-facing
//! documentation (usage hints and the filter-grammar reference) embedded in
//! the descriptions. The grammar itself is implemented by the remote
//! service; it is documented here purely so agents can write filters.

use serde_json::json;

use crate::protocol::{ToolAnnotations, ToolDefinition};

/// Operator reference for the remote service's filter mini-language,
/// embedded in the `nocodb-get-records` description for agent consumption.
pub const FILTER_RULES: &str = r#"
Comparison Operators
Operation Meaning Example
eq  equal (colName,eq,colValue)
neq not equal (colName,neq,colValue)
not not equal (alias of neq)  (colName,not,colValue)
gt  greater than  (colName,gt,colValue)
ge  greater or equal  (colName,ge,colValue)
lt  less than (colName,lt,colValue)
le  less or equal (colName,le,colValue)
is  is  (colName,is,true/false/null)
isnot is not  (colName,isnot,true/false/null)
in  in  (colName,in,val1,val2,val3,val4)
btw between (colName,btw,val1,val2)
nbtw  not between (colName,nbtw,val1,val2)
like  like  (colName,like,%name)
isWithin  is Within (Available in Date and DateTime only) (colName,isWithin,sub_op)
allof includes all of (colName,allof,val1,val2,...)
anyof includes any of (colName,anyof,val1,val2,...)
nallof  does not include all of (includes none or some, but not all of) (colName,nallof,val1,val2,...)
nanyof  does not include any of (includes none of)  (colName,nanyof,val1,val2,...)

Comparison Sub-Operators
The following sub-operators are available in Date and DateTime columns.

Operation Meaning Example
today today (colName,eq,today)
tomorrow  tomorrow  (colName,eq,tomorrow)
yesterday yesterday (colName,eq,yesterday)
oneWeekAgo  one week ago  (colName,eq,oneWeekAgo)
oneWeekFromNow  one week from now (colName,eq,oneWeekFromNow)
oneMonthAgo one month ago (colName,eq,oneMonthAgo)
oneMonthFromNow one month from now  (colName,eq,oneMonthFromNow)
daysAgo number of days ago  (colName,eq,daysAgo,10)
daysFromNow number of days from now (colName,eq,daysFromNow,10)
exactDate exact date  (colName,eq,exactDate,2022-02-02)

For isWithin in Date and DateTime columns, the different set of sub-operators are used.

Operation Meaning Example
pastWeek  the past week (colName,isWithin,pastWeek)
pastMonth the past month  (colName,isWithin,pastMonth)
pastYear  the past year (colName,isWithin,pastYear)
nextWeek  the next week (colName,isWithin,nextWeek)
nextMonth the next month  (colName,isWithin,nextMonth)
nextYear  the next year (colName,isWithin,nextYear)
nextNumberOfDays  the next number of days (colName,isWithin,nextNumberOfDays,10)
pastNumberOfDays  the past number of days (colName,isWithin,pastNumberOfDays,10)

Logical Operators
Operation Example
~or (checkNumber,eq,JM555205)~or((amount, gt, 200)~and(amount, lt, 2000))
~and  (checkNumber,eq,JM555205)~and((amount, gt, 200)~and(amount, lt, 2000))
~not  ~not(checkNumber,eq,JM555205)

For date null rule
(date,isnot,null) -> (date,notblank).
(date,is,null) -> (date,blank).
"#;

/// Every tool exposed by the server, in catalog order.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        get_records_tool(),
        get_list_tables_tool(),
        post_records_tool(),
        post_records_bulk_tool(),
        patch_records_tool(),
        delete_records_tool(),
        delete_records_bulk_tool(),
        get_table_metadata_tool(),
        alter_table_add_column_tool(),
        alter_table_remove_column_tool(),
        create_table_tool(),
    ]
}

fn read_only() -> Option<ToolAnnotations> {
    Some(ToolAnnotations {
        read_only_hint: Some(true),
        ..Default::default()
    })
}

fn destructive() -> Option<ToolAnnotations> {
    Some(ToolAnnotations {
        destructive_hint: Some(true),
        ..Default::default()
    })
}

fn get_records_tool() -> ToolDefinition {
    let description = format!(
        r#"Nocodb - Get Records
hint:
    1. Get all records from a table (limited to 10):
       retrieve_records(table_name="customers")

    2. Filter records with conditions:
       retrieve_records(
           table_name="customers",
           filters="(age,gt,30)~and(status,eq,active)"
       )

    3. Paginate results:
       retrieve_records(table_name="customers", limit=20, offset=40)

    4. Sort results:
       retrieve_records(table_name="customers", sort="-created_at")

    5. Select specific fields:
       retrieve_records(table_name="customers", fields="id,name,email")
{FILTER_RULES}"#
    );

    ToolDefinition {
        name: "nocodb-get-records".to_string(),
        description: Some(description),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "filters": {
                    "type": "string",
                    "description": "Example: (field1,eq,value1)~and(field2,eq,value2) filters records where 'field1' equals 'value1' AND 'field2' equals 'value2'. Other comparison operators ('neq', 'gt', 'lt', ...) combine into complex filtering rules; see the operator reference in the tool description."
                },
                "limit": { "type": "integer", "description": "Maximum number of records to return" },
                "offset": { "type": "integer", "description": "Number of records to skip" },
                "sort": {
                    "type": "string",
                    "description": "Example: field1,-field2 sorts first by 'field1' ascending, then by 'field2' descending."
                },
                "fields": {
                    "type": "string",
                    "description": "Example: field1,field2 includes only 'field1' and 'field2' in the response."
                }
            },
            "required": ["tableName"]
        }),
        annotations: read_only(),
    }
}

fn get_list_tables_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-get-list-tables".to_string(),
        description: Some(
            "Nocodb - Get List Tables\nnotes: only show result from output to user\n".to_string(),
        ),
        input_schema: json!({ "type": "object", "properties": {} }),
        annotations: read_only(),
    }
}

fn post_records_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-post-records".to_string(),
        description: Some("Nocodb - Post Records".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "data": {
                    "description": "The data to be inserted into the table.\n[WARNING] The structure of this object should match the columns of the table.\nexample: { \"Title\": \"sasuke\" }"
                }
            },
            "required": ["tableName", "data"]
        }),
        annotations: None,
    }
}

fn post_records_bulk_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-post-records-bulk".to_string(),
        description: Some("Nocodb - Post Records Multiple Records".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "uploadItems": {
                    "type": "array",
                    "description": "array of data to be inserted into the table",
                    "items": {
                        "type": "object",
                        "properties": {
                            "data": {
                                "description": "The data to be inserted into the table.\n[WARNING] The structure of this object should match the columns of the table."
                            }
                        }
                    }
                }
            },
            "required": ["tableName", "uploadItems"]
        }),
        annotations: None,
    }
}

fn patch_records_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-patch-records".to_string(),
        description: Some("Nocodb - Patch Records".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "rowId": { "type": "integer", "description": "row Id of the record to update" },
                "data": {
                    "description": "The data to be updated in the table.\n[WARNING] The structure of this object should match the columns of the table.\n[WARNING] Do not use JavaScript-style Object with Stringified Data\nexample: { \"Title\": \"sasuke-updated\" }"
                }
            },
            "required": ["tableName", "rowId", "data"]
        }),
        annotations: None,
    }
}

fn delete_records_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-delete-records".to_string(),
        description: Some("Nocodb - Delete Records".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "rowId": { "type": "integer", "description": "row Id of the record to delete" }
            },
            "required": ["tableName", "rowId"]
        }),
        annotations: destructive(),
    }
}

fn delete_records_bulk_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-delete-records-bulk".to_string(),
        description: Some("Nocodb - Delete Records Multiple Records".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "deleteRowsId": {
                    "type": "array",
                    "description": "array of row ids to be deleted from the table",
                    "items": {
                        "type": "object",
                        "properties": {
                            "rowId": { "type": "integer" }
                        }
                    }
                }
            },
            "required": ["tableName", "deleteRowsId"]
        }),
        annotations: destructive(),
    }
}

fn get_table_metadata_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-get-table-metadata".to_string(),
        description: Some("Nocodb - Get Table Metadata".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" }
            },
            "required": ["tableName"]
        }),
        annotations: read_only(),
    }
}

fn alter_table_add_column_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-alter-table-add-column".to_string(),
        description: Some("Nocodb - Alter Table Add Column".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "columnName": { "type": "string", "description": "title of the new column" },
                "columnType": {
                    "type": "string",
                    "description": "SingleLineText, Number, Decimals, DateTime, Checkbox"
                }
            },
            "required": ["tableName", "columnName", "columnType"]
        }),
        annotations: None,
    }
}

fn alter_table_remove_column_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-alter-table-remove-column".to_string(),
        description: Some(
            "Nocodb - Alter Table Remove Column\
             \nget columnId from nocodb-get-table-metadata\
             \nnotes: remove column by columnId\
             \nexample: c7uo2ruwc053a3a\
             \n[WARNING] this action is irreversible\
             \n[RECOMMENDATION] give warning to user"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "columnId": { "type": "string", "description": "column identifier" }
            },
            "required": ["columnId"]
        }),
        annotations: destructive(),
    }
}

fn create_table_tool() -> ToolDefinition {
    ToolDefinition {
        name: "nocodb-create-table".to_string(),
        description: Some("Nocodb - Create Table".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "tableName": { "type": "string", "description": "table name" },
                "data": {
                    "type": "array",
                    "description": "Columns of the new table.\nexample: [{ \"title\": \"Name\", \"uidt\": \"SingleLineText\" }, { \"title\": \"Age\", \"uidt\": \"Number\" }, { \"title\": \"isHokage\", \"uidt\": \"Checkbox\" }, { \"title\": \"Birthday\", \"uidt\": \"DateTime\" }]\nAn 'Id' column is inserted automatically when none is supplied.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "uidt": {
                                "type": "string",
                                "enum": ["SingleLineText", "Number", "Checkbox", "DateTime"],
                                "description": "SingleLineText, Number, Checkbox, DateTime"
                            }
                        },
                        "required": ["title", "uidt"]
                    }
                }
            },
            "required": ["tableName", "data"]
        }),
        annotations: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_has_one_tool_per_operation() {
        let tools = builtin_tools();
        assert_eq!(tools.len(), 11);

        let names: BTreeSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tools.len(), "tool names must be unique");
        assert!(names.contains("nocodb-get-records"));
        assert!(names.contains("nocodb-create-table"));
    }

    #[test]
    fn every_tool_declares_an_object_schema() {
        for tool in builtin_tools() {
            assert_eq!(
                tool.input_schema["type"], "object",
                "tool {} schema must be an object",
                tool.name
            );
        }
    }

    #[test]
    fn get_records_description_embeds_filter_grammar() {
        let tool = builtin_tools()
            .into_iter()
            .find(|t| t.name == "nocodb-get-records")
            .unwrap();
        let description = tool.description.unwrap();
        assert!(description.contains("~and"));
        assert!(description.contains("isWithin"));
    }

    #[test]
    fn remove_column_warns_about_irreversibility() {
        let tool = builtin_tools()
            .into_iter()
            .find(|t| t.name == "nocodb-alter-table-remove-column")
            .unwrap();
        assert!(tool.description.unwrap().contains("irreversible"));
        assert_eq!(tool.annotations.unwrap().destructive_hint, Some(true));
    }
}
