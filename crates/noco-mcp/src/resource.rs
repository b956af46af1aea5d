//! The greeting resource.
//!
//! A parameterized read-only resource (`greeting://{name}`) returning a
//! static greeting. It demonstrates resource support and carries no
//! business logic.

use serde_json::{Value, json};

pub const GREETING_TEMPLATE: &str = "greeting://{name}";

/// Resource templates announced via `resources/templates/list`.
pub fn templates() -> Value {
    json!({
        "resourceTemplates": [{
            "uriTemplate": GREETING_TEMPLATE,
            "name": "greeting",
            "description": "A personalized greeting",
            "mimeType": "text/plain",
        }]
    })
}

/// Contents for a `greeting://{name}` read, or `None` when the URI does not
/// match the template.
pub fn read(uri: &str) -> Option<Value> {
    let name = uri.strip_prefix("greeting://")?;
    Some(json!({
        "contents": [{
            "uri": uri,
            "text": format!("Hello, {name}!"),
        }]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_greeting_for_name() {
        let contents = read("greeting://World").unwrap();
        assert_eq!(contents["contents"][0]["text"], "Hello, World!");
        assert_eq!(contents["contents"][0]["uri"], "greeting://World");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(read("table://World").is_none());
    }

    #[test]
    fn lists_the_template() {
        let templates = templates();
        assert_eq!(
            templates["resourceTemplates"][0]["uriTemplate"],
            GREETING_TEMPLATE
        );
    }
}
