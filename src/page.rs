use serde_json::Value;

use crate::components::{Component, UnknownNode};
use crate::error::{RenderError, RenderResult};

/// A storefront page: an ordered list of component nodes supplied by the
/// editor or a server payload. Treated as immutable input for a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub nodes: Vec<Component>,
}

impl Page {
    pub fn new(nodes: Vec<Component>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Parse a page from its JSON wire format (an array of component nodes).
///
/// The document itself must be a JSON array; individual nodes never fail the
/// page; an unrecognized `type` or malformed content degrades that node to
/// [`Component::Unknown`], which renders as a visible placeholder.
pub fn parse_page(json: &str) -> RenderResult<Page> {
    let value: Value = serde_json::from_str(json)?;
    let nodes = value
        .as_array()
        .ok_or_else(|| RenderError::Json("page document must be a JSON array".to_string()))?;
    Ok(Page::new(nodes.iter().map(parse_node).collect()))
}

/// Parse a single node, degrading to [`Component::Unknown`] on failure.
pub fn parse_node(value: &Value) -> Component {
    match serde_json::from_value::<Component>(value.clone()) {
        Ok(component) => component,
        Err(_) => Component::Unknown(UnknownNode {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string),
            kind: value
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("?")
                .to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_node() {
        let json = r#"[{"id":"t1","type":"text","content":{"text":"Hello"}}]"#;
        let page = parse_page(json).unwrap();
        assert_eq!(page.nodes.len(), 1);
        match &page.nodes[0] {
            Component::Text(t) => assert_eq!(t.content.text, "Hello"),
            other => panic!("expected text node, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_degrades_not_errors() {
        let json = r#"[{"id":"x1","type":"foo","content":{}}]"#;
        let page = parse_page(json).unwrap();
        match &page.nodes[0] {
            Component::Unknown(u) => {
                assert_eq!(u.kind, "foo");
                assert_eq!(u.id.as_deref(), Some("x1"));
            }
            other => panic!("expected unknown node, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_content_degrades() {
        // heading requires content.text; a number is not a valid content map
        let json = r#"[{"id":"h1","type":"heading","content":7}]"#;
        let page = parse_page(json).unwrap();
        assert!(matches!(page.nodes[0], Component::Unknown(_)));
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        assert!(matches!(
            parse_page(r#"{"type":"text"}"#),
            Err(RenderError::Json(_))
        ));
    }

    #[test]
    fn test_empty_array_is_a_valid_page() {
        let page = parse_page("[]").unwrap();
        assert!(page.is_empty());
    }
}
