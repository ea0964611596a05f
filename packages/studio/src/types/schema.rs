//! Schema tree types.
//!
//! A schema is an ordered list of fields. Array fields own one nested level of
//! child fields. Order is significant: it is the order the extraction service
//! reports fields in and the order they are displayed.

use std::fmt;
use std::sync::LazyLock;

use extract_client::{FieldPayload, SchemaPayload};
use regex::Regex;
use serde::{Deserialize, Serialize};

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").expect("static regex"));

/// True when `name` only uses `[A-Za-z0-9_-]`. The empty string is accepted.
pub fn is_valid_field_name(name: &str) -> bool {
    FIELD_NAME.is_match(name)
}

/// Value type the extraction service should produce for a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Array,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Array => "array",
        }
    }

    /// Types offered for nested child fields.
    pub fn allowed_for_child(&self) -> bool {
        !matches!(self, FieldType::Array)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed piece of data to extract.
///
/// `children` stays an optional list rather than a variant so stored templates
/// that carry children on a non-array field load and save unchanged. Use
/// [`FieldNode::shape`] for the typed view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FieldNode>>,
}

/// Typed view of a field: leaves have no children, arrays own theirs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    Leaf,
    Array { children: &'a [FieldNode] },
}

impl FieldNode {
    pub fn new(name: impl Into<String>, field_type: FieldType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: description.into(),
            children: None,
        }
    }

    /// Blank field as created by the editor's "add" actions.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, children: Vec<FieldNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_array(&self) -> bool {
        self.field_type == FieldType::Array
    }

    pub fn shape(&self) -> FieldShape<'_> {
        if self.is_array() {
            FieldShape::Array {
                children: self.children.as_deref().unwrap_or(&[]),
            }
        } else {
            FieldShape::Leaf
        }
    }

    /// Children left behind on a non-array field.
    pub fn has_orphaned_children(&self) -> bool {
        !self.is_array() && self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Wire form. Only array fields transmit their children.
    pub fn to_payload(&self) -> FieldPayload {
        let children = match self.shape() {
            FieldShape::Array { children } => children.iter().map(FieldNode::to_payload).collect(),
            FieldShape::Leaf => Vec::new(),
        };
        FieldPayload {
            name: self.name.clone(),
            field_type: self.field_type.as_str().to_string(),
            description: self.description.clone(),
            children,
        }
    }
}

/// Stored and transmitted wrapper: `{ "fields": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSchema {
    #[serde(default)]
    pub fields: Vec<FieldNode>,
}

/// Something about a schema that will probably produce a poor extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    UnnamedField { path: String },
    NestedArray { path: String },
    OrphanedChildren { path: String },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::UnnamedField { path } => write!(f, "field {path} has no name"),
            SchemaIssue::NestedArray { path } => write!(f, "child field {path} is an array"),
            SchemaIssue::OrphanedChildren { path } => {
                write!(f, "field {path} has children but is not an array")
            }
        }
    }
}

impl ExtractionSchema {
    pub fn new(fields: Vec<FieldNode>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn to_payload(&self) -> SchemaPayload {
        SchemaPayload {
            fields: self.fields.iter().map(FieldNode::to_payload).collect(),
        }
    }

    /// Lint the schema. Issues never block a conversion or a save.
    pub fn issues(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let path = i.to_string();
            if field.name.is_empty() {
                issues.push(SchemaIssue::UnnamedField { path: path.clone() });
            }
            if field.has_orphaned_children() {
                issues.push(SchemaIssue::OrphanedChildren { path: path.clone() });
            }
            if let FieldShape::Array { children } = field.shape() {
                for (j, child) in children.iter().enumerate() {
                    let child_path = format!("{i}.{j}");
                    if child.name.is_empty() {
                        issues.push(SchemaIssue::UnnamedField {
                            path: child_path.clone(),
                        });
                    }
                    if child.is_array() {
                        issues.push(SchemaIssue::NestedArray { path: child_path });
                    }
                }
            }
        }
        issues
    }
}

impl From<Vec<FieldNode>> for ExtractionSchema {
    fn from(fields: Vec<FieldNode>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_name_filter() {
        assert!(is_valid_field_name(""));
        assert!(is_valid_field_name("invoice_total-2"));
        assert!(!is_valid_field_name("grand total"));
        assert!(!is_valid_field_name("näme"));
        assert!(!is_valid_field_name("a.b"));
    }

    #[test]
    fn test_legacy_template_json_loads() {
        // Stored templates carry the old `isExpanded` flag and may omit children.
        let raw = json!({
            "fields": [
                { "name": "total", "type": "number", "description": "grand total", "isExpanded": true },
                { "name": "items", "type": "array", "description": "", "isExpanded": false,
                  "children": [{ "name": "sku", "type": "string", "description": "" }] }
            ]
        });
        let schema: ExtractionSchema = serde_json::from_value(raw).unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields[0].children, None);
        assert!(matches!(schema.fields[1].shape(), FieldShape::Array { children } if children.len() == 1));

        let written = serde_json::to_value(&schema).unwrap();
        assert!(written["fields"][0].get("isExpanded").is_none());
        assert!(written["fields"][0].get("children").is_none());
    }

    #[test]
    fn test_payload_drops_orphaned_children() {
        let field = FieldNode::new("total", FieldType::Number, "")
            .with_children(vec![FieldNode::new("stale", FieldType::String, "")]);

        assert!(field.has_orphaned_children());
        assert!(field.to_payload().children.is_empty());
        // The stored form keeps them.
        assert_eq!(field.children.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_issues() {
        let schema = ExtractionSchema::new(vec![
            FieldNode::new("", FieldType::String, ""),
            FieldNode::new("items", FieldType::Array, "").with_children(vec![
                FieldNode::new("sku", FieldType::String, ""),
                FieldNode::new("nested", FieldType::Array, ""),
            ]),
            FieldNode::new("total", FieldType::Number, "")
                .with_children(vec![FieldNode::blank()]),
        ]);

        let issues = schema.issues();
        assert_eq!(
            issues,
            vec![
                SchemaIssue::UnnamedField { path: "0".into() },
                SchemaIssue::NestedArray { path: "1.1".into() },
                SchemaIssue::OrphanedChildren { path: "2".into() },
            ]
        );
    }
}
