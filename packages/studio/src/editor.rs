//! Schema editor: mutations over the working schema tree.
//!
//! The editor owns the only mutable copy of a session's schema. Operations
//! with an index that does not exist are silent no-ops; callers are expected
//! to pass indices they got from the current tree.
//!
//! Expand/collapse state is presentation state. It is tracked next to the
//! tree, shifted along with it, and never written into the schema itself.

use tracing::debug;

use crate::types::{is_valid_field_name, ExtractionSchema, FieldNode, FieldType};

/// Partial update merged into an existing field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub description: Option<String>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merge into `field`. A name outside `[A-Za-z0-9_-]` is ignored and the
    /// field keeps its current name.
    fn apply(self, field: &mut FieldNode) {
        if let Some(name) = self.name {
            if is_valid_field_name(&name) {
                field.name = name;
            } else {
                debug!(rejected = %name, kept = %field.name, "Ignoring invalid field name");
            }
        }
        // Switching type never touches `children`.
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(description) = self.description {
            field.description = description;
        }
    }
}

/// Address of a field in a two-level tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Top(usize),
    Child(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeView {
    expanded: bool,
    children: Vec<bool>,
}

impl NodeView {
    fn for_field(field: &FieldNode) -> Self {
        Self {
            expanded: true,
            children: vec![true; field.children.as_ref().map_or(0, Vec::len)],
        }
    }
}

/// Working schema plus its display state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaEditor {
    fields: Vec<FieldNode>,
    view: Vec<NodeView>,
}

impl SchemaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor over an existing schema, every node expanded.
    pub fn from_schema(schema: ExtractionSchema) -> Self {
        let mut editor = Self::new();
        editor.load(schema);
        editor
    }

    /// Replace the whole tree, e.g. when a template is selected.
    pub fn load(&mut self, schema: ExtractionSchema) {
        self.view = schema.fields.iter().map(NodeView::for_field).collect();
        self.fields = schema.fields;
    }

    pub fn fields(&self) -> &[FieldNode] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_schema(&self) -> ExtractionSchema {
        ExtractionSchema::new(self.fields.clone())
    }

    pub fn add_field(&mut self) {
        self.fields.push(FieldNode::blank());
        self.view.push(NodeView {
            expanded: true,
            children: Vec::new(),
        });
    }

    pub fn update_field(&mut self, index: usize, update: FieldUpdate) {
        match self.fields.get_mut(index) {
            Some(field) => update.apply(field),
            None => debug!(index, "update_field out of bounds"),
        }
    }

    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
            self.view.remove(index);
        } else {
            debug!(index, "remove_field out of bounds");
        }
    }

    /// Append a blank child. Works on any field type; the type is not checked.
    pub fn add_child_field(&mut self, parent: usize) {
        let Some(field) = self.fields.get_mut(parent) else {
            debug!(parent, "add_child_field out of bounds");
            return;
        };
        field
            .children
            .get_or_insert_with(Vec::new)
            .push(FieldNode::blank());
        self.view[parent].children.push(true);
    }

    /// Children cannot become arrays; such a type change is dropped.
    pub fn update_child_field(&mut self, parent: usize, child: usize, mut update: FieldUpdate) {
        let Some(target) = self
            .fields
            .get_mut(parent)
            .and_then(|f| f.children.as_mut())
            .and_then(|c| c.get_mut(child))
        else {
            debug!(parent, child, "update_child_field target missing");
            return;
        };
        if update.field_type.is_some_and(|t| !t.allowed_for_child()) {
            debug!(parent, child, "Ignoring array type on child field");
            update.field_type = None;
        }
        update.apply(target);
    }

    pub fn remove_child_field(&mut self, parent: usize, child: usize) {
        let Some(children) = self.fields.get_mut(parent).and_then(|f| f.children.as_mut()) else {
            debug!(parent, "remove_child_field parent has no children");
            return;
        };
        if child < children.len() {
            children.remove(child);
            self.view[parent].children.remove(child);
        }
    }

    /// Flip expand state. Only rendered for array fields, but any existing
    /// node can be toggled.
    pub fn toggle_expanded(&mut self, path: FieldPath) {
        let slot = match path {
            FieldPath::Top(i) => self.view.get_mut(i).map(|v| &mut v.expanded),
            FieldPath::Child(p, c) => self.view.get_mut(p).and_then(|v| v.children.get_mut(c)),
        };
        match slot {
            Some(expanded) => *expanded = !*expanded,
            None => debug!(?path, "toggle_expanded target missing"),
        }
    }

    /// Expand state of a node. Missing nodes report `false`.
    pub fn is_expanded(&self, path: FieldPath) -> bool {
        match path {
            FieldPath::Top(i) => self.view.get(i).is_some_and(|v| v.expanded),
            FieldPath::Child(p, c) => self
                .view
                .get(p)
                .and_then(|v| v.children.get(c))
                .copied()
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(editor: &mut SchemaEditor, names: &[&str]) {
        for name in names {
            editor.add_field();
            let i = editor.len() - 1;
            editor.update_field(i, FieldUpdate::new().name(*name));
        }
    }

    fn names(editor: &SchemaEditor) -> Vec<&str> {
        editor.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_add_field_defaults() {
        let mut editor = SchemaEditor::new();
        editor.add_field();

        assert_eq!(editor.fields(), &[FieldNode::new("", FieldType::String, "")]);
        assert!(editor.is_expanded(FieldPath::Top(0)));
    }

    #[test]
    fn test_update_merges_partial() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["total"]);
        editor.update_field(0, FieldUpdate::new().description("grand total"));
        editor.update_field(0, FieldUpdate::new().field_type(FieldType::Number));

        assert_eq!(
            editor.fields()[0],
            FieldNode::new("total", FieldType::Number, "grand total")
        );
    }

    #[test]
    fn test_invalid_name_keeps_previous() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["total"]);
        editor.update_field(0, FieldUpdate::new().name("total amount").description("sum"));

        assert_eq!(editor.fields()[0].name, "total");
        // The rest of the update still lands.
        assert_eq!(editor.fields()[0].description, "sum");

        editor.update_field(0, FieldUpdate::new().name(""));
        assert_eq!(editor.fields()[0].name, "");
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["a"]);
        let before = editor.clone();

        editor.update_field(5, FieldUpdate::new().name("b"));
        editor.remove_field(5);
        editor.add_child_field(5);
        editor.update_child_field(0, 0, FieldUpdate::new().name("c"));
        editor.remove_child_field(0, 0);
        editor.toggle_expanded(FieldPath::Child(0, 3));

        assert_eq!(editor, before);
    }

    #[test]
    fn test_remove_shifts_indices_and_view() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["a", "b", "c"]);
        editor.toggle_expanded(FieldPath::Top(2));

        editor.remove_field(1);

        assert_eq!(names(&editor), vec!["a", "c"]);
        assert!(editor.is_expanded(FieldPath::Top(0)));
        assert!(!editor.is_expanded(FieldPath::Top(1)));
    }

    #[test]
    fn test_child_fields() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["items"]);
        editor.update_field(0, FieldUpdate::new().field_type(FieldType::Array));

        editor.add_child_field(0);
        editor.add_child_field(0);
        editor.update_child_field(0, 0, FieldUpdate::new().name("sku"));
        editor.update_child_field(0, 1, FieldUpdate::new().name("qty").field_type(FieldType::Number));

        let children = editor.fields()[0].children.as_ref().unwrap();
        assert_eq!(children[0].name, "sku");
        assert_eq!(children[1], FieldNode::new("qty", FieldType::Number, ""));

        editor.remove_child_field(0, 0);
        let children = editor.fields()[0].children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "qty");
    }

    #[test]
    fn test_add_child_on_non_array_attaches_children() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["total"]);
        assert_eq!(editor.fields()[0].field_type, FieldType::String);

        editor.add_child_field(0);

        assert_eq!(editor.fields()[0].children.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_type_change_keeps_children() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["items"]);
        editor.update_field(0, FieldUpdate::new().field_type(FieldType::Array));
        editor.add_child_field(0);

        editor.update_field(0, FieldUpdate::new().field_type(FieldType::String));

        assert!(editor.fields()[0].has_orphaned_children());
    }

    #[test]
    fn test_child_cannot_become_array() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["items"]);
        editor.update_field(0, FieldUpdate::new().field_type(FieldType::Array));
        editor.add_child_field(0);

        editor.update_child_field(0, 0, FieldUpdate::new().name("x").field_type(FieldType::Array));

        let child = &editor.fields()[0].children.as_ref().unwrap()[0];
        assert_eq!(child.field_type, FieldType::String);
        assert_eq!(child.name, "x");
    }

    #[test]
    fn test_toggle_child() {
        let mut editor = SchemaEditor::new();
        named(&mut editor, &["items"]);
        editor.add_child_field(0);

        editor.toggle_expanded(FieldPath::Child(0, 0));
        assert!(!editor.is_expanded(FieldPath::Child(0, 0)));
        assert!(editor.is_expanded(FieldPath::Top(0)));

        editor.toggle_expanded(FieldPath::Child(0, 0));
        assert!(editor.is_expanded(FieldPath::Child(0, 0)));
    }

    #[test]
    fn test_load_resets_view() {
        let schema = ExtractionSchema::new(vec![FieldNode::new("items", FieldType::Array, "")
            .with_children(vec![FieldNode::new("sku", FieldType::String, "")])]);
        let mut editor = SchemaEditor::new();
        editor.load(schema.clone());

        assert_eq!(editor.to_schema(), schema);
        assert!(editor.is_expanded(FieldPath::Child(0, 0)));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
        Rename(usize, String),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (0usize..8).prop_map(Op::Remove),
            (0usize..8, "[a-z_ .-]{0,6}").prop_map(|(i, s)| Op::Rename(i, s)),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_reference_list(ops in proptest::collection::vec(op(), 0..40)) {
            let mut editor = SchemaEditor::new();
            let mut model: Vec<String> = Vec::new();

            for op in ops {
                match op {
                    Op::Add => {
                        editor.add_field();
                        model.push(String::new());
                    }
                    Op::Remove(i) => {
                        editor.remove_field(i);
                        if i < model.len() {
                            model.remove(i);
                        }
                    }
                    Op::Rename(i, s) => {
                        editor.update_field(i, FieldUpdate::new().name(s.clone()));
                        if i < model.len() && is_valid_field_name(&s) {
                            model[i] = s;
                        }
                    }
                }
            }

            prop_assert_eq!(editor.len(), model.len());
            prop_assert_eq!(names(&editor), model.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_name_is_pure_filter(s in ".{0,12}") {
            let mut editor = SchemaEditor::new();
            named(&mut editor, &["original"]);
            editor.update_field(0, FieldUpdate::new().name(s.clone()));

            let expected = if is_valid_field_name(&s) { s.as_str() } else { "original" };
            prop_assert_eq!(editor.fields()[0].name.as_str(), expected);
        }
    }
}
