//! Template persistence workflows and selection.

pub mod save;
pub mod selector;

pub use save::{save_template, save_template_as, update_template_by_id, SaveOutcome, SaveTemplate};
pub use selector::{SelectedTemplate, TemplateSelector};
