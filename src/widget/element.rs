use crate::widget::text_edit;
use indexmap::IndexMap;

/// Host-side capabilities the controller needs from the input it is bound to.
pub trait SearchField {
    fn id(&self) -> &str;
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);
    /// Data attribute lookup, e.g. `data("endpoint")`.
    fn data(&self, key: &str) -> Option<&str>;
    /// Submits the nearest enclosing form. Returns `false` when there is none.
    fn submit_form(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub field: String,
    pub value: String,
}

/// Records submissions instead of posting them anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    id: String,
    submissions: Vec<FormSubmission>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn submit(&mut self, field: &str, value: &str) {
        self.submissions.push(FormSubmission {
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    pub fn submissions(&self) -> &[FormSubmission] {
        self.submissions.as_slice()
    }

    pub fn last_submission(&self) -> Option<&FormSubmission> {
        self.submissions.last()
    }
}

/// In-memory text input with a caret, classes and data attributes.
#[derive(Debug, Clone, Default)]
pub struct InputElement {
    id: String,
    classes: Vec<String>,
    value: String,
    caret: usize,
    data: IndexMap<String, String>,
    form: Option<Form>,
}

impl InputElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.caret = text_edit::char_count(self.value.as_str());
        self
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.form = Some(form);
        self
    }

    pub fn classes(&self) -> &[String] {
        self.classes.as_slice()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Applies a caret-aware edit; returns whether the value changed.
    pub fn edit(&mut self, f: impl FnOnce(&mut String, &mut usize) -> bool) -> bool {
        f(&mut self.value, &mut self.caret)
    }

    /// Supports `*`, `#id`, `.class` and a bare class name.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.id == id;
        }
        let class = selector.strip_prefix('.').unwrap_or(selector);
        !class.is_empty() && self.has_class(class)
    }
}

impl SearchField for InputElement {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn value(&self) -> &str {
        self.value.as_str()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.caret = text_edit::char_count(value);
    }

    fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    fn submit_form(&mut self) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        form.submit(self.id.as_str(), self.value.as_str());
        true
    }
}

/// Elements matching `selector`, in document order.
pub fn select(
    elements: impl IntoIterator<Item = InputElement>,
    selector: &str,
) -> Vec<InputElement> {
    elements
        .into_iter()
        .filter(|element| element.matches(selector))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Form, InputElement, SearchField, select};

    #[test]
    fn selector_forms() {
        let element = InputElement::new("q").with_class("suggestions-search");
        assert!(element.matches(".suggestions-search"));
        assert!(element.matches("suggestions-search"));
        assert!(element.matches("#q"));
        assert!(element.matches("*"));
        assert!(!element.matches("#other"));
        assert!(!element.matches("."));
    }

    #[test]
    fn select_keeps_document_order() {
        let picked = select(
            vec![
                InputElement::new("a").with_class("s"),
                InputElement::new("b"),
                InputElement::new("c").with_class("s"),
            ],
            ".s",
        );
        let ids = picked.iter().map(|e| e.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn submit_records_current_value() {
        let mut element = InputElement::new("q")
            .with_value("rust")
            .with_form(Form::new("search"));
        assert!(element.submit_form());

        let form = element.form().expect("form");
        assert_eq!(form.submissions().len(), 1);
        let last = form.last_submission().expect("submission");
        assert_eq!((last.field.as_str(), last.value.as_str()), ("q", "rust"));
        assert_eq!(form.id(), "search");
    }

    #[test]
    fn submit_without_form_is_reported() {
        let mut element = InputElement::new("q");
        assert!(!element.submit_form());
    }

    #[test]
    fn set_value_moves_caret_to_end() {
        let mut element = InputElement::new("q").with_data("endpoint", "/api");
        element.set_value("héllo");
        assert_eq!(element.caret(), 5);
        assert_eq!(element.data("endpoint"), Some("/api"));
    }
}
