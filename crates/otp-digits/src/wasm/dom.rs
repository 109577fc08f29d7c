//! Mock DOM for testing without a browser
//!
//! An arena-backed element tree with just enough of the DOM to exercise the
//! digit group controller: attributes, classes, input values, parent links,
//! document-order queries, `contains` and a single focused element.

use std::collections::HashMap;

use crate::config::WidgetConfig;
use crate::field::NumericField;

/// Handle to an element in a [`MockDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in the arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Current `value` property (inputs only)
    pub value: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            value: String::new(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an `<input>` element of the given type
    #[must_use]
    pub fn input(input_type: &str) -> Self {
        Self::new("input").with_attr("type", input_type)
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Sets or replaces an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Whether this is an `<input>` with `attr="value"`
    #[must_use]
    pub fn is_input_tagged(&self, attr: &str, value: &str) -> bool {
        self.tag == "input" && self.get_attr(attr) == Some(value)
    }

    /// Parent element, if attached
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child elements in order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Keydown on an element
    KeyDown {
        /// Element receiving the event
        target: NodeId,
        /// `KeyboardEvent.key`
        key: String,
        /// Whether Ctrl was held
        ctrl: bool,
    },
    /// Paste on the document with a plain-text payload
    Paste {
        /// Clipboard text
        text: String,
    },
    /// Focus moved to an element
    Focus {
        /// The focused element
        target: NodeId,
    },
    /// Focus left the page content
    Blur,
}

impl DomEvent {
    /// Creates a keydown event
    #[must_use]
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self::KeyDown {
            target,
            key: key.to_string(),
            ctrl: false,
        }
    }

    /// Creates a keydown event with Ctrl held
    #[must_use]
    pub fn key_down_with_ctrl(target: NodeId, key: &str) -> Self {
        Self::KeyDown {
            target,
            key: key.to_string(),
            ctrl: true,
        }
    }

    /// Creates a paste event
    #[must_use]
    pub fn paste(text: &str) -> Self {
        Self::Paste {
            text: text.to_string(),
        }
    }

    /// Creates a focus event
    #[must_use]
    pub fn focus(target: NodeId) -> Self {
        Self::Focus { target }
    }
}

/// In-memory document
#[derive(Debug, Clone)]
pub struct MockDom {
    nodes: Vec<DomElement>,
    event_history: Vec<DomEvent>,
    focused: Option<NodeId>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates a document holding only an empty `<body>`
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![DomElement::new("body")],
            event_history: Vec::new(),
            focused: None,
        }
    }

    /// Creates a document holding one rendered numeric field
    #[must_use]
    pub fn from_field(field: &NumericField) -> Self {
        let mut dom = Self::new();
        let root = dom.root();
        dom.append_field(root, field, &WidgetConfig::default());
        dom
    }

    /// The `<body>` element
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends the element tree [`NumericField::render_with`] produces
    ///
    /// Returns the outer field container.
    pub fn append_field(
        &mut self,
        parent: NodeId,
        field: &NumericField,
        config: &WidgetConfig,
    ) -> NodeId {
        let wrapper = self.append_child(
            parent,
            DomElement::new("div")
                .with_class("input-field")
                .with_class("input-field-numeric"),
        );
        self.append_child(
            wrapper,
            DomElement::new("label")
                .with_attr("for", &field.name)
                .with_text(&field.label),
        );
        self.append_child(
            wrapper,
            DomElement::input("hidden")
                .with_attr("name", &field.name)
                .with_attr(&config.type_attribute, &config.aggregate_type),
        );
        let digits = self.append_child(
            wrapper,
            DomElement::new("div").with_class(&config.digits_container_class),
        );
        for i in 0..field.digits_count {
            let id = field.digit_id(i);
            self.append_child(
                digits,
                DomElement::input("number")
                    .with_id(&id)
                    .with_attr("name", &id)
                    .with_attr(&config.type_attribute, &config.digit_type)
                    .with_attr("min", "0")
                    .with_attr("max", "9"),
            );
        }
        wrapper
    }

    /// Appends `element` under `parent` and returns its handle
    pub fn append_child(&mut self, parent: NodeId, mut element: DomElement) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Gets an element
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&DomElement> {
        self.nodes.get(node.0)
    }

    /// Gets a mutable element
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut DomElement> {
        self.nodes.get_mut(node.0)
    }

    /// Finds the first element with the given ID, in document order
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_all(self.root(), |e| e.id == id).into_iter().next()
    }

    /// Descendants of `scope` matching `pred`, in document order
    pub fn query_all<F>(&self, scope: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&DomElement) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(scope)
            .map(|e| e.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            if let Some(elem) = self.get(node) {
                if pred(elem) {
                    found.push(node);
                }
                stack.extend(elem.children.iter().rev().copied());
            }
        }
        found
    }

    /// First descendant of `scope` matching `pred`
    pub fn query<F>(&self, scope: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&DomElement) -> bool,
    {
        self.query_all(scope, pred).into_iter().next()
    }

    /// Parent of `node`
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(DomElement::parent)
    }

    /// Whether `node` is `ancestor` or lies inside it
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Value of an element (empty if unknown)
    #[must_use]
    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map_or("", |e| e.value.as_str())
    }

    /// Sets the value of an element
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(elem) = self.get_mut(node) {
            elem.value = value.to_string();
        }
    }

    /// Moves focus to `node`
    pub fn focus(&mut self, node: NodeId) {
        if self.get(node).is_some() {
            self.focused = Some(node);
        }
    }

    /// Removes focus from every element
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The focused element, if any
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    /// Records an event and applies its focus side effects
    pub fn record_event(&mut self, event: &DomEvent) {
        match event {
            DomEvent::Focus { target } => self.focus(*target),
            DomEvent::Blur => self.blur(),
            DomEvent::KeyDown { .. } | DomEvent::Paste { .. } => {}
        }
        self.event_history.push(event.clone());
    }

    /// Browser default for an unprevented paste: append to the focused input
    pub fn apply_default_paste(&mut self, text: &str) {
        if let Some(node) = self.focused {
            if let Some(elem) = self.get_mut(node) {
                if elem.tag == "input" {
                    elem.value.push_str(text);
                }
            }
        }
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Number of elements, including the root
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only its root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.value.is_empty());
        assert!(elem.parent().is_none());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_input() {
        let elem = DomElement::input("number");
        assert_eq!(elem.tag, "input");
        assert_eq!(elem.get_attr("type"), Some("number"));
        assert_eq!(elem.value, "");
    }

    #[test]
    fn test_dom_element_classes() {
        let mut elem = DomElement::new("div").with_class("a").with_class("a");
        elem.add_class("b");
        assert_eq!(elem.classes, vec!["a", "b"]);
        assert!(elem.has_class("b"));
        assert!(!elem.has_class("c"));
    }

    #[test]
    fn test_is_input_tagged() {
        let elem = DomElement::input("hidden").with_attr("data-custom-type", "numeric");
        assert!(elem.is_input_tagged("data-custom-type", "numeric"));
        assert!(!elem.is_input_tagged("data-custom-type", "numeric-digit"));
        let div = DomElement::new("div").with_attr("data-custom-type", "numeric");
        assert!(!div.is_input_tagged("data-custom-type", "numeric"));
    }

    // ===== Tree tests =====

    #[test]
    fn test_new_dom_has_root_only() {
        let dom = MockDom::new();
        assert!(dom.is_empty());
        assert_eq!(dom.get(dom.root()).unwrap().tag, "body");
    }

    #[test]
    fn test_append_child_links_parent() {
        let mut dom = MockDom::new();
        let div = dom.append_child(dom.root(), DomElement::new("div"));
        let span = dom.append_child(div, DomElement::new("span"));
        assert_eq!(dom.parent(span), Some(div));
        assert_eq!(dom.get(div).unwrap().children(), &[span]);
        assert_eq!(dom.len(), 3);
    }

    #[test]
    fn test_query_all_document_order() {
        let mut dom = MockDom::new();
        let a = dom.append_child(dom.root(), DomElement::new("p").with_id("a"));
        let a1 = dom.append_child(a, DomElement::new("p").with_id("a1"));
        let b = dom.append_child(dom.root(), DomElement::new("p").with_id("b"));
        let a2 = dom.append_child(a, DomElement::new("p").with_id("a2"));
        let found = dom.query_all(dom.root(), |e| e.tag == "p");
        assert_eq!(found, vec![a, a1, a2, b]);
    }

    #[test]
    fn test_query_excludes_scope() {
        let mut dom = MockDom::new();
        let div = dom.append_child(dom.root(), DomElement::new("div"));
        assert!(dom.query(div, |e| e.tag == "div").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let dom = MockDom::from_field(&NumericField::new("code", "Code", 3));
        let node = dom.find_by_id("code-2").unwrap();
        assert_eq!(dom.get(node).unwrap().id, "code-2");
        assert!(dom.find_by_id("code-3").is_none());
    }

    #[test]
    fn test_contains() {
        let mut dom = MockDom::new();
        let outer = dom.append_child(dom.root(), DomElement::new("div"));
        let inner = dom.append_child(outer, DomElement::new("input"));
        let other = dom.append_child(dom.root(), DomElement::new("input"));
        assert!(dom.contains(outer, inner));
        assert!(dom.contains(outer, outer));
        assert!(!dom.contains(outer, other));
    }

    // ===== Field tree tests =====

    #[test]
    fn test_from_field_structure() {
        let dom = MockDom::from_field(&NumericField::new("code", "Code", 6));
        let aggregate = dom
            .query(dom.root(), |e| e.is_input_tagged("data-custom-type", "numeric"))
            .unwrap();
        let container = dom
            .query(dom.parent(aggregate).unwrap(), |e| {
                e.has_class("input-field-numeric-digits")
            })
            .unwrap();
        let digits = dom.query_all(container, |e| {
            e.is_input_tagged("data-custom-type", "numeric-digit")
        });
        assert_eq!(digits.len(), 6);
        assert_eq!(dom.get(digits[0]).unwrap().id, "code-0");
    }

    // ===== Value and focus tests =====

    #[test]
    fn test_value_round_trip() {
        let mut dom = MockDom::new();
        let input = dom.append_child(dom.root(), DomElement::input("text"));
        dom.set_value(input, "7");
        assert_eq!(dom.value(input), "7");
        assert_eq!(dom.value(NodeId(99)), "");
    }

    #[test]
    fn test_focus_and_blur() {
        let mut dom = MockDom::new();
        let input = dom.append_child(dom.root(), DomElement::input("text"));
        dom.record_event(&DomEvent::focus(input));
        assert_eq!(dom.active_element(), Some(input));
        dom.record_event(&DomEvent::Blur);
        assert_eq!(dom.active_element(), None);
        assert_eq!(dom.event_history().len(), 2);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_focus_unknown_node_ignored() {
        let mut dom = MockDom::new();
        dom.focus(NodeId(42));
        assert_eq!(dom.active_element(), None);
    }

    #[test]
    fn test_default_paste_into_focused_input() {
        let mut dom = MockDom::new();
        let input = dom.append_child(dom.root(), DomElement::input("text"));
        dom.set_value(input, "ab");
        dom.focus(input);
        dom.apply_default_paste("cd");
        assert_eq!(dom.value(input), "abcd");
    }

    #[test]
    fn test_default_paste_without_focus_is_noop() {
        let mut dom = MockDom::new();
        let input = dom.append_child(dom.root(), DomElement::input("text"));
        dom.apply_default_paste("cd");
        assert_eq!(dom.value(input), "");
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        let node = NodeId(1);
        assert!(matches!(
            DomEvent::key_down(node, "5"),
            DomEvent::KeyDown { ctrl: false, .. }
        ));
        assert!(matches!(
            DomEvent::key_down_with_ctrl(node, "v"),
            DomEvent::KeyDown { ctrl: true, .. }
        ));
        assert_eq!(
            DomEvent::paste("12"),
            DomEvent::Paste {
                text: "12".to_string()
            }
        );
        assert_eq!(DomEvent::focus(node), DomEvent::Focus { target: node });
    }
}
