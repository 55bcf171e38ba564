use super::node::{self, Element, Node};
use super::parse::parse_markup;
use crate::error::{BrowserError, Result};
use log::{debug, trace};
use std::collections::HashMap;

/// One in-place mutation of a rendered region. `element` is the pre-order
/// index of the target among all elements of the region.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    SetAttribute {
        element: usize,
        name: String,
        value: String,
    },
    SetText {
        element: usize,
        text: String,
    },
}

/// Compute the patches that bring `current` in line with `next`.
///
/// Elements are paired by pre-order position, so both trees are expected to
/// have the same shape. Only attributes and text-only content are synced:
/// attributes present in `current` but absent from `next` are kept, and
/// nothing is inserted, removed or reordered. An element's text is replaced
/// only when its counterpart in `next` holds exactly one text node with
/// non-blank content.
///
/// Fails with [`BrowserError::ShapeMismatch`] when `next` has more elements
/// than `current`; extra elements in `current` are left alone.
pub fn diff(current: &[Node], next: &[Node]) -> Result<Vec<Patch>> {
    let current_elements = node::elements(current);
    let next_elements = node::elements(next);
    if next_elements.len() > current_elements.len() {
        return Err(BrowserError::ShapeMismatch {
            expected: current_elements.len(),
            found: next_elements.len(),
        });
    }

    let mut patches = Vec::new();
    for (index, (new, old)) in next_elements.iter().zip(&current_elements).enumerate() {
        if new == old {
            continue;
        }

        for (name, value) in &new.attributes {
            if old.attributes.get(name) != Some(value) {
                patches.push(Patch::SetAttribute {
                    element: index,
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }

        if let Some(text) = new.only_text() {
            if !text.trim().is_empty() && old.only_text() != Some(text) {
                patches.push(Patch::SetText {
                    element: index,
                    text: text.to_string(),
                });
            }
        }
    }
    Ok(patches)
}

/// Apply `patches` to `current` in place. Untouched elements keep their
/// children and attributes as they are.
pub fn apply(current: &mut [Node], patches: &[Patch]) {
    let mut by_element: HashMap<usize, Vec<&Patch>> = HashMap::new();
    for patch in patches {
        let element = match patch {
            Patch::SetAttribute { element, .. } | Patch::SetText { element, .. } => *element,
        };
        by_element.entry(element).or_default().push(patch);
    }

    let mut counter = 0;
    apply_nodes(current, &mut counter, &by_element);
}

// Children are visited before an element's text is replaced so that indices
// always refer to the tree as it was diffed.
fn apply_nodes(nodes: &mut [Node], counter: &mut usize, patches: &HashMap<usize, Vec<&Patch>>) {
    for node in nodes {
        let Node::Element(element) = node else {
            continue;
        };
        let index = *counter;
        *counter += 1;

        let mut text = None;
        for patch in patches.get(&index).into_iter().flatten() {
            trace!("element {}: {:?}", index, patch);
            match patch {
                Patch::SetAttribute { name, value, .. } => {
                    element.attributes.insert(name.clone(), value.clone());
                }
                Patch::SetText { text: t, .. } => text = Some(t.clone()),
            }
        }

        apply_nodes(&mut element.children, counter, patches);
        if let Some(text) = text {
            element.set_text(text);
        }
    }
}

/// A rendered subtree owned by one view.
#[derive(Debug, Clone, Default)]
pub struct Region {
    name: String,
    children: Vec<Node>,
    replacements: u64,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Region {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// How many times the region's content has been discarded and rebuilt
    pub fn replacements(&self) -> u64 {
        self.replacements
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Discard the current content and insert `markup`.
    pub fn replace(&mut self, markup: &str) {
        self.clear();
        self.children = parse_markup(markup);
        self.replacements += 1;
        debug!("{}: replaced content", self.name);
    }

    /// Patch the current content toward `markup` and return what was changed.
    /// See [`diff`] for what is and is not synced.
    pub fn update(&mut self, markup: &str) -> Result<Vec<Patch>> {
        let next = parse_markup(markup);
        let patches = diff(&self.children, &next)?;
        apply(&mut self.children, &patches);
        debug!("{}: applied {} patch(es)", self.name, patches.len());
        Ok(patches)
    }

    pub fn elements(&self) -> Vec<&Element> {
        node::elements(&self.children)
    }

    /// First element carrying `class`, in pre-order
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.elements().into_iter().find(|e| e.has_class(class))
    }

    /// Nearest element carrying `class`, starting at the element with
    /// pre-order index `element` and walking up through its ancestors
    pub fn closest(&self, element: usize, class: &str) -> Option<&Element> {
        node::ancestry(&self.children, element)
            .into_iter()
            .rev()
            .find(|e| e.has_class(class))
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn to_markup(&self) -> String {
        node::to_markup(&self.children)
    }
}
