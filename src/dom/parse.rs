use super::node::{Element, Node};
use log::trace;
use scraper::{ElementRef, Html};

/// Parse a markup fragment into a detached tree.
///
/// Comments are dropped; whitespace-only text is kept so that equality
/// between two parses of the same markup is exact.
pub fn parse_markup(markup: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(markup);
    if !fragment.errors.is_empty() {
        trace!("Markup parse recovered from: {:?}", fragment.errors);
    }
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| match ElementRef::wrap(child) {
            Some(element) => Some(Node::Element(convert_element(element))),
            None => child.value().as_text().map(|text| {
                let text: &str = text;
                Node::Text(text.to_string())
            }),
        })
        .collect()
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    Element {
        tag: value.name().to_string(),
        attributes: value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children: convert_children(element),
    }
}
