//! Builders for transfer action elements

use crate::xml::Element;

/// Side of a pattern item a clip reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    fn as_str(self) -> &'static str {
        match self {
            Self::Source => "sl",
            Self::Target => "tl",
        }
    }
}

pub fn var(name: &str) -> Element {
    Element::new("var").with_attr("n", name)
}

pub fn lit(value: &str) -> Element {
    Element::new("lit").with_attr("v", value)
}

pub fn lit_tag(value: &str) -> Element {
    Element::new("lit-tag").with_attr("v", value)
}

pub fn clip(pos: usize, side: Side, part: &str) -> Element {
    Element::new("clip")
        .with_attr("pos", pos.to_string())
        .with_attr("side", side.as_str())
        .with_attr("part", part)
}

/// `<let>` assigning `value` to the variable `name`
pub fn assign(name: &str, value: Element) -> Element {
    Element::new("let").with_child(var(name)).with_child(value)
}

/// `<let>` clearing the variable `name`
pub fn clear(name: &str) -> Element {
    assign(name, lit(""))
}

pub fn equal(left: Element, right: Element) -> Element {
    Element::new("equal").with_child(left).with_child(right)
}

/// Conjunction; a single condition is returned as is
pub fn all_of(mut conditions: Vec<Element>) -> Element {
    if conditions.len() == 1 {
        return conditions.remove(0);
    }
    Element::new("and").with_children(conditions)
}

/// Disjunction; a single condition is returned as is
pub fn any_of(mut conditions: Vec<Element>) -> Element {
    if conditions.len() == 1 {
        return conditions.remove(0);
    }
    Element::new("or").with_children(conditions)
}

pub fn when(condition: Element, body: Vec<Element>) -> Element {
    Element::new("when")
        .with_child(Element::new("test").with_child(condition))
        .with_children(body)
}

pub fn choose(whens: Vec<Element>, otherwise: Option<Vec<Element>>) -> Element {
    let mut choose = Element::new("choose").with_children(whens);
    if let Some(body) = otherwise {
        choose.push(Element::new("otherwise").with_children(body));
    }
    choose
}

pub fn call_macro(name: &str, positions: &[usize]) -> Element {
    Element::new("call-macro").with_attr("n", name).with_children(
        positions
            .iter()
            .map(|pos| Element::new("with-param").with_attr("pos", pos.to_string())),
    )
}

pub fn blank(pos: usize) -> Element {
    Element::new("b").with_attr("pos", pos.to_string())
}
