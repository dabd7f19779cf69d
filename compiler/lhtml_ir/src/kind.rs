//! Node kinds.

/// A single attribute as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

impl Attr {
    /// Attribute with a value: `name="value"`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attr {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Value-less attribute: `name`.
    pub fn flag(name: impl Into<String>) -> Self {
        Attr {
            name: name.into(),
            value: None,
        }
    }
}

/// How an element's tag is closed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClosingKind {
    /// Separate closing tag: `<div></div>`.
    #[default]
    Normal,
    /// Void element without a closing tag: `<br>`.
    Void,
    /// Self-closing syntax: `<img />`.
    SelfClosing,
}

/// Tag data shared by ordinary and raw elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    /// Tag name as written.
    pub name: String,
    pub attrs: Vec<Attr>,
    pub closing: ClosingKind,
}

impl Element {
    /// Whether the tag name matches `name`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether the element has no separate closing tag.
    #[inline]
    pub fn has_no_close_marker(&self) -> bool {
        !matches!(self.closing, ClosingKind::Normal)
    }
}

/// A Liquid output tag: `{{ markup }}`, optionally with `-` trim markers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiquidDrop {
    pub markup: String,
    /// `{{-` was written.
    pub trim_start: bool,
    /// `-}}` was written.
    pub trim_end: bool,
}

/// The closed set of node shapes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The tree root.
    Document,
    /// Ordinary element whose children are laid out.
    Element(Element),
    /// Element whose content is never parsed (`<script>`, `<style>`).
    RawElement(Element),
    /// Text between tags.
    Text { value: String },
    /// `<!--body-->`.
    Comment { body: String },
    /// `{{ markup }}`.
    LiquidDrop(LiquidDrop),
}

impl NodeKind {
    /// Tag data for element kinds.
    pub fn element(&self) -> Option<&Element> {
        match self {
            NodeKind::Element(el) | NodeKind::RawElement(el) => Some(el),
            NodeKind::Document
            | NodeKind::Text { .. }
            | NodeKind::Comment { .. }
            | NodeKind::LiquidDrop(_) => None,
        }
    }

    /// Tag name for element kinds.
    pub fn name(&self) -> Option<&str> {
        self.element().map(|el| el.name.as_str())
    }

    /// Whether this is an element with the given tag name (ASCII case-insensitive).
    pub fn is_element_named(&self, name: &str) -> bool {
        self.element().is_some_and(|el| el.is(name))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text { .. })
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self, NodeKind::Comment { .. })
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, NodeKind::Document)
    }
}
