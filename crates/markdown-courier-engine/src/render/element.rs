use serde::Serialize;

/// Tags serialized without a closing tag.
pub const VOID_TAGS: [&str; 3] = ["br", "hr", "img"];

/// Zero-width space used to keep hidden anchor paragraphs non-empty.
pub const ZERO_WIDTH: &str = "\u{200B}";

/// A node of the owned element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(e) => e.text_content(),
            Node::Text(s) => s.clone(),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(s) => out.push_str(&html_escape::encode_text(s)),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An element: tag, ordered attributes, children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn text_child(self, s: impl Into<String>) -> Self {
        self.child(Node::text(s))
    }

    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Sets `key`, replacing an existing value in place.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Visits this element and every descendant element, depth first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.walk_mut(f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(v));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// A hidden paragraph (`p > span` holding a zero-width space).
    pub fn hidden_paragraph(name: Option<&str>) -> Self {
        let p = Element::new("p");
        let p = match name {
            Some(name) => p.attr("name", name),
            None => p,
        };
        p.child(Element::new("span").text_child(ZERO_WIDTH))
    }

    /// Image figure: `figure > div > picture > img` plus a `figcaption`.
    pub fn figure(src: &str, alt: &str, caption: Option<&str>, size: Option<(u32, Option<u32>)>) -> Self {
        let mut img = Element::new("img").attr("src", src).attr("alt", alt);
        if let Some((w, h)) = size {
            img.set_attr("data-width", w.to_string());
            if let Some(h) = h {
                img.set_attr("data-height", h.to_string());
            }
        }
        Element::new("figure")
            .class("paragraph-image")
            .child(
                Element::new("div")
                    .class("aspectRatioPlaceholder is-locked")
                    .child(Element::new("picture").child(img)),
            )
            .child(
                Element::new("figcaption")
                    .class("imageCaption")
                    .text_child(caption.unwrap_or_default()),
            )
    }
}
