use html_escape::{encode_double_quoted_attribute, encode_text};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Minimal in-memory XML element: attributes keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Output layout for [`to_xml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Everything on one line after the declaration.
    None,
    /// One element per line, nested `n` spaces per level.
    Spaces(usize),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// Serialize `root` as a UTF-8 document with an XML declaration.
pub fn to_xml(root: &Element, indent: Indent) -> String {
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root, indent, 0);
    out.push('\n');
    out
}

fn write_element(out: &mut String, el: &Element, indent: Indent, depth: usize) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }

    let text = el.text.as_deref().filter(|t| !t.is_empty());
    if text.is_none() && el.children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');

    if let Some(text) = text {
        out.push_str(&encode_text(text));
    }

    if !el.children.is_empty() {
        for child in &el.children {
            newline(out, indent, depth + 1);
            write_element(out, child, indent, depth + 1);
        }
        newline(out, indent, depth);
    }

    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

fn newline(out: &mut String, indent: Indent, depth: usize) {
    if let Indent::Spaces(width) = indent {
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', width * depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("root");
        let mut item = Element::new("item").with_attr("id", "1");
        item.push(Element::new("name").with_text("first"));
        root.push(item);
        root.push(Element::new("empty"));
        root
    }

    #[test]
    fn pretty_output_nests_two_spaces() {
        let xml = to_xml(&sample(), Indent::default());
        let expected = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<root>
  <item id=\"1\">
    <name>first</name>
  </item>
  <empty />
</root>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn compact_output_has_no_inner_whitespace() {
        let xml = to_xml(&sample(), Indent::None);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root><item id=\"1\"><name>first</name></item><empty /></root>\n"
        );
    }

    #[test]
    fn empty_text_is_self_closing() {
        let mut root = Element::new("version");
        root.push(Element::new("downloadLink").with_text(""));
        root.push(Element::new("item").with_text(""));
        let xml = to_xml(&root, Indent::None);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<version><downloadLink /><item /></version>\n"
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let el = Element::new("a")
            .with_attr("href", "x?a=1&b=\"2\"")
            .with_text("<b> & </b>");
        let xml = to_xml(&el, Indent::None);
        assert!(xml.contains("href=\"x?a=1&amp;b=&quot;2&quot;\""), "{xml}");
        assert!(xml.contains(">&lt;b&gt; &amp; &lt;/b&gt;<"), "{xml}");
    }

    #[test]
    fn lookup_helpers() {
        let root = sample();
        let item = root.child("item").unwrap();
        assert_eq!(item.attr("id"), Some("1"));
        assert_eq!(item.attr("missing"), None);
        assert_eq!(root.children_named("empty").count(), 1);
        assert!(root.child("nope").is_none());
    }
}
