//! OPML serialization of a document outline.
//!
//! A document arrives as a flat list of nodes, each naming its children by
//! id, with a synthetic `root` node at the top. The serializer walks that
//! table depth-first in listed child order and emits one `<outline>`
//! element per node.
//!
//! Output is byte-stable: attributes always appear in the order
//! `text, _note, checkbox, complete, colorLabel, listStyle, collapsed`,
//! indentation is one tab per level, and lines end in `\n`.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use tracing::warn;

use crate::remote::NodeRecord;

/// Id of the synthetic top node of every document.
pub const ROOT_NODE_ID: &str = "root";

const ELEMENT: &str = "outline";

/// Indentation depth of top-level outline elements inside `<body>`.
pub const BODY_DEPTH: usize = 2;

/// Knobs for [`serialize`] and [`write_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Emit the `root` node itself as a wrapping element.
    pub include_root_node: bool,
    /// Emit `checkbox`, `complete`, `colorLabel` and `listStyle`.
    pub with_format: bool,
    /// Emit `collapsed`.
    pub with_state: bool,
    /// Tab depth of the outermost emitted elements.
    pub base_depth: usize,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            include_root_node: false,
            with_format: true,
            with_state: true,
            base_depth: BODY_DEPTH,
        }
    }
}

/// Escape the five XML metacharacters.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Element name plus attributes, without the angle brackets.
fn element(node: &NodeRecord, options: &OutlineOptions) -> String {
    let mut elem = format!("{ELEMENT} text=\"{}\"", escape(&node.content));

    if let Some(note) = node.note.as_deref().filter(|n| !n.is_empty()) {
        let _ = write!(elem, " _note=\"{}\"", escape(note));
    }

    if options.with_format {
        if node.checkbox == Some(true) {
            elem.push_str(" checkbox=\"true\"");
        }
        if node.checked == Some(true) {
            elem.push_str(" complete=\"true\"");
        }
        if let Some(color) = node.color.filter(|c| *c != 0) {
            let _ = write!(elem, " colorLabel=\"{color}\"");
        }
        if node.numbered == Some(true) {
            elem.push_str(" listStyle=\"arabic\"");
        }
    }

    if options.with_state && node.collapsed == Some(true) {
        elem.push_str(" collapsed=\"true\"");
    }

    elem
}

enum Step<'a> {
    Open(&'a str, usize),
    Close(usize),
}

fn indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n('\t', depth));
}

/// Serialize a document's nodes as nested `<outline>` elements.
///
/// Ids that are missing from the table, or that were already emitted
/// elsewhere in the document, are reported and skipped; their siblings
/// still serialize.
#[must_use]
pub fn serialize(nodes: &[NodeRecord], options: &OutlineOptions) -> String {
    let table: HashMap<&str, &NodeRecord> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut out = String::new();
    let mut stack: Vec<Step<'_>> = Vec::new();

    if options.include_root_node {
        stack.push(Step::Open(ROOT_NODE_ID, options.base_depth));
    } else {
        match table.get(ROOT_NODE_ID) {
            Some(root) => {
                if let Some(children) = &root.children {
                    stack.extend(
                        children
                            .iter()
                            .rev()
                            .map(|c| Step::Open(c.as_str(), options.base_depth)),
                    );
                }
            }
            None => warn!("Document has no root node"),
        }
    }

    let mut emitted: HashSet<&str> = HashSet::new();

    while let Some(step) = stack.pop() {
        match step {
            Step::Close(depth) => {
                indent(&mut out, depth);
                let _ = writeln!(out, "</{ELEMENT}>");
            }
            Step::Open(id, depth) => {
                let Some(node) = table.get(id) else {
                    warn!(id, "Node not found, skipping");
                    continue;
                };
                if !emitted.insert(id) {
                    warn!(id, "Node listed twice, skipping");
                    continue;
                }

                indent(&mut out, depth);
                let elem = element(node, options);
                match &node.children {
                    Some(children) => {
                        let _ = writeln!(out, "<{elem}>");
                        stack.push(Step::Close(depth));
                        stack.extend(
                            children
                                .iter()
                                .rev()
                                .map(|c| Step::Open(c.as_str(), depth + 1)),
                        );
                    }
                    None => {
                        let _ = writeln!(out, "<{elem}/>");
                    }
                }
            }
        }
    }

    out
}

/// Render a complete OPML document: header, outline body, footer.
#[must_use]
pub fn write_document(title: &str, nodes: &[NodeRecord], options: &OutlineOptions) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<opml version=\"2.0\">\n");
    out.push_str("\t<head>\n");
    let _ = writeln!(out, "\t\t<title>{}</title>", escape(title));
    out.push_str("\t\t<flavor>dynalist</flavor>\n");
    out.push_str("\t\t<source>https://dynalist.io</source>\n");
    out.push_str("\t</head>\n");
    out.push_str("\t<body>\n");
    out.push_str(&serialize(nodes, options));
    out.push_str("\t</body>\n");
    out.push_str("</opml>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, content: &str) -> NodeRecord {
        NodeRecord {
            id: id.into(),
            content: content.into(),
            ..NodeRecord::default()
        }
    }

    fn parent(id: &str, content: &str, children: &[&str]) -> NodeRecord {
        NodeRecord {
            children: Some(children.iter().map(ToString::to_string).collect()),
            ..node(id, content)
        }
    }

    fn flat(options: OutlineOptions) -> OutlineOptions {
        OutlineOptions { base_depth: 0, ..options }
    }

    #[test]
    fn test_escape_all_metacharacters() {
        assert_eq!(escape(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&apos;e&apos;");
    }

    #[test]
    fn test_text_is_escaped() {
        let nodes = vec![parent("root", "", &["a"]), node("a", "a&b")];
        let out = serialize(&nodes, &flat(OutlineOptions::default()));
        assert_eq!(out, "<outline text=\"a&amp;b\"/>\n");
    }

    #[test]
    fn test_leaf_never_closes_and_container_does() {
        let nodes = vec![
            parent("root", "", &["a", "b"]),
            parent("a", "A", &["a1"]),
            node("a1", "A1"),
            parent("b", "B", &[]),
        ];
        let out = serialize(&nodes, &flat(OutlineOptions::default()));
        assert_eq!(
            out,
            "<outline text=\"A\">\n\
             \t<outline text=\"A1\"/>\n\
             </outline>\n\
             <outline text=\"B\">\n\
             </outline>\n"
        );
    }

    #[test]
    fn test_attribute_order_and_presence() {
        let full = NodeRecord {
            note: Some("n<".into()),
            checkbox: Some(true),
            checked: Some(true),
            color: Some(3),
            numbered: Some(true),
            collapsed: Some(true),
            ..node("x", "X")
        };
        let nodes = vec![parent("root", "", &["x"]), full];
        let out = serialize(&nodes, &flat(OutlineOptions::default()));
        assert_eq!(
            out,
            "<outline text=\"X\" _note=\"n&lt;\" checkbox=\"true\" complete=\"true\" \
             colorLabel=\"3\" listStyle=\"arabic\" collapsed=\"true\"/>\n"
        );
    }

    #[test]
    fn test_falsy_fields_emit_nothing() {
        let quiet = NodeRecord {
            note: Some(String::new()),
            checkbox: Some(false),
            checked: Some(false),
            color: Some(0),
            numbered: Some(false),
            collapsed: Some(false),
            ..node("x", "X")
        };
        let nodes = vec![parent("root", "", &["x"]), quiet];
        let out = serialize(&nodes, &flat(OutlineOptions::default()));
        assert_eq!(out, "<outline text=\"X\"/>\n");
    }

    #[test]
    fn test_format_and_state_gates() {
        let styled = NodeRecord {
            checked: Some(true),
            collapsed: Some(true),
            ..node("x", "X")
        };
        let nodes = vec![parent("root", "", &["x"]), styled];
        let options = OutlineOptions {
            with_format: false,
            with_state: false,
            ..flat(OutlineOptions::default())
        };
        assert_eq!(serialize(&nodes, &options), "<outline text=\"X\"/>\n");
    }

    #[test]
    fn test_include_root_node_and_base_depth() {
        let nodes = vec![parent("root", "Title", &["a"]), node("a", "A")];
        let options = OutlineOptions {
            include_root_node: true,
            ..OutlineOptions::default()
        };
        assert_eq!(
            serialize(&nodes, &options),
            "\t\t<outline text=\"Title\">\n\
             \t\t\t<outline text=\"A\"/>\n\
             \t\t</outline>\n"
        );
    }

    #[test]
    fn test_missing_child_keeps_siblings() {
        let nodes = vec![parent("root", "", &["a", "ghost", "b"]), node("a", "A"), node("b", "B")];
        let out = serialize(&nodes, &flat(OutlineOptions::default()));
        assert_eq!(out, "<outline text=\"A\"/>\n<outline text=\"B\"/>\n");
    }

    #[test]
    fn test_missing_root_yields_empty_body() {
        let nodes = vec![node("a", "A")];
        assert_eq!(serialize(&nodes, &OutlineOptions::default()), "");
    }

    #[test]
    fn test_write_document_wrapper() {
        let nodes = vec![parent("root", "", &["a"]), node("a", "A")];
        let doc = write_document("Plans & Ideas", &nodes, &OutlineOptions::default());
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <opml version=\"2.0\">\n\
             \t<head>\n\
             \t\t<title>Plans &amp; Ideas</title>\n\
             \t\t<flavor>dynalist</flavor>\n\
             \t\t<source>https://dynalist.io</source>\n\
             \t</head>\n\
             \t<body>\n\
             \t\t<outline text=\"A\"/>\n\
             \t</body>\n\
             </opml>\n"
        );
    }
}
