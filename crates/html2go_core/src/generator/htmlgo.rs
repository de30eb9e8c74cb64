use std::fmt::Write;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::naming::{
    attribute_method, builder_name, go_string, is_text_tag, qualify, TagFamily,
};
use super::{CodeGenerator, GeneratorOptions};
use crate::error::GeneratorError;

const PACKAGE_DECLARATION: &str = "package hello";
const ASSIGNMENT_TARGET: &str = "n";
const INDENT: &str = "\t";

/// Generates `htmlgo` builder code from an HTML document or fragment.
///
/// The markup is parsed as a full HTML5 document; the `<body>` element
/// becomes the outer `Body(...)` wrapper, so fragments end up wrapped the
/// same way complete documents do.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlGoGenerator;

impl HtmlGoGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for HtmlGoGenerator {
    fn generate(
        &self,
        markup: &str,
        options: &GeneratorOptions,
    ) -> Result<String, GeneratorError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())?;

        let emitter = Emitter { options };
        let mut out = String::new();
        let _ = writeln!(out, "{PACKAGE_DECLARATION}\n");
        let _ = writeln!(
            out,
            "var {ASSIGNMENT_TARGET} = {}(",
            qualify(&options.package_prefix, "Body")
        );
        if let Some(body) = find_element(&dom.document, "body") {
            for child in body.children.borrow().iter() {
                if let Some(expr) = emitter.node_expr(child, 1) {
                    let _ = writeln!(out, "{INDENT}{expr},");
                }
            }
        }
        out.push_str(")\n");

        tracing::trace!(bytes = out.len(), "generated htmlgo source");
        Ok(out)
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Meaningful child of an element: whitespace-only text and comments are gone.
enum Child {
    Text(String),
    Node(Handle),
}

fn content_of(handle: &Handle) -> Vec<Child> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| match &child.data {
            NodeData::Text { contents } => {
                let text = collapse_whitespace(&contents.borrow());
                (!text.is_empty()).then_some(Child::Text(text))
            }
            NodeData::Element { .. } => Some(Child::Node(child.clone())),
            _ => None,
        })
        .collect()
}

struct Emitter<'a> {
    options: &'a GeneratorOptions,
}

impl Emitter<'_> {
    fn prefix_for(&self, family: TagFamily) -> &str {
        match family {
            TagFamily::Plain => &self.options.package_prefix,
            TagFamily::Primary => &self.options.primary_prefix,
            TagFamily::Secondary => &self.options.secondary_prefix,
        }
    }

    /// Expression for one node. The first line carries no indentation; any
    /// following lines are indented for nesting level `depth`.
    fn node_expr(&self, handle: &Handle, depth: usize) -> Option<String> {
        match &handle.data {
            NodeData::Text { contents } => {
                let text = collapse_whitespace(&contents.borrow());
                if text.is_empty() {
                    None
                } else {
                    Some(self.text_expr(&text))
                }
            }
            NodeData::Element { .. } => Some(self.element_expr(handle, depth)),
            _ => None,
        }
    }

    fn text_expr(&self, text: &str) -> String {
        format!(
            "{}({})",
            qualify(&self.options.package_prefix, "Text"),
            go_string(text)
        )
    }

    fn element_expr(&self, handle: &Handle, depth: usize) -> String {
        let NodeData::Element { name, attrs, .. } = &handle.data else {
            return String::new();
        };
        let tag = name.local.to_string();
        let family = TagFamily::of(&tag);
        let content = content_of(handle);

        let mut chain = String::new();
        for attr in attrs.borrow().iter() {
            let attr_name = attr.name.local.to_string();
            let value = attr.value.to_string();
            match attribute_method(family, &attr_name) {
                Some(method) => {
                    let _ = write!(chain, ".{method}({})", go_string(&value));
                }
                None if value.is_empty() => {
                    let _ = write!(chain, ".Attr({}, true)", go_string(&attr_name));
                }
                None => {
                    let _ = write!(
                        chain,
                        ".Attr({}, {})",
                        go_string(&attr_name),
                        go_string(&value)
                    );
                }
            }
        }

        let Some(builder) = builder_name(&tag) else {
            let head = format!(
                "{}({}){chain}",
                qualify(&self.options.package_prefix, "Tag"),
                go_string(&tag)
            );
            return self.with_children_call(head, &content, depth);
        };
        let callee = qualify(self.prefix_for(family), &builder);

        let text_only = !content.is_empty() && content.iter().all(|c| matches!(c, Child::Text(_)));
        if text_only && (family.is_component() || is_text_tag(&tag)) {
            let text = content
                .iter()
                .filter_map(|c| match c {
                    Child::Text(text) => Some(text.as_str()),
                    Child::Node(_) => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            return format!("{callee}({}){chain}", go_string(&text));
        }

        if is_text_tag(&tag) {
            let head = format!("{callee}(\"\"){chain}");
            return self.with_children_call(head, &content, depth);
        }

        if content.is_empty() {
            return format!("{callee}(){chain}");
        }

        if self.options.children_mode {
            return self.with_children_call(format!("{callee}(){chain}"), &content, depth);
        }

        format!("{callee}({}){chain}", self.child_block(&content, depth))
    }

    fn with_children_call(&self, head: String, content: &[Child], depth: usize) -> String {
        if content.is_empty() {
            head
        } else {
            format!("{head}.Children({})", self.child_block(content, depth))
        }
    }

    /// Children as call arguments: one per line, each followed by a comma,
    /// with the closing line indented at `depth`.
    fn child_block(&self, content: &[Child], depth: usize) -> String {
        let inner = INDENT.repeat(depth + 1);
        let mut block = String::from("\n");
        for child in content {
            let expr = match child {
                Child::Text(text) => self.text_expr(text),
                Child::Node(handle) => match self.node_expr(handle, depth + 1) {
                    Some(expr) => expr,
                    None => continue,
                },
            };
            let _ = writeln!(block, "{inner}{expr},");
        }
        block.push_str(&INDENT.repeat(depth));
        block
    }
}
