use crate::parsing::ast::{KafkaFileDocument, Node, NodePath};

/// Renders the tree as an indented outline: kind, range and, for leaves, content.
pub fn render(doc: &KafkaFileDocument) -> String {
    let mut out = String::new();
    write_node(&mut out, doc.as_node(), 0);
    out
}

/// Renders one found node path, root first, one node per line.
pub fn render_path(path: &NodePath<'_>) -> String {
    let mut out = String::new();
    for (depth, node) in path.nodes().iter().enumerate() {
        write_line(&mut out, *node, depth);
    }
    out
}

fn write_node(out: &mut String, node: Node<'_>, depth: usize) {
    write_line(out, node, depth);
    if let Node::DynamicChunk(chunk) = node {
        if let Some(unclosed) = chunk.unclosed_expression() {
            out.push_str(&format!(
                "{}unclosed MustacheExpression {}\n",
                "  ".repeat(depth + 1),
                unclosed.range()
            ));
        }
    }
    for child in node.children() {
        write_node(out, child, depth + 1);
    }
}

fn write_line(out: &mut String, node: Node<'_>, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}", node.kind(), node.range()));
    if let Some(content) = node.content() {
        out.push_str(&format!(" {content:?}"));
    }
    if let Node::Property(p) = node {
        if p.assigner_character().is_none() {
            out.push_str(" (no assigner)");
        }
    }
    out.push('\n');
}
