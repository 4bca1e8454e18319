use crate::parsing::ast::{KafkaFileDocument, Node};

/// Validates parser output invariants.
///
/// Asserts that:
/// - every range has `start <= end`
/// - every node lies within its parent, and so within the document
/// - siblings are in document order and never overlap
/// - an unclosed expression lies within its chunk, after every closed one
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(doc: &KafkaFileDocument) {
    check_node(doc.as_node());
}

fn check_node(node: Node<'_>) {
    let range = node.range();
    assert!(
        range.start <= range.end,
        "{} range is inverted: {range}",
        node.kind()
    );

    let children = node.children();
    for child in &children {
        assert!(
            range.encloses(&child.range()),
            "{} {} escapes parent {} {range}",
            child.kind(),
            child.range(),
            node.kind()
        );
    }
    for pair in children.windows(2) {
        assert!(
            pair[0].end() <= pair[1].start(),
            "siblings overlap or are out of order: {} {} then {} {}",
            pair[0].kind(),
            pair[0].range(),
            pair[1].kind(),
            pair[1].range()
        );
    }

    if let Node::DynamicChunk(chunk) = node {
        if let Some(unclosed) = chunk.unclosed_expression() {
            assert!(
                range.encloses(&unclosed.range()),
                "unclosed expression {} escapes chunk {range}",
                unclosed.range()
            );
            if let Some(last) = children.last() {
                assert!(
                    last.end() <= unclosed.start(),
                    "unclosed expression {} precedes closed {}",
                    unclosed.range(),
                    last.range()
                );
            }
        }
    }

    for child in children {
        check_node(child);
    }
}
