use crate::parsing::ast::MustacheExpression;
use crate::parsing::text::{Position, Range};

use super::cursor::Cursor;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Expressions found in one chunk of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MustacheScan {
    /// Closed `{{ ... }}` expressions, in source order.
    pub expressions: Vec<MustacheExpression>,
    /// A trailing `{{` with no matching `}}`.
    pub unclosed: Option<MustacheExpression>,
}

/// Scans `content`, which starts at `origin` in the document, for `{{ ... }}` pairs.
///
/// Expressions do not nest: a `{{` inside an open expression is plain text.
/// A `}}` with nothing open is plain text too.
pub fn scan_expressions(content: &str, origin: Position) -> MustacheScan {
    let mut cur = Cursor::new(content, origin);
    let mut scan = MustacheScan::default();
    // (start of `{{`, start of the inner text)
    let mut open: Option<(Position, Position)> = None;

    while !cur.eof() {
        if open.is_none() && cur.starts_with(OPEN) {
            let start = cur.pos();
            cur.bump_n(2);
            open = Some((start, cur.pos()));
            continue;
        }
        if cur.starts_with(CLOSE) {
            if let Some((start, inner_start)) = open.take() {
                let inner_end = cur.pos();
                cur.bump_n(2);
                scan.expressions.push(MustacheExpression::new(
                    Range::new(start, cur.pos()),
                    Range::new(inner_start, inner_end),
                    true,
                    true,
                ));
                continue;
            }
        }
        cur.bump();
    }

    if let Some((start, inner_start)) = open {
        let end = cur.pos();
        scan.unclosed = Some(MustacheExpression::new(
            Range::new(start, end),
            Range::new(inner_start, end),
            true,
            false,
        ));
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(line: usize, character: usize) -> Position {
        Position::new(line, character)
    }

    fn ranges(scan: &MustacheScan) -> Vec<(Range, Range)> {
        scan.expressions
            .iter()
            .map(|e| (e.range(), e.expression_range()))
            .collect()
    }

    #[test]
    fn two_adjacent_expressions() {
        let scan = scan_expressions("{{a}}{{b}}", at(0, 0));
        assert_eq!(
            ranges(&scan),
            vec![
                (Range::on_line(0, 0, 5), Range::on_line(0, 2, 3)),
                (Range::on_line(0, 5, 10), Range::on_line(0, 7, 8)),
            ]
        );
        assert!(scan.expressions.iter().all(|e| e.opened() && e.closed()));
        assert_eq!(scan.unclosed, None);
    }

    #[test]
    fn positions_are_absolute() {
        let scan = scan_expressions("id-{{$random.uuid}}", at(4, 5));
        assert_eq!(
            ranges(&scan),
            vec![(Range::on_line(4, 8, 24), Range::on_line(4, 10, 22))]
        );
    }

    #[test]
    fn unterminated_expression_is_not_a_child() {
        let scan = scan_expressions("{{a", at(0, 0));
        assert!(scan.expressions.is_empty());
        let unclosed = scan.unclosed.unwrap();
        assert!(unclosed.opened());
        assert!(!unclosed.closed());
        assert_eq!(unclosed.range(), Range::on_line(0, 0, 3));
        assert_eq!(unclosed.expression_range(), Range::on_line(0, 2, 3));
    }

    #[test]
    fn expressions_do_not_nest() {
        let scan = scan_expressions("{{ a {{ b }} c }}", at(0, 0));
        assert_eq!(
            ranges(&scan),
            vec![(Range::on_line(0, 0, 12), Range::on_line(0, 2, 10))]
        );
        assert_eq!(scan.unclosed, None);
    }

    #[test]
    fn stray_close_is_text() {
        let scan = scan_expressions("}} {{x}}", at(0, 0));
        assert_eq!(
            ranges(&scan),
            vec![(Range::on_line(0, 3, 8), Range::on_line(0, 5, 6))]
        );
    }

    #[test]
    fn expression_spanning_lines() {
        let scan = scan_expressions("{\"a\": {{\n  x\r\n}}}", at(2, 0));
        assert_eq!(
            ranges(&scan),
            vec![(
                Range::new(at(2, 6), at(4, 2)),
                Range::new(at(2, 8), at(4, 0)),
            )]
        );
    }

    #[test]
    fn no_braces_no_expressions() {
        assert_eq!(scan_expressions("plain text", at(0, 0)), MustacheScan::default());
    }
}
