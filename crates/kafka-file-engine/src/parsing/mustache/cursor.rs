use crate::parsing::text::Position;

/// A cursor over chunk text that tracks document positions.
///
/// `\n` and `\r\n` advance to the next line, matching how documents split
/// lines. Anything else, a lone `\r` included, moves one character right.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The chunk content.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
    pos: Position,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `s`, which sits at `origin` in the document.
    pub fn new(s: &'a str, origin: Position) -> Self {
        Self { s, i: 0, pos: origin }
    }

    /// Document position of the next character.
    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.s[self.i..].starts_with(pat)
    }

    /// Advances past one character, or past a whole `\r\n` pair.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        match c {
            '\r' if self.peek() == Some('\n') => {
                self.i += 1;
                self.pos = Position::new(self.pos.line + 1, 0);
            }
            '\n' => self.pos = Position::new(self.pos.line + 1, 0),
            _ => self.pos = self.pos.translate(0, 1),
        }
        Some(c)
    }

    /// Advances past `n` characters.
    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }
}
