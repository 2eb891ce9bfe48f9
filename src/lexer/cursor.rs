use super::token::Position;
use std::str::Chars;

#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        let chars = s.chars();
        Self {
            chars,
            pos: Position::default(),
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_2nd(&self) -> Option<char> {
        // cheap to clone
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    pub fn skip_whitespaces(&mut self) {
        while self.skip_if(char::is_whitespace) {}
    }

    /// Skips up to and including the next newline.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.take() {
            if c == '\n' {
                break;
            }
        }
    }

    pub fn take(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.ln += 1;
            self.pos.col = 1;
        } else {
            self.pos.col += 1;
        }
        Some(c)
    }

    /// Takes the longest prefix whose characters satisfy `p`.
    pub fn take_while(&mut self, p: impl Fn(char) -> bool) -> &'a str {
        let rest = self.chars.as_str();
        let len = rest.find(|c| !p(c)).unwrap_or(rest.len());
        let taken = &rest[..len];
        for _ in taken.chars() {
            self.take();
        }
        taken
    }
}
