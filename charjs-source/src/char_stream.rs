/// Cursor over source text.
///
/// Positions are byte offsets into the text and always sit on a `char` boundary.
#[derive(Debug, Clone)]
pub struct CharStream<'a> {
    text: &'a str,
    position: usize,
    mark: usize,
}

impl<'a> CharStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            mark: 0,
        }
    }

    /// Returns the next character and advances past it, or `None` at the end of the text.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let c = self.text[self.position..].chars().next()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    /// Rewinds by one character. Does nothing at the start of the text.
    pub fn step_back(&mut self) {
        if let Some(c) = self.text[..self.position].chars().next_back() {
            self.position -= c.len_utf8();
        }
    }

    /// Records the current position as the start of the next [`Self::slice`].
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// Text between the mark and the current position.
    /// The character that `next` would return is not included.
    pub fn slice(&self) -> &'a str {
        &self.text[self.mark..self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
