use super::lexer::{Lexer, Token, TokenKind};

/// Tokens ignored by default when walking statements.
pub const DEFAULT_SKIP: &[TokenKind] = &[
    TokenKind::Whitespace,
    TokenKind::LineComment,
    TokenKind::BlockComment,
    TokenKind::DocComment,
];

/// Cursor over pre-tokenized PHP source.
///
/// `advance` and `peek` only see significant tokens; tokens whose kind is in
/// the skip set are stepped over but still counted by `line`.
pub struct TokenStream {
    tokens: Vec<Token>,
    skip: Vec<TokenKind>,
    /// Index of the next raw token to consume
    pos: usize,
    line: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, skip: &[TokenKind]) -> Self {
        Self {
            tokens,
            skip: skip.to_vec(),
            pos: 0,
            line: 1,
        }
    }

    /// Tokenize `src` and skip whitespace and comments.
    pub fn parse(src: &str) -> Self {
        Self::new(Lexer::new(src).tokenize(), DEFAULT_SKIP)
    }

    fn is_skipped(&self, token: &Token) -> bool {
        self.skip.contains(&token.kind)
    }

    /// Consume and return the next significant token.
    pub fn advance(&mut self) -> Option<&Token> {
        while self.pos < self.tokens.len() {
            let index = self.pos;
            self.pos += 1;
            self.line += self.tokens[index].text.matches('\n').count();
            if !self.is_skipped(&self.tokens[index]) {
                return Some(&self.tokens[index]);
            }
        }
        None
    }

    /// Look at the `n`-th next significant token (1-based) without consuming it.
    pub fn peek(&self, n: usize) -> Option<&Token> {
        if n == 0 {
            return None;
        }
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !self.is_skipped(t))
            .nth(n - 1)
    }

    /// Current line: 1 plus the number of newlines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether all tokens have been consumed.
    pub fn is_done(&self) -> bool {
        self.peek(1).is_none()
    }
}
