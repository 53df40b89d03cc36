//! A small PHP tokenizer.
//!
//! It only knows enough of the language to find statements in routing
//! files: variables, names, strings, numbers, comments and punctuation.
//! Heredoc and nowdoc bodies are single string tokens; interpolation is not
//! interpreted.

/// Kind of a PHP token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text outside `<?php ... ?>`
    InlineHtml,
    OpenTag,
    CloseTag,
    Whitespace,
    /// `// ...` or `# ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`
    DocComment,
    /// `$name`
    Variable,
    /// Keywords and (possibly qualified) names
    Name,
    /// Quoted string, heredoc or nowdoc, delimiters included
    String,
    Number,
    /// Operators and delimiters, e.g. `=`, `->`, `=>`, `(`
    Punct,
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character
    pub offset: usize,
}

impl Token {
    /// Whether this is punctuation with the given text.
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == text
    }

    /// Whether this is a name matching `name` case-insensitively.
    ///
    /// Qualified names match on their last segment, so `\Foo\RouteCollection`
    /// matches `RouteCollection`.
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name
            && self
                .text
                .rsplit('\\')
                .next()
                .is_some_and(|last| last.eq_ignore_ascii_case(name))
    }

    /// Contents of a terminated quoted string literal, without the quotes.
    pub fn string_value(&self) -> Option<&str> {
        if self.kind != TokenKind::String {
            return None;
        }
        let quote = self.text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
        self.text
            .strip_prefix(quote)?
            .strip_suffix(quote)
    }
}

const PUNCT3: &[&str] = &["===", "!==", "<=>", "**=", "...", "<<=", ">>=", "??=", "?->"];
const PUNCT2: &[&str] = &[
    "->", "=>", "::", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=",
    ".=", "%=", "??", "<<", ">>", "**",
];

/// Tokenizes PHP source.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    in_php: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            in_php: false,
        }
    }

    /// Tokenize the whole input. Concatenating the token texts gives back the source.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.src.len() {
            let start = self.pos;
            let kind = if self.in_php {
                self.lex_php()
            } else {
                self.lex_html()
            };
            tokens.push(Token {
                kind,
                text: self.src[start..self.pos].to_string(),
                offset: start,
            });
        }
        tokens
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        let len = self
            .rest()
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest().len(), |(i, _)| i);
        self.pos += len;
    }

    fn lex_html(&mut self) -> TokenKind {
        let rest = self.rest();
        if rest.starts_with("<?php") {
            self.pos += 5;
            self.in_php = true;
            return TokenKind::OpenTag;
        }
        if rest.starts_with("<?=") {
            self.pos += 3;
            self.in_php = true;
            return TokenKind::OpenTag;
        }
        let first = rest.chars().next().map_or(0, char::len_utf8);
        self.pos += rest[first..].find("<?").map_or(rest.len(), |i| i + first);
        TokenKind::InlineHtml
    }

    fn lex_php(&mut self) -> TokenKind {
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return TokenKind::Whitespace;
        };

        if rest.starts_with("?>") {
            self.pos += 2;
            self.in_php = false;
            return TokenKind::CloseTag;
        }
        if c.is_whitespace() {
            self.bump_while(char::is_whitespace);
            return TokenKind::Whitespace;
        }
        if rest.starts_with("//") || (c == '#' && !rest.starts_with("#[")) {
            // a line comment also ends at a closing tag
            let end = rest
                .find('\n')
                .into_iter()
                .chain(rest.find("?>"))
                .min()
                .unwrap_or(rest.len());
            self.pos += end;
            return TokenKind::LineComment;
        }
        if rest.starts_with("/*") {
            let kind = if rest.starts_with("/**") && !rest.starts_with("/**/") {
                TokenKind::DocComment
            } else {
                TokenKind::BlockComment
            };
            self.pos += rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
            return kind;
        }
        if c == '$' && rest[1..].starts_with(is_name_start) {
            self.pos += 1;
            self.bump_while(is_name_char);
            return TokenKind::Variable;
        }
        if c == '\'' || c == '"' {
            self.lex_string(c);
            return TokenKind::String;
        }
        if rest.starts_with("<<<") && self.lex_heredoc() {
            return TokenKind::String;
        }
        if c.is_ascii_digit() {
            self.bump_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
            return TokenKind::Number;
        }
        if is_name_start(c) || (c == '\\' && rest[1..].starts_with(is_name_start)) {
            self.bump_while(|c| is_name_char(c) || c == '\\');
            return TokenKind::Name;
        }

        let len = PUNCT3
            .iter()
            .chain(PUNCT2)
            .find(|p| rest.starts_with(**p))
            .map_or(c.len_utf8(), |p| p.len());
        self.pos += len;
        TokenKind::Punct
    }

    fn lex_string(&mut self, quote: char) {
        let mut escaped = false;
        for (i, c) in self.rest().char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                self.pos += i + 1;
                return;
            }
        }
        // unterminated: consume to the end
        self.pos = self.src.len();
    }

    /// Consume `<<<ID` (or `<<<'ID'`, `<<<"ID"`) up to the closing `ID`.
    ///
    /// Returns false, consuming nothing, when no label follows `<<<`.
    fn lex_heredoc(&mut self) -> bool {
        let rest = self.rest();
        let header = rest[3..].trim_start_matches([' ', '\t']);
        let quote = header.chars().next().filter(|c| *c == '\'' || *c == '"');
        let label_start = &header[quote.map_or(0, char::len_utf8)..];
        let label_len = label_start
            .char_indices()
            .find(|&(_, c)| !is_name_char(c))
            .map_or(label_start.len(), |(i, _)| i);
        let label = &label_start[..label_len];
        if label.is_empty() || !label.starts_with(is_name_start) {
            return false;
        }

        let mut after = &label_start[label_len..];
        if let Some(q) = quote {
            match after.strip_prefix(q) {
                Some(stripped) => after = stripped,
                None => return false,
            }
        }
        let Some(newline) = after.find('\n') else {
            return false;
        };

        let body_start = rest.len() - after.len() + newline + 1;
        let mut line_start = body_start;
        while line_start < rest.len() {
            let line = &rest[line_start..];
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let candidate = &line[indent..];
            let closes = candidate
                .strip_prefix(label)
                .is_some_and(|tail| !tail.starts_with(is_name_char));
            if closes {
                self.pos += line_start + indent + label.len();
                return true;
            }
            line_start += line.find('\n').map_or(line.len(), |i| i + 1);
        }

        // unterminated: consume to the end
        self.pos = self.src.len();
        true
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(src)
            .tokenize()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_tokenize_statement() {
        let tokens = kinds("<?php $collection = new RouteCollection();");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::OpenTag, "<?php".to_string()),
                (TokenKind::Variable, "$collection".to_string()),
                (TokenKind::Punct, "=".to_string()),
                (TokenKind::Name, "new".to_string()),
                (TokenKind::Name, "RouteCollection".to_string()),
                (TokenKind::Punct, "(".to_string()),
                (TokenKind::Punct, ")".to_string()),
                (TokenKind::Punct, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_comments_and_strings() {
        let tokens = kinds("<?php\n// line\n# hash\n/* block */\n/** doc */\n'a\\'b' \"c\"");
        let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::LineComment,
                TokenKind::LineComment,
                TokenKind::BlockComment,
                TokenKind::DocComment,
                TokenKind::String,
                TokenKind::String,
            ]
        );
        assert_eq!(tokens[5].1, "'a\\'b'");
    }

    #[test]
    fn test_tokenize_punctuation() {
        let tokens = kinds("<?php $a->add('x', ['k' => 1]);");
        let texts: Vec<_> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec!["<?php", "$a", "->", "add", "(", "'x'", ",", "[", "'k'", "=>", "1", "]", ")", ";"]
        );
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let src = "<html>\n<?php\nuse Foo\\Bar;\n$x = \"y\"; // done\n?>\ntrailer";
        let joined: String = Lexer::new(src).tokenize().into_iter().map(|t| t.text).collect();
        assert_eq!(joined, src);
    }

    #[test]
    fn test_qualified_names() {
        let tokens = Lexer::new("<?php new \\Symfony\\Component\\Routing\\RouteCollection();").tokenize();
        let name = tokens
            .iter()
            .find(|t| t.text.ends_with("RouteCollection"))
            .unwrap();
        assert_eq!(name.kind, TokenKind::Name);
        assert!(name.is_name("routecollection"));
    }

    #[test]
    fn test_string_value() {
        let tokens = Lexer::new("<?php 'show'").tokenize();
        assert_eq!(tokens.last().unwrap().string_value(), Some("show"));
    }

    #[test]
    fn test_unterminated_string_has_no_value() {
        for src in ["<?php 'é", "<?php '", "<?php \"abc'"] {
            let token = Lexer::new(src).tokenize().pop().unwrap();
            assert_eq!(token.kind, TokenKind::String);
            assert_eq!(token.string_value(), None, "{src}");
        }
    }

    #[test]
    fn test_heredoc_is_one_token() {
        let src = "<?php\n$x = <<<EOT\nreturn here\n  EOT;\n$y = <<<'RAW'\n$a\nRAW;\n";
        let tokens = kinds(src);
        assert_eq!(tokens[3], (TokenKind::String, "<<<EOT\nreturn here\n  EOT".to_string()));
        assert_eq!(tokens[4], (TokenKind::Punct, ";".to_string()));
        assert_eq!(tokens[7], (TokenKind::String, "<<<'RAW'\n$a\nRAW".to_string()));
        assert!(!tokens.iter().any(|(kind, text)| *kind == TokenKind::Name && text == "return"));

        let joined: String = Lexer::new(src).tokenize().into_iter().map(|t| t.text).collect();
        assert_eq!(joined, src);
    }

    #[test]
    fn test_shift_operator_is_not_heredoc() {
        let tokens = kinds("<?php $a <<= 1; $b << 2;");
        let texts: Vec<_> = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["<?php", "$a", "<<=", "1", ";", "$b", "<<", "2", ";"]);
    }
}
