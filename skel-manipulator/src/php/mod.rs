//! PHP token scanning.

mod lexer;
mod stream;

pub use lexer::{Lexer, Token, TokenKind};
pub use stream::{DEFAULT_SKIP, TokenStream};
