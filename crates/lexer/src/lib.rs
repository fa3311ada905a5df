//! # lexer - argument tokenizer for text commands
//!
//! Splits a line of user input into argument tokens. Whitespace separates
//! tokens, and a token that opens with a quotation mark runs until the
//! matching closing mark, so `say "hello world"` yields two tokens.
//!
//! ## Example
//!
//! ```rust
//! use lexer::TokenStream;
//!
//! let tokens = lexer::tokenize(r#"add 1 "two three""#);
//! assert_eq!(tokens, ["add", "1", "two three"]);
//!
//! let mut stream = TokenStream::new(&tokens);
//! assert_eq!(stream.next(), Some("add"));
//! assert_eq!(stream.consume_rest_joined(), "add 1 two three");
//! assert!(stream.is_finished());
//! ```

mod stream;
mod tokenizer;

pub use stream::TokenStream;
pub use tokenizer::QUOTES;
pub use tokenizer::closing_quote;
pub use tokenizer::tokenize;
