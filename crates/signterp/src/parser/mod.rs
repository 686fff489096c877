//! Rule template scanner and part-of-speech pattern parser.
//!
//! Both grammars are small and written with winnow. Templates never fail to
//! scan: malformed placeholders degrade to literal text. Patterns are strict
//! and report a [`ParseError`] with a location.

pub mod ast;
pub mod error;
mod pattern;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use pattern::parse_pattern;
pub use template::parse_template;
