mod lexical;
mod pos_tag;
mod priority;
mod request;
mod rule;

pub use lexical::{LexicalCandidate, ResolvedToken};
pub use pos_tag::PosTag;
pub use priority::Priority;
pub use request::{DEFAULT_CONFIDENCE, DEFAULT_LOCALE, InterpretRequest, InterpretResponse, Token};
pub use rule::GrammarRule;
