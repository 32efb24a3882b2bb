//! Search-expression compiler for the photo archive.
//!
//! A query string is lexed into [`lexer::Token`]s, parsed into an [`Expression`] tree and then
//! evaluated against a [`kf_domain::Catalog`], either as a chronological collection or as a
//! relevance-ranked search.

pub mod context;
pub mod evaluate;
pub mod expression;
pub mod form;
pub mod lexer;
pub mod page;
pub mod parser;

mod error;

pub use context::SearchContext;
pub use error::{Error, Result};
pub use evaluate::{Evaluation, Mode, Ranked, evaluate};
pub use expression::{Description, Expression, Group, Value, collection_name};
pub use form::{FormSettings, SearchForm};
pub use page::{Cursor, KeysetPaginator, Page};
pub use parser::{BasicParser, QueryParser};
