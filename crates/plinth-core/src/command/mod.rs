//! Command model, grammar tables and parser.

pub mod grammar;
pub mod model;
pub mod templates;

pub use grammar::parse_line;
pub use model::{BatchTargets, Command, Domain, Mutation, ViewMode};
pub use templates::ConsoleItem;
