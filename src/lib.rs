//! Tree-walking interpreter for the zrv scripting language.
//!
//! Source text flows through four stages: the [`scanner`] turns
//! characters into tokens and decides each numeric literal's width, the
//! [`parser`] builds the statement list (using a context stack for the
//! two decisions its grammar cannot make locally), the [`checker`]
//! verifies every name against a scope chain with the runtime's exact
//! shape, and the [`interpreter`] walks the tree. Evaluation is only
//! reached when every earlier stage came back clean.
//!
//! The language is small and dynamically typed: lexical block scopes,
//! first-class functions whose bodies resolve against the globals, a
//! three-width numeric tower (`byte < int < double`) promoted at every
//! binary operation, and five built-in callables preinstalled in the
//! global scope.
//!
//! The [`Zrv`] driver ties the stages together for script files and the
//! interactive prompt.

pub mod checker;
pub mod cli;
pub mod colors;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod statement;
mod zrv;

pub use error::{
	interpreter::{RuntimeError, RuntimeErrorType, Unwind},
	parser::{ParseError, ParseErrorType, ParserError},
	scanner::{ScanError, ScanErrorType, ScannerError},
};
pub use zrv::Zrv;
