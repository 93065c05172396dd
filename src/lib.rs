//! SNOL, a tiny line-oriented language over integers and floats.
//!
//! Each expression goes through the same pipeline: the [`tokenizer`] lexes it
//! and resolves variables, [`postfix`] reorders it with the shunting-yard
//! algorithm, and [`evaluator`] checks operand types and runs it on a stack.
//! [`interpreter::Interpreter`] drives that pipeline for one session and
//! [`session::Session`] puts the command language on top.

pub mod command;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod number;
pub mod postfix;
pub mod session;
pub mod symbols;
pub mod tokenizer;

pub use error::ExprError;
pub use interpreter::Interpreter;
pub use number::{Number, Tag};
pub use session::Session;
