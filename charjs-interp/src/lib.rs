//! Tree-walking evaluation of parsed programs.

mod expr;
mod interpreter;
mod operators;
mod reference;

pub use interpreter::{Interpreter, InterpreterOptions};
pub use operators::{to_int32, to_property_key, to_uint32};
pub use reference::Reference;
