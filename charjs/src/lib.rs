//! A tree-walking interpreter for a subset of JavaScript.
//!
//! ```
//! let output = charjs::run("console.log(1 + 2 * 3)").unwrap();
//! assert_eq!(output, "7\n");
//! ```

pub mod builtin_objects;

pub use charjs_interp::{Interpreter, InterpreterOptions};
pub use charjs_source::{Error, Result, Source};
pub use charjs_value::{Environment, Value};

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An isolated interpreter instance: its own global environment and built-ins.
///
/// Successive calls to [`Engine::evaluate`] share the global environment.
pub struct Engine {
    global: Environment,
    interpreter: Interpreter,
}

impl Engine {
    /// Creates an engine writing `console.log` output to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }

    pub fn with_output(output: impl Write + 'static) -> Self {
        Self::with_options(InterpreterOptions::default(), output)
    }

    pub fn with_options(options: InterpreterOptions, output: impl Write + 'static) -> Self {
        let global = Environment::new_global();
        builtin_objects::register(&global, Rc::new(RefCell::new(output)));
        Self {
            global,
            interpreter: Interpreter::new(options),
        }
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    /// Parses and runs `code`. The first error aborts the run.
    pub fn evaluate(&mut self, code: &str) -> Result<Value> {
        let source = Source::new(code);
        let program = charjs_parser::parse(&source)?;
        self.interpreter.evaluate(&self.global, &program)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory output sink. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `code` in a fresh engine and returns what it logged.
pub fn run(code: &str) -> Result<String> {
    let output = CapturedOutput::new();
    Engine::with_output(output.clone()).evaluate(code)?;
    Ok(output.contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run() {
        assert_eq!(run("console.log(\"a\", 1)\nconsole.log([1])"), Ok("a 1\n[ 1 ]\n".to_string()));
        assert_eq!(
            run("console.log(missing)"),
            Err(Error::Reference {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_engine_keeps_globals_between_runs() {
        let output = CapturedOutput::new();
        let mut engine = Engine::with_output(output.clone());
        engine.evaluate("var a = 1").unwrap();
        engine.evaluate("console.log(a + 1)").unwrap();
        assert_eq!(output.contents(), "2\n");
        assert_eq!(engine.global().lookup("a"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_completion_value() {
        let mut engine = Engine::with_output(io::sink());
        assert_eq!(engine.evaluate("var a = 2; a * 21"), Ok(Value::Number(42.0)));
        assert_eq!(engine.evaluate("console.log(a)"), Ok(Value::Undefined));
    }
}
