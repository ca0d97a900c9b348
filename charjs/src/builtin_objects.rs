use charjs_source::{Error, Result};
use charjs_value::{Environment, Function, Object, Value};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use tracing::debug;

/// Sink `console.log` writes to.
pub type Output = Rc<RefCell<dyn Write>>;

/// Binds the built-in globals in `global`.
pub fn register(global: &Environment, output: Output) {
    global.define("undefined", Value::Undefined);
    global.define("console", console(output));
    debug!("registered built-in objects");
}

fn console(output: Output) -> Value {
    let mut console = Object::new();
    console.set(
        "log",
        Value::new_function(Function::native("log", move |args| log(&output, args))),
    );
    Value::new_object(console)
}

/// Writes the arguments separated by a single space, followed by a line break.
pub fn log(output: &Output, args: &[Value]) -> Result<Value> {
    let line = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut output = output.borrow_mut();
    writeln!(output, "{}", line).map_err(|err| Error::Output(err.to_string()))?;
    output.flush().map_err(|err| Error::Output(err.to_string()))?;
    Ok(Value::Undefined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_joins_arguments() {
        let buf = Rc::new(RefCell::new(Vec::new()));
        let output: Output = buf.clone();
        log(&output, &[Value::Bool(false), "Bob".into(), Value::Number(123.0)]).unwrap();
        log(&output, &[]).unwrap();
        assert_eq!(String::from_utf8_lossy(&buf.borrow()), "false Bob 123\n\n");
    }

    #[test]
    fn test_register() {
        let global = Environment::new_global();
        register(&global, Rc::new(RefCell::new(std::io::sink())));
        assert_eq!(global.lookup("undefined"), Ok(Value::Undefined));
        let console = global.lookup("console").unwrap();
        assert_eq!(console.get_property("log").unwrap().type_of(), "function");
    }
}
