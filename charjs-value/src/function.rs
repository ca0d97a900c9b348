use crate::{Environment, Value};
use charjs_parser::ast::FunctionDefinition;
use charjs_source::Result;
use std::fmt;
use std::rc::Rc;

/// Host callback behind a native function.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

/// A function defined in script code.
#[derive(Clone)]
pub struct CustomFunction {
    pub definition: Rc<FunctionDefinition>,
    /// Environment the function was created in. Calls run in a child of it.
    ///
    /// A function stored in a variable of this environment forms a reference cycle with it.
    /// Such cycles are not collected.
    pub env: Environment,
}

#[derive(Clone)]
pub enum Function {
    Native(NativeFunction),
    Custom(CustomFunction),
}

impl Function {
    pub fn native(name: impl Into<String>, func: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Function::Native(NativeFunction {
            name: name.into(),
            func: Rc::new(func),
        })
    }

    pub fn custom(definition: Rc<FunctionDefinition>, env: Environment) -> Self {
        Function::Custom(CustomFunction { definition, env })
    }

    /// Returns `None` for anonymous function expressions.
    pub fn name(&self) -> Option<&str> {
        match self {
            Function::Native(native) => Some(&native.name),
            Function::Custom(custom) => custom.definition.name.as_deref(),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Native(native) => write!(f, "<native fn {}>", native.name),
            Function::Custom(custom) => match &custom.definition.name {
                Some(name) => write!(f, "<fn {}>", name),
                None => f.write_str("<fn>"),
            },
        }
    }
}
