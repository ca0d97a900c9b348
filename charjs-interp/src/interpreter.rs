use charjs_parser::ast::{FunctionDefinition, Program, Stmt, VariableDeclaration};
use charjs_source::{Error, Result};
use charjs_value::{Environment, Function, Value};
use std::rc::Rc;
use tracing::{debug, trace};

/// Remaining stack below which evaluation moves to a fresh stack segment.
pub(crate) const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep recursion.
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Maximum number of nested calls of script functions.
    pub max_call_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 100,
        }
    }
}

/// How evaluation of a statement ended.
#[derive(Debug)]
pub(crate) enum Completion {
    /// Carries the value of the statement, `undefined` for statements without one.
    Normal(Value),
    Return(Value),
}

#[derive(Debug, Default)]
pub struct Interpreter {
    options: InterpreterOptions,
    /// Number of script function calls currently on the stack.
    call_depth: usize,
}

impl Interpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        Self {
            options,
            call_depth: 0,
        }
    }

    /// Runs `program` in `env` and returns the value of its last statement, or the value of a
    /// top-level `return`.
    pub fn evaluate(&mut self, env: &Environment, program: &Program) -> Result<Value> {
        match self.eval_stmt_list(env, &program.body)? {
            Completion::Normal(value) | Completion::Return(value) => Ok(value),
        }
    }

    /// Evaluates function declarations before every other statement of the list, then the
    /// remaining statements in order, stopping at the first `return`.
    pub(crate) fn eval_stmt_list(&mut self, env: &Environment, stmts: &[Stmt]) -> Result<Completion> {
        let (functions, rest): (Vec<&Stmt>, Vec<&Stmt>) = stmts
            .iter()
            .partition(|stmt| matches!(stmt, Stmt::FunctionDeclaration(_)));

        if !functions.is_empty() {
            debug!(count = functions.len(), "hoisting function declarations");
        }
        for stmt in functions {
            self.eval_stmt(env, stmt)?;
        }

        let mut last = Value::Undefined;
        for stmt in rest {
            match self.eval_stmt(env, stmt)? {
                Completion::Normal(value) => last = value,
                completion @ Completion::Return(_) => return Ok(completion),
            }
        }
        Ok(Completion::Normal(last))
    }

    pub(crate) fn eval_stmt(&mut self, env: &Environment, stmt: &Stmt) -> Result<Completion> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_stmt_inner(env, stmt))
    }

    fn eval_stmt_inner(&mut self, env: &Environment, stmt: &Stmt) -> Result<Completion> {
        let value = match stmt {
            // blocks share the frame of the enclosing function
            Stmt::Block(body) => return self.eval_stmt_list(env, body),
            Stmt::VariableDeclarationList { declarations, .. } => {
                for declaration in declarations {
                    self.eval_variable_declaration(env, declaration)?;
                }
                Value::Undefined
            }
            Stmt::Empty => Value::Undefined,
            Stmt::Expression(expr) => self.eval_expr(env, expr)?,
            Stmt::FunctionDeclaration(definition) => {
                let name = match &definition.name {
                    Some(name) => name.clone(),
                    None => return Err(Error::type_error("function declaration without name")),
                };
                let function = Function::custom(Rc::clone(definition), env.clone());
                env.define(name, Value::new_function(function));
                Value::Undefined
            }
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(env, test)?.is_truthy() {
                    return self.eval_stmt(env, consequent);
                } else if let Some(alternate) = alternate {
                    return self.eval_stmt(env, alternate);
                }
                Value::Undefined
            }
            Stmt::Return(arg) => {
                let value = match arg {
                    Some(arg) => self.eval_expr(env, arg)?,
                    None => Value::Undefined,
                };
                return Ok(Completion::Return(value));
            }

            Stmt::Import(_) => return Err(Error::unimplemented("import declaration")),
            Stmt::Export { .. } => return Err(Error::unimplemented("export declaration")),
            Stmt::DoWhile { .. } => return Err(Error::unimplemented("do-while statement")),
            Stmt::While { .. } => return Err(Error::unimplemented("while statement")),
            Stmt::For { .. } => return Err(Error::unimplemented("for statement")),
            Stmt::ForIn { .. } => return Err(Error::unimplemented("for-in statement")),
            Stmt::ForOf { .. } => return Err(Error::unimplemented("for-of statement")),
            Stmt::Continue(_) => return Err(Error::unimplemented("continue statement")),
            Stmt::Break(_) => return Err(Error::unimplemented("break statement")),
            Stmt::With { .. } => return Err(Error::unimplemented("with statement")),
            Stmt::Labelled { .. } => return Err(Error::unimplemented("labelled statement")),
            Stmt::Throw(_) => return Err(Error::unimplemented("throw statement")),
            Stmt::Switch { .. } => return Err(Error::unimplemented("switch statement")),
            Stmt::Yield(_) => return Err(Error::unimplemented("yield statement")),
            Stmt::Try { .. } => return Err(Error::unimplemented("try statement")),
            Stmt::Debugger => return Err(Error::unimplemented("debugger statement")),
        };
        Ok(Completion::Normal(value))
    }

    /// `var`, `let` and `const` all bind in the current frame.
    /// Redeclaring without initializer keeps the current value.
    fn eval_variable_declaration(&mut self, env: &Environment, declaration: &VariableDeclaration) -> Result<()> {
        let value = match &declaration.initializer {
            Some(initializer) => self.eval_expr(env, initializer)?,
            None if env.contains_local(&declaration.name) => return Ok(()),
            None => Value::Undefined,
        };
        env.define(declaration.name.as_str(), value);
        Ok(())
    }

    /// Calls `function` with `args`. `this` is bound in the new frame when the call has a
    /// receiver (`obj.f()`).
    pub fn call_function(&mut self, function: &Function, this: Option<Value>, args: &[Value]) -> Result<Value> {
        let custom = match function {
            Function::Native(native) => {
                trace!(name = %native.name, args = args.len(), "native call");
                return native.call(args);
            }
            Function::Custom(custom) => custom,
        };
        let definition: &FunctionDefinition = &custom.definition;

        if definition.is_generator {
            return Err(Error::unimplemented("generator functions"));
        }
        if self.call_depth >= self.options.max_call_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_call_depth,
            });
        }
        trace!(
            name = definition.name.as_deref().unwrap_or("<anonymous>"),
            args = args.len(),
            depth = self.call_depth,
            "call"
        );

        let frame = custom.env.child();
        if let Some(this) = this {
            frame.define("this", this);
        }
        for (i, param) in definition.params.iter().enumerate() {
            let arg = args.get(i).cloned().unwrap_or(Value::Undefined);
            frame.define(param.as_str(), arg);
        }

        self.call_depth += 1;
        let res = self.eval_stmt_list(&frame, &definition.body);
        self.call_depth -= 1;

        match res? {
            Completion::Return(value) => Ok(value),
            Completion::Normal(_) => Ok(Value::Undefined),
        }
    }
}
