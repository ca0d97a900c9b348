use crate::operators::{self, to_property_key};
use crate::interpreter::{STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::{Interpreter, Reference};
use charjs_parser::ast::{
    Argument, ArrayElement, BinaryOp, Expr, FunctionDefinition, OptionalAccess, PropertyDefinition,
    PropertyName, TemplateString, UnaryOp, UpdateOp,
};
use charjs_source::{Error, Result};
use charjs_value::{format_number, Environment, Function, Object, PropertyKey, Value};
use std::rc::Rc;

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, env: &Environment, expr: &Expr) -> Result<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr_inner(env, expr))
    }

    fn eval_expr_inner(&mut self, env: &Environment, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(*val)),
            Expr::StringLit(val) => Ok(Value::String(val.clone())),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::NullLit => Ok(Value::Null),
            Expr::TemplateString(template) => self.eval_template(env, template),
            Expr::Identifier(name) => env.lookup(name),
            Expr::This => Ok(this_value(env)),
            Expr::ArrayLit(elements) => self.eval_array_lit(env, elements),
            Expr::ObjectLit(props) => self.eval_object_lit(env, props),
            Expr::Function(definition) => Ok(closure(env, definition)),
            Expr::Parenthesized(inner) => self.eval_expr(env, inner),
            Expr::Sequence(exprs) => {
                let mut last = Value::Undefined;
                for expr in exprs {
                    last = self.eval_expr(env, expr)?;
                }
                Ok(last)
            }
            Expr::New { .. } => Err(Error::unimplemented("new expressions")),
            Expr::Unary { op, arg } => self.eval_unary(env, *op, arg),
            Expr::Update { op, prefix, arg } => {
                let reference = self.reference(env, arg)?;
                let old = reference.get()?.to_number()?;
                let new = match op {
                    UpdateOp::Increment => old + 1.0,
                    UpdateOp::Decrement => old - 1.0,
                };
                reference.set(Value::Number(new))?;
                Ok(Value::Number(if *prefix { new } else { old }))
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_expr(env, lhs)?;
                if short_circuits(*op, &lhs) {
                    return Ok(lhs);
                }
                let rhs = self.eval_expr(env, rhs)?;
                operators::binary(*op, &lhs, &rhs)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(env, test)?.is_truthy() {
                    self.eval_expr(env, consequent)
                } else {
                    self.eval_expr(env, alternate)
                }
            }
            Expr::Assignment { target, value } => {
                let reference = self.reference(env, target)?;
                let value = self.eval_expr(env, value)?;
                reference.set(value.clone())?;
                Ok(value)
            }
            Expr::AssignmentOperator { target, op, value } => {
                let reference = self.reference(env, target)?;
                let current = reference.get()?;
                // `a ??= b` leaves `a` untouched unless it is nullish
                if short_circuits(*op, &current) {
                    return Ok(current);
                }
                let rhs = self.eval_expr(env, value)?;
                let res = operators::binary(*op, &current, &rhs)?;
                reference.set(res.clone())?;
                Ok(res)
            }
            Expr::Call { callee, args } => self.eval_call(env, callee, args),
            Expr::Member { object, property } => self.eval_expr(env, object)?.get_property(property),
            Expr::Index { object, index } => {
                let object = self.eval_expr(env, object)?;
                let key = to_property_key(&self.eval_expr(env, index)?);
                object.get_property(&key)
            }
            Expr::OptionalChain { object, access } => {
                let object = self.eval_expr(env, object)?;
                if object.is_nullish() {
                    return Ok(Value::Undefined);
                }
                match access {
                    OptionalAccess::Member(property) => object.get_property(property),
                    OptionalAccess::Index(index) => {
                        let key = to_property_key(&self.eval_expr(env, index)?);
                        object.get_property(&key)
                    }
                    OptionalAccess::Call(args) => {
                        let args = self.eval_arguments(env, args)?;
                        let function = as_function(&object, "expression")?;
                        self.call_function(&function, None, &args)
                    }
                }
            }
        }
    }

    /// Resolves an assignment target. The parser only lets identifiers and member accesses
    /// through, possibly parenthesized.
    pub(crate) fn reference(&mut self, env: &Environment, target: &Expr) -> Result<Reference> {
        match target {
            Expr::Identifier(name) => Ok(Reference::Binding {
                env: env.clone(),
                name: name.clone(),
            }),
            Expr::Parenthesized(inner) => self.reference(env, inner),
            Expr::Member { object, property } => Ok(Reference::Member {
                object: self.eval_expr(env, object)?,
                key: property.clone(),
            }),
            Expr::Index { object, index } => {
                let object = self.eval_expr(env, object)?;
                let key = to_property_key(&self.eval_expr(env, index)?);
                Ok(Reference::Member { object, key })
            }
            _ => Err(Error::type_error(format!("invalid assignment target {}", target))),
        }
    }

    /// Replays the raw text, substituting every `${...}` span with its value.
    fn eval_template(&mut self, env: &Environment, template: &TemplateString) -> Result<Value> {
        let raw = &template.raw;
        let mut res = String::with_capacity(raw.len());
        let mut cursor = 0;
        for span in &template.spans {
            res.push_str(&raw[cursor..span.range.start]);
            let value = self.eval_expr(env, &span.expr)?;
            res.push_str(&value.to_string());
            cursor = span.range.end;
        }
        res.push_str(&raw[cursor..]);
        Ok(Value::String(res))
    }

    fn eval_array_lit(&mut self, env: &Environment, elements: &[ArrayElement]) -> Result<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                ArrayElement::Hole => values.push(None),
                ArrayElement::Expr(expr) => values.push(Some(self.eval_expr(env, expr)?)),
                ArrayElement::Spread(expr) => {
                    let spread = self.eval_expr(env, expr)?;
                    values.extend(spread_elements(&spread)?.into_iter().map(Some));
                }
            }
        }
        Ok(Value::new_array(Object::from_elements(values)))
    }

    /// Properties are set in source order. Computed names are evaluated right before their value.
    fn eval_object_lit(&mut self, env: &Environment, props: &[PropertyDefinition]) -> Result<Value> {
        let mut object = Object::new();
        for prop in props {
            match prop {
                PropertyDefinition::Assignment { name, value } => {
                    let key = self.property_name(env, name)?;
                    let value = self.eval_expr(env, value)?;
                    object.set(&key, value);
                }
                PropertyDefinition::Shorthand(name) => {
                    object.set(name, env.lookup(name)?);
                }
                PropertyDefinition::Spread(expr) => match self.eval_expr(env, expr)? {
                    Value::Object(source) | Value::Array(source) => {
                        for (key, value) in source.borrow().entries() {
                            let key = match key {
                                PropertyKey::Index(index) => index.to_string(),
                                PropertyKey::Name(name) => name,
                            };
                            object.set(&key, value.clone());
                        }
                    }
                    // spreading primitives copies nothing
                    _ => {}
                },
                PropertyDefinition::Method { name, function } => {
                    let key = self.property_name(env, name)?;
                    object.set(&key, closure(env, function));
                }
            }
        }
        Ok(Value::new_object(object))
    }

    fn property_name(&mut self, env: &Environment, name: &PropertyName) -> Result<String> {
        match name {
            PropertyName::Identifier(name) | PropertyName::StringLit(name) => Ok(name.clone()),
            PropertyName::NumberLit(val) => Ok(format_number(*val)),
            PropertyName::Computed(expr) => Ok(to_property_key(&self.eval_expr(env, expr)?)),
        }
    }

    fn eval_unary(&mut self, env: &Environment, op: UnaryOp, arg: &Expr) -> Result<Value> {
        match op {
            UnaryOp::Typeof => {
                if let Expr::Identifier(name) = arg {
                    if !env.contains(name) {
                        return Ok(Value::from("undefined"));
                    }
                }
                let value = self.eval_expr(env, arg)?;
                Ok(Value::from(value.type_of()))
            }
            UnaryOp::Delete => match arg {
                Expr::Member { .. } | Expr::Index { .. } => {
                    Ok(Value::Bool(self.reference(env, arg)?.delete()?))
                }
                _ => {
                    self.eval_expr(env, arg)?;
                    Ok(Value::Bool(true))
                }
            },
            _ => {
                let value = self.eval_expr(env, arg)?;
                operators::unary(op, &value)
            }
        }
    }

    /// Evaluates the callee, then the arguments from left to right. Calling a member binds `this`
    /// to the object it was read from.
    fn eval_call(&mut self, env: &Environment, callee: &Expr, args: &[Argument]) -> Result<Value> {
        let (function, this) = match self.eval_callee(env, callee)? {
            Some(resolved) => resolved,
            // `a?.f()` skips the whole call
            None => return Ok(Value::Undefined),
        };
        let function = as_function(&function, &callee_name(callee))?;
        let args = self.eval_arguments(env, args)?;
        self.call_function(&function, this, &args)
    }

    /// Returns the function to call and its receiver, or `None` if an optional chain in the
    /// callee short-circuited.
    fn eval_callee(&mut self, env: &Environment, callee: &Expr) -> Result<Option<(Value, Option<Value>)>> {
        let resolved = match callee {
            Expr::Member { object, property } => {
                let object = self.eval_expr(env, object)?;
                (object.get_property(property)?, Some(object))
            }
            Expr::Index { object, index } => {
                let object = self.eval_expr(env, object)?;
                let key = to_property_key(&self.eval_expr(env, index)?);
                (object.get_property(&key)?, Some(object))
            }
            Expr::OptionalChain { object, access } => {
                let object = self.eval_expr(env, object)?;
                if object.is_nullish() {
                    return Ok(None);
                }
                match access {
                    OptionalAccess::Member(property) => (object.get_property(property)?, Some(object)),
                    OptionalAccess::Index(index) => {
                        let key = to_property_key(&self.eval_expr(env, index)?);
                        (object.get_property(&key)?, Some(object))
                    }
                    OptionalAccess::Call(args) => {
                        let args = self.eval_arguments(env, args)?;
                        let function = as_function(&object, "expression")?;
                        (self.call_function(&function, None, &args)?, None)
                    }
                }
            }
            _ => (self.eval_expr(env, callee)?, None),
        };
        Ok(Some(resolved))
    }

    fn eval_arguments(&mut self, env: &Environment, args: &[Argument]) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_expr(env, &arg.expr)?;
            if arg.spread {
                values.extend(spread_elements(&value)?);
            } else {
                values.push(value);
            }
        }
        Ok(values)
    }
}

/// `&&`, `||` and `??` return their left operand without evaluating the right one when it
/// decides the result.
fn short_circuits(op: BinaryOp, lhs: &Value) -> bool {
    match op {
        BinaryOp::LogicalAnd => !lhs.is_truthy(),
        BinaryOp::LogicalOr => lhs.is_truthy(),
        BinaryOp::Coalesce => !lhs.is_nullish(),
        _ => false,
    }
}

/// Creates a function value closing over `env`.
/// Named function expressions can refer to themselves through their name.
fn closure(env: &Environment, definition: &Rc<FunctionDefinition>) -> Value {
    match &definition.name {
        Some(name) => {
            let scope = env.child();
            let function = Value::new_function(Function::custom(Rc::clone(definition), scope.clone()));
            scope.define(name.as_str(), function.clone());
            function
        }
        None => Value::new_function(Function::custom(Rc::clone(definition), env.clone())),
    }
}

/// `this` outside of a method call. The first use without binding creates an empty object in the
/// current frame.
fn this_value(env: &Environment) -> Value {
    match env.get("this") {
        Some(this) => this,
        None => {
            let this = Value::new_object(Object::new());
            env.define("this", this.clone());
            this
        }
    }
}

/// Longest array `...` expands, holes included.
const MAX_SPREAD_LENGTH: u32 = 1 << 24;

/// Elements of a spread array, holes read as `undefined`.
fn spread_elements(value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(array) => {
            let array = array.borrow();
            let length = array.length();
            if length > MAX_SPREAD_LENGTH {
                return Err(Error::type_error(format!(
                    "cannot spread an array of length {}",
                    length
                )));
            }
            Ok((0..length)
                .map(|index| array.get_index(index).cloned().unwrap_or(Value::Undefined))
                .collect())
        }
        _ => Err(Error::type_error(format!("{} is not iterable", value.type_name()))),
    }
}

fn as_function(value: &Value, name: &str) -> Result<Rc<Function>> {
    match value {
        Value::Function(function) => Ok(Rc::clone(function)),
        _ => Err(Error::type_error(format!(
            "{} is not a function (found {})",
            name,
            value.type_name()
        ))),
    }
}

/// Short description of a callee for error messages.
fn callee_name(callee: &Expr) -> String {
    match callee {
        Expr::Identifier(name) => name.clone(),
        Expr::Member { object, property } => format!("{}.{}", callee_name(object), property),
        Expr::This => "this".to_string(),
        _ => "expression".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charjs_source::Source;

    fn eval_in(env: &Environment, code: &str) -> Result<Value> {
        let program = charjs_parser::parse(&Source::new(code))?;
        Interpreter::default().evaluate(env, &program)
    }

    fn eval(code: &str) -> Result<Value> {
        eval_in(&Environment::new_global(), code)
    }

    fn display(code: &str) -> String {
        match eval(code) {
            Ok(value) => value.to_string(),
            Err(err) => panic!("evaluation of {:?} failed: {}", code, err),
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(display("1 + 2 * 3"), "7");
        assert_eq!(display("(1 + 2) * 3"), "9");
        assert_eq!(display("10 * 20 / (30 - 40) * 50"), "-1000");
        assert_eq!(display("1 - 2 - 3"), "-4");
        assert_eq!(display("2 ** 3 ** 2"), "512");
        assert_eq!(display("-2 + +true"), "-1");
        assert_eq!(display("7 % 4"), "3");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(display(r#"123 + "456""#), "123456");
        assert_eq!(display(r#""456" + 123"#), "456123");
        assert_eq!(display(r#"true + "123""#), "true123");
        assert_eq!(display(r#""abc" + "bcd""#), "abcbcd");
        assert_eq!(display(r#"1 + 2 + "3""#), "33");
    }

    #[test]
    fn test_logical_operators_return_operands() {
        let env = Environment::new_global();
        eval_in(&env, r#"var d = 10; var c = "this is c""#).unwrap();
        assert_eq!(eval_in(&env, "d == 10 || c"), Ok(Value::Bool(true)));
        assert_eq!(eval_in(&env, "d != 10 || c"), Ok("this is c".into()));
        assert_eq!(eval_in(&env, "d == 10 && c"), Ok("this is c".into()));
        assert_eq!(eval_in(&env, "d != 10 && c"), Ok(Value::Bool(false)));
        assert_eq!(eval_in(&env, "null ?? d"), Ok(Value::Number(10.0)));
        // the right operand is not evaluated
        assert_eq!(eval_in(&env, "true || missing"), Ok(Value::Bool(true)));
        assert_eq!(eval_in(&env, "0 && missing"), Ok(Value::Number(0.0)));
        assert_eq!(eval_in(&env, "c ?? missing"), Ok("this is c".into()));
    }

    #[test]
    fn test_conditional() {
        let code = r#"var a = 1; a > 0 ? a < 10 ? a > 5 ? "X" : "Y" : "Z" : "W""#;
        assert_eq!(display(code), "Y");
        assert_eq!(display("var a; true ? 1 : a = 2"), "1");
        assert_eq!(eval("var a; false ? missing : 2"), Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_update() {
        let env = Environment::new_global();
        eval_in(&env, "var c = 120").unwrap();
        assert_eq!(eval_in(&env, "c++"), Ok(Value::Number(120.0)));
        assert_eq!(eval_in(&env, "++c"), Ok(Value::Number(122.0)));
        assert_eq!(eval_in(&env, "c--"), Ok(Value::Number(122.0)));
        assert_eq!(eval_in(&env, "--c"), Ok(Value::Number(120.0)));

        assert_eq!(display("var o = {n: 1}; o.n++; o.n"), "2");
        assert_eq!(display("var a = [1, 2]; ++a[1]"), "3");
        assert_eq!(display("var s = {}; s.x++"), "NaN");
    }

    #[test]
    fn test_assignment() {
        assert_eq!(display("var a; var b; a = b = 3; a + b"), "6");
        assert_eq!(display("var a = 1; a += 2; a *= 3; a -= 1; a /= 4; a"), "2");
        assert_eq!(display("var a = 2; a **= 3; a %= 5; a <<= 2; a |= 1; a"), "13");
        assert_eq!(display(r#"var s = "a"; s += 1; s"#), "a1");
        assert_eq!(display("var a = null; a ??= 5; a ??= 6; a"), "5");
        assert_eq!(display("var o = {}; o.x = 1; o[\"y\"] = 2; o"), "{ x: 1, y: 2 }");
        assert_eq!(display("var a = 1; (a) = 2; a"), "2");
    }

    #[test]
    fn test_compound_assignment_short_circuit() {
        // `missing` is never evaluated
        assert_eq!(display("var a = 1; a ??= missing; a"), "1");
        assert_eq!(display("var a = 0; a ??= missing; a"), "0");
    }

    #[test]
    fn test_array_literal() {
        let env = Environment::new_global();
        eval_in(&env, "var arr = [1, 2, 3, 4, 5]").unwrap();
        assert_eq!(eval_in(&env, "arr[0]"), Ok(Value::Number(1.0)));
        assert_eq!(eval_in(&env, "arr[1, 2, 3]"), Ok(Value::Number(4.0)));
        assert_eq!(eval_in(&env, "arr.length"), Ok(Value::Number(5.0)));
        assert_eq!(eval_in(&env, "arr[\"1\"]"), Ok(Value::Number(2.0)));
        assert_eq!(eval_in(&env, "arr[10]"), Ok(Value::Undefined));
        assert_eq!(display("[1, , 3]"), "[ 1, <1 empty item>, 3 ]");
        assert_eq!(display("var a = [2, 3]; [1, ...a, 4]"), "[ 1, 2, 3, 4 ]");
        assert_eq!(
            eval("[...1]"),
            Err(Error::type_error("number is not iterable"))
        );
    }

    #[test]
    fn test_object_literal_keys() {
        let env = Environment::new_global();
        let code = r#"
            var magic = "bbb"
            var person = {
                firstName: "John",
                age: 50,
                "123": "abc",
                true: "abcdefg",
                null: "nullll",
                122: "122",
                1.5: "float",
                [adde("1", "23")]: "add function",
            }
            function adde(a, b) {
                return magic + a + b
            }
        "#;
        eval_in(&env, code).unwrap();
        assert_eq!(eval_in(&env, "person.firstName"), Ok("John".into()));
        assert_eq!(eval_in(&env, "person[123]"), Ok("abc".into()));
        assert_eq!(eval_in(&env, "person.true"), Ok("abcdefg".into()));
        assert_eq!(eval_in(&env, "person[null]"), Ok("nullll".into()));
        assert_eq!(eval_in(&env, "person[\"122\"]"), Ok("122".into()));
        assert_eq!(eval_in(&env, "person[\"1.5\"]"), Ok("float".into()));
        assert_eq!(eval_in(&env, "person.bbb123"), Ok("add function".into()));
        assert_eq!(
            eval_in(&env, "person").unwrap().to_string(),
            r#"{ 122: "122", 123: "abc", firstName: "John", age: 50, true: "abcdefg", null: "nullll", 1.5: "float", bbb123: "add function" }"#
        );
    }

    #[test]
    fn test_object_literal_shorthand_spread_method() {
        let code = r#"
            var x = 1
            var base = {a: 1, b: 2}
            var o = {x, ...base, b: 3, twice(n) { return n * 2 }};
            [o.x, o.a, o.b, o.twice(4)]
        "#;
        assert_eq!(display(code), "[ 1, 1, 3, 8 ]");
    }

    #[test]
    fn test_template() {
        assert_eq!(display("var a = 1; `a is ${a}`"), "a is 1");
        assert_eq!(
            display("var a = 5; var b = 10; `Fifteen is ${a + b} and\nnot ${2 * a + b}.`"),
            "Fifteen is 15 and\nnot 20."
        );
        assert_eq!(display("`${[1, 2]}|${\"s\"}|${null}`"), "[ 1, 2 ]|s|null");
        assert_eq!(display("`plain`"), "plain");
    }

    #[test]
    fn test_method_this() {
        let code = r#"
            var person = {
                name: ["Bob", "Smith"],
                age: 32,
                bio: function () {
                    return `${this.name[0]} ${this.name[1]} is ${this.age}`
                },
            }
            person.bio()
        "#;
        assert_eq!(display(code), "Bob Smith is 32");

        let code = r#"
            var o = {v: 1, get: function () { return this.v }}
            o["get"]()
        "#;
        assert_eq!(display(code), "1");
    }

    #[test]
    fn test_global_this() {
        let env = Environment::new_global();
        assert_eq!(eval_in(&env, "this").unwrap().to_string(), "{}");
        eval_in(&env, r#"this.name = ["Bob", "Smith"]"#).unwrap();
        assert_eq!(eval_in(&env, "this.name[0]"), Ok("Bob".into()));
    }

    #[test]
    fn test_named_function_expression() {
        let code = r#"
            var fact = function f(n) { return n <= 1 ? 1 : n * f(n - 1) }
            fact(5)
        "#;
        assert_eq!(display(code), "120");

        // the name is only visible inside the function
        let env = Environment::new_global();
        eval_in(&env, "var g = function f() {}").unwrap();
        assert!(!env.contains("f"));
    }

    #[test]
    fn test_call_errors() {
        assert_eq!(
            eval("var a = 1; a()"),
            Err(Error::type_error("a is not a function (found number)"))
        );
        assert_eq!(
            eval("var o = {}; o.f()"),
            Err(Error::type_error("o.f is not a function (found undefined)"))
        );
        assert_eq!(
            eval("undefinedFunction()"),
            Err(Error::Reference {
                name: "undefinedFunction".to_string()
            })
        );
        assert_eq!(
            eval("var o = null; o.x"),
            Err(Error::type_error(
                "cannot read properties of null (reading 'x')"
            ))
        );
    }

    #[test]
    fn test_spread_arguments() {
        assert_eq!(
            display("function f(a, b, c) { return a + b + c } var xs = [2, 3]; f(1, ...xs)"),
            "6"
        );
    }

    #[test]
    fn test_spread_sparse_array() {
        assert_eq!(display("var a = []; a[3] = 1; [...a]"), "[ undefined, undefined, undefined, 1 ]");

        let env = Environment::new_global();
        eval_in(&env, "var a = []; a[4294967294] = 1").unwrap();
        let too_long = Err(Error::type_error("cannot spread an array of length 4294967295"));
        assert_eq!(eval_in(&env, "[...a]"), too_long);
        assert_eq!(eval_in(&env, "function f() {} f(...a)"), too_long);
        assert_eq!(
            eval_in(&env, "a").unwrap().to_string(),
            "[ <4294967294 empty items>, 1 ]"
        );
    }

    #[test]
    fn test_optional_chaining() {
        assert_eq!(eval("var o = null; o?.x"), Ok(Value::Undefined));
        assert_eq!(eval("var o = null; o?.[missing]"), Ok(Value::Undefined));
        assert_eq!(eval("var o; o?.f()"), Ok(Value::Undefined));
        assert_eq!(display("var o = {x: {y: 2}}; o?.x?.y"), "2");
        assert_eq!(display("var o = {v: 3, f: function () { return this.v }}; o?.f()"), "3");
        assert_eq!(display("var f = function () { return 4 }; f?.()"), "4");
    }

    #[test]
    fn test_unary() {
        assert_eq!(display("typeof 1"), "number");
        assert_eq!(display("typeof notDeclared"), "undefined");
        assert_eq!(display("typeof function () {}"), "function");
        assert_eq!(display("typeof null"), "object");
        assert_eq!(display("!0"), "true");
        assert_eq!(display("!\"\""), "true");
        assert_eq!(display("~1"), "-2");
        assert_eq!(eval("void 1"), Ok(Value::Undefined));
        assert_eq!(display("var o = {a: 1, b: 2}; delete o.a; o"), "{ b: 2 }");
        assert_eq!(display("var a = 1; delete a"), "true");
        assert_eq!(display("var o = {a: 1}; [\"a\" in o, \"b\" in o]"), "[ true, false ]");
    }

    #[test]
    fn test_equality() {
        assert_eq!(display("[1, 2] == [1, 2]"), "true");
        assert_eq!(display("[1, 2] === [1, 2]"), "false");
        assert_eq!(display("var a = {}; a === a"), "true");
        assert_eq!(display("var u; null == u"), "true");
        assert_eq!(display("1 != \"1\""), "false");
        assert_eq!(display("1 !== \"1\""), "true");
    }

    #[test]
    fn test_unimplemented_expressions() {
        assert_eq!(
            eval("function C() {} new C()"),
            Err(Error::unimplemented("new expressions"))
        );
        assert_eq!(
            eval("var a = 1; var b = 2; a instanceof b"),
            Err(Error::unimplemented("instanceof operator"))
        );
        assert_eq!(
            eval("var p = 1; await p"),
            Err(Error::unimplemented("await expressions"))
        );
    }

    #[test]
    fn test_sequence() {
        assert_eq!(display("var a = 1; a = 2, a + 1"), "3");
    }
}
