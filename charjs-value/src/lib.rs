//! Runtime values, property storage, functions and scope frames.

mod environment;
mod function;
mod object;

pub use environment::Environment;
pub use function::{CustomFunction, Function, NativeFn, NativeFunction};
pub use object::{Object, PropertyKey};

use charjs_source::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to the property storage of an object or array.
pub type ObjectRef = Rc<RefCell<Object>>;

#[derive(Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
    Object(ObjectRef),
    Array(ObjectRef),
    Function(Rc<Function>),
}

impl Value {
    pub fn new_object(object: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn new_array(elements: Object) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn new_function(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }

    /// Returns the property storage of objects and arrays.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) | Value::Array(object) => Some(object),
            _ => None,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Boolean coercion. Only `0`, `NaN`, `""`, `false`, `null` and `undefined` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(val) => *val != 0.0 && !val.is_nan(),
            Value::String(val) => !val.is_empty(),
            Value::Bool(val) => *val,
            Value::Null | Value::Undefined => false,
            Value::Object(_) | Value::Array(_) | Value::Function(_) => true,
        }
    }

    /// Numeric coercion. Strings, objects and functions are not convertible.
    pub fn to_number(&self) -> Result<f64> {
        match self {
            Value::Number(val) => Ok(*val),
            Value::Bool(val) => Ok(if *val { 1.0 } else { 0.0 }),
            Value::Null => Ok(0.0),
            Value::Undefined => Ok(f64::NAN),
            _ => Err(Error::type_error(format!(
                "cannot convert {} to number",
                self.type_name()
            ))),
        }
    }

    /// Result of the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) | Value::Array(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Name used in error messages. Unlike [`Self::type_of`], distinguishes `null` and arrays.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Array(_) => "array",
            _ => self.type_of(),
        }
    }

    /// `===`: identity for objects, arrays and functions, value equality otherwise.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Object(l), Value::Object(r)) | (Value::Array(l), Value::Array(r)) => {
                Rc::ptr_eq(l, r)
            }
            (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }

    /// `==`: objects and arrays compare structurally, `null == undefined`, and numbers,
    /// booleans and numeric strings compare by numeric value.
    pub fn loose_equals(&self, other: &Value) -> bool {
        loose_equals(self, other, &mut Vec::new())
    }

    /// Reads a property of an object or array. Missing properties read as `undefined`.
    pub fn get_property(&self, key: &str) -> Result<Value> {
        match self {
            Value::Array(array) if key == "length" => {
                Ok(Value::Number(f64::from(array.borrow().length())))
            }
            Value::Object(object) | Value::Array(object) => Ok(object
                .borrow()
                .get(key)
                .cloned()
                .unwrap_or(Value::Undefined)),
            _ => Err(Error::type_error(format!(
                "cannot read properties of {} (reading '{}')",
                self.type_name(),
                key
            ))),
        }
    }

    pub fn set_property(&self, key: &str, value: Value) -> Result<()> {
        match self.as_object() {
            Some(object) => {
                object.borrow_mut().set(key, value);
                Ok(())
            }
            None => Err(Error::type_error(format!(
                "cannot set properties of {} (setting '{}')",
                self.type_name(),
                key
            ))),
        }
    }

    /// Returns `true` if the property existed.
    pub fn delete_property(&self, key: &str) -> Result<bool> {
        match self.as_object() {
            Some(object) => Ok(object.borrow_mut().remove(key).is_some()),
            None => Err(Error::type_error(format!(
                "cannot delete properties of {} (deleting '{}')",
                self.type_name(),
                key
            ))),
        }
    }

    /// The `in` operator.
    pub fn has_property(&self, key: &str) -> Result<bool> {
        match self {
            Value::Array(_) if key == "length" => Ok(true),
            Value::Object(object) | Value::Array(object) => Ok(object.borrow().contains_key(key)),
            _ => Err(Error::type_error(format!(
                "cannot use 'in' operator to search for '{}' in {}",
                key,
                self.type_name()
            ))),
        }
    }
}

/// `seen` holds pairs of objects currently being compared, so cyclic structures terminate.
fn loose_equals(l: &Value, r: &Value, seen: &mut Vec<(*const RefCell<Object>, *const RefCell<Object>)>) -> bool {
    match (l, r) {
        (Value::Object(l), Value::Object(r)) | (Value::Array(l), Value::Array(r)) => {
            if Rc::ptr_eq(l, r) {
                return true;
            }
            let pair = (Rc::as_ptr(l), Rc::as_ptr(r));
            if seen.contains(&pair) {
                return true;
            }
            seen.push(pair);
            let (l, r) = (l.borrow(), r.borrow());
            let equal = l.entries().count() == r.entries().count()
                && l.entries().all(|(key, value)| {
                    let other = match &key {
                        PropertyKey::Index(index) => r.get_index(*index),
                        PropertyKey::Name(name) => r.get(name),
                    };
                    other.map_or(false, |other| loose_equals(value, other, seen))
                });
            seen.pop();
            equal
        }
        (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,
        (Value::Number(_) | Value::Bool(_), Value::Number(_) | Value::Bool(_))
        | (Value::String(_), Value::Number(_) | Value::Bool(_))
        | (Value::Number(_) | Value::Bool(_), Value::String(_)) => {
            primitive_to_number(l) == primitive_to_number(r)
        }
        _ => l.strict_equals(r),
    }
}

/// Numeric value of a number, boolean or string operand of `==`.
fn primitive_to_number(value: &Value) -> f64 {
    match value {
        Value::String(val) => {
            let val = val.trim();
            if val.is_empty() {
                0.0
            } else {
                val.parse().unwrap_or(f64::NAN)
            }
        }
        _ => value.to_number().unwrap_or(f64::NAN),
    }
}

/// Formats a number the way scripts observe it (e.g. `1` instead of `1.0`).
pub fn format_number(val: f64) -> String {
    if val.is_nan() {
        "NaN".to_string()
    } else if val == f64::INFINITY {
        "Infinity".to_string()
    } else if val == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if val == 0.0 {
        // covers -0
        "0".to_string()
    } else if val.abs() >= 1e21 || val.abs() < 1e-6 {
        // exponent form with an explicit sign, e.g. `1e+21` and `1.5e-7`
        let val = format!("{:e}", val);
        match val.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => val,
        }
    } else {
        val.to_string()
    }
}

/// Writes `value` as it appears inside an object or array.
/// `seen` holds the objects currently being written, to detect cycles.
fn fmt_nested(f: &mut fmt::Formatter<'_>, value: &Value, seen: &mut Vec<*const RefCell<Object>>) -> fmt::Result {
    match value {
        Value::String(val) => write!(f, "\"{}\"", val),
        Value::Object(object) | Value::Array(object) => {
            let ptr = Rc::as_ptr(object);
            if seen.contains(&ptr) {
                return f.write_str("[Circular]");
            }
            seen.push(ptr);
            let res = if let Value::Array(_) = value {
                fmt_array(f, &object.borrow(), seen)
            } else {
                fmt_object(f, &object.borrow(), seen)
            };
            seen.pop();
            res
        }
        _ => write!(f, "{}", value),
    }
}

fn fmt_object(f: &mut fmt::Formatter<'_>, object: &Object, seen: &mut Vec<*const RefCell<Object>>) -> fmt::Result {
    if object.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (i, (key, value)) in object.entries().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match key {
            PropertyKey::Index(index) => write!(f, "{}: ", index)?,
            PropertyKey::Name(name) => write!(f, "{}: ", name)?,
        }
        fmt_nested(f, value, seen)?;
    }
    f.write_str(" }")
}

fn fmt_array(f: &mut fmt::Formatter<'_>, array: &Object, seen: &mut Vec<*const RefCell<Object>>) -> fmt::Result {
    if array.is_empty() {
        return f.write_str("[]");
    }
    f.write_str("[ ")?;
    let mut first = true;
    let mut separator = |f: &mut fmt::Formatter<'_>| {
        if std::mem::take(&mut first) {
            Ok(())
        } else {
            f.write_str(", ")
        }
    };
    // each run of holes is written once
    let mut next = 0;
    for (index, value) in array.indexed() {
        if index > next {
            separator(f)?;
            fmt_holes(f, index - next)?;
        }
        separator(f)?;
        fmt_nested(f, value, seen)?;
        next = index + 1;
    }
    for (name, value) in array.named() {
        separator(f)?;
        write!(f, "{}: ", name)?;
        fmt_nested(f, value, seen)?;
    }
    f.write_str(" ]")
}

fn fmt_holes(f: &mut fmt::Formatter<'_>, count: u32) -> fmt::Result {
    if count == 1 {
        f.write_str("<1 empty item>")
    } else {
        write!(f, "<{} empty items>", count)
    }
}

impl fmt::Display for Value {
    /// Top-level strings are written without quotes, as `console.log` prints them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(val) => f.write_str(&format_number(*val)),
            Value::String(val) => f.write_str(val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Object(_) | Value::Array(_) => fmt_nested(f, self, &mut Vec::new()),
            Value::Function(function) => match function.name() {
                Some(name) => write!(f, "[Function: {}]", name),
                None => f.write_str("[Function (anonymous)]"),
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(val) => write!(f, "{:?}", val),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Number(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}
