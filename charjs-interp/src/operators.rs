use charjs_parser::ast::{BinaryOp, UnaryOp};
use charjs_source::{Error, Result};
use charjs_value::Value;

/// Generate a binary operator on numbers.
macro_rules! num_binary_op {
    ($lhs: ident, $op: tt, $rhs: ident) => {
        Value::Number($lhs.to_number()? $op $rhs.to_number()?)
    };
}

/// Generate a relational operator. Two strings compare lexicographically, anything else
/// numerically.
macro_rules! compare_op {
    ($lhs: ident, $op: tt, $rhs: ident) => {
        match ($lhs, $rhs) {
            (Value::String(l), Value::String(r)) => Value::Bool(l $op r),
            _ => Value::Bool($lhs.to_number()? $op $rhs.to_number()?),
        }
    };
}

/// Generate a bitwise operator on 32-bit integers.
macro_rules! int_binary_op {
    ($lhs: ident, $op: tt, $rhs: ident) => {
        Value::Number(f64::from(to_int32($lhs.to_number()?) $op to_int32($rhs.to_number()?)))
    };
}

/// Wraps a number to a signed 32-bit integer. `NaN` and infinities become `0`.
pub fn to_int32(val: f64) -> i32 {
    to_uint32(val) as i32
}

/// Wraps a number to an unsigned 32-bit integer. `NaN` and infinities become `0`.
pub fn to_uint32(val: f64) -> u32 {
    if !val.is_finite() {
        return 0;
    }
    val.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// String form of a value used as property key: `1` and `"1"` name the same property.
pub fn to_property_key(value: &Value) -> String {
    value.to_string()
}

/// Applies a binary operator to two evaluated operands.
///
/// The logical operators are accepted too and pick an operand without evaluating anything,
/// callers that need short-circuiting handle them before evaluating `rhs`.
pub fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    let res = match op {
        BinaryOp::Add => add(lhs, rhs)?,
        BinaryOp::Sub => num_binary_op!(lhs, -, rhs),
        BinaryOp::Mul => num_binary_op!(lhs, *, rhs),
        BinaryOp::Div => num_binary_op!(lhs, /, rhs),
        BinaryOp::Mod => num_binary_op!(lhs, %, rhs),
        BinaryOp::Pow => Value::Number(pow(lhs.to_number()?, rhs.to_number()?)),

        BinaryOp::Equal => Value::Bool(lhs.loose_equals(rhs)),
        BinaryOp::NotEqual => Value::Bool(!lhs.loose_equals(rhs)),
        BinaryOp::StrictEqual => Value::Bool(lhs.strict_equals(rhs)),
        BinaryOp::StrictNotEqual => Value::Bool(!lhs.strict_equals(rhs)),

        BinaryOp::LessThan => compare_op!(lhs, <, rhs),
        BinaryOp::LessThanEqual => compare_op!(lhs, <=, rhs),
        BinaryOp::GreaterThan => compare_op!(lhs, >, rhs),
        BinaryOp::GreaterThanEqual => compare_op!(lhs, >=, rhs),

        BinaryOp::BitAnd => int_binary_op!(lhs, &, rhs),
        BinaryOp::BitOr => int_binary_op!(lhs, |, rhs),
        BinaryOp::BitXor => int_binary_op!(lhs, ^, rhs),
        BinaryOp::ShiftLeft => {
            let shift = to_uint32(rhs.to_number()?) & 31;
            Value::Number(f64::from(to_int32(lhs.to_number()?).wrapping_shl(shift)))
        }
        BinaryOp::ShiftRight => {
            let shift = to_uint32(rhs.to_number()?) & 31;
            Value::Number(f64::from(to_int32(lhs.to_number()?) >> shift))
        }
        BinaryOp::UnsignedShiftRight => {
            let shift = to_uint32(rhs.to_number()?) & 31;
            Value::Number(f64::from(to_uint32(lhs.to_number()?) >> shift))
        }

        BinaryOp::LogicalAnd => {
            if lhs.is_truthy() {
                rhs.clone()
            } else {
                lhs.clone()
            }
        }
        BinaryOp::LogicalOr => {
            if lhs.is_truthy() {
                lhs.clone()
            } else {
                rhs.clone()
            }
        }
        BinaryOp::Coalesce => {
            if lhs.is_nullish() {
                rhs.clone()
            } else {
                lhs.clone()
            }
        }

        BinaryOp::In => Value::Bool(rhs.has_property(&to_property_key(lhs))?),
        BinaryOp::Instanceof => return Err(Error::unimplemented("instanceof operator")),
    };
    Ok(res)
}

/// `+`: concatenation as soon as one side is a string, numeric addition otherwise.
fn add(lhs: &Value, rhs: &Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::String(_), _) | (_, Value::String(_)) => {
            Ok(Value::String(format!("{}{}", lhs, rhs)))
        }
        _ => Ok(num_binary_op!(lhs, +, rhs)),
    }
}

fn pow(base: f64, exponent: f64) -> f64 {
    // `powf` yields 1 for `1 ** NaN`
    if exponent.is_nan() {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

/// Applies one of the operators that only need the operand's value.
///
/// `typeof`, `delete` and `await` look at the operand expression and are handled by the caller.
pub fn unary(op: UnaryOp, arg: &Value) -> Result<Value> {
    let res = match op {
        UnaryOp::Plus => Value::Number(arg.to_number()?),
        UnaryOp::Minus => Value::Number(-arg.to_number()?),
        UnaryOp::BitNot => Value::Number(f64::from(!to_int32(arg.to_number()?))),
        UnaryOp::Not => Value::Bool(!arg.is_truthy()),
        UnaryOp::Void => Value::Undefined,
        UnaryOp::Typeof => Value::from(arg.type_of()),
        UnaryOp::Delete => Value::Bool(true),
        UnaryOp::Await => return Err(Error::unimplemented("await expressions")),
    };
    Ok(res)
}
