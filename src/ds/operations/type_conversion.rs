use crate::ds::error::JErrorType;
use crate::ds::object::{JsObjectType, ObjectType};
use crate::ds::operations::numeric_string::string_to_number;
use crate::ds::operations::object::default_value;
use crate::ds::realm::{get_intrinsic, WellKnownIntrinsics};
use crate::ds::value::{JsString, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

const TWO_POW_16: f64 = 65_536.0;
const TWO_POW_31: f64 = 2_147_483_648.0;
const TWO_POW_32: f64 = 4_294_967_296.0;

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => {
            if o.borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
    }
}

/// The result of the `typeof` operator.
pub fn type_of(a: &JsValue) -> &'static str {
    match a {
        JsValue::Null => TYPE_STR_OBJECT,
        _ => get_type(a),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferredType {
    Default,
    String,
    Number,
}

pub fn to_primitive(v: &JsValue, preferred_type: PreferredType) -> Result<JsValue, JErrorType> {
    match v {
        JsValue::Object(o) => default_value(o, preferred_type),
        _ => Ok(v.clone()),
    }
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined => false,
        JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::Number(n) => !(n.is_nan() || *n == 0.0),
        JsValue::String(s) => !s.is_empty(),
        JsValue::Object(_) => true,
    }
}

pub fn to_number(v: &JsValue) -> Result<f64, JErrorType> {
    match v {
        JsValue::Undefined => Ok(f64::NAN),
        JsValue::Null => Ok(0.0),
        JsValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        JsValue::Number(n) => Ok(*n),
        JsValue::String(s) => Ok(string_to_number(s)),
        JsValue::Object(_) => {
            let pv = to_primitive(v, PreferredType::Number)?;
            to_number(&pv)
        }
    }
}

/// NaN becomes 0, infinities and zeros are kept, everything else is truncated toward zero.
pub fn number_to_integer(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else if n.is_infinite() || n == 0.0 {
        n
    } else {
        n.trunc()
    }
}

pub fn to_integer(v: &JsValue) -> Result<f64, JErrorType> {
    Ok(number_to_integer(to_number(v)?))
}

/// Truncates toward zero and reduces into `[0, modulus)`. Non-finite input maps to 0.
fn reduce_modulo(n: f64, modulus: f64) -> f64 {
    if !n.is_finite() || n == 0.0 {
        return 0.0;
    }
    let remainder = n.trunc() % modulus;
    if remainder < 0.0 {
        remainder + modulus
    } else {
        remainder
    }
}

pub fn number_to_int32(n: f64) -> i32 {
    let m = reduce_modulo(n, TWO_POW_32);
    if m >= TWO_POW_31 {
        (m - TWO_POW_32) as i32
    } else {
        m as i32
    }
}

pub fn number_to_uint32(n: f64) -> u32 {
    reduce_modulo(n, TWO_POW_32) as u32
}

pub fn number_to_uint16(n: f64) -> u16 {
    reduce_modulo(n, TWO_POW_16) as u16
}

pub fn to_int32(v: &JsValue) -> Result<i32, JErrorType> {
    Ok(number_to_int32(to_number(v)?))
}

pub fn to_uint32(v: &JsValue) -> Result<u32, JErrorType> {
    Ok(number_to_uint32(to_number(v)?))
}

pub fn to_uint16(v: &JsValue) -> Result<u16, JErrorType> {
    Ok(number_to_uint16(to_number(v)?))
}

/// Number to string: shortest round-trip digits, laid out the way the language prints numbers
/// (`1e+21`, `1.5e-7`, `0.000001`, `-0` prints as `0`).
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format_finite(n).to_string()
}

pub fn to_string(v: &JsValue) -> Result<JsString, JErrorType> {
    Ok(match v {
        JsValue::Undefined => JsString::from(TYPE_STR_UNDEFINED),
        JsValue::Null => JsString::from(TYPE_STR_NULL),
        JsValue::Boolean(b) => JsString::from(if *b { "true" } else { "false" }),
        JsValue::Number(n) => JsString::from(number_to_string(*n)),
        JsValue::String(s) => s.clone(),
        JsValue::Object(_) => {
            let pv = to_primitive(v, PreferredType::String)?;
            to_string(&pv)?
        }
    })
}

/// Boxes primitives into wrapper objects linked to the realm's prototypes when installed.
pub fn to_object(v: &JsValue) -> Result<JsObjectType, JErrorType> {
    match v {
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "'{}' cannot be converted to object",
            v
        ))),
        JsValue::Boolean(b) => Ok(ObjectType::new_boolean_object(
            *b,
            get_intrinsic(WellKnownIntrinsics::BooleanPrototype),
        )
        .into_js_object()),
        JsValue::Number(n) => Ok(ObjectType::new_number_object(
            *n,
            get_intrinsic(WellKnownIntrinsics::NumberPrototype),
        )
        .into_js_object()),
        JsValue::String(s) => Ok(ObjectType::new_string_object(
            s.clone(),
            get_intrinsic(WellKnownIntrinsics::StringPrototype),
        )
        .into_js_object()),
        JsValue::Object(o) => Ok(o.clone()),
    }
}

pub fn check_object_coercible(v: &JsValue) -> Result<(), JErrorType> {
    match v {
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "'{}' is not object coercible",
            v
        ))),
        _ => Ok(()),
    }
}
