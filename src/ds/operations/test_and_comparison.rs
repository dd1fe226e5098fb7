use std::mem::discriminant;
use std::rc::Rc;

use crate::ds::error::JErrorType;
use crate::ds::object::JsObjectType;
use crate::ds::operations::type_conversion::{to_number, to_primitive, PreferredType};
use crate::ds::value::JsValue;

pub fn is_callable(v: &JsValue) -> bool {
    match v {
        JsValue::Object(o) => o.borrow().is_callable(),
        _ => false,
    }
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
        (JsValue::String(a), JsValue::String(b)) => a == b,
        (JsValue::Object(a), JsValue::Object(b)) => same_object(a, b),
        (JsValue::Number(a), JsValue::Number(b)) => {
            if strict_mode {
                a == b
            } else if a.is_nan() || b.is_nan() {
                a.is_nan() && b.is_nan()
            } else {
                a == b && a.is_sign_negative() == b.is_sign_negative()
            }
        }
        _ => false,
    }
}

/// NaN equals NaN; +0 and -0 differ.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

/// The `===` operator: NaN differs from itself; +0 equals -0.
pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

/// The `==` operator.
pub fn abstract_equality_comparison(x: &JsValue, y: &JsValue) -> Result<bool, JErrorType> {
    if discriminant(x) == discriminant(y) {
        return Ok(strict_equality_comparison(x, y));
    }
    match (x, y) {
        (JsValue::Null, JsValue::Undefined) | (JsValue::Undefined, JsValue::Null) => Ok(true),
        (JsValue::Number(n), JsValue::String(_)) => Ok(*n == to_number(y)?),
        (JsValue::String(_), JsValue::Number(n)) => Ok(to_number(x)? == *n),
        (JsValue::Boolean(_), _) => {
            abstract_equality_comparison(&JsValue::Number(to_number(x)?), y)
        }
        (_, JsValue::Boolean(_)) => {
            abstract_equality_comparison(x, &JsValue::Number(to_number(y)?))
        }
        (JsValue::Number(_), JsValue::Object(_)) | (JsValue::String(_), JsValue::Object(_)) => {
            abstract_equality_comparison(x, &to_primitive(y, PreferredType::Default)?)
        }
        (JsValue::Object(_), JsValue::Number(_)) | (JsValue::Object(_), JsValue::String(_)) => {
            abstract_equality_comparison(&to_primitive(x, PreferredType::Default)?, y)
        }
        _ => Ok(false),
    }
}
