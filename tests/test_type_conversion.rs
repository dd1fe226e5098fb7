//! Tests for the type conversion and comparison operations.

extern crate just_types;

use std::rc::Rc;

use just_types::ds::error::JErrorType;
use just_types::ds::function_object::NativeFunction;
use just_types::ds::object::{object_create, JsObjectType, ObjectKind, ObjectType};
use just_types::ds::object_property::PropertyDescriptorSetter;
use just_types::ds::operations::object::define_own_property;
use just_types::ds::operations::test_and_comparison::{
    abstract_equality_comparison, is_callable, same_value, strict_equality_comparison,
};
use just_types::ds::operations::type_conversion::{
    check_object_coercible, to_boolean, to_int32, to_integer, to_number, to_object, to_primitive,
    to_string, to_uint16, to_uint32, type_of, PreferredType,
};
use just_types::ds::value::JsValue;

fn native<F>(name: &str, func: F) -> JsObjectType
where
    F: Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
{
    ObjectType::new_function(Rc::new(NativeFunction::new(name, func)), None).into_js_object()
}

fn num(n: f64) -> JsValue {
    JsValue::Number(n)
}

fn js_str(s: &str) -> JsValue {
    JsValue::new_string(s)
}

/// An object whose `valueOf` returns `value`.
fn object_with_value_of(value: JsValue) -> JsValue {
    let o = object_create(None);
    let f = native("valueOf", move |_this, _args| Ok(value.clone()));
    define_own_property(
        &o,
        "valueOf",
        PropertyDescriptorSetter::new_data(JsValue::Object(f), true, false, true),
        true,
    )
    .unwrap();
    JsValue::Object(o)
}

// ============================================================================
// toBoolean tests
// ============================================================================

mod to_boolean_tests {
    use super::*;

    #[test]
    fn test_to_boolean() {
        assert!(!to_boolean(&JsValue::Undefined));
        assert!(!to_boolean(&JsValue::Null));
        assert!(!to_boolean(&js_str("")));
        assert!(to_boolean(&js_str("0")));
        assert!(to_boolean(&js_str("false")));
        assert!(!to_boolean(&num(f64::NAN)));
        assert!(!to_boolean(&num(0.0)));
        assert!(!to_boolean(&num(-0.0)));
        assert!(to_boolean(&num(-1.0)));
        assert!(to_boolean(&JsValue::Object(object_create(None))));
    }
}

// ============================================================================
// toNumber tests
// ============================================================================

mod to_number_tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert!(to_number(&JsValue::Undefined).unwrap().is_nan());
        assert_eq!(to_number(&JsValue::Null).unwrap(), 0.0);
        assert_eq!(to_number(&JsValue::Boolean(true)).unwrap(), 1.0);
        assert_eq!(to_number(&JsValue::Boolean(false)).unwrap(), 0.0);
        assert_eq!(to_number(&num(2.5)).unwrap(), 2.5);
    }

    #[test]
    fn test_strings() {
        assert_eq!(to_number(&js_str("")).unwrap(), 0.0);
        assert_eq!(to_number(&js_str("  42  ")).unwrap(), 42.0);
        assert_eq!(to_number(&js_str("0x1A")).unwrap(), 26.0);
        assert_eq!(to_number(&js_str("-1.5e2")).unwrap(), -150.0);
        assert_eq!(to_number(&js_str("-Infinity")).unwrap(), f64::NEG_INFINITY);
        assert!(to_number(&js_str("4px")).unwrap().is_nan());
    }

    #[test]
    fn test_objects_use_value_of() {
        assert_eq!(to_number(&object_with_value_of(js_str("7"))).unwrap(), 7.0);
        assert!(to_number(&JsValue::Object(object_create(None)))
            .unwrap_err()
            .is_type_error());
    }
}

// ============================================================================
// Integer conversion tests
// ============================================================================

mod integer_conversion_tests {
    use super::*;

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer(&num(f64::NAN)).unwrap(), 0.0);
        assert_eq!(to_integer(&num(3.7)).unwrap(), 3.0);
        assert_eq!(to_integer(&num(-3.7)).unwrap(), -3.0);
        assert_eq!(to_integer(&num(f64::INFINITY)).unwrap(), f64::INFINITY);
        assert_eq!(to_integer(&js_str("12.9")).unwrap(), 12.0);
    }

    #[test]
    fn test_to_int32() {
        assert_eq!(to_int32(&num(4294967296.0)).unwrap(), 0);
        assert_eq!(to_int32(&num(2147483648.0)).unwrap(), -2147483648);
        assert_eq!(to_int32(&num(2147483647.0)).unwrap(), 2147483647);
        assert_eq!(to_int32(&num(-1.0)).unwrap(), -1);
        assert_eq!(to_int32(&num(-1.5)).unwrap(), -1);
        assert_eq!(to_int32(&num(4294967297.5)).unwrap(), 1);
        assert_eq!(to_int32(&num(f64::NAN)).unwrap(), 0);
        assert_eq!(to_int32(&num(f64::INFINITY)).unwrap(), 0);
        assert_eq!(to_int32(&num(f64::NEG_INFINITY)).unwrap(), 0);
        assert_eq!(to_int32(&num(-0.0)).unwrap(), 0);
    }

    #[test]
    fn test_to_uint32() {
        assert_eq!(to_uint32(&num(-1.0)).unwrap(), 4294967295);
        assert_eq!(to_uint32(&num(4294967296.0)).unwrap(), 0);
        assert_eq!(to_uint32(&num(4294967295.0)).unwrap(), 4294967295);
        assert_eq!(to_uint32(&num(f64::NAN)).unwrap(), 0);
    }

    #[test]
    fn test_to_uint16() {
        assert_eq!(to_uint16(&num(65537.0)).unwrap(), 1);
        assert_eq!(to_uint16(&num(-1.0)).unwrap(), 65535);
        assert_eq!(to_uint16(&num(65536.0)).unwrap(), 0);
    }
}

// ============================================================================
// toString tests
// ============================================================================

mod to_string_tests {
    use super::*;

    fn assert_to_string(v: JsValue, expected: &str) {
        assert_eq!(to_string(&v).unwrap().to_string(), expected);
    }

    #[test]
    fn test_primitives() {
        assert_to_string(JsValue::Undefined, "undefined");
        assert_to_string(JsValue::Null, "null");
        assert_to_string(JsValue::Boolean(true), "true");
        assert_to_string(JsValue::Boolean(false), "false");
        assert_to_string(js_str("abc"), "abc");
    }

    #[test]
    fn test_numbers() {
        assert_to_string(num(f64::NAN), "NaN");
        assert_to_string(num(f64::INFINITY), "Infinity");
        assert_to_string(num(f64::NEG_INFINITY), "-Infinity");
        assert_to_string(num(0.0), "0");
        assert_to_string(num(-0.0), "0");
        assert_to_string(num(42.0), "42");
        assert_to_string(num(-7.0), "-7");
        assert_to_string(num(123.456), "123.456");
        assert_to_string(num(0.1), "0.1");
        assert_to_string(num(0.000001), "0.000001");
        assert_to_string(num(1.5e-7), "1.5e-7");
        assert_to_string(num(1e21), "1e+21");
        assert_to_string(num(123456789012345680000.0), "123456789012345680000");
    }

    #[test]
    fn test_objects_prefer_to_string() {
        let o = object_create(None);
        let f = native("toString", |_this, _args| Ok(js_str("custom")));
        define_own_property(
            &o,
            "toString",
            PropertyDescriptorSetter::new_data(JsValue::Object(f), true, false, true),
            true,
        )
        .unwrap();
        assert_to_string(JsValue::Object(o), "custom");
        assert_to_string(object_with_value_of(num(5.0)), "5");
    }
}

// ============================================================================
// toObject and coercibility tests
// ============================================================================

mod to_object_tests {
    use super::*;

    #[test]
    fn test_wrappers_hold_the_primitive() {
        let b = to_object(&JsValue::Boolean(true)).unwrap();
        assert!(matches!(b.borrow().kind(), ObjectKind::Boolean(true)));
        let n = to_object(&num(3.0)).unwrap();
        assert_eq!(n.borrow().primitive_value(), Some(num(3.0)));
        let s = to_object(&js_str("hi")).unwrap();
        assert_eq!(s.borrow().primitive_value(), Some(js_str("hi")));
        assert_eq!(s.borrow().class_name(), "Object");
    }

    #[test]
    fn test_object_is_returned_unchanged() {
        let o = object_create(None);
        let converted = to_object(&JsValue::Object(o.clone())).unwrap();
        assert!(Rc::ptr_eq(&o, &converted));
    }

    #[test]
    fn test_undefined_and_null_are_type_errors() {
        assert!(to_object(&JsValue::Undefined).unwrap_err().is_type_error());
        assert!(to_object(&JsValue::Null).unwrap_err().is_type_error());
        assert!(check_object_coercible(&JsValue::Null)
            .unwrap_err()
            .is_type_error());
        assert!(check_object_coercible(&JsValue::Undefined).is_err());
        assert!(check_object_coercible(&num(0.0)).is_ok());
        assert!(check_object_coercible(&js_str("")).is_ok());
    }

    #[test]
    fn test_to_primitive() {
        assert_eq!(
            to_primitive(&num(1.0), PreferredType::String).unwrap(),
            num(1.0)
        );
        assert_eq!(
            to_primitive(&object_with_value_of(JsValue::Boolean(true)), PreferredType::Number)
                .unwrap(),
            JsValue::Boolean(true)
        );
    }

    #[test]
    fn test_type_of() {
        assert_eq!(type_of(&JsValue::Undefined), "undefined");
        assert_eq!(type_of(&JsValue::Null), "object");
        assert_eq!(type_of(&num(1.0)), "number");
        assert_eq!(type_of(&js_str("")), "string");
        assert_eq!(type_of(&JsValue::Boolean(false)), "boolean");
        assert_eq!(type_of(&JsValue::Object(object_create(None))), "object");
        let f = native("f", |_this, _args| Ok(JsValue::Undefined));
        assert_eq!(type_of(&JsValue::Object(f.clone())), "function");
        assert!(is_callable(&JsValue::Object(f)));
        assert!(!is_callable(&JsValue::Object(object_create(None))));
        assert!(!is_callable(&js_str("f")));
    }
}

// ============================================================================
// Equality tests
// ============================================================================

mod equality_tests {
    use super::*;

    #[test]
    fn test_same_value() {
        assert!(same_value(&num(f64::NAN), &num(f64::NAN)));
        assert!(!same_value(&num(0.0), &num(-0.0)));
        assert!(same_value(&js_str("a"), &js_str("a")));
        assert!(!same_value(&js_str("a"), &js_str("b")));
        assert!(same_value(&JsValue::Undefined, &JsValue::Undefined));
        assert!(same_value(&JsValue::Null, &JsValue::Null));
        assert!(!same_value(&JsValue::Null, &JsValue::Undefined));
        assert!(!same_value(&num(1.0), &js_str("1")));
        let o = object_create(None);
        assert!(same_value(&JsValue::Object(o.clone()), &JsValue::Object(o)));
        assert!(!same_value(
            &JsValue::Object(object_create(None)),
            &JsValue::Object(object_create(None))
        ));
    }

    #[test]
    fn test_strict_equality() {
        assert!(!strict_equality_comparison(&num(f64::NAN), &num(f64::NAN)));
        assert!(strict_equality_comparison(&num(0.0), &num(-0.0)));
        assert!(!strict_equality_comparison(&num(1.0), &js_str("1")));
    }

    #[test]
    fn test_abstract_equality() {
        assert!(abstract_equality_comparison(&JsValue::Null, &JsValue::Undefined).unwrap());
        assert!(abstract_equality_comparison(&num(1.0), &js_str("1")).unwrap());
        assert!(abstract_equality_comparison(&JsValue::Boolean(true), &num(1.0)).unwrap());
        assert!(abstract_equality_comparison(&js_str("0"), &JsValue::Boolean(false)).unwrap());
        assert!(!abstract_equality_comparison(&JsValue::Null, &num(0.0)).unwrap());
        assert!(!abstract_equality_comparison(&num(f64::NAN), &num(f64::NAN)).unwrap());
        assert!(abstract_equality_comparison(&object_with_value_of(num(2.0)), &js_str("2")).unwrap());
    }
}
