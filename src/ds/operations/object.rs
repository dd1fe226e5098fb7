use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::ds::config::config;
use crate::ds::error::JErrorType;
use crate::ds::object::JsObjectType;
use crate::ds::object_property::{PropertyDescriptor, PropertyDescriptorSetter};
use crate::ds::operations::type_conversion::{to_object, PreferredType};
use crate::ds::value::JsValue;

const TO_STRING_METHOD: &str = "toString";
const VALUE_OF_METHOD: &str = "valueOf";

pub fn get_own_property(o: &JsObjectType, p: &str) -> Option<PropertyDescriptor> {
    o.borrow().get_own_property(p)
}

pub fn has_own_property(o: &JsObjectType, p: &str) -> bool {
    o.borrow().has_own_property(p)
}

/// Looks `p` up on `o` and then along its prototype chain.
///
/// Fails with a TypeError if the chain revisits an object or grows past the configured depth.
pub fn get_property(o: &JsObjectType, p: &str) -> Result<Option<PropertyDescriptor>, JErrorType> {
    let mut visited = HashSet::new();
    let mut current = o.clone();
    let mut depth = 0;
    loop {
        if !visited.insert(Rc::as_ptr(&current)) {
            debug!(property = p, depth, "Cycle in prototype chain");
            return Err(JErrorType::TypeError(format!(
                "Cyclic prototype chain while looking up '{}'",
                p
            )));
        }
        let next = {
            let obj = current.borrow();
            if let Some(desc) = obj.get_own_property(p) {
                return Ok(Some(desc));
            }
            obj.get_prototype_of()
        };
        match next {
            None => return Ok(None),
            Some(next) => {
                depth += 1;
                if !config().allows_depth(depth) {
                    debug!(property = p, depth, "Prototype chain depth limit exceeded");
                    return Err(JErrorType::TypeError(format!(
                        "Prototype chain too deep while looking up '{}'",
                        p
                    )));
                }
                current = next;
            }
        }
    }
}

pub fn has_property(o: &JsObjectType, p: &str) -> Result<bool, JErrorType> {
    Ok(get_property(o, p)?.is_some())
}

/// Invokes a callable object. The record is not borrowed while the call runs.
pub fn call_object(
    f: &JsObjectType,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let func = f.borrow().as_function();
    match func {
        Some(func) => func.call(this, args),
        None => Err(JErrorType::TypeError(format!(
            "{} is not a function",
            f.borrow()
        ))),
    }
}

pub fn call(f: &JsValue, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
    match f {
        JsValue::Object(o) => call_object(o, this, args),
        _ => Err(JErrorType::TypeError(format!("{} is not a function", f))),
    }
}

/// Reads a resolved property, running its getter against `this`.
fn get_from_descriptor(
    desc: Option<PropertyDescriptor>,
    this: &JsValue,
) -> Result<JsValue, JErrorType> {
    match desc {
        None => Ok(JsValue::Undefined),
        Some(PropertyDescriptor::Data(d)) => Ok(d.value),
        Some(PropertyDescriptor::Accessor(a)) => match a.get {
            None => Ok(JsValue::Undefined),
            Some(getter) => call_object(&getter, this, Vec::new()),
        },
    }
}

pub fn get(o: &JsObjectType, p: &str) -> Result<JsValue, JErrorType> {
    let desc = get_property(o, p)?;
    get_from_descriptor(desc, &JsValue::Object(o.clone()))
}

/// Property read through any value. Primitives are boxed for the lookup, but a getter sees the
/// original primitive as `this`.
pub fn get_v(v: &JsValue, p: &str) -> Result<JsValue, JErrorType> {
    let o = to_object(v)?;
    let desc = get_property(&o, p)?;
    get_from_descriptor(desc, v)
}

pub fn get_method(v: &JsValue, p: &str) -> Result<JsValue, JErrorType> {
    let f = get_v(v, p)?;
    match &f {
        JsValue::Undefined => Ok(JsValue::Undefined),
        JsValue::Null => Ok(JsValue::Undefined),
        JsValue::Object(o) => {
            if o.borrow().is_callable() {
                Ok(f)
            } else {
                Err(JErrorType::TypeError(format!("'{}' is not a function", p)))
            }
        }
        _ => Err(JErrorType::TypeError(format!("'{}' is not a function", p))),
    }
}

pub fn can_put(o: &JsObjectType, p: &str) -> Result<bool, JErrorType> {
    let (own, prototype, extensible) = {
        let obj = o.borrow();
        (
            obj.get_own_property(p),
            obj.get_prototype_of(),
            obj.is_extensible(),
        )
    };
    if let Some(desc) = own {
        return Ok(match desc {
            PropertyDescriptor::Accessor(a) => a.set.is_some(),
            PropertyDescriptor::Data(d) => d.writable,
        });
    }
    let prototype = match prototype {
        None => return Ok(extensible),
        Some(prototype) => prototype,
    };
    Ok(match get_property(&prototype, p)? {
        None => extensible,
        Some(PropertyDescriptor::Accessor(a)) => a.set.is_some(),
        Some(PropertyDescriptor::Data(d)) => extensible && d.writable,
    })
}

pub fn put(o: &JsObjectType, p: &str, v: JsValue, throw: bool) -> Result<(), JErrorType> {
    if !can_put(o, p)? {
        debug!(property = p, throw, "put rejected");
        return if throw {
            Err(JErrorType::TypeError(format!(
                "Cannot assign to read only property '{}'",
                p
            )))
        } else {
            Ok(())
        };
    }
    if let Some(PropertyDescriptor::Data(_)) = get_own_property(o, p) {
        define_own_property(o, p, PropertyDescriptorSetter::new().with_value(v), throw)?;
        return Ok(());
    }
    if let Some(PropertyDescriptor::Accessor(a)) = get_property(o, p)? {
        if let Some(setter) = a.set {
            trace!(property = p, "put through setter");
            call_object(&setter, &JsValue::Object(o.clone()), vec![v])?;
        }
        return Ok(());
    }
    define_own_property(
        o,
        p,
        PropertyDescriptorSetter::new_data(v, true, true, true),
        throw,
    )?;
    Ok(())
}

pub fn delete(o: &JsObjectType, p: &str, throw: bool) -> Result<bool, JErrorType> {
    let desc = match get_own_property(o, p) {
        None => return Ok(true),
        Some(desc) => desc,
    };
    if desc.is_configurable() {
        o.borrow_mut().remove_own_property(p);
        Ok(true)
    } else if throw {
        Err(JErrorType::TypeError(format!(
            "Cannot delete property '{}'",
            p
        )))
    } else {
        debug!(property = p, "delete of non-configurable property ignored");
        Ok(false)
    }
}

/// Converts an object to a primitive by trying `toString`/`valueOf` in hint order.
pub fn default_value(o: &JsObjectType, hint: PreferredType) -> Result<JsValue, JErrorType> {
    let order = match hint {
        PreferredType::String => [TO_STRING_METHOD, VALUE_OF_METHOD],
        PreferredType::Number | PreferredType::Default => [VALUE_OF_METHOD, TO_STRING_METHOD],
    };
    let this = JsValue::Object(o.clone());
    for method in order.iter() {
        let f = get(o, method)?;
        if let JsValue::Object(f) = &f {
            if f.borrow().is_callable() {
                let result = call_object(f, &this, Vec::new())?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
    }
    debug!(?hint, "defaultValue found no primitive");
    Err(JErrorType::TypeError(
        "Cannot convert object to primitive value".to_string(),
    ))
}

pub fn define_own_property(
    o: &JsObjectType,
    p: &str,
    desc: PropertyDescriptorSetter,
    throw: bool,
) -> Result<bool, JErrorType> {
    o.borrow_mut().define_own_property(p, desc, throw)
}

pub fn define_property_or_throw(
    o: &JsObjectType,
    p: &str,
    desc: PropertyDescriptorSetter,
) -> Result<(), JErrorType> {
    define_own_property(o, p, desc, true)?;
    Ok(())
}

pub fn prevent_extensions(o: &JsObjectType) -> bool {
    o.borrow_mut().prevent_extensions()
}

pub fn own_property_keys(o: &JsObjectType) -> Vec<String> {
    o.borrow().own_property_keys()
}
