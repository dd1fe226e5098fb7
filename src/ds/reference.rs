use std::fmt;

use tracing::debug;

use crate::ds::env_record::JsEnvironmentRecordType;
use crate::ds::error::JErrorType;
use crate::ds::object::JsObjectType;
use crate::ds::object_property::PropertyDescriptor;
use crate::ds::operations::object::{
    call_object, can_put, get, get_own_property, get_property, get_v, put,
};
use crate::ds::operations::type_conversion::to_object;
use crate::ds::value::JsValue;

/// Reference base type.
pub enum ReferenceBase {
    /// Reference to a property on an object.
    Object(JsObjectType),
    /// Reference to a property of a Boolean, Number or String value.
    Primitive(JsValue),
    /// Reference to a binding in an environment record.
    Environment(JsEnvironmentRecordType),
    /// Unresolvable reference (identifier not found).
    Unresolvable,
}
impl Clone for ReferenceBase {
    fn clone(&self) -> Self {
        match self {
            ReferenceBase::Object(o) => ReferenceBase::Object(o.clone()),
            ReferenceBase::Primitive(v) => ReferenceBase::Primitive(v.clone()),
            ReferenceBase::Environment(e) => ReferenceBase::Environment(e.clone()),
            ReferenceBase::Unresolvable => ReferenceBase::Unresolvable,
        }
    }
}
impl fmt::Debug for ReferenceBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceBase::Object(o) => write!(f, "Object({})", JsValue::Object(o.clone())),
            ReferenceBase::Primitive(v) => write!(f, "Primitive({:?})", v),
            ReferenceBase::Environment(_) => write!(f, "Environment"),
            ReferenceBase::Unresolvable => write!(f, "Unresolvable"),
        }
    }
}

/// A resolved name that has not been read or written yet.
#[derive(Debug, Clone)]
pub struct Reference {
    base: ReferenceBase,
    referenced_name: String,
    strict: bool,
}
impl Reference {
    pub fn new(base: ReferenceBase, referenced_name: &str, strict: bool) -> Self {
        Reference {
            base,
            referenced_name: referenced_name.to_string(),
            strict,
        }
    }

    /// A member access `base[name]`. Objects and boxable primitives make property references,
    /// anything else is unresolvable.
    pub fn new_property(base: &JsValue, referenced_name: &str, strict: bool) -> Self {
        let base = match base {
            JsValue::Object(o) => ReferenceBase::Object(o.clone()),
            JsValue::Boolean(_) | JsValue::Number(_) | JsValue::String(_) => {
                ReferenceBase::Primitive(base.clone())
            }
            JsValue::Undefined | JsValue::Null => ReferenceBase::Unresolvable,
        };
        Self::new(base, referenced_name, strict)
    }

    pub fn new_unresolvable(referenced_name: &str, strict: bool) -> Self {
        Self::new(ReferenceBase::Unresolvable, referenced_name, strict)
    }

    pub fn get_base(&self) -> &ReferenceBase {
        &self.base
    }

    pub fn get_referenced_name(&self) -> &str {
        &self.referenced_name
    }

    pub fn is_strict_reference(&self) -> bool {
        self.strict
    }

    pub fn has_primitive_base(&self) -> bool {
        matches!(self.base, ReferenceBase::Primitive(_))
    }

    pub fn is_property_reference(&self) -> bool {
        matches!(
            self.base,
            ReferenceBase::Object(_) | ReferenceBase::Primitive(_)
        )
    }

    pub fn is_unresolvable_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }

    fn unresolvable_error(&self) -> JErrorType {
        JErrorType::ReferenceError(format!("'{}' is not defined", self.referenced_name))
    }
}

/// What name or member resolution hands to the engine.
#[derive(Debug, Clone)]
pub enum ReferenceOrValue {
    Reference(Reference),
    Value(JsValue),
}
impl From<Reference> for ReferenceOrValue {
    fn from(r: Reference) -> Self {
        ReferenceOrValue::Reference(r)
    }
}
impl From<JsValue> for ReferenceOrValue {
    fn from(v: JsValue) -> Self {
        ReferenceOrValue::Value(v)
    }
}

pub fn get_value(v: &ReferenceOrValue) -> Result<JsValue, JErrorType> {
    let r = match v {
        ReferenceOrValue::Value(v) => return Ok(v.clone()),
        ReferenceOrValue::Reference(r) => r,
    };
    match &r.base {
        ReferenceBase::Unresolvable => {
            debug!(name = r.get_referenced_name(), "getValue on unresolvable reference");
            Err(r.unresolvable_error())
        }
        ReferenceBase::Primitive(base) => get_v(base, &r.referenced_name),
        ReferenceBase::Object(o) => get(o, &r.referenced_name),
        ReferenceBase::Environment(env) => env
            .borrow()
            .get_binding_value(&r.referenced_name, r.strict),
    }
}

/// Assigns through a reference. `global_object` receives writes to unresolvable names in
/// non-strict code.
pub fn put_value(
    v: &ReferenceOrValue,
    w: JsValue,
    global_object: Option<&JsObjectType>,
) -> Result<(), JErrorType> {
    let r = match v {
        ReferenceOrValue::Value(v) => {
            return Err(JErrorType::ReferenceError(format!(
                "Invalid assignment target '{}'",
                v
            )))
        }
        ReferenceOrValue::Reference(r) => r,
    };
    match &r.base {
        ReferenceBase::Unresolvable => match global_object {
            Some(global) if !r.strict => put(global, &r.referenced_name, w, false),
            _ => {
                debug!(
                    name = r.get_referenced_name(),
                    strict = r.strict,
                    "putValue on unresolvable reference"
                );
                Err(r.unresolvable_error())
            }
        },
        ReferenceBase::Primitive(base) => put_on_primitive(base, &r.referenced_name, w, r.strict),
        ReferenceBase::Object(o) => put(o, &r.referenced_name, w, r.strict),
        ReferenceBase::Environment(env) => {
            env.borrow_mut()
                .set_mutable_binding(&r.referenced_name, w, r.strict)
        }
    }
}

/// Assignment to a property of a primitive. The boxed wrapper is discarded, so only an inherited
/// setter has an observable effect; it runs with the primitive itself as `this`.
fn put_on_primitive(base: &JsValue, p: &str, w: JsValue, throw: bool) -> Result<(), JErrorType> {
    let o = to_object(base)?;
    if !can_put(&o, p)? {
        return reject_primitive_put(p, throw);
    }
    if let Some(PropertyDescriptor::Data(_)) = get_own_property(&o, p) {
        return reject_primitive_put(p, throw);
    }
    match get_property(&o, p)? {
        Some(PropertyDescriptor::Accessor(a)) => {
            if let Some(setter) = a.set {
                call_object(&setter, base, vec![w])?;
            }
            Ok(())
        }
        _ => reject_primitive_put(p, throw),
    }
}

fn reject_primitive_put(p: &str, throw: bool) -> Result<(), JErrorType> {
    debug!(property = p, throw, "put on primitive base ignored");
    if throw {
        Err(JErrorType::TypeError(format!(
            "Cannot create property '{}' on primitive value",
            p
        )))
    } else {
        Ok(())
    }
}
