use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::ds::config::config;
use crate::ds::error::JErrorType;
use crate::ds::function_object::JsFunctionObject;
use crate::ds::object_property::{
    accessor_slot, accessor_value, PropertyDescriptor, PropertyDescriptorSetter,
};
use crate::ds::operations::test_and_comparison::same_value;
use crate::ds::value::{JsString, JsValue};

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub const STRING_LENGTH_PROP: &str = "length";

pub const CLASS_NAME_OBJECT: &str = "Object";
pub const CLASS_NAME_FUNCTION: &str = "Function";

/// What an object record wraps, beyond its property table.
pub enum ObjectKind {
    Ordinary,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Function(Rc<dyn JsFunctionObject>),
}

pub struct ObjectBase {
    properties: IndexMap<String, PropertyDescriptor>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            properties: IndexMap::new(),
            is_extensible: true,
            prototype,
        }
    }
}

/// An object record: an insertion-ordered property table, a prototype link and the extensible
/// flag, plus the wrapped primitive or call capability for the non-ordinary kinds.
///
/// Methods here only touch this record. Anything that walks the prototype chain or may call back
/// into the engine lives in `operations::object` and works on a [`JsObjectType`] handle, so that
/// no borrow is held while a getter, setter or conversion method runs.
pub struct ObjectType {
    base: ObjectBase,
    kind: ObjectKind,
}
impl ObjectType {
    pub fn new_ordinary(prototype: Option<JsObjectType>) -> Self {
        ObjectType {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Ordinary,
        }
    }

    pub fn new_boolean_object(value: bool, prototype: Option<JsObjectType>) -> Self {
        ObjectType {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Boolean(value),
        }
    }

    pub fn new_number_object(value: f64, prototype: Option<JsObjectType>) -> Self {
        ObjectType {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Number(value),
        }
    }

    pub fn new_string_object(value: JsString, prototype: Option<JsObjectType>) -> Self {
        let mut base = ObjectBase::new(prototype);
        base.properties.insert(
            STRING_LENGTH_PROP.to_string(),
            PropertyDescriptor::new_data(JsValue::Number(value.len() as f64), false, false, false),
        );
        ObjectType {
            base,
            kind: ObjectKind::String(value),
        }
    }

    pub fn new_function(func: Rc<dyn JsFunctionObject>, prototype: Option<JsObjectType>) -> Self {
        ObjectType {
            base: ObjectBase::new(prototype),
            kind: ObjectKind::Function(func),
        }
    }

    pub fn into_js_object(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn class_name(&self) -> &'static str {
        match self.kind {
            ObjectKind::Function(_) => CLASS_NAME_FUNCTION,
            _ => CLASS_NAME_OBJECT,
        }
    }

    /// The boxed primitive of a wrapper object.
    pub fn primitive_value(&self) -> Option<JsValue> {
        match &self.kind {
            ObjectKind::Boolean(b) => Some(JsValue::Boolean(*b)),
            ObjectKind::Number(n) => Some(JsValue::Number(*n)),
            ObjectKind::String(s) => Some(JsValue::String(s.clone())),
            ObjectKind::Ordinary | ObjectKind::Function(_) => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    pub fn as_function(&self) -> Option<Rc<dyn JsFunctionObject>> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f.clone()),
            _ => None,
        }
    }

    pub fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.base.prototype.clone()
    }

    pub fn is_extensible(&self) -> bool {
        self.base.is_extensible
    }

    pub fn prevent_extensions(&mut self) -> bool {
        self.base.is_extensible = false;
        true
    }

    /// A copy of the own property `property`, never consulting the prototype.
    pub fn get_own_property(&self, property: &str) -> Option<PropertyDescriptor> {
        match self.base.properties.get(property) {
            Some(desc) => Some(desc.clone()),
            None => self.string_get_index_property(property),
        }
    }

    pub fn has_own_property(&self, property: &str) -> bool {
        self.get_own_property(property).is_some()
    }

    /// Own keys in enumeration order. String wrappers list their index keys first.
    pub fn own_property_keys(&self) -> Vec<String> {
        let mut keys = vec![];
        if let ObjectKind::String(s) = &self.kind {
            keys.extend((0..s.len()).map(|idx| idx.to_string()));
        }
        for key in self.base.properties.keys() {
            if !keys.contains(key) {
                keys.push(key.to_string());
            }
        }
        keys
    }

    pub fn define_own_property(
        &mut self,
        property: &str,
        descriptor_setter: PropertyDescriptorSetter,
        throw: bool,
    ) -> Result<bool, JErrorType> {
        ordinary_define_own_property(self, property, descriptor_setter, throw)
    }

    pub(crate) fn remove_own_property(&mut self, property: &str) -> bool {
        self.base.properties.shift_remove(property).is_some()
    }

    fn string_get_index_property(&self, property: &str) -> Option<PropertyDescriptor> {
        if let ObjectKind::String(s) = &self.kind {
            let index = canonical_index(property)?;
            let unit = s.code_unit_at(index)?;
            Some(PropertyDescriptor::new_data(
                JsValue::String(JsString::from_code_units(vec![unit])),
                false,
                true,
                false,
            ))
        } else {
            None
        }
    }
}
impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjectKind::Function(func) => write!(f, "function {}()", func.name()),
            _ => write!(f, "[object {}]", self.class_name()),
        }
    }
}
impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("class", &self.class_name())
            .field("keys", &self.base.properties.keys().collect::<Vec<_>>())
            .field("extensible", &self.base.is_extensible)
            .finish()
    }
}

/// Parses an array-index style key ("0", "17"; not "01" or "-1").
fn canonical_index(property: &str) -> Option<usize> {
    if property.is_empty()
        || !property.bytes().all(|b| b.is_ascii_digit())
        || (property.len() > 1 && property.starts_with('0'))
    {
        return None;
    }
    property.parse::<usize>().ok()
}

pub fn object_create(prototype: Option<JsObjectType>) -> JsObjectType {
    ObjectType::new_ordinary(prototype).into_js_object()
}

/// Replaces the prototype of `o`. Returns false, leaving `o` untouched, when `o` is not
/// extensible or when the new link would make the chain circular.
pub fn set_prototype_of(o: &JsObjectType, prototype: Option<JsObjectType>) -> bool {
    let current = o.borrow().get_prototype_of();
    let unchanged = match (&current, &prototype) {
        (None, None) => true,
        (Some(c), Some(p)) => Rc::ptr_eq(c, p),
        _ => false,
    };
    if unchanged {
        return true;
    }
    if !o.borrow().is_extensible() {
        return false;
    }
    let mut visited = HashSet::new();
    let mut p = prototype.clone();
    let mut depth = 0;
    while let Some(some_p) = p {
        if Rc::ptr_eq(&some_p, o) || !visited.insert(Rc::as_ptr(&some_p)) {
            // To prevent circular chain
            debug!("setPrototypeOf refused: circular prototype chain");
            return false;
        }
        depth += 1;
        if !config().allows_depth(depth) {
            debug!(depth, "setPrototypeOf refused: prototype chain too deep");
            return false;
        }
        p = some_p.borrow().get_prototype_of();
    }
    o.borrow_mut().base.prototype = prototype;
    true
}

fn reject(property: &str, reason: &str, throw: bool) -> Result<bool, JErrorType> {
    debug!(property, reason, throw, "defineOwnProperty rejected");
    if throw {
        Err(JErrorType::TypeError(format!(
            "Cannot define property '{}': {}",
            property, reason
        )))
    } else {
        Ok(false)
    }
}

/// The property definition algorithm.
///
/// Every check runs before the table is touched, so a rejection never leaves a partial update.
pub fn ordinary_define_own_property(
    o: &mut ObjectType,
    property: &str,
    descriptor_setter: PropertyDescriptorSetter,
    throw: bool,
) -> Result<bool, JErrorType> {
    if descriptor_setter.is_data_descriptor() && descriptor_setter.is_accessor_descriptor() {
        return Err(JErrorType::TypeError(format!(
            "Invalid descriptor for '{}': cannot both specify accessors and a value or writable attribute",
            property
        )));
    }
    let current = match o.get_own_property(property) {
        None => {
            if !o.is_extensible() {
                return reject(property, "object is not extensible", throw);
            }
            o.base.properties.insert(
                property.to_string(),
                PropertyDescriptor::new_from_property_descriptor_setter(descriptor_setter),
            );
            return Ok(true);
        }
        Some(current) => current,
    };

    if descriptor_setter.is_empty() {
        return Ok(true);
    }
    if PropertyDescriptorSetter::new_from_property_descriptor(&current).same_as(&descriptor_setter)
    {
        return Ok(true);
    }

    if !current.is_configurable() {
        if descriptor_setter.configurable == Some(true) {
            return reject(property, "property is not configurable", throw);
        }
        if let Some(enumerable) = descriptor_setter.enumerable {
            if enumerable != current.is_enumerable() {
                return reject(
                    property,
                    "cannot change enumerability of a non-configurable property",
                    throw,
                );
            }
        }
    }

    let mut updated = current.clone();
    if descriptor_setter.is_generic_descriptor() {
        // Only flags change; nothing further to validate.
    } else if current.is_data_descriptor() != descriptor_setter.is_data_descriptor() {
        if !current.is_configurable() {
            return reject(
                property,
                "cannot change a non-configurable property between data and accessor",
                throw,
            );
        }
        updated = if current.is_data_descriptor() {
            PropertyDescriptor::new_accessor(
                None,
                None,
                current.is_enumerable(),
                current.is_configurable(),
            )
        } else {
            PropertyDescriptor::new_data(
                JsValue::Undefined,
                false,
                current.is_enumerable(),
                current.is_configurable(),
            )
        };
    } else {
        match &current {
            PropertyDescriptor::Data(cur) if !cur.configurable && !cur.writable => {
                if descriptor_setter.writable == Some(true) {
                    return reject(property, "property is not writable", throw);
                }
                if let Some(value) = &descriptor_setter.value {
                    if !same_value(value, &cur.value) {
                        return reject(property, "cannot change value of a read-only property", throw);
                    }
                }
            }
            PropertyDescriptor::Accessor(cur) if !cur.configurable => {
                if let Some(set) = &descriptor_setter.set {
                    if !same_value(set, &accessor_value(&cur.set)) {
                        return reject(property, "cannot change setter of a non-configurable property", throw);
                    }
                }
                if let Some(get) = &descriptor_setter.get {
                    if !same_value(get, &accessor_value(&cur.get)) {
                        return reject(property, "cannot change getter of a non-configurable property", throw);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(enumerable) = descriptor_setter.enumerable {
        updated.set_enumerable(enumerable);
    }
    if let Some(configurable) = descriptor_setter.configurable {
        updated.set_configurable(configurable);
    }
    match &mut updated {
        PropertyDescriptor::Data(d) => {
            if let Some(value) = descriptor_setter.value {
                d.value = value;
            }
            if let Some(writable) = descriptor_setter.writable {
                d.writable = writable;
            }
        }
        PropertyDescriptor::Accessor(a) => {
            if descriptor_setter.get.is_some() {
                a.get = accessor_slot(descriptor_setter.get);
            }
            if descriptor_setter.set.is_some() {
                a.set = accessor_slot(descriptor_setter.set);
            }
        }
    }
    o.base.properties.insert(property.to_string(), updated);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::operations::object::{can_put, get, get_property};

    #[test]
    fn test_lookup_on_cyclic_chain_fails() {
        let a = object_create(None);
        let b = object_create(Some(a.clone()));
        a.borrow_mut().base.prototype = Some(b.clone());

        assert!(get_property(&b, "x").unwrap_err().is_type_error());
        assert!(get(&a, "x").unwrap_err().is_type_error());
        assert!(can_put(&a, "x").unwrap_err().is_type_error());

        a.borrow_mut().base.prototype = None;
    }

    #[test]
    fn test_own_property_found_before_cycle_is_reached() {
        let a = object_create(None);
        let b = object_create(Some(a.clone()));
        a.borrow_mut().base.prototype = Some(b.clone());
        b.borrow_mut()
            .define_own_property(
                "x",
                PropertyDescriptorSetter::new_data(JsValue::Number(1.0), true, true, true),
                true,
            )
            .unwrap();

        assert_eq!(get(&a, "x").unwrap(), JsValue::Number(1.0));

        a.borrow_mut().base.prototype = None;
    }

    #[test]
    fn test_canonical_index() {
        assert_eq!(canonical_index("0"), Some(0));
        assert_eq!(canonical_index("42"), Some(42));
        assert_eq!(canonical_index("042"), None);
        assert_eq!(canonical_index("-1"), None);
        assert_eq!(canonical_index("1.0"), None);
        assert_eq!(canonical_index(""), None);
    }
}
