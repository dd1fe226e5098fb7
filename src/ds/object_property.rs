use crate::ds::error::JErrorType;
use crate::ds::object::{JsObjectType, ObjectType};
use crate::ds::operations::object::{define_own_property, get, has_own_property};
use crate::ds::operations::test_and_comparison::{is_callable, same_value};
use crate::ds::operations::type_conversion::to_boolean;
use crate::ds::realm::{get_intrinsic, WellKnownIntrinsics};
use crate::ds::value::JsValue;

pub const DESC_FIELD_VALUE: &str = "value";
pub const DESC_FIELD_WRITABLE: &str = "writable";
pub const DESC_FIELD_GET: &str = "get";
pub const DESC_FIELD_SET: &str = "set";
pub const DESC_FIELD_ENUMERABLE: &str = "enumerable";
pub const DESC_FIELD_CONFIGURABLE: &str = "configurable";

#[derive(Clone, Debug)]
pub struct PropertyDescriptorData {
    pub value: JsValue,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

#[derive(Clone, Debug)]
pub struct PropertyDescriptorAccessor {
    pub get: Option<JsObjectType>,
    pub set: Option<JsObjectType>,
    pub enumerable: bool,
    pub configurable: bool,
}

/// A stored property. Always exactly one of the two shapes, with every field set.
#[derive(Clone, Debug)]
pub enum PropertyDescriptor {
    Data(PropertyDescriptorData),
    Accessor(PropertyDescriptorAccessor),
}
impl PropertyDescriptor {
    pub fn new_data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor::Data(PropertyDescriptorData {
            value,
            writable,
            enumerable,
            configurable,
        })
    }

    pub fn new_accessor(
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        PropertyDescriptor::Accessor(PropertyDescriptorAccessor {
            get,
            set,
            enumerable,
            configurable,
        })
    }

    /// Materializes a partial descriptor as a new property. Absent flags become `false`, an
    /// absent value becomes `undefined` and absent accessors become `None`. A generic descriptor
    /// produces a data property.
    pub(crate) fn new_from_property_descriptor_setter(desc: PropertyDescriptorSetter) -> Self {
        let enumerable = desc.enumerable.unwrap_or(false);
        let configurable = desc.configurable.unwrap_or(false);
        if desc.is_accessor_descriptor() {
            PropertyDescriptor::new_accessor(
                accessor_slot(desc.get),
                accessor_slot(desc.set),
                enumerable,
                configurable,
            )
        } else {
            PropertyDescriptor::new_data(
                desc.value.unwrap_or(JsValue::Undefined),
                desc.writable.unwrap_or(false),
                enumerable,
                configurable,
            )
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data(d) => d.enumerable,
            PropertyDescriptor::Accessor(a) => a.enumerable,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data(d) => d.configurable,
            PropertyDescriptor::Accessor(a) => a.configurable,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        matches!(self, PropertyDescriptor::Data(_))
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        matches!(self, PropertyDescriptor::Accessor(_))
    }

    pub(crate) fn set_enumerable(&mut self, value: bool) {
        match self {
            PropertyDescriptor::Data(d) => d.enumerable = value,
            PropertyDescriptor::Accessor(a) => a.enumerable = value,
        }
    }

    pub(crate) fn set_configurable(&mut self, value: bool) {
        match self {
            PropertyDescriptor::Data(d) => d.configurable = value,
            PropertyDescriptor::Accessor(a) => a.configurable = value,
        }
    }
}

/// A partial descriptor: the input to property definition and the result of
/// [`to_property_descriptor`]. `None` means the field is absent, which is different from a field
/// that is present and `false`/`undefined`.
#[derive(Clone, Debug, Default)]
pub struct PropertyDescriptorSetter {
    pub value: Option<JsValue>,
    pub writable: Option<bool>,
    pub get: Option<JsValue>,
    pub set: Option<JsValue>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}
impl PropertyDescriptorSetter {
    /// An empty, generic descriptor.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptorSetter {
            value: Some(value),
            writable: Some(writable),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    pub fn new_accessor(
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        PropertyDescriptorSetter {
            value: None,
            writable: None,
            get: Some(accessor_value(&get)),
            set: Some(accessor_value(&set)),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// A complete partial descriptor describing a stored property.
    pub fn new_from_property_descriptor(desc: &PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Data(d) => {
                Self::new_data(d.value.clone(), d.writable, d.enumerable, d.configurable)
            }
            PropertyDescriptor::Accessor(a) => {
                Self::new_accessor(a.get.clone(), a.set.clone(), a.enumerable, a.configurable)
            }
        }
    }

    pub fn with_value(mut self, value: JsValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    pub fn with_get(mut self, get: JsValue) -> Self {
        self.get = Some(get);
        self
    }

    pub fn with_set(mut self, set: JsValue) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.writable.is_none()
            && self.get.is_none()
            && self.set.is_none()
            && self.enumerable.is_none()
            && self.configurable.is_none()
    }

    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    /// Field-wise equality over present fields. The sets of present fields must match.
    pub fn same_as(&self, other: &PropertyDescriptorSetter) -> bool {
        same_optional_value(&self.value, &other.value)
            && self.writable == other.writable
            && same_optional_value(&self.get, &other.get)
            && same_optional_value(&self.set, &other.set)
            && self.enumerable == other.enumerable
            && self.configurable == other.configurable
    }
}

pub fn is_data_descriptor(desc: Option<&PropertyDescriptorSetter>) -> bool {
    desc.map_or(false, |d| d.is_data_descriptor())
}

pub fn is_accessor_descriptor(desc: Option<&PropertyDescriptorSetter>) -> bool {
    desc.map_or(false, |d| d.is_accessor_descriptor())
}

pub fn is_generic_descriptor(desc: Option<&PropertyDescriptorSetter>) -> bool {
    desc.map_or(false, |d| d.is_generic_descriptor())
}

pub fn same_descriptor(x: &PropertyDescriptorSetter, y: &PropertyDescriptorSetter) -> bool {
    x.same_as(y)
}

fn same_optional_value(a: &Option<JsValue>, b: &Option<JsValue>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_value(a, b),
        _ => false,
    }
}

/// Anything other than an object in an accessor field means "no function".
pub(crate) fn accessor_slot(value: Option<JsValue>) -> Option<JsObjectType> {
    match value {
        Some(JsValue::Object(o)) => Some(o),
        _ => None,
    }
}

pub(crate) fn accessor_value(slot: &Option<JsObjectType>) -> JsValue {
    match slot {
        Some(o) => JsValue::Object(o.clone()),
        None => JsValue::Undefined,
    }
}

/// Presents a stored descriptor as an ordinary object with `value`/`writable` or `get`/`set`,
/// plus `enumerable` and `configurable`. Absent descriptors become `undefined`.
pub fn from_property_descriptor(desc: Option<&PropertyDescriptor>) -> Result<JsValue, JErrorType> {
    let desc = match desc {
        None => return Ok(JsValue::Undefined),
        Some(d) => d,
    };
    let obj =
        ObjectType::new_ordinary(get_intrinsic(WellKnownIntrinsics::ObjectPrototype)).into_js_object();
    let mut fields = Vec::with_capacity(4);
    match desc {
        PropertyDescriptor::Data(d) => {
            fields.push((DESC_FIELD_VALUE, d.value.clone()));
            fields.push((DESC_FIELD_WRITABLE, JsValue::Boolean(d.writable)));
        }
        PropertyDescriptor::Accessor(a) => {
            fields.push((DESC_FIELD_GET, accessor_value(&a.get)));
            fields.push((DESC_FIELD_SET, accessor_value(&a.set)));
        }
    }
    fields.push((DESC_FIELD_ENUMERABLE, JsValue::Boolean(desc.is_enumerable())));
    fields.push((DESC_FIELD_CONFIGURABLE, JsValue::Boolean(desc.is_configurable())));
    for (name, value) in fields {
        define_own_property(
            &obj,
            name,
            PropertyDescriptorSetter::new_data(value, true, true, true),
            false,
        )?;
    }
    Ok(JsValue::Object(obj))
}

/// Reads a partial descriptor off an ordinary object. Only fields present as own properties are
/// set; their values are read through `[[Get]]`, so accessors on the descriptor object fire.
pub fn to_property_descriptor(obj: &JsValue) -> Result<PropertyDescriptorSetter, JErrorType> {
    let o = match obj {
        JsValue::Object(o) => o,
        _ => {
            return Err(JErrorType::TypeError(format!(
                "Property description must be an object: {}",
                obj
            )))
        }
    };
    let mut desc = PropertyDescriptorSetter::new();
    if has_own_property(o, DESC_FIELD_ENUMERABLE) {
        desc.enumerable = Some(to_boolean(&get(o, DESC_FIELD_ENUMERABLE)?));
    }
    if has_own_property(o, DESC_FIELD_CONFIGURABLE) {
        desc.configurable = Some(to_boolean(&get(o, DESC_FIELD_CONFIGURABLE)?));
    }
    if has_own_property(o, DESC_FIELD_VALUE) {
        desc.value = Some(get(o, DESC_FIELD_VALUE)?);
    }
    if has_own_property(o, DESC_FIELD_WRITABLE) {
        desc.writable = Some(to_boolean(&get(o, DESC_FIELD_WRITABLE)?));
    }
    if has_own_property(o, DESC_FIELD_GET) {
        let getter = get(o, DESC_FIELD_GET)?;
        if !getter.is_undefined() && !is_callable(&getter) {
            return Err(JErrorType::TypeError(format!(
                "Getter must be a function: {}",
                getter
            )));
        }
        desc.get = Some(getter);
    }
    if has_own_property(o, DESC_FIELD_SET) {
        let setter = get(o, DESC_FIELD_SET)?;
        if !setter.is_undefined() && !is_callable(&setter) {
            return Err(JErrorType::TypeError(format!(
                "Setter must be a function: {}",
                setter
            )));
        }
        desc.set = Some(setter);
    }
    if desc.is_accessor_descriptor() && desc.is_data_descriptor() {
        return Err(JErrorType::TypeError(
            "Invalid property descriptor. Cannot both specify accessors and a value or writable attribute"
                .to_string(),
        ));
    }
    Ok(desc)
}
