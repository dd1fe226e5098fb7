use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ds::error::JErrorType;
use crate::ds::value::JsValue;

/// The binding capability the engine's scopes expose to reference resolution.
pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;

    fn get_binding_value(&self, name: &str, strict: bool) -> Result<JsValue, JErrorType>;

    fn set_mutable_binding(
        &mut self,
        name: &str,
        value: JsValue,
        strict: bool,
    ) -> Result<(), JErrorType>;
}

pub type JsEnvironmentRecordType = Rc<RefCell<dyn EnvironmentRecord>>;

#[derive(Debug, PartialEq)]
pub enum BindingFlag {
    NoDelete,
    IsImmutable,
}

/// A plain name-to-value scope.
pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, Option<JsValue>>,
    binding_flags: HashMap<String, Vec<BindingFlag>>,
}
impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
            binding_flags: HashMap::new(),
        }
    }

    pub fn into_env_record(self) -> JsEnvironmentRecordType {
        Rc::new(RefCell::new(self))
    }

    pub fn create_mutable_binding(&mut self, name: &str, can_delete: bool) {
        if !self.has_binding(name) {
            self.bindings.insert(name.to_string(), None);
            if can_delete {
                self.binding_flags.insert(name.to_string(), vec![]);
            } else {
                self.binding_flags
                    .insert(name.to_string(), vec![BindingFlag::NoDelete]);
            }
        }
    }

    pub fn create_immutable_binding(&mut self, name: &str) {
        if !self.has_binding(name) {
            self.bindings.insert(name.to_string(), None);
            self.binding_flags
                .insert(name.to_string(), vec![BindingFlag::IsImmutable]);
        }
    }

    /// Sets the first value of a binding. Returns false if it was already initialized.
    pub fn initialize_binding(&mut self, name: &str, value: JsValue) -> bool {
        match self.bindings.get_mut(name) {
            Some(slot) if slot.is_none() => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    pub fn delete_binding(&mut self, name: &str) -> bool {
        if !self.has_binding(name) {
            return true;
        }
        if self.has_flag(name, BindingFlag::NoDelete) || self.has_flag(name, BindingFlag::IsImmutable) {
            return false;
        }
        self.bindings.remove(name);
        self.binding_flags.remove(name);
        true
    }

    fn has_flag(&self, name: &str, flag: BindingFlag) -> bool {
        self.binding_flags
            .get(name)
            .map_or(false, |flags| flags.contains(&flag))
    }
}
impl Default for DeclarativeEnvironmentRecord {
    fn default() -> Self {
        Self::new()
    }
}
impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn get_binding_value(&self, name: &str, strict: bool) -> Result<JsValue, JErrorType> {
        match self.bindings.get(name) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => {
                if strict {
                    Err(JErrorType::ReferenceError(format!(
                        "'{}' is not initialized",
                        name
                    )))
                } else {
                    Ok(JsValue::Undefined)
                }
            }
            None => Err(JErrorType::ReferenceError(format!(
                "'{}' is not defined",
                name
            ))),
        }
    }

    fn set_mutable_binding(
        &mut self,
        name: &str,
        value: JsValue,
        strict: bool,
    ) -> Result<(), JErrorType> {
        if !self.has_binding(name) {
            return Err(JErrorType::ReferenceError(format!(
                "'{}' is not defined",
                name
            )));
        }
        if self.has_flag(name, BindingFlag::IsImmutable) {
            if strict {
                return Err(JErrorType::TypeError(format!(
                    "Assignment to constant variable '{}'",
                    name
                )));
            }
            return Ok(());
        }
        self.bindings.insert(name.to_string(), Some(value));
        Ok(())
    }
}
