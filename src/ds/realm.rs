//! Well-known intrinsic objects the core needs to link new objects to.
//!
//! The engine creates and installs these; until it does, wrapper objects and descriptor objects
//! are created without a prototype. Objects are `Rc`-based, so the realm is per thread.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use crate::ds::object::JsObjectType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownIntrinsics {
    ObjectPrototype,
    BooleanPrototype,
    NumberPrototype,
    StringPrototype,
}

pub struct CodeRealm {
    pub intrinsics: HashMap<WellKnownIntrinsics, JsObjectType>,
}
impl CodeRealm {
    pub fn new() -> Self {
        CodeRealm {
            intrinsics: HashMap::new(),
        }
    }

    pub fn get_intrinsics_value(&self, int_name: &WellKnownIntrinsics) -> Option<&JsObjectType> {
        self.intrinsics.get(int_name)
    }
}
impl Default for CodeRealm {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static CURRENT_REALM: RefCell<CodeRealm> = RefCell::new(CodeRealm::new());
}

/// Installs an intrinsic, returning the one it replaces.
pub fn install_intrinsic(
    int_name: WellKnownIntrinsics,
    object: JsObjectType,
) -> Option<JsObjectType> {
    trace!(?int_name, "installing intrinsic");
    CURRENT_REALM.with(|realm| realm.borrow_mut().intrinsics.insert(int_name, object))
}

pub fn get_intrinsic(int_name: WellKnownIntrinsics) -> Option<JsObjectType> {
    CURRENT_REALM.with(|realm| realm.borrow().get_intrinsics_value(&int_name).cloned())
}

pub fn remove_intrinsic(int_name: WellKnownIntrinsics) -> Option<JsObjectType> {
    CURRENT_REALM.with(|realm| realm.borrow_mut().intrinsics.remove(&int_name))
}
