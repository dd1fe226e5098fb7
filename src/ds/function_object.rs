use std::fmt;

use crate::ds::error::JErrorType;
use crate::ds::value::JsValue;

/// The call capability of a callable object.
///
/// The engine implements this for its function objects. Getters, setters, `toString` and
/// `valueOf` are all invoked through it.
pub trait JsFunctionObject {
    fn call(&self, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType>;

    fn name(&self) -> &str {
        ""
    }
}

pub type NativeFunctionType = dyn Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>;

/// A callable backed by a Rust closure.
pub struct NativeFunction {
    name: String,
    func: Box<NativeFunctionType>,
}
impl NativeFunction {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + 'static,
    {
        NativeFunction {
            name: name.to_string(),
            func: Box::new(func),
        }
    }
}
impl JsFunctionObject for NativeFunction {
    fn call(&self, this: &JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        (self.func)(this, args)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}
