use thiserror::Error;

use crate::ds::value::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    /// A value thrown by an engine-supplied callable, passed through untouched.
    #[error("Uncaught exception: {0}.")]
    Thrown(JsValue),
}
impl JErrorType {
    pub fn is_type_error(&self) -> bool {
        matches!(self, JErrorType::TypeError(_))
    }

    pub fn is_reference_error(&self) -> bool {
        matches!(self, JErrorType::ReferenceError(_))
    }
}
