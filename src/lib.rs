//! # just-types - The value and type system of the just JavaScript engine
//!
//! The abstract core every other part of the engine is built on:
//! - Language values and UTF-16 strings
//! - Property descriptors and the ordinary object protocol (lookup, read, write, delete,
//!   property definition, default-value coercion)
//! - References, the resolved-but-not-dereferenced result of name and member resolution
//! - Type conversions and the equality predicates
//!
//! Parsing, evaluation and the built-in library live elsewhere; they reach this crate through
//! the operations in [`ds::operations`] and the [`ds::env_record::EnvironmentRecord`] and
//! [`ds::function_object::JsFunctionObject`] traits.
//!
//! ## Quick Start
//!
//! ### Defining and reading properties
//!
//! ```
//! use just_types::ds::object::object_create;
//! use just_types::ds::object_property::PropertyDescriptorSetter;
//! use just_types::ds::operations::object::{define_own_property, get, put};
//! use just_types::ds::value::JsValue;
//!
//! let o = object_create(None);
//! define_own_property(
//!     &o,
//!     "x",
//!     PropertyDescriptorSetter::new_data(JsValue::Number(1.0), false, true, true),
//!     true,
//! )
//! .unwrap();
//!
//! // Writes to a non-writable property are silently ignored outside strict mode.
//! put(&o, "x", JsValue::Number(2.0), false).unwrap();
//! assert_eq!(get(&o, "x").unwrap(), JsValue::Number(1.0));
//!
//! // And rejected in strict mode.
//! assert!(put(&o, "x", JsValue::Number(2.0), true).is_err());
//! ```
//!
//! ### Type conversion
//!
//! ```
//! use just_types::ds::operations::type_conversion::{to_int32, to_string};
//! use just_types::ds::value::JsValue;
//!
//! assert_eq!(to_int32(&JsValue::Number(2147483648.0)).unwrap(), -2147483648);
//! assert_eq!(to_int32(&JsValue::new_string("  0x10 ")).unwrap(), 16);
//! assert_eq!(to_string(&JsValue::Number(1e21)).unwrap().to_string(), "1e+21");
//! ```
//!
//! ### Callables
//!
//! Getters, setters, `toString` and `valueOf` are engine-supplied callables. A Rust closure can
//! stand in for one:
//!
//! ```
//! use std::rc::Rc;
//! use just_types::ds::function_object::NativeFunction;
//! use just_types::ds::object::{object_create, ObjectType};
//! use just_types::ds::object_property::PropertyDescriptorSetter;
//! use just_types::ds::operations::object::{define_own_property, get};
//! use just_types::ds::value::JsValue;
//!
//! let getter = ObjectType::new_function(
//!     Rc::new(NativeFunction::new("answer", |_this, _args| Ok(JsValue::Number(42.0)))),
//!     None,
//! )
//! .into_js_object();
//! let o = object_create(None);
//! define_own_property(
//!     &o,
//!     "answer",
//!     PropertyDescriptorSetter::new().with_get(JsValue::Object(getter)),
//!     true,
//! )
//! .unwrap();
//! assert_eq!(get(&o, "answer").unwrap(), JsValue::Number(42.0));
//! ```
//!
//! ## Architecture
//!
//! - **[`ds::value`]** - `JsValue` and `JsString`
//! - **[`ds::object`]** - Object records and the property definition algorithm
//! - **[`ds::object_property`]** - Property descriptors and their object form
//! - **[`ds::reference`]** - References, `get_value` and `put_value`
//! - **[`ds::operations`]** - Object protocol, type conversion and comparison operations
//! - **[`ds::realm`]** - Well-known intrinsic prototypes installed by the engine
//! - **[`ds::config`]** - Object model limits

#[macro_use]
extern crate lazy_static;

pub mod ds;
