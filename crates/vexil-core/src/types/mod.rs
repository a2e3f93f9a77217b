//! Runtime value types supplied to the flag engine

pub mod value;

pub use value::{PropertyValues, Value};
