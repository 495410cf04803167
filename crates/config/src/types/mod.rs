//! Value types shared by the store and the environment resolver.
//!
//! Responsibilities:
//! - Define `Value`, the closed sum type held by the configuration store.
//! - Define `Scalar`, the subset of values environment sources may produce.
//!
//! Does NOT handle:
//! - Lookup, merge or precedence rules (see `store` and `environment`).
//!
//! Invariants:
//! - Every `Scalar` converts losslessly into a `Value`.
//! - Opaque values are shared by handle; the store never deep-copies them.

mod scalar;
mod value;

pub use scalar::Scalar;
pub use value::{OpaqueValue, Value};
