use super::core::BodyParam;
use crate::error::BindError;
use crate::resolver::BoundValue;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline parameters before heap allocation.
/// Handlers rarely bind more than a handful of body parameters.
pub const MAX_INLINE_ARGS: usize = 8;

/// Resolved parameters of one request, keyed by source name.
pub type ArgVec = SmallVec<[(Arc<str>, Option<BoundValue>); MAX_INLINE_ARGS]>;

/// Every body-bound parameter of a handler, resolved for one request.
///
/// Absent optional parameters are kept as `None` so the handler can tell
/// "declared but absent" from "never declared".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: ArgVec,
}

impl BoundArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: Option<BoundValue>) {
        self.values.push((Arc::from(name), value));
    }

    /// The resolved value for `name`, if declared and present.
    #[inline]
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&BoundValue> {
        self.values
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Whether `name` was declared for the handler.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Typed access by source name.
    pub fn get<T: BodyParam>(&self, name: &str) -> Result<T, BindError> {
        T::from_bound(self.raw(name).cloned(), name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&BoundValue>)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// JSON object of every parameter; absent ones render as `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(k, v)| (k.to_string(), v.map_or(Value::Null, BoundValue::to_json)))
            .collect();
        Value::Object(map)
    }
}
