use serde_json::{Map, Value};

/// Key-value settings bag owned by the host.
///
/// Reads see the user value when one is set, otherwise the registered
/// default, otherwise nothing.
pub trait Settings {
    fn int(&self, key: &str) -> Option<i64>;

    /// Register a default. Never overrides a user value.
    fn set_default_int(&mut self, key: &str, value: i64);
}

/// In-process settings bag with user values layered over defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySettings {
    values: Map<String, Value>,
    defaults: Map<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

}

impl Settings for MemorySettings {
    fn int(&self, key: &str) -> Option<i64> {
        self.values
            .get(key)
            .and_then(Value::as_i64)
            .or_else(|| self.defaults.get(key).and_then(Value::as_i64))
    }

    fn set_default_int(&mut self, key: &str, value: i64) {
        self.defaults.insert(key.to_owned(), Value::from(value));
    }
}
