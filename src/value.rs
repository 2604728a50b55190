use serde::{Deserialize, Serialize};

/// Runtime kind of a JSON value returned by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool,
    /// A string.
    String,
    /// A number representable as `i64`.
    Int,
    /// Any other number.
    Float,
    /// A JSON object.
    Object,
    /// A JSON array.
    List,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &serde_json::Value) -> ValueKind {
        match value {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Bool,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Number(n) if n.is_i64() => ValueKind::Int,
            serde_json::Value::Number(_) => ValueKind::Float,
            serde_json::Value::Object(_) => ValueKind::Object,
            serde_json::Value::Array(_) => ValueKind::List,
        }
    }
}

/// Type requested by a typed accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// A boolean flag.
    Bool,
    /// A string flag.
    String,
    /// An integer flag.
    Int,
    /// A floating-point flag.
    Float,
    /// A structured flag (object or list).
    Struct,
}

impl ValueType {
    /// Returns `true` if a value of `kind` is acceptable for this type.
    ///
    /// Integers are valid floats. The reverse does not hold: integer flags reject every
    /// floating-point value, even integral ones such as `100.0`.
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            ValueType::Bool => kind == ValueKind::Bool,
            ValueType::String => kind == ValueKind::String,
            ValueType::Int => kind == ValueKind::Int,
            ValueType::Float => matches!(kind, ValueKind::Int | ValueKind::Float),
            ValueType::Struct => matches!(kind, ValueKind::Object | ValueKind::List),
        }
    }
}

/// Rust types served by the typed accessors.
pub(crate) trait FlagType: Sized {
    const TYPE: ValueType;

    /// Encode the default value for the request payload.
    fn to_wire(&self) -> serde_json::Value;

    /// Decode a resolved value. Callers check [`ValueType::accepts`] first; `None` here still
    /// means a type mismatch.
    fn from_wire(value: serde_json::Value) -> Option<Self>;
}

impl FlagType for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn to_wire(&self) -> serde_json::Value {
        serde_json::Value::Bool(*self)
    }

    fn from_wire(value: serde_json::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FlagType for String {
    const TYPE: ValueType = ValueType::String;

    fn to_wire(&self) -> serde_json::Value {
        serde_json::Value::String(self.clone())
    }

    fn from_wire(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FlagType for i64 {
    const TYPE: ValueType = ValueType::Int;

    fn to_wire(&self) -> serde_json::Value {
        (*self).into()
    }

    fn from_wire(value: serde_json::Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FlagType for f64 {
    const TYPE: ValueType = ValueType::Float;

    fn to_wire(&self) -> serde_json::Value {
        // NaN and infinities have no JSON representation.
        serde_json::Number::from_f64(*self)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }

    fn from_wire(value: serde_json::Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FlagType for serde_json::Value {
    const TYPE: ValueType = ValueType::Struct;

    fn to_wire(&self) -> serde_json::Value {
        self.clone()
    }

    fn from_wire(value: serde_json::Value) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FlagType, ValueKind, ValueType};

    #[test]
    fn classifies_numbers() {
        assert_eq!(ValueKind::of(&json!(100)), ValueKind::Int);
        assert_eq!(ValueKind::of(&json!(-3)), ValueKind::Int);
        assert_eq!(ValueKind::of(&json!(100.25)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!(100.0)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Float);
    }

    #[test]
    fn integer_rejects_floats() {
        assert!(!ValueType::Int.accepts(ValueKind::Float));
        assert!(ValueType::Int.accepts(ValueKind::Int));
    }

    #[test]
    fn float_accepts_integers() {
        assert!(ValueType::Float.accepts(ValueKind::Int));
        assert_eq!(f64::from_wire(json!(100)), Some(100.0));
    }

    #[test]
    fn struct_accepts_objects_and_lists() {
        assert!(ValueType::Struct.accepts(ValueKind::Object));
        assert!(ValueType::Struct.accepts(ValueKind::List));
        assert!(!ValueType::Struct.accepts(ValueKind::String));
        assert!(!ValueType::Struct.accepts(ValueKind::Null));
    }

    #[test]
    fn non_finite_default_is_sent_as_null() {
        assert_eq!(f64::NAN.to_wire(), serde_json::Value::Null);
        assert_eq!(1200.25_f64.to_wire(), json!(1200.25));
    }
}
