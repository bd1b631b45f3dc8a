use serde_json::Value;

/// A resolved parameter value, tagged by the declared type it was coerced to.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// JSON node bound to a structured parameter
    Structured(Value),
}

impl BoundValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundValue::Bool(_) => "bool",
            BoundValue::Byte(_) => "i8",
            BoundValue::Short(_) => "i16",
            BoundValue::Int(_) => "i32",
            BoundValue::Long(_) => "i64",
            BoundValue::Float(_) => "f32",
            BoundValue::Double(_) => "f64",
            BoundValue::Char(_) => "char",
            BoundValue::String(_) => "String",
            BoundValue::Structured(_) => "structured",
        }
    }

    /// JSON rendering, used for reports and responses.
    pub fn to_json(&self) -> Value {
        match self {
            BoundValue::Bool(v) => Value::from(*v),
            BoundValue::Byte(v) => Value::from(*v),
            BoundValue::Short(v) => Value::from(*v),
            BoundValue::Int(v) => Value::from(*v),
            BoundValue::Long(v) => Value::from(*v),
            BoundValue::Float(v) => Value::from(*v),
            BoundValue::Double(v) => Value::from(*v),
            BoundValue::Char(c) => Value::String(c.to_string()),
            BoundValue::String(s) => Value::String(s.clone()),
            BoundValue::Structured(v) => v.clone(),
        }
    }
}
