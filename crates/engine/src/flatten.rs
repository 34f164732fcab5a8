//! Decoding a JSON response into host attributes.
//!
//! Missing and `null` fields become the zero value of their attribute type,
//! unless the field is required. A present value of the wrong type is a
//! decode error; nothing is silently dropped.

use bitbucket_types::{AttrType, BindingSpec, FieldSpec, PAGINATION_FIELDS, ReadError, ResponseShape};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Top-level attributes of one successful read, in schema order.
pub type Attributes = IndexMap<String, Value>;

/// Flattens a decoded response according to the binding's response shape.
pub fn flatten(spec: &BindingSpec, body: &Value) -> Result<Attributes, ReadError> {
    let decoder = Decoder { spec };
    let object = decoder.expect_object(body, "response")?;
    let mut attributes = Attributes::new();
    match spec.response {
        ResponseShape::Collection { attribute, item } => {
            let values = match object.get("values") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(elements)) => decoder.list(elements, item, attribute)?,
                Some(other) => return Err(decoder.mismatch(attribute, "list", other)),
            };
            attributes.insert(attribute.to_string(), Value::Array(values));
            decoder.fields(object, PAGINATION_FIELDS, "", &mut attributes)?;
        }
        ResponseShape::Scalar { fields } => decoder.fields(object, fields, "", &mut attributes)?,
        ResponseShape::Summary { attribute } => {
            attributes.insert(attribute.to_string(), Value::Object(object.clone()));
        }
    }
    Ok(attributes)
}

/// Zero value of an attribute type.
pub fn zero_value(attr_type: &AttrType) -> Value {
    match attr_type {
        AttrType::String => Value::String(String::new()),
        AttrType::Integer => Value::from(0),
        AttrType::Number => Value::from(0.0),
        AttrType::Bool => Value::Bool(false),
        AttrType::Map => Value::Object(Map::new()),
        AttrType::StringList | AttrType::List(_) => Value::Array(Vec::new()),
        AttrType::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|field| (field.name.to_string(), zero_value(&field.attr_type)))
                .collect(),
        ),
    }
}

struct Decoder<'a> {
    spec: &'a BindingSpec,
}

impl Decoder<'_> {
    fn fields<M>(&self, object: &Map<String, Value>, fields: &[FieldSpec], prefix: &str, out: &mut M) -> Result<(), ReadError>
    where
        M: Extend<(String, Value)>,
    {
        for field in fields {
            let path = join_path(prefix, field.name);
            let value = match lookup(object, field.source) {
                Some(value) => self.convert(value, &field.attr_type, &path)?,
                None if field.required => {
                    return Err(ReadError::contract(
                        self.spec.name,
                        format!("required field '{path}' is absent from the response"),
                    ));
                }
                None => zero_value(&field.attr_type),
            };
            out.extend([(field.name.to_string(), value)]);
        }
        Ok(())
    }

    fn convert(&self, value: &Value, attr_type: &AttrType, path: &str) -> Result<Value, ReadError> {
        match (attr_type, value) {
            (AttrType::String, Value::String(_))
            | (AttrType::Bool, Value::Bool(_))
            | (AttrType::Number, Value::Number(_))
            | (AttrType::Map, Value::Object(_)) => Ok(value.clone()),
            (AttrType::Integer, Value::Number(number)) => integral(number)
                .map(Value::from)
                .ok_or_else(|| self.mismatch(path, attr_type.label(), value)),
            (AttrType::StringList, Value::Array(elements)) => elements
                .iter()
                .enumerate()
                .map(|(index, element)| match element {
                    Value::String(_) => Ok(element.clone()),
                    Value::Null => Ok(Value::String(String::new())),
                    other => Err(self.mismatch(&format!("{path}[{index}]"), "string", other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (AttrType::Object(fields), Value::Object(object)) => {
                let mut nested = Map::new();
                self.fields(object, fields, path, &mut nested)?;
                Ok(Value::Object(nested))
            }
            (AttrType::List(fields), Value::Array(elements)) => self.list(elements, fields, path).map(Value::Array),
            _ => Err(self.mismatch(path, attr_type.label(), value)),
        }
    }

    /// Flattens list elements positionally; each element must be an object.
    fn list(&self, elements: &[Value], fields: &[FieldSpec], path: &str) -> Result<Vec<Value>, ReadError> {
        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let element_path = format!("{path}[{index}]");
                let object = self.expect_object(element, &element_path)?;
                let mut nested = Map::new();
                self.fields(object, fields, &element_path, &mut nested)?;
                Ok(Value::Object(nested))
            })
            .collect()
    }

    fn expect_object<'v>(&self, value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, ReadError> {
        value.as_object().ok_or_else(|| self.mismatch(path, "object", value))
    }

    fn mismatch(&self, path: &str, expected: &str, found: &Value) -> ReadError {
        ReadError::decode(
            self.spec.name,
            format!(
                "decoder {}: '{path}' expected {expected}, found {}",
                self.spec.decoder_name(),
                json_type(found)
            ),
        )
    }
}

/// Follows a dotted source path; `null` anywhere along it counts as absent.
fn lookup<'v>(object: &'v Map<String, Value>, source: &str) -> Option<&'v Value> {
    let mut segments = source.split('.');
    let mut current = object.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    (!current.is_null()).then_some(current)
}

fn integral(number: &serde_json::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
            .map(|float| float as i64)
    })
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
