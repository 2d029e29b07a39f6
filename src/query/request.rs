use serde_json::{Map, Value};
use thiserror::Error;

/// Validated query input: everything the resolver needs, strongly typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatesRequest {
    pub filter: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("query missing or empty")]
    MissingQuery,
    #[error("missing filter variable in request")]
    MissingFilter,
    #[error("filter variable must be a string, got {0}")]
    FilterNotText(&'static str),
}

impl StatesRequest {
    /// Validate the loosely-typed wire request.
    ///
    /// The query document is required but otherwise opaque; the service
    /// answers its single root field. An empty `filter` string is accepted
    /// and selects everything, while an absent or null `filter` is rejected.
    pub fn decode(
        query: Option<&str>,
        variables: Option<&Map<String, Value>>,
    ) -> Result<Self, RequestError> {
        let query = query.unwrap_or("");
        if query.is_empty() {
            return Err(RequestError::MissingQuery);
        }

        let variables = variables.ok_or(RequestError::MissingFilter)?;
        match variables.get("filter") {
            None | Some(Value::Null) => Err(RequestError::MissingFilter),
            Some(Value::String(filter)) => Ok(Self {
                filter: filter.clone(),
            }),
            Some(other) => Err(RequestError::FilterNotText(json_type_name(other))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
