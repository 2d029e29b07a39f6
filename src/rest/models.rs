use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::State;

/// Raw wire request: open-ended on purpose, validated by the query layer.
#[derive(Deserialize)]
pub struct GraphQlRequest {
    pub query: Option<String>,
    pub variables: Option<Map<String, Value>>,
}

#[derive(Serialize, Deserialize)]
pub struct StateModel {
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatesData {
    pub states: Vec<StateModel>,
}

#[derive(Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// GraphQL result envelope: `data` on success, `errors` on query failure.
#[derive(Serialize, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<StatesData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    pub fn states(states: Vec<State>) -> Self {
        Self {
            data: Some(StatesData {
                states: states
                    .into_iter()
                    .map(|state| StateModel { name: state.name })
                    .collect(),
            }),
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            data: None,
            errors: Some(vec![GraphQlError { message }]),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
