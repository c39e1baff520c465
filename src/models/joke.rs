use serde::{Deserialize, Serialize};

/// Envelope returned by the joke API: `{type, value: {...}}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JokeEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: JokeData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct JokeData {
    pub id: i64,
    pub joke: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// JSON body of POST /jokes/custom
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomJokeRequest {
    pub first: String,
    pub last: String,
}
