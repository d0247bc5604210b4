use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded token claims.
///
/// The shape is caller-defined: any JSON object decodes into a `Payload`,
/// and checks read only the claims they are configured to read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a claim by name.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Builder-style insert, mostly useful for constructing payloads by hand.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_claims(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(claims: Map<String, Value>) -> Self {
        Payload(claims)
    }
}

impl TryFrom<Value> for Payload {
    type Error = Value;

    /// Only JSON objects are payloads; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(claims) => Ok(Payload(claims)),
            other => Err(other),
        }
    }
}
