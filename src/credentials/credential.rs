use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// API key record issued by the data commons.
///
/// Fields other than `api_key` and `key_id` are kept as-is so the record
/// can be posted back to the token endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub api_key: String,
    pub key_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Credential {
    pub fn new(api_key: impl Into<String>, key_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            key_id: key_id.into(),
            extra: Map::new(),
        }
    }

    /// The credential as a plain JSON object.
    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert("api_key".to_owned(), Value::String(self.api_key.clone()));
        object.insert("key_id".to_owned(), Value::String(self.key_id.clone()));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Credential;

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = json!({"api_key": "a.b.c", "key_id": "kid-1", "scope": ["data", "user"]});
        let credential: Credential = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(credential.api_key, "a.b.c");
        assert_eq!(credential.key_id, "kid-1");
        assert_eq!(credential.extra.get("scope"), Some(&json!(["data", "user"])));
        assert_eq!(credential.to_value(), raw);
        assert_eq!(serde_json::to_value(&credential).unwrap(), raw);
    }

    #[test]
    fn test_missing_key_id_is_rejected() {
        let res = serde_json::from_value::<Credential>(json!({"api_key": "a.b.c"}));
        assert!(res.is_err());
    }
}
