use serde::Serialize;
use serde_json::Value as JsonValue;

/// Outbound request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// JSON document, sent with `Content-Type: application/json`.
    Json(JsonValue),
    /// UTF-8 text sent as-is.
    Text(String),
    /// Raw bytes sent as-is.
    Bytes(Vec<u8>),
}

impl Body {
    /// Serializes any `Serialize` value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        serde_json::to_value(value).map(Self::Json)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<()> for Body {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<JsonValue> for Body {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::Body;

    #[derive(Serialize)]
    struct Order {
        id: u32,
        sku: &'static str,
    }

    #[test]
    fn json_from_serializable() {
        let body = Body::json(&Order { id: 7, sku: "A-1" }).expect("order must serialize");
        assert_eq!(body, Body::Json(json!({"id": 7, "sku": "A-1"})));
    }

    #[test]
    fn unit_is_empty() {
        let body: Body = ().into();
        assert!(body.is_empty());
        assert!(!Body::text("").is_empty());
    }
}
