//! JSON messages exchanged with the grid server

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Position;
use crate::Result;

/// Payload line decoded from the `/listening` stream
///
/// Wire shape: `{"type": "position", "position": {"x": 2, "y": 3}}`.
/// Any other `type` value decodes to [`StreamMessage::Unknown`]. Only JSON
/// objects are accepted at both levels; arrays are rejected rather than read
/// positionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    /// New active cell
    Position { position: Position },

    #[serde(other)]
    Unknown,
}

impl StreamMessage {
    /// Decode one trimmed payload line
    pub fn from_line(line: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        let fields = as_object(&value, "message")?;

        if fields.get("type").and_then(Value::as_str) == Some("position") {
            let position = fields
                .get("position")
                .ok_or_else(|| serde_json::Error::missing_field("position"))?;
            as_object(position, "position")?;
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Position carried by this message, if it is a position update
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Position { position } => Some(*position),
            Self::Unknown => None,
        }
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        serde_json::Error::custom(format!("{} must be a JSON object, got {}", what, value)).into()
    })
}

/// Body of `POST /update`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRequest {
    pub position: Position,
}

impl UpdateRequest {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_position_message() {
        let msg = StreamMessage::from_line(r#"{"type":"position","position":{"x":2,"y":3}}"#).unwrap();
        assert_eq!(msg.position(), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let msg = StreamMessage::from_line(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(msg, StreamMessage::Unknown);
        assert_eq!(msg.position(), None);
    }

    #[test]
    fn test_unknown_type_with_position_field() {
        let msg = StreamMessage::from_line(r#"{"type":"other","position":{"x":1,"y":1}}"#).unwrap();
        assert_eq!(msg.position(), None);
    }

    #[test]
    fn test_extra_fields_tolerated() {
        let msg = StreamMessage::from_line(
            r#"{"type":"position","position":{"x":4,"y":6},"sender":"abc"}"#,
        )
        .unwrap();
        assert_eq!(msg.position(), Some(Position::new(4, 6)));
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let msg = StreamMessage::from_line(r#"{"type":"position","position":{"x":12,"y":-3}}"#).unwrap();
        assert_eq!(msg.position(), Some(Position::new(12, -3)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = StreamMessage::from_line(r#"{"type": "position", "position": {x: 1, y: 2}"#).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn test_position_type_without_position_is_error() {
        assert!(StreamMessage::from_line(r#"{"type":"position"}"#).is_err());
    }

    #[test]
    fn test_non_object_is_error() {
        assert!(StreamMessage::from_line("42").is_err());
        assert!(StreamMessage::from_line(r#""position""#).is_err());
        assert!(StreamMessage::from_line("null").is_err());

        // Arrays would otherwise be read positionally as tag and fields
        let err = StreamMessage::from_line(r#"["position",{"x":3,"y":4}]"#).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn test_position_must_be_object() {
        assert!(StreamMessage::from_line(r#"{"type":"position","position":[6,1]}"#).is_err());
        assert!(StreamMessage::from_line(r#"{"type":"position","position":"2,3"}"#).is_err());
        assert!(StreamMessage::from_line(r#"{"type":"position","position":null}"#).is_err());
    }

    #[test]
    fn test_missing_type_is_error() {
        assert!(StreamMessage::from_line(r#"{"position":{"x":1,"y":1}}"#).is_err());
    }

    #[test]
    fn test_update_request_body() {
        let body = serde_json::to_string(&UpdateRequest::new(Position::new(3, 4))).unwrap();
        assert_eq!(body, r#"{"position":{"x":3,"y":4}}"#);
    }
}
