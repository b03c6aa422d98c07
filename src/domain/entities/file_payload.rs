use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A file payload as submitted by a source application.
///
/// Immutable once constructed; there is no update or versioning operation.
/// The JSON contract is camelCase with the media type under `"type"` and
/// `contents` transported as base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,

    #[serde(default)]
    pub source_application_id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "sourceApplicationInstanceId must not be blank"))]
    pub source_application_instance_id: Option<String>,

    #[serde(rename = "type", default)]
    pub media_type: Option<String>,

    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(with = "base64_bytes")]
    #[schema(value_type = String, format = Byte)]
    #[validate(length(min = 1, message = "contents must not be empty"))]
    pub contents: Vec<u8>,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
