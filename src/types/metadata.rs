// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Human-editable metadata documents attached to catalogs, datasets and projects.
//!
//! The contracts treat a document as opaque once it has decoded: the JSON
//! shape below is the only validation applied.

use crate::error::{ContractError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub attributes_groups: Vec<AttributesGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributesGroup {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: String,
}

impl Metadata {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ContractError::MalformedEncoding(format!("metadata JSON: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ContractError::Codec(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ContractError::Codec(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes_groups.is_empty()
    }

    pub fn group(&self, title: &str) -> Option<&AttributesGroup> {
        self.attributes_groups.iter().find(|g| g.title == title)
    }

    /// Looks up an attribute by group title and attribute id.
    pub fn attribute(&self, group_title: &str, attribute_id: &str) -> Option<&Attribute> {
        self.group(group_title)?
            .attributes
            .iter()
            .find(|a| a.id == attribute_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "attributesGroups": [
            {
                "title": "Use",
                "description": "How the data may be used",
                "attributes": [
                    { "id": "use_restricted", "name": "Restricted", "value": "true" },
                    { "id": "use_commercial", "value": "false" }
                ]
            },
            { "title": "Classification" }
        ]
    }"#;

    #[test]
    fn test_decode_sample() {
        let metadata = Metadata::from_json(SAMPLE.as_bytes()).unwrap();

        assert_eq!(metadata.attributes_groups.len(), 2);
        assert_eq!(
            metadata.attribute("Use", "use_commercial").map(|a| a.value.as_str()),
            Some("false")
        );
        assert!(metadata.group("Classification").unwrap().attributes.is_empty());
        assert!(metadata.attribute("Use", "missing").is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let metadata = Metadata::from_json(SAMPLE.as_bytes()).unwrap();
        let json = metadata.to_json().unwrap();
        let decoded = Metadata::from_json(json.as_bytes()).unwrap();

        assert_eq!(metadata, decoded);
    }

    #[test]
    fn test_binary_roundtrip() {
        let metadata = Metadata::from_json(SAMPLE.as_bytes()).unwrap();
        let bytes = crate::codec::encode(&metadata).unwrap();
        let decoded: Metadata = crate::codec::decode(&bytes).unwrap();

        assert_eq!(metadata, decoded);
    }

    #[test]
    fn test_structural_errors() {
        // Group without a title.
        let err = Metadata::from_json(br#"{"attributesGroups":[{"attributes":[]}]}"#);
        assert!(matches!(err, Err(ContractError::MalformedEncoding(_))));

        let err = Metadata::from_json(b"{not json");
        assert!(matches!(err, Err(ContractError::MalformedEncoding(_))));
    }

    #[test]
    fn test_empty_object_is_empty_document() {
        let metadata = Metadata::from_json(b"{}").unwrap();
        assert!(metadata.is_empty());
    }
}
