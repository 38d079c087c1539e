use serde::{Deserialize, Serialize};

use super::wire;

/// A persisted grouping of projects, meant to correspond to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(deserialize_with = "wire::string_id")]
    pub id: String,
    pub name: String,
    /// Icon name or image path stored by the admin flow.
    #[serde(default, alias = "image_url", deserialize_with = "wire::nullable_string")]
    pub image: String,
    #[serde(default, rename = "odsId", alias = "ods_id", skip_serializing_if = "Option::is_none")]
    pub ods_id: Option<u8>,
}

/// Body of a section create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSection {
    pub name: String,
    pub image: String,
    #[serde(rename = "odsId")]
    pub ods_id: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_id_and_image_alias() {
        let s: Section =
            serde_json::from_str(r#"{"id": 4, "name": "Hambre cero", "image_url": "FaLeaf"}"#)
                .unwrap();
        assert_eq!(s.id, "4");
        assert_eq!(s.image, "FaLeaf");
        assert_eq!(s.ods_id, None);
    }

    #[test]
    fn new_section_uses_camel_case_ods_id() {
        let body = serde_json::to_value(NewSection {
            name: "Hambre cero".into(),
            image: "FaLeaf".into(),
            ods_id: 2,
        })
        .unwrap();
        assert_eq!(body["odsId"], 2);
        assert_eq!(body["image"], "FaLeaf");
    }
}
