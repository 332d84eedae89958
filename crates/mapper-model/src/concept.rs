//! Ontology catalog entries and mapping kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// An externally defined concept, identified by its IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptDescriptor {
    /// Globally unique identifier.
    #[serde(rename = "IRI")]
    pub iri: String,
    /// Human-readable label.
    pub label: String,
}

impl ConceptDescriptor {
    /// Creates a descriptor.
    pub fn new(iri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            label: label.into(),
        }
    }
}

/// What kind of concept a column is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConceptKind {
    #[serde(rename = "individual")]
    Individual,
    #[serde(rename = "class")]
    Class,
    #[serde(rename = "objectProperty")]
    ObjectRelation,
    #[default]
    #[serde(rename = "dataProperty")]
    DataProperty,
}

impl ConceptKind {
    /// All kinds, in display order.
    pub const ALL: [ConceptKind; 4] = [
        ConceptKind::Individual,
        ConceptKind::Class,
        ConceptKind::ObjectRelation,
        ConceptKind::DataProperty,
    ];

    /// Stable identifier used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Class => "class",
            Self::ObjectRelation => "objectProperty",
            Self::DataProperty => "dataProperty",
        }
    }

    /// Display label for selection lists.
    pub fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Class => "Class",
            Self::ObjectRelation => "Object Relation",
            Self::DataProperty => "Data Property",
        }
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConceptKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(s) || kind.label().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| ModelError::UnknownConceptKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_format() {
        let json = r#"[{"IRI":"http://example.org/Person","label":"Person"}]"#;
        let parsed: Vec<ConceptDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            vec![ConceptDescriptor::new("http://example.org/Person", "Person")]
        );
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("objectProperty".parse::<ConceptKind>().unwrap(), ConceptKind::ObjectRelation);
        assert_eq!("Data Property".parse::<ConceptKind>().unwrap(), ConceptKind::DataProperty);
        assert!("relation".parse::<ConceptKind>().is_err());
    }

    #[test]
    fn test_kind_default() {
        assert_eq!(ConceptKind::default(), ConceptKind::DataProperty);
        assert_eq!(
            serde_json::to_string(&ConceptKind::ObjectRelation).unwrap(),
            "\"objectProperty\""
        );
    }
}
