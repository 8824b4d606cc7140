use super::share::Share;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Statutory rank of an heir
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HeirType {
    Spouse,
    Child,
    Parent,
    Sibling,
    /// Recipient outside the statutory order (legatee)
    Other,
}

/// Finer-grained relationship to the deceased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Spouse,
    Child,
    AdoptedChild,
    GrandchildAdopted,
    Parent,
    Sibling,
    HalfSibling,
    Other,
}

impl Relationship {
    pub fn display(&self) -> &'static str {
        match self {
            Relationship::Spouse => "Spouse",
            Relationship::Child => "Child",
            Relationship::AdoptedChild => "Adopted child",
            Relationship::GrandchildAdopted => "Grandchild (adopted)",
            Relationship::Parent => "Parent",
            Relationship::Sibling => "Sibling",
            Relationship::HalfSibling => "Half-sibling",
            Relationship::Other => "Non-heir",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A person receiving part of the estate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Heir {
    /// Positional key, unique within one determination
    pub id: String,
    pub name: String,
    pub heir_type: HeirType,
    pub relationship: Relationship,
    /// Statutory share as a fraction, e.g. "1/4"
    #[schemars(with = "String")]
    pub inheritance_share: Share,
    /// Whether the 20% surcharge applies
    pub two_fold_addition: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_adopted: Option<bool>,
}

impl Heir {
    /// Statutory heirs are everyone except other-type recipients.
    pub fn is_statutory(&self) -> bool {
        self.heir_type != HeirType::Other
    }

    pub fn is_spouse(&self) -> bool {
        self.heir_type == HeirType::Spouse
    }

    pub fn is_adopted(&self) -> bool {
        self.is_adopted.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heir(id: &str, heir_type: HeirType, relationship: Relationship, share: Share) -> Heir {
        Heir {
            id: id.to_string(),
            name: id.to_string(),
            heir_type,
            relationship,
            inheritance_share: share,
            two_fold_addition: false,
            is_adopted: None,
        }
    }

    #[test]
    fn spouse_is_statutory() {
        let half = Share::new(1, 2).unwrap();
        let spouse = heir("spouse", HeirType::Spouse, Relationship::Spouse, half);
        assert!(spouse.is_spouse());
        assert!(spouse.is_statutory());
        assert_eq!(spouse.relationship.to_string(), "Spouse");
    }

    #[test]
    fn other_is_not_statutory() {
        let other = heir("non_heir_1", HeirType::Other, Relationship::Other, Share::ZERO);
        assert!(!other.is_statutory());
        assert!(!other.is_adopted());
    }

    #[test]
    fn heir_json_shape() {
        let json = r#"{
            "id": "adopted_1",
            "name": "Adopted child 1",
            "heir_type": "child",
            "relationship": "adopted_child",
            "inheritance_share": 0.25,
            "two_fold_addition": false,
            "is_adopted": true
        }"#;
        let parsed: Heir = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.relationship, Relationship::AdoptedChild);
        assert_eq!(parsed.inheritance_share, Share::new(1, 4).unwrap());
        assert!(parsed.is_adopted());

        let out = serde_json::to_value(&parsed).unwrap();
        assert_eq!(out["inheritance_share"], "1/4");
        assert_eq!(out["heir_type"], "child");
    }

    #[test]
    fn relationship_display() {
        assert_eq!(Relationship::GrandchildAdopted.to_string(), "Grandchild (adopted)");
        assert_eq!(Relationship::HalfSibling.display(), "Half-sibling");
    }
}
