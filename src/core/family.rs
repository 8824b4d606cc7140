use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Family composition of the deceased, as supplied by the caller.
///
/// Counts are signed so that negative input reaches the validator and is
/// reported per field instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FamilyStructure {
    /// Whether a surviving spouse exists
    pub spouse_exists: bool,
    /// All children, including adopted children
    pub children_count: i32,
    /// Adopted children (subset of `children_count`)
    pub adopted_children_count: i32,
    /// Grandchildren adopted as children (subset of `adopted_children_count`)
    pub grandchild_adopted_count: i32,
    /// Surviving parents (0 to 2)
    pub parents_alive: i32,
    /// Full siblings
    pub siblings_count: i32,
    /// Half siblings (sharing one parent)
    pub half_siblings_count: i32,
    /// Legatees outside the statutory order
    pub non_heirs_count: i32,
}

impl FamilyStructure {
    pub fn has_children(&self) -> bool {
        self.children_count > 0
    }

    pub fn has_parents(&self) -> bool {
        self.parents_alive > 0
    }

    pub fn has_siblings(&self) -> bool {
        self.siblings_count > 0 || self.half_siblings_count > 0
    }

    /// True when at least one person falls within the statutory order.
    pub fn has_statutory_heirs(&self) -> bool {
        self.spouse_exists || self.has_children() || self.has_parents() || self.has_siblings()
    }

    pub fn biological_children(&self) -> u64 {
        count(self.children_count - self.adopted_children_count)
    }

    /// Adopted children who are not grandchildren of the deceased.
    pub fn ordinary_adopted_children(&self) -> u64 {
        count(self.adopted_children_count - self.grandchild_adopted_count)
    }

    pub fn grandchild_adopted(&self) -> u64 {
        count(self.grandchild_adopted_count)
    }

    pub fn parents(&self) -> u64 {
        count(self.parents_alive)
    }

    pub fn full_siblings(&self) -> u64 {
        count(self.siblings_count)
    }

    pub fn half_siblings(&self) -> u64 {
        count(self.half_siblings_count)
    }

    pub fn non_heirs(&self) -> u64 {
        count(self.non_heirs_count)
    }
}

fn count(n: i32) -> u64 {
    n.max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let family: FamilyStructure =
            serde_json::from_str(r#"{"spouse_exists": true, "children_count": 2}"#).unwrap();
        assert!(family.spouse_exists);
        assert_eq!(family.children_count, 2);
        assert_eq!(family.parents_alive, 0);
        assert_eq!(family.non_heirs_count, 0);
    }

    #[test]
    fn child_categories() {
        let family = FamilyStructure {
            children_count: 5,
            adopted_children_count: 3,
            grandchild_adopted_count: 1,
            ..Default::default()
        };
        assert_eq!(family.biological_children(), 2);
        assert_eq!(family.ordinary_adopted_children(), 2);
        assert_eq!(family.grandchild_adopted(), 1);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let family = FamilyStructure {
            siblings_count: -2,
            ..Default::default()
        };
        assert_eq!(family.full_siblings(), 0);
        assert!(!family.has_siblings());
        assert!(!family.has_statutory_heirs());
    }

    #[test]
    fn presence_flags() {
        let family = FamilyStructure {
            half_siblings_count: 1,
            ..Default::default()
        };
        assert!(family.has_siblings());
        assert!(family.has_statutory_heirs());
        assert!(!family.has_parents());
    }
}
