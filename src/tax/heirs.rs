use crate::core::{FamilyStructure, Heir, HeirType, Relationship, Share};

/// Determine statutory heirs and their shares from the family composition.
///
/// The spouse (if any) comes first, then the single applicable rank
/// (children, else parents, else siblings), then non-heir placeholders.
/// Input is assumed to have passed `validate_family_structure`.
pub fn determine_heirs(family: &FamilyStructure) -> Vec<Heir> {
    let mut heirs = Vec::new();

    let others_share = if family.spouse_exists {
        let spouse_share = spouse_statutory_share(family);
        log::debug!("Spouse statutory share {}", spouse_share);
        heirs.push(Heir {
            id: "spouse".to_string(),
            name: "Spouse".to_string(),
            heir_type: HeirType::Spouse,
            relationship: Relationship::Spouse,
            inheritance_share: spouse_share,
            two_fold_addition: false,
            is_adopted: None,
        });
        spouse_share.complement()
    } else {
        Share::ONE
    };

    if family.has_children() {
        push_children(&mut heirs, family, others_share);
    } else if family.has_parents() {
        push_parents(&mut heirs, family, others_share);
    } else if family.has_siblings() {
        push_siblings(&mut heirs, family, others_share);
    } else if !family.spouse_exists {
        log::debug!("No statutory heirs in family structure");
    }

    for n in 1..=family.non_heirs() {
        heirs.push(Heir {
            id: format!("non_heir_{n}"),
            name: format!("Non-heir {n}"),
            heir_type: HeirType::Other,
            relationship: Relationship::Other,
            inheritance_share: Share::ZERO,
            two_fold_addition: true,
            is_adopted: None,
        });
    }

    heirs
}

fn spouse_statutory_share(family: &FamilyStructure) -> Share {
    let (numer, denom) = if family.has_children() {
        (1, 2)
    } else if family.has_parents() {
        (2, 3)
    } else if family.has_siblings() {
        (3, 4)
    } else {
        (1, 1)
    };
    Share::new(numer, denom).unwrap_or(Share::ONE)
}

fn push_children(heirs: &mut Vec<Heir>, family: &FamilyStructure, others_share: Share) {
    let total = family.biological_children()
        + family.ordinary_adopted_children()
        + family.grandchild_adopted();
    let each = others_share.divide_by(total);
    log::debug!("{} children at {} each", total, each);

    let categories = [
        (family.biological_children(), Relationship::Child),
        (family.ordinary_adopted_children(), Relationship::AdoptedChild),
        (family.grandchild_adopted(), Relationship::GrandchildAdopted),
    ];

    for (count, relationship) in categories {
        let (prefix, label) = match relationship {
            Relationship::AdoptedChild => ("adopted", "Adopted child"),
            Relationship::GrandchildAdopted => ("grandchild_adopted", "Grandchild (adopted)"),
            _ => ("child", "Child"),
        };
        let adopted = relationship != Relationship::Child;
        for n in 1..=count {
            heirs.push(Heir {
                id: format!("{prefix}_{n}"),
                name: format!("{label} {n}"),
                heir_type: HeirType::Child,
                relationship,
                inheritance_share: each,
                // Grandchildren adopted as children skip a generation
                two_fold_addition: relationship == Relationship::GrandchildAdopted,
                is_adopted: Some(adopted),
            });
        }
    }
}

fn push_parents(heirs: &mut Vec<Heir>, family: &FamilyStructure, others_share: Share) {
    let count = family.parents();
    let each = others_share.divide_by(count);
    log::debug!("{} parents at {} each", count, each);

    for n in 1..=count {
        heirs.push(Heir {
            id: format!("parent_{n}"),
            name: format!("Parent {n}"),
            heir_type: HeirType::Parent,
            relationship: Relationship::Parent,
            inheritance_share: each,
            two_fold_addition: false,
            is_adopted: None,
        });
    }
}

/// Half siblings take half a full sibling's portion.
fn push_siblings(heirs: &mut Vec<Heir>, family: &FamilyStructure, others_share: Share) {
    let full = family.full_siblings();
    let half = family.half_siblings();
    // Count in half units: full siblings are 2, half siblings 1.
    let half_units = full * 2 + half;
    let full_share = others_share.scale(2, half_units);
    let half_share = full_share.divide_by(2);
    log::debug!(
        "{} full siblings at {}, {} half siblings at {}",
        full,
        full_share,
        half,
        half_share
    );

    let groups = [
        (full, Relationship::Sibling, full_share, "sibling", "Sibling"),
        (half, Relationship::HalfSibling, half_share, "half_sibling", "Half-sibling"),
    ];
    for (count, relationship, share, prefix, label) in groups {
        for n in 1..=count {
            heirs.push(Heir {
                id: format!("{prefix}_{n}"),
                name: format!("{label} {n}"),
                heir_type: HeirType::Sibling,
                relationship,
                inheritance_share: share,
                two_fold_addition: true,
                is_adopted: None,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(n: u64, d: u64) -> Share {
        Share::new(n, d).unwrap()
    }

    fn statutory_total(heirs: &[Heir]) -> Share {
        heirs
            .iter()
            .filter(|h| h.is_statutory())
            .map(|h| h.inheritance_share)
            .sum()
    }

    #[test]
    fn spouse_and_two_children() {
        let heirs = determine_heirs(&FamilyStructure {
            spouse_exists: true,
            children_count: 2,
            ..Default::default()
        });

        let ids: Vec<_> = heirs.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["spouse", "child_1", "child_2"]);
        assert_eq!(heirs[0].inheritance_share, share(1, 2));
        assert_eq!(heirs[1].inheritance_share, share(1, 4));
        assert_eq!(heirs[2].inheritance_share, share(1, 4));
        assert!(heirs.iter().all(|h| !h.two_fold_addition));
        assert_eq!(heirs[1].is_adopted, Some(false));
        assert_eq!(heirs[0].is_adopted, None);
    }

    #[test]
    fn spouse_half_children_half_for_any_count() {
        for children in 1..=9 {
            let heirs = determine_heirs(&FamilyStructure {
                spouse_exists: true,
                children_count: children,
                adopted_children_count: children / 2,
                grandchild_adopted_count: children / 4,
                ..Default::default()
            });
            assert_eq!(heirs[0].inheritance_share, share(1, 2));
            let children_total: Share = heirs
                .iter()
                .filter(|h| h.heir_type == HeirType::Child)
                .map(|h| h.inheritance_share)
                .sum();
            assert_eq!(children_total, share(1, 2), "children = {}", children);
        }
    }

    #[test]
    fn child_categories_and_surcharge() {
        let heirs = determine_heirs(&FamilyStructure {
            children_count: 4,
            adopted_children_count: 2,
            grandchild_adopted_count: 1,
            ..Default::default()
        });

        let ids: Vec<_> = heirs.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["child_1", "child_2", "adopted_1", "grandchild_adopted_1"]);
        assert!(heirs.iter().all(|h| h.inheritance_share == share(1, 4)));

        let adopted = &heirs[2];
        assert_eq!(adopted.relationship, Relationship::AdoptedChild);
        assert_eq!(adopted.is_adopted, Some(true));
        assert!(!adopted.two_fold_addition);

        let grandchild = &heirs[3];
        assert_eq!(grandchild.relationship, Relationship::GrandchildAdopted);
        assert_eq!(grandchild.is_adopted, Some(true));
        assert!(grandchild.two_fold_addition);
        assert_eq!(grandchild.name, "Grandchild (adopted) 1");
    }

    #[test]
    fn spouse_and_parents() {
        let heirs = determine_heirs(&FamilyStructure {
            spouse_exists: true,
            parents_alive: 2,
            siblings_count: 3,
            ..Default::default()
        });
        assert_eq!(heirs.len(), 3);
        assert_eq!(heirs[0].inheritance_share, share(2, 3));
        assert_eq!(heirs[1].id, "parent_1");
        assert_eq!(heirs[1].inheritance_share, share(1, 6));
        assert!(!heirs[1].two_fold_addition);
        assert_eq!(statutory_total(&heirs), Share::ONE);
    }

    #[test]
    fn spouse_and_siblings_with_half_sibling() {
        let heirs = determine_heirs(&FamilyStructure {
            spouse_exists: true,
            siblings_count: 2,
            half_siblings_count: 1,
            ..Default::default()
        });

        assert_eq!(heirs[0].inheritance_share, share(3, 4));
        // 1/4 over 2.5 units
        assert_eq!(heirs[1].inheritance_share, share(1, 10));
        assert_eq!(heirs[2].inheritance_share, share(1, 10));
        assert_eq!(heirs[3].id, "half_sibling_1");
        assert_eq!(heirs[3].relationship, Relationship::HalfSibling);
        assert_eq!(heirs[3].inheritance_share, share(1, 20));
        assert!(heirs[1..].iter().all(|h| h.two_fold_addition));
        assert_eq!(statutory_total(&heirs), Share::ONE);
    }

    #[test]
    fn only_half_siblings() {
        let heirs = determine_heirs(&FamilyStructure {
            half_siblings_count: 3,
            ..Default::default()
        });
        assert_eq!(heirs.len(), 3);
        assert!(heirs.iter().all(|h| h.inheritance_share == share(1, 3)));
    }

    #[test]
    fn spouse_alone_takes_everything() {
        let heirs = determine_heirs(&FamilyStructure {
            spouse_exists: true,
            non_heirs_count: 1,
            ..Default::default()
        });
        assert_eq!(heirs.len(), 2);
        assert_eq!(heirs[0].inheritance_share, Share::ONE);
        assert_eq!(heirs[1].heir_type, HeirType::Other);
    }

    #[test]
    fn children_take_precedence_over_parents_and_siblings() {
        let heirs = determine_heirs(&FamilyStructure {
            children_count: 3,
            parents_alive: 2,
            siblings_count: 2,
            ..Default::default()
        });
        assert_eq!(heirs.len(), 3);
        assert!(heirs.iter().all(|h| h.heir_type == HeirType::Child));
        assert_eq!(statutory_total(&heirs), Share::ONE);
    }

    #[test]
    fn non_heirs_appended_with_zero_share() {
        let heirs = determine_heirs(&FamilyStructure {
            parents_alive: 1,
            non_heirs_count: 2,
            ..Default::default()
        });
        let others: Vec<_> = heirs.iter().filter(|h| !h.is_statutory()).collect();
        assert_eq!(others.len(), 2);
        assert_eq!(others[1].id, "non_heir_2");
        assert!(others.iter().all(|h| h.inheritance_share.is_zero() && h.two_fold_addition));
        assert_eq!(statutory_total(&heirs), Share::ONE);
    }

    #[test]
    fn empty_family_yields_no_statutory_heirs() {
        let heirs = determine_heirs(&FamilyStructure::default());
        assert!(heirs.is_empty());
    }
}
