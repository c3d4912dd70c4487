//! The shared field-to-label mapping for section items.
//!
//! This is the other half of the single-source-of-truth dispatch: every
//! renderer asks here what an item *says*, and only decides how to place it.

use vitae_types::SectionItems;

/// A renderer-agnostic view of one section item.
///
/// Empty strings mean "field not populated, render nothing" — renderers must
/// not reserve space for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemView {
    /// Lead line, e.g. position or degree.
    pub primary: String,
    /// Companion line, e.g. company or institution.
    pub secondary: String,
    /// Date range plus location, already joined.
    pub meta: String,
    /// Free-flowing description text.
    pub body: String,
    /// Skill proficiency (0-100) when the item is a skill.
    pub level: Option<u8>,
    /// Label/value dump for generic items.
    pub fields: Vec<(String, String)>,
}

/// Default display title for a section kind, used when the section's own
/// title is empty.
pub fn section_label(kind: &str) -> String {
    match kind {
        "education" => "Education".to_string(),
        "experience" => "Experience".to_string(),
        "projects" => "Projects".to_string(),
        "skills" => "Skills".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => "Section".to_string(),
            }
        }
    }
}

fn join_nonempty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => format!("{} - Present", s),
        ("", e) => e.to_string(),
        (s, e) => format!("{} - {}", s, e),
    }
}

/// Maps section items to their displayable views, preserving item order.
pub fn item_views(items: &SectionItems) -> Vec<ItemView> {
    match items {
        SectionItems::Education(list) => list
            .iter()
            .map(|item| ItemView {
                primary: join_nonempty(&[&item.degree, &item.field], " in "),
                secondary: item.institution.trim().to_string(),
                meta: date_range(&item.start_date, &item.end_date),
                body: item.description.trim().to_string(),
                ..ItemView::default()
            })
            .collect(),
        SectionItems::Experience(list) => list
            .iter()
            .map(|item| ItemView {
                primary: item.position.trim().to_string(),
                secondary: join_nonempty(&[&item.company, &item.location], ", "),
                meta: date_range(&item.start_date, &item.end_date),
                body: item.description.trim().to_string(),
                ..ItemView::default()
            })
            .collect(),
        SectionItems::Projects(list) => list
            .iter()
            .map(|item| ItemView {
                primary: item.name.trim().to_string(),
                secondary: join_nonempty(&[&item.role, &item.url], " · "),
                meta: date_range(&item.start_date, &item.end_date),
                body: item.description.trim().to_string(),
                ..ItemView::default()
            })
            .collect(),
        SectionItems::Skills(list) => list
            .iter()
            .map(|item| ItemView {
                primary: item.name.trim().to_string(),
                level: Some(item.level.min(100)),
                ..ItemView::default()
            })
            .collect(),
        SectionItems::Generic { items, .. } => items
            .iter()
            .map(|item| ItemView { fields: item.fields.clone(), ..ItemView::default() })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_types::{ExperienceItem, GenericItem, SkillItem};

    #[test]
    fn experience_view_joins_company_and_location() {
        let items = SectionItems::Experience(vec![ExperienceItem {
            company: "Acme".into(),
            position: "Engineer".into(),
            location: "Oslo".into(),
            start_date: "2020".into(),
            end_date: "".into(),
            description: "Built things.".into(),
        }]);
        let views = item_views(&items);
        assert_eq!(views[0].primary, "Engineer");
        assert_eq!(views[0].secondary, "Acme, Oslo");
        assert_eq!(views[0].meta, "2020 - Present");
        assert_eq!(views[0].body, "Built things.");
    }

    #[test]
    fn skill_levels_are_clamped() {
        let items = SectionItems::Skills(vec![SkillItem { name: "Rust".into(), level: 250 }]);
        assert_eq!(item_views(&items)[0].level, Some(100));
    }

    #[test]
    fn generic_views_carry_field_dumps() {
        let items = SectionItems::Generic {
            kind: "awards".into(),
            items: vec![GenericItem {
                fields: vec![("name".into(), "Best CV".into())],
            }],
        };
        assert_eq!(item_views(&items)[0].fields[0].1, "Best CV");
    }

    #[test]
    fn section_label_capitalizes_unknown_kinds() {
        assert_eq!(section_label("skills"), "Skills");
        assert_eq!(section_label("publications"), "Publications");
    }

    #[test]
    fn item_order_is_preserved() {
        let items = SectionItems::Skills(vec![
            SkillItem { name: "B".into(), level: 10 },
            SkillItem { name: "A".into(), level: 20 },
        ]);
        let names: Vec<_> = item_views(&items).into_iter().map(|v| v.primary).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
