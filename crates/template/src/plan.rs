//! Per-variant layout plans.
//!
//! A `LayoutPlan` is the single description of how a variant arranges the
//! page. Both the visual layout renderer and the structured PDF builder
//! consume these plans, so adding a variant is one entry here rather than
//! parallel edits in two pipelines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    Standard,
    Modern,
    Minimalist,
    Creative,
    Professional,
    Executive,
    Nordic,
    CreativePro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Column arrangement of the section flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrangement {
    SingleColumn,
    /// A tinted sidebar taking `fraction` of the content width.
    Sidebar { side: Side, fraction: f32 },
}

/// Declarative arrangement data for one variant. Variants differ only in
/// arrangement; the content they surface is identical by construction.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub variant: LayoutVariant,
    pub arrangement: Arrangement,
    /// Section kinds routed into the sidebar, when one exists.
    pub sidebar_kinds: &'static [&'static str],
    /// Draw a full-width accent band across the top of the header.
    pub accent_band: bool,
    /// Draw a rule under each section heading.
    pub heading_rule: bool,
    /// Keep the header photo slot even when no profile image is present.
    /// Intentional for the formal variants; everywhere else the header
    /// collapses with zero layout shift.
    pub reserve_photo_slot: bool,
    /// Photo edge length in points when a photo (or reserved slot) renders.
    pub photo_size: f32,
}

static PLANS: [LayoutPlan; 8] = [
    LayoutPlan {
        variant: LayoutVariant::Standard,
        arrangement: Arrangement::SingleColumn,
        sidebar_kinds: &[],
        accent_band: false,
        heading_rule: true,
        reserve_photo_slot: false,
        photo_size: 72.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Modern,
        arrangement: Arrangement::Sidebar { side: Side::Left, fraction: 0.32 },
        sidebar_kinds: &["skills"],
        accent_band: true,
        heading_rule: false,
        reserve_photo_slot: false,
        photo_size: 72.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Minimalist,
        arrangement: Arrangement::SingleColumn,
        sidebar_kinds: &[],
        accent_band: false,
        heading_rule: false,
        reserve_photo_slot: false,
        photo_size: 64.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Creative,
        arrangement: Arrangement::SingleColumn,
        sidebar_kinds: &[],
        accent_band: true,
        heading_rule: false,
        reserve_photo_slot: false,
        photo_size: 80.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Professional,
        arrangement: Arrangement::Sidebar { side: Side::Right, fraction: 0.30 },
        sidebar_kinds: &["skills"],
        accent_band: false,
        heading_rule: true,
        reserve_photo_slot: false,
        photo_size: 72.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Executive,
        arrangement: Arrangement::SingleColumn,
        sidebar_kinds: &[],
        accent_band: false,
        heading_rule: true,
        reserve_photo_slot: true,
        photo_size: 80.0,
    },
    LayoutPlan {
        variant: LayoutVariant::Nordic,
        arrangement: Arrangement::Sidebar { side: Side::Left, fraction: 0.35 },
        sidebar_kinds: &["skills"],
        accent_band: false,
        heading_rule: false,
        reserve_photo_slot: true,
        photo_size: 80.0,
    },
    LayoutPlan {
        variant: LayoutVariant::CreativePro,
        arrangement: Arrangement::Sidebar { side: Side::Left, fraction: 0.30 },
        sidebar_kinds: &["skills"],
        accent_band: true,
        heading_rule: false,
        reserve_photo_slot: false,
        photo_size: 80.0,
    },
];

/// The plan for a variant. Infallible: every variant has exactly one plan,
/// enforced by the exhaustiveness test below.
pub fn plan_for(variant: LayoutVariant) -> &'static LayoutPlan {
    PLANS
        .iter()
        .find(|p| p.variant == variant)
        .expect("every layout variant has a plan")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LayoutVariant; 8] = [
        LayoutVariant::Standard,
        LayoutVariant::Modern,
        LayoutVariant::Minimalist,
        LayoutVariant::Creative,
        LayoutVariant::Professional,
        LayoutVariant::Executive,
        LayoutVariant::Nordic,
        LayoutVariant::CreativePro,
    ];

    #[test]
    fn every_variant_has_a_plan() {
        for variant in ALL {
            assert_eq!(plan_for(variant).variant, variant);
        }
    }

    #[test]
    fn sidebar_fractions_are_sane() {
        for variant in ALL {
            if let Arrangement::Sidebar { fraction, .. } = plan_for(variant).arrangement {
                assert!(fraction > 0.1 && fraction < 0.5, "{:?}", variant);
            }
        }
    }

    #[test]
    fn only_formal_variants_reserve_photo_space() {
        let reserving: Vec<_> =
            ALL.iter().filter(|v| plan_for(**v).reserve_photo_slot).collect();
        assert_eq!(reserving, vec![&LayoutVariant::Executive, &LayoutVariant::Nordic]);
    }
}
