pub mod color;
pub mod document;

pub use color::Color;
pub use document::{
    CvDocument, EducationItem, ExperienceItem, FrameStyle, GenericItem, PartialColorScheme,
    PersonalInfo, ProfileImage, ProjectItem, Section, SectionItems, SkillItem,
};

use std::sync::Arc;

/// A reference-counted container for shared, immutable data like image bytes.
pub type SharedData = Arc<Vec<u8>>;
