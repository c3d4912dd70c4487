pub mod resolver;
pub mod scheme;

pub use resolver::{global_default_scheme, resolve_scheme};
pub use scheme::{ColorScheme, EffectiveStyle, FontSettings};
