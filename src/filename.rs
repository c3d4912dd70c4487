//! Export filename construction.

use vitae_types::PersonalInfo;

/// Builds the download filename: `{First}_{Last}_CV.pdf`, with a `.demo`
/// marker before the extension for watermarked exports. Name casing is
/// preserved; characters unsafe in filenames are dropped and inner
/// whitespace becomes underscores. A nameless document exports as
/// `CV.pdf`.
pub fn export_filename(info: &PersonalInfo, demo: bool) -> String {
    let mut stem = info
        .name
        .split_whitespace()
        .map(sanitize_token)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        stem = "CV".to_string();
    } else {
        stem.push_str("_CV");
    }
    if demo {
        stem.push_str(".demo");
    }
    stem.push_str(".pdf");
    stem
}

fn sanitize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> PersonalInfo {
        PersonalInfo { name: name.to_string(), ..PersonalInfo::default() }
    }

    #[test]
    fn full_name_becomes_underscored_stem() {
        assert_eq!(export_filename(&named("Jane Doe"), false), "Jane_Doe_CV.pdf");
    }

    #[test]
    fn demo_marker_sits_before_extension() {
        assert_eq!(export_filename(&named("Jane Doe"), true), "Jane_Doe_CV.demo.pdf");
    }

    #[test]
    fn middle_names_are_kept() {
        assert_eq!(
            export_filename(&named("Jane van der Berg"), false),
            "Jane_van_der_Berg_CV.pdf"
        );
    }

    #[test]
    fn hostile_characters_are_dropped() {
        assert_eq!(
            export_filename(&named("Ja/ne <Do:e>"), false),
            "Jane_Doe_CV.pdf"
        );
    }

    #[test]
    fn accents_and_hyphens_survive()  {
        assert_eq!(
            export_filename(&named("Élodie Saint-Clair"), false),
            "Élodie_Saint-Clair_CV.pdf"
        );
    }

    #[test]
    fn empty_name_falls_back() {
        assert_eq!(export_filename(&named("   "), false), "CV.pdf");
        assert_eq!(export_filename(&named(""), true), "CV.demo.pdf");
    }
}
