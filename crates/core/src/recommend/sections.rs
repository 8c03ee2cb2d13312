//! Splitting the detailed model output into its three labeled sections.
//!
//! The model is asked for `SECTION 1:`, `SECTION 2:` and `SECTION 3:`
//! blocks of bullet points. Markers are searched case-insensitively and in
//! increasing order, each search starting after the previous section's
//! marker. A body runs up to the next section's marker, or to the end of
//! the text when that marker is missing. A missing marker leaves that
//! section empty without affecting the others.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Glyph every surviving bullet is normalized to.
pub const BULLET: &str = "• ";

/// Bullets with this many characters or fewer (after cleanup) are noise.
const MIN_BULLET_CHARS: usize = 5;

/// One of the three labeled blocks of the detailed breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    SoilLoss,
    SoilType,
    Vegetation,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::SoilLoss, Section::SoilType, Section::Vegetation];

    /// The `n` in `SECTION n`.
    pub fn number(self) -> usize {
        match self {
            Section::SoilLoss => 1,
            Section::SoilType => 2,
            Section::Vegetation => 3,
        }
    }

    /// Key used in the JSON payload.
    pub fn key(self) -> &'static str {
        match self {
            Section::SoilLoss => "soil_loss",
            Section::SoilType => "soil_type",
            Section::Vegetation => "vegetation",
        }
    }

    /// The section whose marker ends this one's body.
    fn next(self) -> Option<Section> {
        match self {
            Section::SoilLoss => Some(Section::SoilType),
            Section::SoilType => Some(Section::Vegetation),
            Section::Vegetation => None,
        }
    }

    fn marker(self) -> &'static Regex {
        static MARKERS: OnceLock<[Regex; 3]> = OnceLock::new();
        let markers = MARKERS.get_or_init(|| {
            Section::ALL.map(|section| {
                Regex::new(&format!(r"(?i)SECTION\s*{}[:\-]?\s*", section.number())).unwrap()
            })
        });
        &markers[self.number() - 1]
    }
}

/// The three-section breakdown. Every key is always present; a section
/// that could not be found holds an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSections {
    pub soil_loss: String,
    pub soil_type: String,
    pub vegetation: String,
}

impl DetailedSections {
    /// Degraded value used when the model call itself failed.
    pub fn provider_failure(message: &str) -> Self {
        Self {
            soil_loss: format!("Error: {message}"),
            ..Self::default()
        }
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::SoilLoss => &self.soil_loss,
            Section::SoilType => &self.soil_type,
            Section::Vegetation => &self.vegetation,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::SoilLoss => &mut self.soil_loss,
            Section::SoilType => &mut self.soil_type,
            Section::Vegetation => &mut self.vegetation,
        }
    }

    /// Individual bullets of a section, in order.
    pub fn bullets(&self, section: Section) -> Vec<&str> {
        self.get(section)
            .lines()
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| self.get(*s).is_empty())
    }

    /// Render back into `SECTION n:` blocks. Feeding the result to
    /// [`sectionize`] yields the same sections.
    pub fn to_text(&self) -> String {
        Section::ALL
            .iter()
            .map(|s| format!("SECTION {}:\n{}", s.number(), self.get(*s)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn bullet_marker() -> &'static Regex {
    static RE_BULLET: OnceLock<Regex> = OnceLock::new();
    RE_BULLET.get_or_init(|| Regex::new(r"^[•\-\*]+\s+").unwrap())
}

fn bold() -> &'static Regex {
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    RE_BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

/// Clean a single trimmed line. Returns `None` unless it is a bullet with
/// enough content to keep.
fn clean_bullet(line: &str) -> Option<String> {
    let marker = bullet_marker().find(line)?;
    let content = bold().replace_all(&line[marker.end()..], "$1");
    let content = content.trim();

    if content.chars().count() > MIN_BULLET_CHARS {
        Some(format!("{BULLET}{content}"))
    } else {
        None
    }
}

fn collect_bullets(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter_map(clean_bullet)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split detailed model output into the three sections, keeping only
/// bullet lines normalized to `• `.
pub fn sectionize(raw: &str) -> DetailedSections {
    let mut sections = DetailedSections::default();
    let mut cursor = 0;

    for section in Section::ALL {
        let Some(start) = section.marker().find(&raw[cursor..]) else {
            continue;
        };

        let body_start = cursor + start.end();
        let rest = &raw[body_start..];

        // Without the next marker the body runs to the end of the text.
        let body_len = section
            .next()
            .and_then(|next| next.marker().find(rest))
            .map_or(rest.len(), |m| m.start());

        *sections.get_mut(section) = collect_bullets(&rest[..body_len]);
        cursor = body_start;
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "SECTION 1:\n\
        • Build contour terraces on steep slopes\n\
        • Install silt fences along the shoreline\n\
        \n\
        SECTION 2:\n\
        - Add organic compost to improve structure\n\
        * Avoid heavy machinery on wet soil\n\
        \n\
        SECTION 3:\n\
        • **Water** seedlings twice a week\n\
        • Mulch around young trees\n";

    #[test]
    fn test_well_formed_sections() {
        let sections = sectionize(WELL_FORMED);

        assert_eq!(
            sections.soil_loss,
            "• Build contour terraces on steep slopes\n• Install silt fences along the shoreline"
        );
        assert_eq!(
            sections.soil_type,
            "• Add organic compost to improve structure\n• Avoid heavy machinery on wet soil"
        );
        assert_eq!(
            sections.vegetation,
            "• Water seedlings twice a week\n• Mulch around young trees"
        );
    }

    #[test]
    fn test_every_bullet_is_normalized() {
        let sections = sectionize(WELL_FORMED);
        for section in Section::ALL {
            let bullets = sections.bullets(section);
            assert!(!bullets.is_empty(), "{} is empty", section.key());
            for bullet in bullets {
                assert!(bullet.starts_with("• "));
                assert!(!bullet.contains("**"));
            }
        }
    }

    #[test]
    fn test_missing_middle_section() {
        let raw = "SECTION 1:\n• Build contour terraces\nSECTION 3:\n• Water seedlings weekly";
        let sections = sectionize(raw);

        // No SECTION 2 marker to stop at, so section 1 runs to the end.
        assert_eq!(
            sections.soil_loss,
            "• Build contour terraces\n• Water seedlings weekly"
        );
        assert_eq!(sections.soil_type, "");
        assert_eq!(sections.vegetation, "• Water seedlings weekly");
    }

    #[test]
    fn test_no_markers_yields_empty_sections() {
        let sections = sectionize("• Build contour terraces\n• Water seedlings weekly");
        assert_eq!(sections, DetailedSections::default());
        assert!(sections.is_empty());
    }

    #[test]
    fn test_marker_variants_are_case_insensitive() {
        let raw = "section 1 - \n• Plant cover crops\nSection2\n• Test soil acidity\nSECTION 3-\n• Prune bamboo yearly";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "• Plant cover crops");
        assert_eq!(sections.soil_type, "• Test soil acidity");
        assert_eq!(sections.vegetation, "• Prune bamboo yearly");
    }

    #[test]
    fn test_non_bullet_lines_are_dropped() {
        let raw = "SECTION 1:\nHere are some ideas:\n• Build contour terraces\n**Summary**\nThat is all.";
        assert_eq!(sectionize(raw).soil_loss, "• Build contour terraces");
    }

    #[test]
    fn test_short_bullets_are_noise() {
        let raw = "SECTION 1:\n• .\n- ok\n* Yes!\n• Plant\n• Plants\n";
        // "Plant" has exactly five characters and is dropped.
        assert_eq!(sectionize(raw).soil_loss, "• Plants");
    }

    #[test]
    fn test_bullet_glyph_without_space_is_not_a_bullet() {
        let raw = "SECTION 1:\n-5 degrees of slope is fine\n---\n• Keep slopes under 5 degrees";
        assert_eq!(sectionize(raw).soil_loss, "• Keep slopes under 5 degrees");
    }

    #[test]
    fn test_doubled_glyph_and_bold_are_stripped() {
        let raw = "SECTION 3:\n**  Plant vetiver grass strips along slopes\n- **Terracing**: build terraces on **steep** ground";
        let sections = sectionize(raw);

        assert_eq!(
            sections.vegetation,
            "• Plant vetiver grass strips along slopes\n• Terracing: build terraces on steep ground"
        );
    }

    #[test]
    fn test_duplicate_marker_does_not_truncate_earlier_section() {
        let raw = "SECTION 1:\n• Build contour terraces\nSECTION 2:\n• Add organic compost\n\
                   SECTION 3:\n• Water seedlings weekly\nSECTION 2:\n• Repeated block here";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "• Build contour terraces");
        assert_eq!(sections.soil_type, "• Add organic compost");
        assert_eq!(
            sections.vegetation,
            "• Water seedlings weekly\n• Repeated block here"
        );
    }

    #[test]
    fn test_markers_searched_after_previous_section() {
        // A stray "SECTION 2" mentioned before SECTION 1 is ignored.
        let raw = "Intro mentions SECTION 2 early.\nSECTION 1:\n• Build contour terraces\n\
                   SECTION 2:\n• Add organic compost\nSECTION 3:\n• Water seedlings weekly";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "• Build contour terraces");
        assert_eq!(sections.soil_type, "• Add organic compost");
        assert_eq!(sections.vegetation, "• Water seedlings weekly");
    }

    #[test]
    fn test_crlf_line_endings() {
        let raw = "SECTION 1:\r\n• Build contour terraces\r\nSECTION 2:\r\n• Add organic compost\r\n";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "• Build contour terraces");
        assert_eq!(sections.soil_type, "• Add organic compost");
    }

    #[test]
    fn test_sectionize_is_idempotent() {
        let first = sectionize(WELL_FORMED);
        let second = sectionize(&first.to_text());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_last_section() {
        let raw = "SECTION 1:\n• Build contour terraces\nSECTION 2:\n• Add organic compost";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "• Build contour terraces");
        assert_eq!(sections.soil_type, "• Add organic compost");
        assert_eq!(sections.vegetation, "");
    }

    #[test]
    fn test_missing_first_section() {
        let raw = "SECTION 2:\n• Add organic compost\nSECTION 3:\n• Water seedlings weekly";
        let sections = sectionize(raw);

        assert_eq!(sections.soil_loss, "");
        assert_eq!(sections.soil_type, "• Add organic compost");
        assert_eq!(sections.vegetation, "• Water seedlings weekly");
    }

    #[test]
    fn test_idempotent_with_empty_section() {
        let first = sectionize("SECTION 1:\n• Build contour terraces\nSECTION 3:\n• Water seedlings weekly");
        assert_eq!(sectionize(&first.to_text()), first);
    }

    #[test]
    fn test_provider_failure() {
        let sections = DetailedSections::provider_failure("quota exceeded");
        assert_eq!(sections.soil_loss, "Error: quota exceeded");
        assert_eq!(sections.soil_type, "");
        assert_eq!(sections.vegetation, "");
    }

    #[test]
    fn test_keys_always_serialized() {
        let value = serde_json::to_value(DetailedSections::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"soil_loss": "", "soil_type": "", "vegetation": ""})
        );
    }

    #[test]
    fn test_section_keys_and_numbers() {
        let keys: Vec<_> = Section::ALL.iter().map(|s| (s.number(), s.key())).collect();
        assert_eq!(
            keys,
            vec![(1, "soil_loss"), (2, "soil_type"), (3, "vegetation")]
        );
    }
}
