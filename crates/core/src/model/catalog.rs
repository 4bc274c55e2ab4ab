use serde::{Deserialize, Serialize};

use crate::model::question::Difficulty;

/// Recommended level for a practice topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl TopicLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TopicLevel::Beginner => "Beginner",
            TopicLevel::Intermediate => "Intermediate",
            TopicLevel::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockExamInfo {
    pub year: u16,
    /// Year label in the local calendar, e.g. `2016 E.C.`.
    pub local_year: String,
    pub questions: u32,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub attempts: u32,
    pub best_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub name: String,
    pub description: String,
    pub questions: u32,
    pub completed: u32,
    pub level: TopicLevel,
}

impl TopicInfo {
    /// URL slug: lowercased, whitespace runs replaced by `-`.
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Completed over total questions as a whole percentage, rounded half up.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        rounded_percent(u64::from(self.completed), u64::from(self.questions))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub slug: String,
    pub name: String,
    /// Size of the whole subject bank, independent of the topic breakdown.
    pub total_questions: u32,
    pub completed_questions: u32,
    pub mock_exams: Vec<MockExamInfo>,
    pub topics: Vec<TopicInfo>,
}

impl Subject {
    #[must_use]
    pub fn topic(&self, slug: &str) -> Option<&TopicInfo> {
        self.topics.iter().find(|t| t.slug() == slug)
    }

    /// Completed share of the subject bank in percent, unrounded.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.completed_questions) * 100.0 / f64::from(self.total_questions)
    }
}

/// Totals across every subject, as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOverview {
    pub subjects: usize,
    pub questions_completed: u32,
    pub total_questions: u32,
    /// Mean of the per-subject progress, rounded to a whole percentage.
    pub average_progress: u8,
}

impl CatalogOverview {
    #[must_use]
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let average = if subjects.is_empty() {
            0.0
        } else {
            subjects.iter().map(Subject::progress).sum::<f64>() / subjects.len() as f64
        };
        Self {
            subjects: subjects.len(),
            questions_completed: subjects.iter().map(|s| s.completed_questions).sum(),
            total_questions: subjects.iter().map(|s| s.total_questions).sum(),
            average_progress: average.round().clamp(0.0, 100.0) as u8,
        }
    }
}

/// `part / whole` as a whole percentage, rounded half up and capped at 100.
/// Zero when `whole` is zero.
pub(crate) fn rounded_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (200 * part.min(whole) + whole) / (2 * whole);
    u8::try_from(pct).unwrap_or(100)
}

#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Display name for a practice topic slug. Known slugs map to fixed names,
/// anything else gets its first letter capitalised.
#[must_use]
pub fn topic_display_name(slug: &str) -> String {
    let known = match slug {
        "algebra" => Some("Algebra"),
        "geometry" => Some("Geometry"),
        "calculus" => Some("Calculus"),
        "mechanics" => Some("Mechanics"),
        "trigonometry" => Some("Trigonometry"),
        "electricity" => Some("Electricity"),
        "" => Some("Unknown Topic"),
        _ => None,
    };
    if let Some(name) = known {
        return name.to_owned();
    }
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(name: &str, questions: u32, completed: u32) -> TopicInfo {
        TopicInfo {
            name: name.into(),
            description: String::new(),
            questions,
            completed,
            level: TopicLevel::Intermediate,
        }
    }

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(topic("Modern  Physics", 1, 0).slug(), "modern-physics");
        assert_eq!(slugify("Algebra"), "algebra");
    }

    #[test]
    fn progress_rounds_half_up_and_is_guarded() {
        assert_eq!(topic("Algebra", 80, 45).progress_percent(), 56);
        assert_eq!(topic("Mechanics", 70, 25).progress_percent(), 36);
        assert_eq!(topic("Statistics", 40, 25).progress_percent(), 63);
        assert_eq!(topic("Half", 200, 1).progress_percent(), 1);
        assert_eq!(topic("Empty", 0, 0).progress_percent(), 0);
        assert_eq!(topic("Over", 10, 20).progress_percent(), 100);
    }

    fn subject(total: u32, completed: u32) -> Subject {
        Subject {
            slug: "s".into(),
            name: "S".into(),
            total_questions: total,
            completed_questions: completed,
            mock_exams: Vec::new(),
            topics: Vec::new(),
        }
    }

    #[test]
    fn overview_sums_and_rounds_the_mean() {
        let overview = CatalogOverview::from_subjects(&[subject(500, 120), subject(350, 90)]);
        assert_eq!(overview.subjects, 2);
        assert_eq!(overview.questions_completed, 210);
        assert_eq!(overview.total_questions, 850);
        // (24 + 25.71) / 2 = 24.86
        assert_eq!(overview.average_progress, 25);

        let empty = CatalogOverview::from_subjects(&[]);
        assert_eq!(empty.average_progress, 0);
        assert_eq!(subject(0, 0).progress(), 0.0);
    }

    #[test]
    fn display_names() {
        assert_eq!(topic_display_name("electricity"), "Electricity");
        assert_eq!(topic_display_name("optics"), "Optics");
        assert_eq!(topic_display_name("modern-physics"), "Modern-physics");
        assert_eq!(topic_display_name(""), "Unknown Topic");
    }
}
