use prep_core::model::{SessionKind, SessionResult, topic_display_name};
use url::form_urlencoded;

//
// ─── QUERY PARAMETERS ──────────────────────────────────────────────────────────
//

/// The results hand-off: everything the results page gets, as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultQuery {
    pub score: u32,
    pub total: u32,
    /// Elapsed seconds.
    pub time: u32,
    /// Display name of the practice topic.
    pub topic: Option<String>,
}

impl ResultQuery {
    #[must_use]
    pub fn from_result(result: &SessionResult) -> Self {
        let topic = match &result.key().kind {
            SessionKind::Practice { topic } => Some(topic_display_name(topic)),
            SessionKind::Mock { .. } => None,
        };
        Self {
            score: u32::from(result.score()),
            total: result.total_questions(),
            time: result.elapsed_secs(),
            topic,
        }
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("score", &self.score.to_string())
            .append_pair("total", &self.total.to_string())
            .append_pair("time", &self.time.to_string());
        if let Some(topic) = &self.topic {
            query.append_pair("topic", topic);
        }
        query.finish()
    }

    /// Path of the results page for `subject`, with this query attached.
    #[must_use]
    pub fn results_path(&self, subject: &str, kind: &SessionKind) -> String {
        let section = if kind.is_practice() { "practice" } else { "exam" };
        format!(
            "/subjects/{subject}/{section}/results?{}",
            self.to_query_string()
        )
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Numeric fields that are missing or unparseable read as 0. Only the
    /// first occurrence of each key counts.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();
        let mut seen = [false; 4];
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "score" => 0,
                "total" => 1,
                "time" => 2,
                "topic" => 3,
                _ => continue,
            };
            if std::mem::replace(&mut seen[slot], true) {
                continue;
            }
            match slot {
                0 => parsed.score = parse_int_prefix(&value),
                1 => parsed.total = parse_int_prefix(&value),
                2 => parsed.time = parse_int_prefix(&value),
                _ => parsed.topic = Some(value.into_owned()),
            }
        }
        parsed
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits; anything
/// after the digits is ignored. No digits or a negative value give 0, and
/// overflow saturates.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: u32 = 0;
    let mut any = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        any = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    if !any || negative { 0 } else { value }
}

//
// ─── RESULTS VIEW ──────────────────────────────────────────────────────────────
//

/// Everything the results screen shows, derived from the query alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub score: u32,
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub time_spent: String,
    pub message: &'static str,
    pub topic: Option<String>,
}

impl ResultsView {
    #[must_use]
    pub fn from_query(query: &ResultQuery) -> Self {
        // round(score / 100 * total), half-up
        let correct = (u64::from(query.score) * u64::from(query.total) * 2 + 100) / 200;
        let correct = u32::try_from(correct).unwrap_or(u32::MAX);
        Self {
            score: query.score,
            total: query.total,
            correct,
            incorrect: query.total.saturating_sub(correct),
            time_spent: format_duration(query.time),
            message: performance_message(query.score),
            topic: query.topic.clone(),
        }
    }
}

#[must_use]
pub fn performance_message(score: u32) -> &'static str {
    match score {
        90.. => "Excellent! You've mastered this material!",
        80..=89 => "Great job! You have a strong understanding.",
        70..=79 => "Good work! You're on the right track.",
        60..=69 => "Not bad! With a bit more practice, you'll improve.",
        _ => "Keep studying! You'll get better with more practice.",
    }
}

/// `1h 2m 3s`, or `2m 3s` under an hour.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else {
        format!("{minutes}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_or_without_question_mark() {
        let expected = ResultQuery {
            score: 80,
            total: 5,
            time: 125,
            topic: None,
        };
        assert_eq!(ResultQuery::parse("?score=80&total=5&time=125"), expected);
        assert_eq!(ResultQuery::parse("score=80&total=5&time=125"), expected);
    }

    #[test]
    fn malformed_numbers_read_as_zero() {
        let q = ResultQuery::parse("score=abc&time=-3");
        assert_eq!(q.score, 0);
        assert_eq!(q.total, 0);
        assert_eq!(q.time, 0);
        assert_eq!(ResultQuery::parse("").score, 0);
    }

    #[test]
    fn integer_prefix_is_accepted() {
        assert_eq!(parse_int_prefix("42abc"), 42);
        assert_eq!(parse_int_prefix("  7"), 7);
        assert_eq!(parse_int_prefix("+9"), 9);
        assert_eq!(parse_int_prefix("99999999999"), u32::MAX);
    }

    #[test]
    fn topic_survives_encoding() {
        let q = ResultQuery {
            score: 100,
            total: 1,
            time: 9,
            topic: Some("Modern Physics & Optics".into()),
        };
        let encoded = q.to_query_string();
        assert!(!encoded.contains(' '));
        assert_eq!(ResultQuery::parse(&encoded), q);
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(ResultQuery::parse("score=10&score=90").score, 10);
    }

    #[test]
    fn view_derives_counts_and_message() {
        let view = ResultsView::from_query(&ResultQuery::parse("score=80&total=5&time=3725"));
        assert_eq!(view.correct, 4);
        assert_eq!(view.incorrect, 1);
        assert_eq!(view.time_spent, "1h 2m 5s");
        assert_eq!(view.message, "Great job! You have a strong understanding.");
    }

    #[test]
    fn rounding_of_correct_count_is_half_up() {
        // 50% of 3 = 1.5 -> 2
        let view = ResultsView::from_query(&ResultQuery::parse("score=50&total=3"));
        assert_eq!(view.correct, 2);
        assert_eq!(view.incorrect, 1);
    }

    #[test]
    fn message_bands() {
        assert_eq!(performance_message(90), "Excellent! You've mastered this material!");
        assert_eq!(performance_message(70), "Good work! You're on the right track.");
        assert_eq!(performance_message(60), "Not bad! With a bit more practice, you'll improve.");
        assert_eq!(performance_message(59), "Keep studying! You'll get better with more practice.");
    }

    #[test]
    fn short_durations_omit_hours() {
        assert_eq!(format_duration(0), "0m 0s");
        assert_eq!(format_duration(125), "2m 5s");
    }
}
