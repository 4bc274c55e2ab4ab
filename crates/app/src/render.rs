//! Plain-text views printed to stdout.

use std::fmt::Write;

use prep_core::model::{
    CatalogOverview, Note, SavedQuestion, SessionResult, SessionState, StudyBlock, StudyContent, Subject,
    format_clock,
};
use services::{ResultsView, StudySession, format_duration};

pub const HELP: &str = "\
Commands:
  start          begin the session and the countdown
  1..N           choose an option for the current question
  n / p          next / previous question
  g N            go to question N
  f / s          flag / save the current question
  submit         finish and score the session
  q              quit without scoring";

pub fn session_header(state: &SessionState) -> String {
    format!(
        "{}: {} questions, {} on the clock.\nType `start` to begin or `help` for commands.",
        state.key(),
        state.questions().len(),
        format_clock(state.remaining_secs()),
    )
}

pub fn time_left(remaining: u32) -> String {
    format!("[{} left]", format_clock(remaining))
}

pub fn question(state: &SessionState) -> String {
    let Some(q) = state.current_question() else {
        return String::new();
    };
    let tracker = state.tracker();
    let mut out = String::new();

    let mut markers = String::new();
    if tracker.is_flagged(q.id()) {
        markers.push_str(" [flagged]");
    }
    if tracker.is_saved(q.id()) {
        markers.push_str(" [saved]");
    }
    let _ = writeln!(
        out,
        "\nQuestion {} of {}{markers}   {}   answered {}/{}, {}% through",
        state.current_index() + 1,
        state.questions().len(),
        format_clock(state.remaining_secs()),
        tracker.answered_count(),
        state.questions().len(),
        state.progress_percent(),
    );
    let _ = writeln!(out, "{}", q.prompt());

    let selected = tracker.selected(q.id());
    for (i, option) in q.options().iter().enumerate() {
        let mark = if selected == Some(i) { '*' } else { ' ' };
        let _ = writeln!(out, " {mark} {}. {option}", i + 1);
    }

    if state.explanation_visible() {
        let verdict = if selected.is_some_and(|i| q.is_correct(i)) {
            "Correct."
        } else {
            "Not quite."
        };
        let _ = writeln!(
            out,
            "{verdict} Answer: {}. {}",
            q.correct_index() + 1,
            q.explanation().unwrap_or("")
        );
    }
    out
}

pub fn summary(result: &SessionResult) -> String {
    let mut out = format!(
        "\nScore {}% ({}/{} correct) in {}.",
        result.score(),
        result.correct_count(),
        result.total_questions(),
        format_duration(result.elapsed_secs()),
    );
    for (i, answer) in result.answers().iter().enumerate() {
        let mark = if answer.is_correct { "ok" } else { "x " };
        let chosen = answer
            .selected()
            .map_or_else(|| "-".to_owned(), |s| (s + 1).to_string());
        let _ = write!(out, "\n  {mark} Q{} ({}): {chosen}", i + 1, answer.question_id);
    }
    out
}

pub fn results(view: &ResultsView) {
    if let Some(topic) = &view.topic {
        println!("{topic}");
    }
    println!("Score: {}%", view.score);
    println!(
        "Correct: {}  Incorrect: {}  Total: {}",
        view.correct, view.incorrect, view.total
    );
    println!("Time: {}", view.time_spent);
    println!("{}", view.message);
}

pub fn overview(overview: &CatalogOverview) {
    println!(
        "{} subjects, {}/{} questions completed, average progress {}%\n",
        overview.subjects,
        overview.questions_completed,
        overview.total_questions,
        overview.average_progress,
    );
}

pub fn subjects(subjects: &[Subject]) {
    for subject in subjects {
        println!(
            "{} ({})  {}/{} questions",
            subject.name, subject.slug, subject.completed_questions, subject.total_questions
        );
        let years: Vec<String> = subject
            .mock_exams
            .iter()
            .map(|e| e.year.to_string())
            .collect();
        println!("  mock exams: {}", years.join(", "));
        for topic in &subject.topics {
            println!(
                "  {:<24} {:<12} {:>3}%",
                topic.slug(),
                topic.level.as_str(),
                topic.progress_percent()
            );
        }
    }
}

pub fn notes(notes: &[Note]) {
    for note in notes {
        println!("#{} {} [{}]", note.id, note.title, note.subject);
        if !note.tags.is_empty() {
            println!("   tags: {}", note.tags.join(", "));
        }
        println!("   {}", note.content);
    }
}

pub fn saved_questions(saved: &[SavedQuestion]) {
    for q in saved {
        println!("saved #{} [{}] {}", q.id, q.subject, q.question);
    }
}

pub fn outline(session: &StudySession) {
    println!("{} / {}  ({}% complete)", session.subject(), session.topic(), session.progress());
    for chapter in session.chapters() {
        println!("\n{} ({} min)", chapter.title, chapter.estimated_minutes);
        println!("  {}", chapter.description);
        for block in &chapter.blocks {
            println!(
                "  - {:<28} {:<8} {}",
                block.id,
                block.content.kind(),
                block.title.as_deref().unwrap_or("")
            );
        }
    }
}

pub fn block(block: &StudyBlock) {
    if let Some(title) = &block.title {
        println!("{title}\n");
    }
    match &block.content {
        StudyContent::Text { markdown } | StudyContent::Formula { markdown } => {
            println!("{markdown}");
        }
        StudyContent::Table { header, rows } => {
            println!("{}", header.join(" | "));
            for row in rows {
                println!("{}", row.join(" | "));
            }
        }
        StudyContent::Image {
            url, alt, caption, ..
        } => {
            println!("[image: {alt}] {url}");
            if let Some(caption) = caption {
                println!("{caption}");
            }
        }
        StudyContent::Video {
            video_id,
            duration,
            description,
        } => {
            println!("https://www.youtube.com/watch?v={video_id}");
            if let Some(duration) = duration {
                println!("duration {duration}");
            }
            if let Some(description) = description {
                println!("{description}");
            }
        }
        StudyContent::Quiz { questions } => {
            for (i, q) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, q.question);
                for (j, option) in q.options.iter().enumerate() {
                    println!("   {}) {option}", j + 1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use prep_core::model::{Question, QuestionId, QuestionSetKey, SessionEvent};

    use super::*;

    fn practice_state() -> SessionState {
        let q = Question::new(
            QuestionId::from("q1"),
            "2 + 2?",
            vec!["3".into(), "4".into()],
            1,
        )
        .expect("valid question")
        .with_explanation("Add them.");
        SessionState::new(QuestionSetKey::practice("mathematics", "algebra"), vec![q], 90)
    }

    #[test]
    fn question_view_marks_choice_and_explains_in_practice() {
        let mut state = practice_state();
        state.apply(SessionEvent::Start).expect("start");
        state.apply(SessionEvent::ToggleFlagCurrent).expect("flag");
        state.apply(SessionEvent::SelectCurrent(1)).expect("select");

        let view = question(&state);
        assert!(view.contains("Question 1 of 1 [flagged]"));
        assert!(view.contains("1:30"));
        assert!(view.contains(" * 2. 4"));
        assert!(view.contains("Correct. Answer: 2. Add them."));
    }

    #[test]
    fn header_shows_set_and_clock() {
        let header = session_header(&practice_state());
        assert!(header.starts_with("mathematics/practice/algebra: 1 questions, 1:30"));
    }
}
