//! Game session state: puzzle history, navigation and the question quota.
//!
//! The history is append-only. Navigation moves a cursor over it, and the
//! quota, the last answer and the reveal flag all belong to the current
//! puzzle view: any cursor move resets them.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::parser::{self, Puzzle};
use crate::settings::Settings;

/// Questions allowed per puzzle view before the solution auto-reveals.
pub const QUESTION_LIMIT: u32 = 10;

/// The model's reply to one player question. Guard failures and transport
/// errors land here too, flagged so the webview can style them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    FetchingPuzzle,
    PuzzleReady,
    AskingQuestion,
}

#[derive(Debug, Default)]
pub struct GameSession {
    history: Vec<Puzzle>,
    cursor: Option<usize>,
    question_count: u32,
    last_answer: Option<Answer>,
    solution_revealed: bool,
    fetching_puzzle: bool,
    fetching_answer: bool,
}

/// Everything the webview needs to render one frame of the game. The
/// solution text is only present while it is visible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub title: Option<String>,
    pub description: Option<String>,
    pub puzzle_index: Option<usize>,
    pub history_len: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub question_count: u32,
    pub question_limit: u32,
    pub limit_reached: bool,
    pub answer: Option<Answer>,
    pub solution_available: bool,
    pub solution_visible: bool,
    pub auto_revealed: bool,
    pub solution: Option<String>,
}

impl GameSession {
    pub fn current(&self) -> Option<&Puzzle> {
        self.cursor.and_then(|i| self.history.get(i))
    }

    pub fn limit_reached(&self) -> bool {
        self.question_count >= QUESTION_LIMIT
    }

    /// A fetch clears the board up front: the quota and the last answer are
    /// reset even if the fetch later fails.
    pub fn begin_fetch(&mut self) {
        self.fetching_puzzle = true;
        self.last_answer = None;
        self.question_count = 0;
    }

    /// Appends the new batch and jumps to its first puzzle.
    pub fn finish_fetch(&mut self, new_puzzles: Vec<Puzzle>) {
        self.cursor = Some(self.history.len());
        self.history.extend(new_puzzles);
        self.last_answer = None;
        self.solution_revealed = false;
        self.fetching_puzzle = false;
    }

    pub fn abort_fetch(&mut self) {
        self.fetching_puzzle = false;
    }

    /// Pre-flight for a player question. A refusal either records a
    /// localized error answer (quota exhausted, no answer model, unusable
    /// solution) or leaves the session untouched (blank question,
    /// incomplete settings, no puzzle selected). Admission flips the
    /// answering flag and hands back the puzzle the question is about.
    pub fn admit_question(
        &mut self,
        question: &str,
        settings: &Settings,
        language: Language,
    ) -> Option<Puzzle> {
        if self.limit_reached() {
            self.record_error(language.question_limit_reached().to_string());
            return None;
        }
        if settings.selected_answer_model.is_empty() {
            self.record_error(language.answer_model_missing().to_string());
            return None;
        }
        if settings.api_url.is_empty()
            || settings.api_key.is_empty()
            || question.trim().is_empty()
        {
            eprintln!("[admit_question] rejected: incomplete settings or empty question");
            return None;
        }
        let puzzle = match self.current() {
            Some(p) => p.clone(),
            None => {
                eprintln!("[admit_question] rejected: no puzzle selected");
                return None;
            }
        };
        if !parser::solution_available(&puzzle.solution) {
            eprintln!("[admit_question] rejected: current puzzle has no usable solution");
            self.record_error(language.solution_unavailable().to_string());
            return None;
        }

        self.begin_question();
        Some(puzzle)
    }

    pub fn begin_question(&mut self) {
        self.fetching_answer = true;
        self.last_answer = None;
    }

    /// A successful answer is the only thing that consumes quota.
    pub fn record_answer(&mut self, text: String) {
        self.last_answer = Some(Answer {
            text,
            is_error: false,
        });
        self.question_count += 1;
        self.fetching_answer = false;
    }

    pub fn record_error(&mut self, text: String) {
        self.last_answer = Some(Answer {
            text,
            is_error: true,
        });
        self.fetching_answer = false;
    }

    pub fn go_previous(&mut self) {
        if let Some(i) = self.cursor {
            if i > 0 {
                self.cursor = Some(i - 1);
                self.reset_view();
            }
        }
    }

    pub fn go_next(&mut self) {
        if let Some(i) = self.cursor {
            if i + 1 < self.history.len() {
                self.cursor = Some(i + 1);
                self.reset_view();
            }
        }
    }

    /// Marks the solution visible, if the current puzzle has a usable one.
    pub fn reveal_solution(&mut self) {
        if let Some(puzzle) = self.current() {
            if parser::solution_available(&puzzle.solution) {
                self.solution_revealed = true;
            }
        }
    }

    fn reset_view(&mut self) {
        self.last_answer = None;
        self.question_count = 0;
        self.solution_revealed = false;
    }

    fn phase(&self) -> Phase {
        if self.fetching_puzzle {
            Phase::FetchingPuzzle
        } else if self.fetching_answer {
            Phase::AskingQuestion
        } else if self.current().is_some() {
            Phase::PuzzleReady
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let current = self.current();
        let limit_reached = self.limit_reached();
        let solution_available = current
            .map(|p| parser::solution_available(&p.solution))
            .unwrap_or(false);
        // Exhausting the quota reveals the solution without a click. The
        // auto-reveal note is tied to the quota, not to how the solution
        // first became visible.
        let solution_visible = solution_available && (self.solution_revealed || limit_reached);
        let auto_revealed = solution_visible && limit_reached;

        SessionSnapshot {
            phase: self.phase(),
            title: current.and_then(|p| p.title.clone()),
            description: current.map(|p| p.description.clone()),
            puzzle_index: self.cursor,
            history_len: self.history.len(),
            can_go_previous: self.cursor.map(|i| i > 0).unwrap_or(false),
            can_go_next: self
                .cursor
                .map(|i| i + 1 < self.history.len())
                .unwrap_or(false),
            question_count: self.question_count,
            question_limit: QUESTION_LIMIT,
            limit_reached,
            answer: self.last_answer.clone(),
            solution_available,
            solution_visible,
            auto_revealed,
            solution: if solution_visible {
                current.map(|p| p.solution.clone())
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(description: &str, solution: &str) -> Puzzle {
        Puzzle {
            description: description.to_string(),
            solution: solution.to_string(),
            title: Some("AI Puzzle #1".to_string()),
        }
    }

    fn session_with(puzzles: Vec<Puzzle>) -> GameSession {
        let mut session = GameSession::default();
        session.begin_fetch();
        session.finish_fetch(puzzles);
        session
    }

    fn full_settings() -> Settings {
        Settings {
            api_url: "http://localhost:8080".to_string(),
            api_key: "sk-test".to_string(),
            selected_model: "gen-model".to_string(),
            selected_answer_model: "answer-model".to_string(),
        }
    }

    #[test]
    fn test_idle_snapshot_is_empty() {
        let snapshot = GameSession::default().snapshot();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(snapshot.description.is_none());
        assert_eq!(snapshot.history_len, 0);
        assert!(!snapshot.solution_visible);
        assert_eq!(snapshot.question_limit, QUESTION_LIMIT);
    }

    #[test]
    fn test_fetch_moves_cursor_to_first_new_puzzle() {
        let mut session = session_with(vec![puzzle("a", "x"), puzzle("b", "y")]);
        assert_eq!(session.snapshot().puzzle_index, Some(0));

        session.begin_fetch();
        assert_eq!(session.snapshot().phase, Phase::FetchingPuzzle);
        session.finish_fetch(vec![puzzle("c", "z"), puzzle("d", "w"), puzzle("e", "v")]);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.puzzle_index, Some(2));
        assert_eq!(snapshot.history_len, 5);
        assert_eq!(snapshot.phase, Phase::PuzzleReady);
        assert!(snapshot.can_go_previous);
        assert!(snapshot.can_go_next);
    }

    #[test]
    fn test_quota_exhaustion_auto_reveals_solution() {
        let mut session = session_with(vec![puzzle("a", "the truth")]);
        for i in 0..QUESTION_LIMIT {
            assert!(!session.limit_reached(), "limit hit early at {}", i);
            session.begin_question();
            session.record_answer("Yes".to_string());
        }

        let snapshot = session.snapshot();
        assert!(snapshot.limit_reached);
        assert!(snapshot.solution_visible);
        assert!(snapshot.auto_revealed);
        assert_eq!(snapshot.solution.as_deref(), Some("the truth"));
    }

    #[test]
    fn test_error_answers_do_not_consume_quota() {
        let mut session = session_with(vec![puzzle("a", "x")]);
        session.begin_question();
        session.record_error("boom".to_string());
        session.record_error("boom again".to_string());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.question_count, 0);
        assert!(snapshot.answer.as_ref().map(|a| a.is_error).unwrap_or(false));
        assert!(!snapshot.limit_reached);
    }

    #[test]
    fn test_navigation_resets_the_puzzle_view() {
        let mut session = session_with(vec![puzzle("a", "x"), puzzle("b", "y")]);
        session.begin_question();
        session.record_answer("No".to_string());
        session.reveal_solution();
        assert!(session.snapshot().solution_visible);

        session.go_next();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.puzzle_index, Some(1));
        assert_eq!(snapshot.question_count, 0);
        assert!(snapshot.answer.is_none());
        assert!(!snapshot.solution_visible);
        assert!(snapshot.solution.is_none());

        session.go_previous();
        assert_eq!(session.snapshot().puzzle_index, Some(0));
        assert!(!session.snapshot().solution_visible);
    }

    #[test]
    fn test_navigation_at_the_edges_is_a_no_op() {
        let mut session = session_with(vec![puzzle("a", "x")]);
        session.begin_question();
        session.record_answer("Yes".to_string());

        session.go_previous();
        session.go_next();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.puzzle_index, Some(0));
        assert_eq!(snapshot.question_count, 1);
        assert!(snapshot.answer.is_some());
    }

    #[test]
    fn test_reveal_refused_for_placeholder_solutions() {
        let mut session = session_with(vec![puzzle("a", "(Solution not parsed)")]);
        session.reveal_solution();

        let snapshot = session.snapshot();
        assert!(!snapshot.solution_available);
        assert!(!snapshot.solution_visible);
        assert!(snapshot.solution.is_none());
    }

    #[test]
    fn test_placeholder_solution_stays_hidden_even_at_limit() {
        let mut session = session_with(vec![puzzle("a", "（谜底未解析）")]);
        for _ in 0..QUESTION_LIMIT {
            session.begin_question();
            session.record_answer("Yes".to_string());
        }

        let snapshot = session.snapshot();
        assert!(snapshot.limit_reached);
        assert!(!snapshot.solution_visible);
        assert!(snapshot.solution.is_none());
    }

    #[test]
    fn test_asking_refused_for_placeholder_solutions() {
        let mut session = session_with(vec![puzzle("a", "(Solution not parsed)")]);

        let admitted = session.admit_question("Is it night?", &full_settings(), Language::En);
        assert!(admitted.is_none());

        let snapshot = session.snapshot();
        let answer = snapshot.answer.expect("refusal should leave an answer");
        assert!(answer.is_error);
        assert_eq!(
            answer.text,
            "Cannot answer: Solution for this puzzle is unavailable."
        );
        assert_eq!(snapshot.question_count, 0);
        assert_eq!(snapshot.phase, Phase::PuzzleReady);
    }

    #[test]
    fn test_admission_starts_the_answer_and_returns_the_puzzle() {
        let mut session = session_with(vec![puzzle("a", "x")]);

        let admitted = session.admit_question("Did he plan it?", &full_settings(), Language::En);
        assert_eq!(admitted.map(|p| p.description).as_deref(), Some("a"));
        assert_eq!(session.snapshot().phase, Phase::AskingQuestion);
    }

    #[test]
    fn test_blank_questions_are_ignored_silently() {
        let mut session = session_with(vec![puzzle("a", "x")]);

        let admitted = session.admit_question("   ", &full_settings(), Language::En);
        assert!(admitted.is_none());

        let snapshot = session.snapshot();
        assert!(snapshot.answer.is_none());
        assert_eq!(snapshot.question_count, 0);
        assert_eq!(snapshot.phase, Phase::PuzzleReady);
    }

    #[test]
    fn test_failed_fetch_still_resets_the_view() {
        let mut session = session_with(vec![puzzle("a", "x")]);
        session.begin_question();
        session.record_answer("Yes".to_string());

        session.begin_fetch();
        session.abort_fetch();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.puzzle_index, Some(0));
        assert_eq!(snapshot.question_count, 0);
        assert!(snapshot.answer.is_none());
        assert_eq!(snapshot.phase, Phase::PuzzleReady);
    }

    #[test]
    fn test_explicit_reveal_below_limit_is_not_auto() {
        let mut session = session_with(vec![puzzle("a", "x")]);
        session.reveal_solution();

        let snapshot = session.snapshot();
        assert!(snapshot.solution_visible);
        assert!(!snapshot.auto_revealed);
        assert_eq!(snapshot.solution.as_deref(), Some("x"));
    }

    #[test]
    fn test_reaching_the_limit_after_a_reveal_marks_it_auto() {
        let mut session = session_with(vec![puzzle("a", "x")]);
        for i in 0..QUESTION_LIMIT {
            if i == QUESTION_LIMIT - 1 {
                session.reveal_solution();
            }
            session.begin_question();
            session.record_answer("Yes".to_string());
        }

        let snapshot = session.snapshot();
        assert!(snapshot.limit_reached);
        assert!(snapshot.solution_visible);
        assert!(snapshot.auto_revealed);
    }
}
