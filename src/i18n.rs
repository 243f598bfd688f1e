//! Bilingual user-facing strings.
//!
//! The game runs in Chinese or English per request; every message the
//! backend hands to the webview goes through this table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    /// Title stamped on the nth parsed puzzle of a batch.
    pub fn puzzle_title(&self, n: usize) -> String {
        match self {
            Language::En => format!("AI Puzzle #{}", n),
            Language::Zh => format!("AI 谜题 #{}", n),
        }
    }

    /// Placeholder solution for puzzles recovered by the fallback parser.
    pub fn unparsed_solution(&self) -> &'static str {
        match self {
            Language::En => "(Solution not parsed)",
            Language::Zh => "（谜底未解析）",
        }
    }

    pub fn settings_incomplete(&self) -> &'static str {
        match self {
            Language::En => "API settings are incomplete.",
            Language::Zh => "API 设置不完整。",
        }
    }

    pub fn parse_failed(&self) -> &'static str {
        match self {
            Language::En => "Failed to parse puzzles from response.",
            Language::Zh => "无法从响应中解析谜题。",
        }
    }

    pub fn puzzle_extract_failed(&self) -> &'static str {
        match self {
            Language::En => "Could not extract puzzle text from API response.",
            Language::Zh => "无法从 API 响应中提取谜题文本。",
        }
    }

    pub fn answer_extract_failed(&self) -> &'static str {
        match self {
            Language::En => "Could not extract answer from API response.",
            Language::Zh => "无法从 API 响应中提取答案。",
        }
    }

    pub fn question_limit_reached(&self) -> &'static str {
        match self {
            Language::En => "Question limit reached.",
            Language::Zh => "已达到提问次数上限。",
        }
    }

    pub fn answer_model_missing(&self) -> &'static str {
        match self {
            Language::En => "Please select an answer model in settings.",
            Language::Zh => "请在设置中选择回答模型。",
        }
    }

    pub fn solution_unavailable(&self) -> &'static str {
        match self {
            Language::En => "Cannot answer: Solution for this puzzle is unavailable.",
            Language::Zh => "无法回答：当前谜题的谜底不可用。",
        }
    }
}
