//! Turns a generator model's reply into discrete puzzles.
//!
//! The model is asked for numbered `Scenario N: ... Solution N: ...` blocks
//! (`谜面N：... 谜底N：...` in Chinese). Replies rarely follow instructions
//! perfectly, so parsing is two-stage: match numbered marker pairs first,
//! then fall back to scanning lines for bare descriptions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// One lateral-thinking puzzle as shown to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub description: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

static EN_SCENARIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"Scenario\s*([0-9]+)\s*:").unwrap());
static EN_SOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"Solution\s*([0-9]+)\s*:").unwrap());
static ZH_SCENARIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"谜面\s*([0-9]+)\s*[:：]").unwrap());
static ZH_SOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"谜底\s*([0-9]+)\s*[:：]").unwrap());
static ANY_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:：]").unwrap());
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

struct Marker {
    start: usize,
    end: usize,
    number: String,
}

fn find_markers(re: &Regex, text: &str) -> Vec<Marker> {
    re.captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let number = cap.get(1)?.as_str().to_string();
            Some(Marker {
                start: whole.start(),
                end: whole.end(),
                number,
            })
        })
        .collect()
}

/// Trim, strip one leading `{{` and one trailing `}}`, trim again. The
/// prompt uses `{{...}}` to mark fill-in slots and some models echo the
/// braces back.
fn clean_content(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix("{{").unwrap_or(s);
    let s = s.strip_suffix("}}").unwrap_or(s);
    s.trim().to_string()
}

/// Extracts puzzles from the model's reply. Never fails; a reply that
/// yields nothing returns an empty list.
///
/// A scenario marker opens a block that runs to the next scenario marker or
/// the end of the reply. The first solution marker inside the block carrying
/// the same number splits it into description and solution. Blocks missing
/// their solution marker, or empty on either side after cleanup, are
/// dropped. Puzzles are numbered by the order they survive, not by the
/// numbers the model printed.
pub fn parse_puzzles(text: &str, lang: Language) -> Vec<Puzzle> {
    let (scenario_re, solution_re) = match lang {
        Language::En => (&*EN_SCENARIO, &*EN_SOLUTION),
        Language::Zh => (&*ZH_SCENARIO, &*ZH_SOLUTION),
    };

    let mut puzzles = Vec::new();
    let scenarios = find_markers(scenario_re, text);
    let mut matched_any_block = false;

    for (i, scenario) in scenarios.iter().enumerate() {
        let block_end = match scenarios.get(i + 1) {
            Some(next) => next.start,
            None => text.len(),
        };
        let block = &text[scenario.end..block_end];

        let solution = match find_markers(solution_re, block)
            .into_iter()
            .find(|m| m.number == scenario.number)
        {
            Some(m) => m,
            None => {
                println!(
                    "[parse_puzzles] scenario #{} has no matching solution marker, skipping",
                    scenario.number
                );
                continue;
            }
        };

        matched_any_block = true;
        let description = clean_content(&block[..solution.start]);
        let solution_text = clean_content(&block[solution.end..]);

        if description.is_empty() || solution_text.is_empty() {
            println!(
                "[parse_puzzles] puzzle #{} matched but one side is empty, dropping",
                scenario.number
            );
            continue;
        }

        let title = lang.puzzle_title(puzzles.len() + 1);
        puzzles.push(Puzzle {
            description,
            solution: solution_text,
            title: Some(title),
        });
    }

    // Fallback: no numbered pair matched anywhere. Recover bare descriptions
    // from marker lines; their solutions are unknown and get a placeholder
    // the rest of the game treats as unavailable.
    if !matched_any_block {
        println!("[parse_puzzles] structured format not found, scanning lines for descriptions");
        for line in LINE_BREAKS.split(text) {
            if !line.contains("谜面") && !line.contains("Scenario") {
                continue;
            }
            let mut segments = ANY_COLON.splitn(line, 3);
            segments.next();
            let description = match segments.next() {
                Some(raw) => clean_content(raw),
                None => continue,
            };
            if description.is_empty() {
                continue;
            }
            println!("[parse_puzzles] recovered a description without a solution");
            puzzles.push(Puzzle {
                description,
                solution: lang.unparsed_solution().to_string(),
                title: Some(lang.puzzle_title(puzzles.len() + 1)),
            });
        }
    }

    println!("[parse_puzzles] parsed {} puzzles", puzzles.len());
    puzzles
}

/// A solution is usable when it is non-empty and is not a fallback
/// placeholder. Placeholder puzzles can be read but not played.
pub fn solution_available(solution: &str) -> bool {
    !solution.is_empty() && !solution.contains("not parsed") && !solution.contains("未解析")
}
