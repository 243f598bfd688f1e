#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod i18n;
mod parser;
mod prompts;
mod session;
mod settings;

use std::sync::Mutex;

use api::ChatRequest;
use i18n::Language;
use session::{GameSession, SessionSnapshot};
use settings::Settings;

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    settings: Mutex<Settings>,
    session: Mutex<GameSession>,
}

// ============================================================================
// Settings Commands
// ============================================================================

#[tauri::command]
fn get_settings(state: tauri::State<AppState>) -> Settings {
    state.settings.lock().unwrap().clone()
}

// The settings dialog edits live state as the user types; only an explicit
// save writes it to disk.
#[tauri::command]
fn update_settings(settings: Settings, state: tauri::State<AppState>) {
    *state.settings.lock().unwrap() = settings;
}

#[tauri::command]
fn save_settings(settings: Settings, state: tauri::State<AppState>) -> Result<(), String> {
    println!(
        "[save_settings] url={} model={} answer_model={}",
        settings.api_url, settings.selected_model, settings.selected_answer_model
    );
    *state.settings.lock().unwrap() = settings.clone();
    settings::save(&settings)
}

// ============================================================================
// Model Listing
// ============================================================================

// Queried with whatever is typed in the settings dialog, saved or not.
#[tauri::command]
async fn list_models(api_url: String, api_key: String) -> Result<Vec<api::ModelInfo>, String> {
    if api_url.is_empty() || api_key.is_empty() {
        // Nothing to query yet; the settings dialog shows an empty list.
        return Ok(Vec::new());
    }
    api::list_models(&api_url, &api_key).await
}

// ============================================================================
// Game Commands
// ============================================================================

#[tauri::command]
async fn fetch_puzzles(
    language: Language,
    state: tauri::State<'_, AppState>,
) -> Result<SessionSnapshot, String> {
    let settings = state.settings.lock().unwrap().clone();
    if settings.api_url.is_empty()
        || settings.api_key.is_empty()
        || settings.selected_model.is_empty()
    {
        return Err(language.settings_incomplete().to_string());
    }

    println!(
        "[fetch_puzzles] using model {} at {}",
        settings.selected_model, settings.api_url
    );

    state.session.lock().unwrap().begin_fetch();

    let request = ChatRequest {
        model: &settings.selected_model,
        system_prompt: prompts::puzzle_generator_system_prompt(language),
        user_prompt: prompts::puzzle_generator_user_prompt(language),
        max_tokens: prompts::PUZZLE_MAX_TOKENS,
        temperature: prompts::PUZZLE_TEMPERATURE,
    };

    let result = api::chat_completion(
        &settings.api_url,
        &settings.api_key,
        &request,
        "Failed to fetch puzzle",
    )
    .await;

    let mut session = state.session.lock().unwrap();
    let text = match result {
        Ok(Some(text)) => text,
        Ok(None) => {
            session.abort_fetch();
            return Err(language.puzzle_extract_failed().to_string());
        }
        Err(e) => {
            session.abort_fetch();
            return Err(e);
        }
    };

    let new_puzzles = parser::parse_puzzles(&text, language);
    if new_puzzles.is_empty() {
        eprintln!("[fetch_puzzles] nothing parsed from reply:\n{}", text);
        session.abort_fetch();
        return Err(language.parse_failed().to_string());
    }

    println!("[fetch_puzzles] parsed {} puzzles", new_puzzles.len());
    session.finish_fetch(new_puzzles);
    Ok(session.snapshot())
}

#[tauri::command]
async fn ask_question(
    question: String,
    language: Language,
    state: tauri::State<'_, AppState>,
) -> Result<SessionSnapshot, String> {
    let settings = state.settings.lock().unwrap().clone();

    // Guard failures either leave an error answer in the session or bail
    // silently; none of them consume quota or reach the network.
    let puzzle = {
        let mut session = state.session.lock().unwrap();
        match session.admit_question(&question, &settings, language) {
            Some(puzzle) => puzzle,
            None => return Ok(session.snapshot()),
        }
    };

    println!(
        "[ask_question] using model {} at {}",
        settings.selected_answer_model, settings.api_url
    );

    let user_prompt = prompts::question_answerer_user_prompt(
        language,
        &puzzle.description,
        &puzzle.solution,
        &question,
    );

    let request = ChatRequest {
        model: &settings.selected_answer_model,
        system_prompt: prompts::question_answerer_system_prompt(language),
        user_prompt: &user_prompt,
        max_tokens: prompts::ANSWER_MAX_TOKENS,
        temperature: prompts::ANSWER_TEMPERATURE,
    };

    let result = api::chat_completion(
        &settings.api_url,
        &settings.api_key,
        &request,
        "Failed to get answer",
    )
    .await;

    let mut session = state.session.lock().unwrap();
    match result {
        Ok(Some(text)) => session.record_answer(text),
        Ok(None) => session.record_error(language.answer_extract_failed().to_string()),
        Err(e) => session.record_error(e),
    }
    Ok(session.snapshot())
}

#[tauri::command]
fn previous_puzzle(state: tauri::State<AppState>) -> SessionSnapshot {
    let mut session = state.session.lock().unwrap();
    session.go_previous();
    session.snapshot()
}

#[tauri::command]
fn next_puzzle(state: tauri::State<AppState>) -> SessionSnapshot {
    let mut session = state.session.lock().unwrap();
    session.go_next();
    session.snapshot()
}

#[tauri::command]
fn reveal_solution(state: tauri::State<AppState>) -> SessionSnapshot {
    let mut session = state.session.lock().unwrap();
    session.reveal_solution();
    session.snapshot()
}

#[tauri::command]
fn get_session(state: tauri::State<AppState>) -> SessionSnapshot {
    state.session.lock().unwrap().snapshot()
}

// ============================================================================
// Application Entry
// ============================================================================

fn main() {
    let initial_settings = settings::load();

    tauri::Builder::default()
        .manage(AppState {
            settings: Mutex::new(initial_settings),
            session: Mutex::new(GameSession::default()),
        })
        .invoke_handler(tauri::generate_handler![
            get_settings,
            update_settings,
            save_settings,
            list_models,
            fetch_puzzles,
            ask_question,
            previous_puzzle,
            next_puzzle,
            reveal_solution,
            get_session
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
