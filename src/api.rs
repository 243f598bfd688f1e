//! Client for the user-supplied OpenAI-compatible endpoint.
//!
//! The endpoint URL comes from settings in whatever shape the user typed
//! it; the normalization here fills in the scheme and the standard `/v1/`
//! paths without fighting a URL that already carries them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One chat completion call. The two call sites differ only in model,
/// prompts and sampling.
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
}

pub fn ensure_scheme(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        println!("[api] API URL has no protocol, defaulting to http");
        format!("http://{}", url)
    }
}

pub fn models_url(api_url: &str) -> String {
    let mut url = ensure_scheme(api_url);
    if !url.ends_with("/v1/models") {
        if url.ends_with('/') {
            url.push_str("v1/models");
        } else {
            url.push_str("/v1/models");
        }
    }
    url
}

pub fn chat_url(api_url: &str) -> String {
    let mut url = ensure_scheme(api_url);
    if !url.contains("/v1/chat/completions") {
        if url.ends_with('/') {
            url.push_str("v1/chat/completions");
        } else if !url.contains("/v1/") {
            url.push_str("/v1/chat/completions");
        } else {
            // A /v1/ path the user typed themselves is left alone.
            println!("[api] API URL already carries a /v1/ path, using it as-is");
        }
    }
    url
}

pub async fn list_models(api_url: &str, api_key: &str) -> Result<Vec<ModelInfo>, String> {
    let url = models_url(api_url);
    println!("[list_models] GET {}", url);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch models: {}", e))?;

    let status = response.status();
    println!("[list_models] response status: {}", status);
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        eprintln!("[list_models] error body: {}", body);
        return Err(format!("Failed to fetch models: {}. {}", status, body));
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to fetch models: {}", e))?;
    parse_models_payload(&data)
}

/// The endpoint either wraps the list in `{"data": [...]}` or returns a
/// bare array. Entries without an `id` are skipped.
pub fn parse_models_payload(data: &Value) -> Result<Vec<ModelInfo>, String> {
    let list = if let Some(arr) = data.get("data").and_then(|d| d.as_array()) {
        arr
    } else if let Some(arr) = data.as_array() {
        arr
    } else {
        eprintln!("[list_models] unexpected payload: {}", data);
        return Err("Unexpected API response structure".to_string());
    };

    let models = list
        .iter()
        .filter_map(|item| {
            let id = item.get("id").and_then(|v| v.as_str())?;
            Some(ModelInfo {
                id: id.to_string(),
                name: item
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            })
        })
        .collect();
    Ok(models)
}

/// Sends one system+user chat completion and returns the reply text, or
/// `None` when the reply carries no usable content. `fail_label` prefixes
/// transport and status errors so each caller keeps its own wording.
pub async fn chat_completion(
    api_url: &str,
    api_key: &str,
    request: &ChatRequest<'_>,
    fail_label: &str,
) -> Result<Option<String>, String> {
    let url = chat_url(api_url);
    println!("[chat_completion] POST {} model={}", url, request.model);

    let body = serde_json::json!({
        "model": request.model,
        "messages": [
            { "role": "system", "content": request.system_prompt },
            { "role": "user", "content": request.user_prompt }
        ],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("{}: {}", fail_label, e))?;

    let status = response.status();
    println!("[chat_completion] response status: {}", status);
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        eprintln!("[chat_completion] error body: {}", error_body);
        return Err(format!("{}: {}. {}", fail_label, status, error_body));
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| format!("{}: {}", fail_label, e))?;
    Ok(extract_message_content(&data))
}

pub fn extract_message_content(data: &Value) -> Option<String> {
    let text = data["choices"][0]["message"]["content"].as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scheme_is_prepended_when_missing() {
        assert_eq!(ensure_scheme("localhost:11434"), "http://localhost:11434");
        assert_eq!(ensure_scheme("http://a"), "http://a");
        assert_eq!(ensure_scheme("HTTPS://a"), "HTTPS://a");
    }

    #[test]
    fn test_models_url_joins_correctly() {
        assert_eq!(models_url("http://h"), "http://h/v1/models");
        assert_eq!(models_url("http://h/"), "http://h/v1/models");
        assert_eq!(models_url("http://h/v1/models"), "http://h/v1/models");
        assert_eq!(models_url("api.example.com"), "http://api.example.com/v1/models");
    }

    #[test]
    fn test_chat_url_joins_correctly() {
        assert_eq!(chat_url("http://h"), "http://h/v1/chat/completions");
        assert_eq!(chat_url("http://h/"), "http://h/v1/chat/completions");
        assert_eq!(
            chat_url("http://h/v1/chat/completions"),
            "http://h/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_url_respects_an_existing_v1_path() {
        // The URL has /v1/ but not the full path: left untouched.
        assert_eq!(chat_url("http://h/v1/openai"), "http://h/v1/openai");
    }

    #[test]
    fn test_models_payload_wrapped_in_data() {
        let data = json!({ "data": [ { "id": "m1" }, { "id": "m2", "name": "Model 2" } ] });
        let models = parse_models_payload(&data).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "m1");
        assert_eq!(models[1].name.as_deref(), Some("Model 2"));
    }

    #[test]
    fn test_models_payload_as_bare_array() {
        let data = json!([ { "id": "m1" }, { "object": "junk" } ]);
        let models = parse_models_payload(&data).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "m1");
    }

    #[test]
    fn test_models_payload_rejects_other_shapes() {
        let data = json!({ "object": "list" });
        let err = parse_models_payload(&data).unwrap_err();
        assert_eq!(err, "Unexpected API response structure");
    }

    #[test]
    fn test_extracts_trimmed_message_content() {
        let data = json!({
            "choices": [ { "message": { "role": "assistant", "content": "  Yes  " } } ]
        });
        assert_eq!(extract_message_content(&data).as_deref(), Some("Yes"));
    }

    #[test]
    fn test_missing_or_empty_content_yields_none() {
        assert!(extract_message_content(&json!({})).is_none());
        assert!(extract_message_content(&json!({ "choices": [] })).is_none());
        let blank = json!({ "choices": [ { "message": { "content": "   " } } ] });
        assert!(extract_message_content(&blank).is_none());
    }
}
