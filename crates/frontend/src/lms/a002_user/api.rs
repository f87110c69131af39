use gloo_net::http::Request;
use serde_json::Value;

const API_BASE: &str = "/api/users";

/// Получить всех пользователей; фильтрация и сортировка на клиенте
pub async fn list_users() -> Result<Vec<Value>, String> {
    let response = Request::get(API_BASE)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
