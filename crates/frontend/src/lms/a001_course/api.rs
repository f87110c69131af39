use contracts::lms::a001_course::dto::CourseListResponse;
use gloo_net::http::Request;

const API_BASE: &str = "/api/courses";

/// Получить страницу курсов; `query` уже закодирован таблицей
pub async fn list_courses(query: &str) -> Result<CourseListResponse, String> {
    let url = format!("{}?{}", API_BASE, query);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: CourseListResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data)
}
