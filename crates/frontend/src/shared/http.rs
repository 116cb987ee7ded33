//! HTTP accessor for the store API.
//!
//! Every call goes through [`send`]: the request is aborted after
//! `api.timeout_secs`, non-2xx answers become [`ApiError`] through the body
//! message, and transport failures become [`ApiError::Transport`].

use contracts::domain::common::{EntityId, Resource};
use contracts::shared::error::ApiError;
use contracts::shared::paging::{decode_body, decode_page, Page, PageQuery};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;

use crate::shared::api_utils::api_base;
use crate::shared::config;

/// Write verbs with a JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteVerb {
    Post,
    Put,
}

/// `base + path + ?k=v&...` with keys and values percent-encoded
pub fn build_url(base: &str, path: &str, params: &[(String, String)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }
    url
}

fn url(path: &str, params: &[(String, String)]) -> String {
    build_url(&api_base(), path, params)
}

/// Send with a timeout; returns the body of a 2xx response
async fn send(builder: RequestBuilder, body: Option<String>) -> Result<String, ApiError> {
    let controller =
        web_sys::AbortController::new().map_err(|_| ApiError::Transport("AbortController".into()))?;
    let builder = builder
        .header("Accept", "application/json")
        .abort_signal(Some(&controller.signal()));

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json)
            .map_err(|e| ApiError::Transport(e.to_string()))?,
        None => builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?,
    };

    let timeout_ms = config::current().api.timeout_secs.saturating_mul(1000);
    // Dropping the timeout before it fires cancels it
    let _timeout = Timeout::new(timeout_ms, move || controller.abort());

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if response.ok() {
        Ok(text)
    } else {
        let err = ApiError::from_response(status, &text);
        log::warn!("{} {} -> {}: {}", response.url(), status, status_text(status), err);
        Err(err)
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500..=599 => "Server Error",
        _ => "Error",
    }
}

fn encode<T: serde::Serialize>(body: &T) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// ============================================================================
// Raw calls
// ============================================================================

pub async fn get_text(path: &str, params: &[(String, String)]) -> Result<String, ApiError> {
    send(Request::get(&url(path, params)), None).await
}

pub async fn write_json<T: serde::Serialize>(
    verb: WriteVerb,
    path: &str,
    body: &T,
) -> Result<String, ApiError> {
    let json = encode(body)?;
    let target = url(path, &[]);
    let builder = match verb {
        WriteVerb::Post => Request::post(&target),
        WriteVerb::Put => Request::put(&target),
    };
    send(builder, Some(json)).await
}

/// PUT without a body, for state toggles like "set as default"
pub async fn put_empty(path: &str) -> Result<String, ApiError> {
    send(Request::put(&url(path, &[])), None).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    send(Request::delete(&url(path, &[])), None).await.map(|_| ())
}

// ============================================================================
// Resource calls
// ============================================================================

/// One page of rows for the query
pub async fn fetch_page<R: Resource>(query: &PageQuery) -> Result<Page<R::Row>, ApiError> {
    let path = R::list_path(query);
    let params = query.to_params();
    log::debug!("GET {} {:?}", path, params);
    let body = get_text(&path, &params).await?;
    let page: Page<R::Dto> = decode_page(&body, R::envelope())?;
    Ok(page.map(R::to_row))
}

pub async fn get_one<R: Resource>(id: EntityId) -> Result<R::Row, ApiError> {
    let body = get_text(&R::item_path(id), &[]).await?;
    let dto: R::Dto = decode_body(&body, R::envelope())?;
    Ok(R::to_row(dto))
}

/// POST a validated form
pub async fn create<R: Resource>(form: &R::Form) -> Result<(), ApiError> {
    write_json(WriteVerb::Post, R::endpoint(), &R::to_request(form))
        .await
        .map(|_| ())
}

/// PUT a validated form
pub async fn update<R: Resource>(id: EntityId, form: &R::Form) -> Result<(), ApiError> {
    write_json(WriteVerb::Put, &R::item_path(id), &R::to_request(form))
        .await
        .map(|_| ())
}

pub async fn remove<R: Resource>(row: &R::Row) -> Result<(), ApiError> {
    delete(&R::delete_path(row)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::paging::SortSpec;

    #[test]
    fn test_build_url_without_params() {
        assert_eq!(
            build_url("http://localhost:8080/", "/mau-sac/5", &[]),
            "http://localhost:8080/mau-sac/5"
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let mut query = PageQuery::new(SortSpec::desc("id"), 10);
        query.keyword = "đỏ đậm".to_string();
        query.filters.insert("trangThai".to_string(), "true".to_string());
        let url = build_url("http://h:8080", "/mau-sac", &query.to_params());
        assert_eq!(
            url,
            "http://h:8080/mau-sac?keyword=%C4%91%E1%BB%8F%20%C4%91%E1%BA%ADm&trangThai=true&page=0&size=10&sort=id%2Cdesc"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(409), "Conflict");
        assert_eq!(status_text(503), "Server Error");
    }
}
