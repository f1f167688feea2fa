//! HTTP plumbing shared by every endpoint group.
//!
//! `ApiClient` joins paths to the configured base URL, applies the request
//! timeout, injects the acting user and normalizes failures into
//! [`AppError`]. Successful bodies may come wrapped as `{ok, data}`; the
//! wrapper is removed before decoding.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use tesoreria_core::document::{Disposition, disposition};
use tesoreria_shared::config::AppConfig;
use tesoreria_shared::types::UsuarioId;
use tesoreria_shared::{AppError, AppResult, ErrorBody};

use crate::cache::LookupCache;

/// Query/body/multipart field carrying the acting user.
pub const USER_FIELD: &str = "usuario_log_id";

/// Empty query string.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Raw content.
    pub bytes: Vec<u8>,
    /// MIME type from `Content-Type`.
    pub mime_type: String,
    /// Name offered in `Content-Disposition`, if any.
    pub file_name: Option<String>,
}

impl Download {
    /// How to present this file; `fallback_stem` names it when the server did not.
    #[must_use]
    pub fn disposition(&self, fallback_stem: &str) -> Disposition {
        disposition(&self.mime_type, self.file_name.as_deref(), fallback_stem)
    }
}

/// Client for the back-office REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    usuario_id: Option<UsuarioId>,
    timeout: Duration,
    file_delete_timeout: Duration,
    cache: LookupCache,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tesoreria-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            usuario_id: config
                .session
                .usuario_id
                .map(UsuarioId::new)
                .filter(|id| id.is_valid()),
            timeout: Duration::from_secs(config.api.timeout_secs),
            file_delete_timeout: Duration::from_secs(config.api.file_delete_timeout_secs),
            cache: LookupCache::new(&config.cache),
        })
    }

    /// Replaces the acting user. Non-positive ids count as no session.
    #[must_use]
    pub fn with_usuario(mut self, usuario_id: Option<UsuarioId>) -> Self {
        self.usuario_id = usuario_id.filter(|id| id.is_valid());
        self
    }

    /// Acting user, if a session exists.
    #[must_use]
    pub const fn usuario_id(&self) -> Option<UsuarioId> {
        self.usuario_id
    }

    /// Lookup list cache.
    #[must_use]
    pub const fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .timeout(self.timeout)
    }

    fn user_query(&self) -> Vec<(&'static str, String)> {
        self.usuario_id
            .map(|id| vec![(USER_FIELD, id.to_string())])
            .unwrap_or_default()
    }

    /// Serializes `body` and adds the acting user when the body lacks one.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn with_user<B: Serialize + ?Sized>(&self, body: &B) -> AppResult<Value> {
        let mut value = serde_json::to_value(body)
            .map_err(|e| AppError::Internal(format!("failed to encode request body: {e}")))?;
        if let (Some(id), Value::Object(map)) = (self.usuario_id, &mut value) {
            map.entry(USER_FIELD).or_insert_with(|| Value::from(id.get()));
        }
        Ok(value)
    }

    /// `GET path` with query parameters.
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let value = self.get_value(path, query).await?;
        decode(value)
    }

    /// `GET path`, returning the unwrapped JSON.
    pub async fn get_value<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> AppResult<Value> {
        let builder = self
            .request(Method::GET, path)
            .query(query)
            .query(&self.user_query());
        let response = self.send(builder, path).await?;
        read_json(response).await
    }

    /// `GET path` through the lookup cache under `resource`.
    pub async fn get_cached<T, Q>(&self, resource: &str, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let filter = serde_json::to_string(query).unwrap_or_default();
        let filter = if filter == "null" || filter == "{}" || filter == "[]" {
            String::new()
        } else {
            filter
        };
        let key = LookupCache::key(resource, &filter);
        let value = self
            .cache
            .get_or_fetch(key, || self.get_value(path, query))
            .await?;
        decode(Value::clone(&value))
    }

    /// `POST path` with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body, HeaderMap::new()).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body, HeaderMap::new()).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body, HeaderMap::new()).await
    }

    /// Sends a JSON body with extra headers.
    pub async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        headers: HeaderMap,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.with_user(body)?;
        let builder = self.request(method, path).headers(headers).json(&body);
        let response = self.send(builder, path).await?;
        decode(read_json(response).await?)
    }

    /// `DELETE path`; `force` asks the backend to deactivate instead.
    pub async fn delete(&self, path: &str, force: bool) -> AppResult<()> {
        self.delete_with_timeout(path, force, self.timeout).await
    }

    /// `DELETE path` for stored files, with the longer file timeout.
    pub async fn delete_file(&self, path: &str) -> AppResult<()> {
        self.delete_with_timeout(path, false, self.file_delete_timeout)
            .await
    }

    async fn delete_with_timeout(&self, path: &str, force: bool, timeout: Duration) -> AppResult<()> {
        let mut query = self.user_query();
        if force {
            query.push(("force", "true".to_string()));
        }
        let builder = self
            .request(Method::DELETE, path)
            .timeout(timeout)
            .query(&query);
        self.send(builder, path).await?;
        Ok(())
    }

    /// `POST path` as `multipart/form-data`, adding the acting user as a field.
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> AppResult<T> {
        let form = match self.usuario_id {
            Some(id) => form.text(USER_FIELD, id.to_string()),
            None => form,
        };
        let builder = self.request(Method::POST, path).multipart(form);
        let response = self.send(builder, path).await?;
        decode(read_json(response).await?)
    }

    /// `GET path` returning raw bytes with their MIME type and offered name.
    pub async fn download<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> AppResult<Download> {
        let builder = self
            .request(Method::GET, path)
            .query(query)
            .query(&self.user_query());
        let response = self.send(builder, path).await?;

        let headers = response.headers();
        let mime_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("failed to read download: {e}")))?
            .to_vec();

        Ok(Download {
            bytes,
            mime_type,
            file_name,
        })
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(path, "request timed out");
                AppError::Timeout(path.to_string())
            } else {
                tracing::warn!(path, error = %e, "request failed");
                AppError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = parse_error_body(&text);
        tracing::warn!(
            path,
            status = status.as_u16(),
            code = body.code.as_deref().unwrap_or_default(),
            "request rejected"
        );
        Err(AppError::from_response(status.as_u16(), body))
    }
}

/// Parses a failure body, keeping plain text as the message.
fn parse_error_body(text: &str) -> ErrorBody {
    serde_json::from_str::<ErrorBody>(text).unwrap_or_else(|_| ErrorBody {
        mensaje_error: Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        ..ErrorBody::default()
    })
}

async fn read_json(response: Response) -> AppResult<Value> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Network(format!("failed to read response: {e}")))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    unwrap_envelope(value)
}

/// Removes a `{ok, data}` wrapper; `{ok: false}` on a success status is a rule violation.
fn unwrap_envelope(value: Value) -> AppResult<Value> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    if map.get("ok") == Some(&Value::Bool(false)) {
        let body = serde_json::from_value(Value::Object(map)).unwrap_or_default();
        return Err(AppError::BusinessRule(body));
    }
    if map.contains_key("ok") && map.contains_key("data") {
        return Ok(map.remove("data").unwrap_or(Value::Null));
    }
    Ok(Value::Object(map))
}

fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
}

fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let wrapped = json!({ "ok": true, "data": { "id": 3 } });
        assert_eq!(unwrap_envelope(wrapped).unwrap(), json!({ "id": 3 }));

        let plain = json!({ "id": 3, "data": "x" });
        assert_eq!(unwrap_envelope(plain.clone()).unwrap(), plain);

        let list = json!([1, 2]);
        assert_eq!(unwrap_envelope(list.clone()).unwrap(), list);
    }

    #[test]
    fn test_ok_false_is_business_rule() {
        let err = unwrap_envelope(json!({ "ok": false, "code": "SALDO", "mensajeError": "Sin saldo" }))
            .unwrap_err();
        assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");
        assert_eq!(err.body().and_then(|b| b.code.as_deref()), Some("SALDO"));
    }

    #[test]
    fn test_parse_error_body_falls_back_to_text() {
        let body = parse_error_body("Bad Gateway");
        assert_eq!(body.message(), "Bad Gateway");
        assert!(body.code.is_none());

        let body = parse_error_body(r#"{"ok":false,"code":"X","mensajeError":"m"}"#);
        assert!(body.has_code("X"));
    }

    #[rstest]
    #[case("attachment; filename=\"dorso.png\"", Some("dorso.png"))]
    #[case("inline; filename=reporte.pdf", Some("reporte.pdf"))]
    #[case("attachment", None)]
    #[case("attachment; filename=\"\"", None)]
    fn test_filename_from_disposition(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(filename_from_disposition(header).as_deref(), expected);
    }
}
