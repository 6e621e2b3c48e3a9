//! Authenticated API client.
//!
//! [`ApiClient`] is cheap to clone and shares its transport and
//! [`Session`]. Every request goes through [`ApiClient::execute`], which:
//!
//! 1. attaches `Authorization: Bearer <token>` when the session holds one;
//! 2. on `401` clears the session and emits [`SessionEvent::LoginRequired`];
//! 3. converts every failure into an [`ApiError`].
//!
//! There are no retries; each call is awaited on its own.

use std::sync::Arc;

use admin_core::session::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody, ReqwestTransport, Transport};

/// Signals emitted by the client towards the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the credentials; the session was cleared and the
    /// user must sign in again.
    LoginRequired,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<Session>) -> Self {
        Self {
            transport,
            session,
            events: None,
        }
    }

    /// Client talking to `base_url` over reqwest.
    pub fn with_base_url(base_url: &str, session: Arc<Session>) -> Self {
        Self::new(Arc::new(ReqwestTransport::new(base_url)), session)
    }

    /// Deliver [`SessionEvent`]s to `tx`.
    pub fn with_session_events(mut self, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ── Core request path ─────────────────────────────────────────────────────

    /// Send `request` with the bearer token attached and map the outcome.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match self.session.token() {
            Some(token) => request.set_header("Authorization", format!("Bearer {token}")),
            None => request
                .headers
                .retain(|(k, _)| !k.eq_ignore_ascii_case("Authorization")),
        }

        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, path = %path, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(method, path = %path, error = %e, "request failed before a response");
            ApiError::from_transport(e)
        })?;

        if response.status == 401 {
            warn!(method, path = %path, "authorization rejected; signing out");
            self.force_sign_out();
            return Err(ApiError::from_response(response.status, &response.body));
        }

        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            warn!(method, path = %path, status = response.status, error = %err, "request rejected");
            return Err(err);
        }

        debug!(method, path = %path, status = response.status, "request completed");
        Ok(response)
    }

    fn force_sign_out(&self) {
        self.session.clear();
        if let Some(tx) = &self.events {
            // A closed receiver just means nobody is listening any more.
            let _ = tx.send(SessionEvent::LoginRequired);
        }
    }

    // ── JSON verbs ────────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_query(path, Vec::new()).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::Get, path).with_query(query);
        decode(self.execute(request).await?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Post, path).with_body(json_body(body)?);
        decode(self.execute(request).await?)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Put, path).with_body(json_body(body)?);
        decode(self.execute(request).await?)
    }

    /// `DELETE`; any success body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::new(Method::Delete, path)).await?;
        Ok(())
    }

    // ── Binary transfers ──────────────────────────────────────────────────────

    /// Multipart upload of one file under the form field `file`.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::Post, path).with_body(RequestBody::Multipart {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            bytes,
        });
        decode(self.execute(request).await?)
    }

    /// Raw response bytes.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(ApiRequest::new(Method::Get, path)).await?;
        Ok(response.body)
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::local(format!("Failed to encode request body: {e}")))
}

/// Decode a success body. An empty body decodes as JSON `null`, so `()`,
/// `Option<_>` and `serde_json::Value` targets accept it.
fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::decode(response.status, e))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
