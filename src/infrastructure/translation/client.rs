// src/infrastructure/translation/client.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::translation::{TranslationError, TranslationProvider};
use crate::domain::article::Article;
use crate::domain::text::html_to_text;
use crate::domain::translation::{NewTranslationDocument, TranslationDocument, TranslationState};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pc-trad.herokuapp.com/cms/";
pub const AUTH_HEADER: &str = "x-ultrad-auth";
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguagePair<'a> {
    from_lang: &'a str,
    to_lang: &'a str,
}

#[derive(Debug, Serialize)]
struct OriginalText<'a> {
    original: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateDocumentPayload<'a> {
    lang: LanguagePair<'a>,
    name: &'a str,
    state: &'a str,
    text: OriginalText<'a>,
}

impl<'a> From<&'a NewTranslationDocument> for CreateDocumentPayload<'a> {
    fn from(doc: &'a NewTranslationDocument) -> Self {
        Self {
            lang: LanguagePair {
                from_lang: &doc.from_lang,
                to_lang: &doc.to_lang,
            },
            name: &doc.name,
            state: TranslationState::New.as_str(),
            text: OriginalText {
                original: &doc.original_text,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct DocumentText {
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    edited: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    #[serde(rename = "_id")]
    id: String,
    state: String,
    #[serde(default)]
    text: DocumentText,
}

impl From<DocumentResponse> for TranslationDocument {
    fn from(doc: DocumentResponse) -> Self {
        Self {
            id: doc.id,
            state: TranslationState::from(doc.state.as_str()),
            original_text: doc.text.original,
            edited_text: doc.text.edited,
        }
    }
}

/// Client for the external translation service.
///
/// Every failure (transport, timeout, non-success status, unreadable body)
/// is logged here and returned as a [`TranslationError`].
#[derive(Clone)]
pub struct HttpTranslationClient {
    http: Client,
    base_url: Url,
    auth: String,
}

impl HttpTranslationClient {
    /// Document ids are appended as a path segment of `base_url`.
    pub fn new(base_url: Url, auth: impl Into<String>) -> ApplicationResult<Self> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| {
                ApplicationError::infrastructure(format!("failed to create HTTP client: {err}"))
            })?;

        Ok(Self {
            http,
            base_url,
            auth: auth.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The id becomes one percent-encoded path segment under the base URL,
    /// so it can never change the host or add a query.
    fn document_url(&self, document_id: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(document_id);
        Some(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Option<&CreateDocumentPayload<'_>>,
    ) -> Result<String, TranslationError> {
        let path = url.path().to_owned();
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTH_HEADER, &self.auth);
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|err| {
            tracing::error!(%method, %path, error = %err, "translation request failed");
            TranslationError::new(method.as_str(), &path, None, err.to_string())
        })?;

        read_success(method, path, response).await
    }
}

async fn read_success(
    method: Method,
    path: String,
    response: Response,
) -> Result<String, TranslationError> {
    let status = response.status();
    let body = response.text().await.map_err(|err| {
        tracing::error!(%method, %path, status = status.as_u16(), error = %err, "failed to read translation response");
        TranslationError::new(method.as_str(), &path, Some(status.as_u16()), err.to_string())
    })?;

    if !status.is_success() {
        tracing::error!(
            %method,
            %path,
            status = status.as_u16(),
            body = %body,
            "HTTP error from translation provider"
        );
        return Err(TranslationError::new(
            method.as_str(),
            path,
            Some(status.as_u16()),
            format!("HTTP {status}"),
        ));
    }
    Ok(body)
}

fn parse<T: for<'de> Deserialize<'de>>(
    method: &Method,
    path: &str,
    body: &str,
) -> Result<T, TranslationError> {
    serde_json::from_str(body).map_err(|err| {
        tracing::error!(%method, %path, body = %body, "error when parsing translation response");
        TranslationError::new(method.as_str(), path, None, format!("invalid response: {err}"))
    })
}

#[async_trait]
impl TranslationProvider for HttpTranslationClient {
    async fn submit(&self, article: &Article) -> Result<Option<String>, TranslationError> {
        let (Some(name), Some(body)) = (article.name(), article.body()) else {
            return Ok(None);
        };

        let document = NewTranslationDocument::new(name, html_to_text(body, false));
        let payload = CreateDocumentPayload::from(&document);
        let url = self.base_url.clone();
        let path = url.path().to_owned();

        let body = self.send(Method::POST, url, Some(&payload)).await?;
        let created: CreatedDocument = parse(&Method::POST, &path, &body)?;
        Ok(Some(created.id))
    }

    async fn fetch(&self, document_id: &str) -> Result<TranslationDocument, TranslationError> {
        let Some(url) = self.document_url(document_id) else {
            tracing::error!(base_url = %self.base_url, "translation base url cannot take a path");
            return Err(TranslationError::new(
                "GET",
                self.base_url.path(),
                None,
                "base url cannot take a path",
            ));
        };
        let path = url.path().to_owned();

        let body = self.send(Method::GET, url, None).await?;
        let document: DocumentResponse = parse(&Method::GET, &path, &body)?;
        Ok(document.into())
    }
}
