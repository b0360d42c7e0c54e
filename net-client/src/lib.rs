pub mod chat;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use analysis_state::snapshot::{save_snapshot, AnalysisPayload};
use analysis_state::upload::{validate_upload, UploadError};
use kv_storage::KeyValueStorage;
use user_state::session::{current_username, load_profile, Profile};

/// A resume file staged for analysis.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Thin client for the two backend endpoints the state layer consumes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// POST the resume to `/analyze/` and decode the analysis payload.
    ///
    /// A non-success response is reported with the server's `error`
    /// message when the body carries one, else generically.
    pub async fn analyze(
        &self,
        file: &UploadFile,
        profile: &Profile,
    ) -> Result<AnalysisPayload, UploadError> {
        let url = self
            .base
            .join("/analyze/")
            .map_err(|_| UploadError::Failed)?;

        let resume = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|_| UploadError::UnsupportedType)?;
        let mut form = Form::new().part("resume", resume);
        if !profile.username.is_empty() {
            form = form.text("username", profile.username.clone());
        }
        if !profile.full_name.is_empty() {
            form = form.text("full_name", profile.full_name.clone());
        }
        if !profile.email.is_empty() {
            form = form.text("email", profile.email.clone());
        }

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                log::warn!("analyze request failed: {}", err);
                UploadError::Failed
            })?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(match message {
                Some(message) => UploadError::Server(message),
                None => UploadError::Failed,
            });
        }

        response.json::<AnalysisPayload>().await.map_err(|err| {
            log::warn!("analyze response malformed: {}", err);
            UploadError::Failed
        })
    }
}

/// The complete upload interaction: local validation, the network call,
/// then snapshot replacement for the signed-in user.
///
/// Every failure leaves the previous snapshot untouched.
pub async fn upload_flow<S: KeyValueStorage>(
    client: &ApiClient,
    store: &mut S,
    file: &UploadFile,
) -> Result<AnalysisPayload, UploadError> {
    validate_upload(&file.mime, file.bytes.len() as u64)?;
    let username =
        current_username(store).ok_or(UploadError::SignedOut)?;

    let profile = load_profile(store);
    let payload = client.analyze(file, &profile).await?;

    save_snapshot(store, &username, &payload).map_err(|err| {
        log::warn!("failed to persist analysis snapshot: {}", err);
        UploadError::Failed
    })?;
    Ok(payload)
}
