//! Save flow: rasterized canvas plus poster metadata to the poster store.
//!
//! The engine hands over an owned [`PosterDraft`] and the PNG data URL; from
//! then on nothing here can reach engine state, so a failed or retried save
//! leaves the composition untouched.
//!
//! RETRIES
//! =======
//! Only [`StoreError::RateLimited`] is retried, after a fixed delay, up to
//! [`SavePolicy::max_retries`] times. A retry repeats the whole attempt
//! (upload, then append). Every other failure ends the save immediately.

#[cfg(test)]
#[path = "save_test.rs"]
mod save_test;

use std::future::Future;
use std::time::Duration;

use posters::{DistanceDirection, Poster, SOURCE_CANVAS, Selection, ShapeRecord, SliderParams, poster_file_name};
use serde::{Deserialize, Serialize};

const HTTP_TOO_MANY_REQUESTS: u16 = 429;

/// Failure reported by a [`PosterStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Failure of a whole save, after retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("still rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },
    #[error("poster store failed: {0}")]
    Store(StoreError),
}

impl SaveError {
    /// Short, non-fatal message for the host to show.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited { .. } => "Too many saves right now. Please wait a moment and try again.".to_owned(),
            Self::Store(err) => format!("Saving failed ({err}). Your canvas is unchanged, please try again."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self { max_retries: 3, retry_delay: Duration::from_millis(2000) }
    }
}

/// Everything about the composition the save needs, detached from the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterDraft {
    pub selection: Selection,
    /// Palette color, `#RRGGBB`.
    pub color: String,
    pub shapes: Vec<ShapeRecord>,
    pub slider_params: SliderParams,
    pub distance_direction: DistanceDirection,
}

impl PosterDraft {
    /// Upload file name without extension.
    #[must_use]
    pub fn file_name(&self, created_at: &str) -> String {
        poster_file_name(&self.selection.emotion, &self.selection.reason, created_at)
    }

    /// The metadata record for an uploaded image.
    #[must_use]
    pub fn to_poster(&self, img: &str, img_route: &str, created_at: &str) -> Poster {
        Poster {
            emotion: self.selection.emotion.clone(),
            reason: self.selection.reason.clone(),
            color: self.color.clone(),
            img: img.to_owned(),
            img_route: img_route.to_owned(),
            shapes: self.shapes.clone(),
            slider_params: self.slider_params,
            distance_direction: self.distance_direction,
            created_at: created_at.to_owned(),
            source: SOURCE_CANVAS.to_owned(),
        }
    }
}

/// Body of the image upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PngUpload {
    /// `<name>.png`.
    pub file_name: String,
    /// `data:image/png;base64,...`.
    pub data_url: String,
}

/// One save request: the draft, its image and its ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveJob {
    pub draft: PosterDraft,
    pub data_url: String,
    pub created_at: String,
}

/// Persistence collaborator for finished posters.
pub trait PosterStore {
    /// Store the image and return its stable URL.
    fn upload(&self, upload: &PngUpload) -> impl Future<Output = Result<String, StoreError>>;

    /// Append a poster record.
    fn append(&self, poster: &Poster) -> impl Future<Output = Result<(), StoreError>>;
}

/// Run `job` against `store`, retrying rate-limited attempts per `policy`.
///
/// `sleep` provides the delay between retries so callers pick the timer.
///
/// # Errors
///
/// Returns [`SaveError::RateLimited`] once retries are exhausted, or
/// [`SaveError::Store`] on the first non-retryable failure.
pub async fn save_poster<S, F, Fut>(store: &S, job: SaveJob, policy: SavePolicy, sleep: F) -> Result<Poster, SaveError>
where
    S: PosterStore,
    F: Fn(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    let name = job.draft.file_name(&job.created_at);
    let upload = PngUpload { file_name: format!("{name}.png"), data_url: job.data_url };
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        log::info!("save: attempt {attempts} for {}", upload.file_name);
        match try_save(store, &job.draft, &upload, &name, &job.created_at).await {
            Ok(poster) => {
                log::info!("save: stored {} at {}", poster.img, poster.img_route);
                return Ok(poster);
            }
            Err(StoreError::RateLimited) if attempts <= policy.max_retries => {
                log::warn!("save: rate limited, retrying in {}ms", policy.retry_delay.as_millis());
                sleep(policy.retry_delay).await;
            }
            Err(StoreError::RateLimited) => {
                log::error!("save: rate limited after {attempts} attempts");
                return Err(SaveError::RateLimited { attempts });
            }
            Err(err) => {
                log::error!("save: {err}");
                return Err(SaveError::Store(err));
            }
        }
    }
}

async fn try_save<S: PosterStore>(
    store: &S,
    draft: &PosterDraft,
    upload: &PngUpload,
    name: &str,
    created_at: &str,
) -> Result<Poster, StoreError> {
    let route = store.upload(upload).await?;
    let poster = draft.to_poster(name, &route, created_at);
    store.append(&poster).await?;
    Ok(poster)
}

// =============================================================
// HTTP store
// =============================================================

fn uploads_endpoint(api_base: &str) -> String {
    format!("{api_base}/uploads")
}

fn posters_endpoint(api_base: &str) -> String {
    format!("{api_base}/posters")
}

/// Map a response status to success or the matching [`StoreError`].
fn check_status(status: u16) -> Result<(), StoreError> {
    match status {
        200..=299 => Ok(()),
        HTTP_TOO_MANY_REQUESTS => Err(StoreError::RateLimited),
        other => Err(StoreError::Status(other)),
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_url: String,
}

/// [`PosterStore`] backed by the poster REST API via `gloo-net`.
#[derive(Debug, Clone)]
pub struct HttpPosterStore {
    api_base: String,
}

impl HttpPosterStore {
    #[must_use]
    pub fn new(api_base: &str) -> Self {
        Self { api_base: api_base.trim_end_matches('/').to_owned() }
    }
}

impl PosterStore for HttpPosterStore {
    async fn upload(&self, upload: &PngUpload) -> Result<String, StoreError> {
        let resp = gloo_net::http::Request::post(&uploads_endpoint(&self.api_base))
            .json(upload)
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        check_status(resp.status())?;
        let body: UploadResponse = resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(body.file_url)
    }

    async fn append(&self, poster: &Poster) -> Result<(), StoreError> {
        let resp = gloo_net::http::Request::post(&posters_endpoint(&self.api_base))
            .json(poster)
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        check_status(resp.status())?;
        Ok(())
    }
}
