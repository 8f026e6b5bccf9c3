use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use coach_core::share::{self, InvoiceLink, ShareLink};
use coach_core::{
    generate, Error, GenerateRequest, Intensity, JsonlSink, PlaylistGenre, Routine,
    SavedWorkout, WorkoutSink,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;

const APP_NAME: &str = "MicroCoach";

type ApiError = (StatusCode, Json<serde_json::Value>);

// ============================================================
// Error Handling
// ============================================================

/// Map a core error onto a response
///
/// Request problems are returned to the client as-is with BAD_REQUEST.
/// Everything else is logged server-side and reported with only a
/// generic code.
fn api_error(e: Error, code: &str) -> ApiError {
    if e.is_client_error() {
        tracing::warn!("Rejected request: {}", e);
        let kind = match e {
            Error::UnknownIntensity(_) => "UnknownIntensity",
            _ => "Validation",
        };
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": kind, "message": e.to_string() })),
        );
    }

    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": code })),
    )
}

fn bad_request(message: impl Into<String>) -> ApiError {
    api_error(Error::Validation(message.into()), "bad_request")
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "app": APP_NAME,
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

// ============================================================
// Workouts
// ============================================================

#[derive(Debug, Default, Deserialize)]
pub struct GenerateBody {
    pub level: Option<String>,
    pub intensity: Option<String>,
    pub total_seconds: Option<i64>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub playlist: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub intensity: Option<String>,
}

impl GenerateBody {
    /// `level` wins over `intensity`, which wins over the query string;
    /// nothing at all means regular
    fn to_request(&self, query: &GenerateQuery) -> Result<GenerateRequest, ApiError> {
        let label = self
            .level
            .as_deref()
            .or(self.intensity.as_deref())
            .or(query.intensity.as_deref());
        let intensity = match label {
            Some(label) => label
                .parse::<Intensity>()
                .map_err(|e| api_error(e, "generate_failed"))?,
            None => Intensity::default(),
        };

        let total_seconds = self
            .total_seconds
            .map(|secs| {
                u32::try_from(secs)
                    .map_err(|_| bad_request(format!("invalid total_seconds: {}", secs)))
            })
            .transpose()?;

        let playlist = self
            .playlist
            .as_deref()
            .map(str::parse::<PlaylistGenre>)
            .transpose()
            .map_err(|e| api_error(e, "generate_failed"))?;

        Ok(GenerateRequest {
            intensity,
            total_seconds,
            exercise_count: self.count,
            playlist,
        })
    }
}

pub async fn generate_workout(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    body: Bytes,
) -> Result<Json<Routine>, ApiError> {
    // An empty body is the same as `{}`
    let body: GenerateBody = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| bad_request(format!("invalid body: {}", e)))?
    };
    let request = body.to_request(&query)?;

    let mut rng = match body.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    generate(state.catalog, &request, &state.generator, &mut rng)
        .map(Json)
        .map_err(|e| api_error(e, "generate_failed"))
}

pub async fn save_workout(
    State(state): State<AppState>,
    Json(routine): Json<Routine>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let workout = SavedWorkout::new(routine);
    let id: Uuid = workout.id;

    let mut sink = JsonlSink::new(&state.journal_path);
    sink.append(&workout)
        .map_err(|e| api_error(e, "save_failed"))?;

    tracing::info!("Saved workout {}", id);
    Ok(Json(serde_json::json!({ "ok": true, "id": id })))
}

// ============================================================
// Links
// ============================================================

pub async fn create_invoice(State(state): State<AppState>) -> Json<InvoiceLink> {
    Json(share::invoice_link(&state.bot_username))
}

#[derive(Debug, Deserialize)]
pub struct ShareQuery {
    pub user: Option<String>,
}

pub async fn share_link(
    State(state): State<AppState>,
    Query(query): Query<ShareQuery>,
) -> Json<ShareLink> {
    Json(share::share_link(&state.bot_username, query.user.as_deref()))
}
