use axum::Json;
use axum::extract::State;
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::character::CharacterResponse;
use crate::repository::{self, CatalogRefs};
use crate::seed;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/debug/character",
    tag = "Debug",
    operation_id = "createDebugCharacter",
    summary = "Create a sample character",
    description = "Creates a level 3 sample character from the first species, background and class. The name carries the current epoch milliseconds.",
    responses(
        (status = 200, description = "Sample character created", body = CharacterResponse),
        (status = 400, description = "Catalogs not seeded", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn create_debug_character(
    State(state): State<AppState>,
) -> Result<Json<CharacterResponse>, AppError> {
    let refs = CatalogRefs::first_available(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::Validation(
                "Cannot create debug character: missing species, background, or class data"
                    .into(),
            )
        })?;

    let name = format!("Debug Character {}", Utc::now().timestamp_millis());
    let active = seed::sample_character(name, &refs);
    let model = repository::character::insert(&state.db, active).await?;
    info!(id = model.id, "Created debug character");

    Ok(Json(CharacterResponse::new(model, refs)))
}
