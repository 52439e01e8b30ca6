use axum::Json;
use axum::extract::State;
use charsheet_common::{Background, CharacterClass, Species};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::repository::CatalogStore;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/species",
    tag = "Catalogs",
    operation_id = "listSpecies",
    summary = "List species with their traits",
    responses(
        (status = 200, description = "All species", body = Vec<Species>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_species(State(state): State<AppState>) -> Result<Json<Vec<Species>>, AppError> {
    let species = Species::find_all_with_children(&state.db).await?;
    info!(count = species.len(), "Fetched species");
    Ok(Json(species))
}

#[utoipa::path(
    get,
    path = "/backgrounds",
    tag = "Catalogs",
    operation_id = "listBackgrounds",
    summary = "List backgrounds with their features",
    responses(
        (status = 200, description = "All backgrounds", body = Vec<Background>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_backgrounds(
    State(state): State<AppState>,
) -> Result<Json<Vec<Background>>, AppError> {
    let backgrounds = Background::find_all_with_children(&state.db).await?;
    info!(count = backgrounds.len(), "Fetched backgrounds");
    Ok(Json(backgrounds))
}

#[utoipa::path(
    get,
    path = "/classes",
    tag = "Catalogs",
    operation_id = "listClasses",
    summary = "List classes with their features",
    responses(
        (status = 200, description = "All classes", body = Vec<CharacterClass>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterClass>>, AppError> {
    let classes = CharacterClass::find_all_with_children(&state.db).await?;
    info!(count = classes.len(), "Fetched classes");
    Ok(Json(classes))
}
