use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use charsheet_common::{Background, CharacterClass, Species};
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::character;
use crate::error::AppError;
use crate::extractors::json::AppJson;
use crate::models::character::*;
use crate::repository::{self, CatalogIndex, CatalogRefs, CatalogStore};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/characters",
    tag = "Characters",
    operation_id = "listCharacters",
    summary = "List all characters",
    description = "Returns every character ordered by id, each with its species, background and class embedded.",
    responses(
        (status = 200, description = "All characters", body = Vec<CharacterResponse>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state))]
pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterResponse>>, AppError> {
    let models = repository::character::find_all(&state.db).await?;
    let index = CatalogIndex::load(&state.db).await?;

    let data = models
        .into_iter()
        .map(|model| {
            let refs = index
                .refs_for(&model)
                .ok_or_else(|| missing_catalog_data(model.id))?;
            Ok(CharacterResponse::new(model, refs))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/characters/{id}",
    tag = "Characters",
    operation_id = "getCharacter",
    summary = "Get a character by ID",
    params(("id" = i32, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character details", body = CharacterResponse),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CharacterResponse>, AppError> {
    let model = find_character(&state.db, id).await?;
    Ok(Json(character_response(&state.db, model).await?))
}

#[utoipa::path(
    post,
    path = "/characters",
    tag = "Characters",
    operation_id = "createCharacter",
    summary = "Create a character",
    description = "Creates a character referencing existing catalog records. Ability scores are optional, may be strings or numbers, and default to 0.",
    request_body = CreateCharacterRequest,
    responses(
        (status = 200, description = "Character created", body = CharacterResponse),
        (status = 400, description = "Missing, malformed or unknown field", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_character(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCharacterRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    let valid = validate_create_character(payload)?;
    let refs = resolve_catalog_refs(&state.db, &valid.ids).await?;

    let mut active = character::new_active_model(
        valid.name,
        valid.ids.species_id,
        valid.ids.background_id,
        valid.ids.class_id,
    );
    valid.scores.apply(&mut active);

    let model = repository::character::insert(&state.db, active).await?;
    info!(id = model.id, name = %model.name, "Created character");

    Ok(Json(CharacterResponse::new(model, refs)))
}

#[utoipa::path(
    put,
    path = "/characters/{id}",
    tag = "Characters",
    operation_id = "updateCharacter",
    summary = "Replace a character's core fields",
    description = "Name and catalog ids are required. Level, HP, speed and ability scores are optional and left unchanged when omitted. `coins`, `items` and `details` are stored verbatim.",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateCharacterRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Missing, malformed or unknown field", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_character(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCharacterRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    let model = find_character(&state.db, id).await?;
    let valid = validate_update_character(payload)?;
    let refs = resolve_catalog_refs(&state.db, &valid.ids).await?;

    let mut active: character::ActiveModel = model.into();
    valid.apply(&mut active);
    let model = repository::character::update(&state.db, active).await?;
    info!("Updated character");

    Ok(Json(CharacterResponse::new(model, refs)))
}

#[utoipa::path(
    put,
    path = "/characters/{id}/inventory",
    tag = "Character Documents",
    operation_id = "updateCharacterInventory",
    summary = "Update coins and items",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateInventoryRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateInventoryRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/details",
    tag = "Character Documents",
    operation_id = "updateCharacterDetails",
    summary = "Update the details document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateDetailsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateDetailsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/skills",
    tag = "Character Documents",
    operation_id = "updateCharacterSkills",
    summary = "Update the skills document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateSkillsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_skills(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSkillsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/class-actions",
    tag = "Character Documents",
    operation_id = "updateCharacterClassActions",
    summary = "Update the class actions document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateClassActionsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_class_actions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateClassActionsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/spell-slots",
    tag = "Character Documents",
    operation_id = "updateCharacterSpellSlots",
    summary = "Update the spell slots document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateSpellSlotsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_spell_slots(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSpellSlotsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/spells",
    tag = "Character Documents",
    operation_id = "updateCharacterSpells",
    summary = "Update the spells document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateSpellsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_spells(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSpellsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    put,
    path = "/characters/{id}/weapons",
    tag = "Character Documents",
    operation_id = "updateCharacterWeapons",
    summary = "Update the weapons document",
    params(("id" = i32, Path, description = "Character ID")),
    request_body = UpdateWeaponsRequest,
    responses(
        (status = 200, description = "Character updated", body = CharacterResponse),
        (status = 400, description = "Invalid JSON document", body = String, content_type = "text/plain"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_weapons(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateWeaponsRequest>,
) -> Result<Json<CharacterResponse>, AppError> {
    patch_documents(&state, id, payload.into()).await
}

#[utoipa::path(
    delete,
    path = "/characters/{id}",
    tag = "Characters",
    operation_id = "deleteCharacter",
    summary = "Delete a character",
    description = "Deletes the character only. Catalog records are never touched.",
    params(("id" = i32, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character deleted"),
        (status = 404, description = "Character not found", body = String, content_type = "text/plain"),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_character(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !repository::character::delete(&state.db, id).await? {
        return Err(AppError::character_not_found());
    }
    info!("Deleted character");
    Ok(StatusCode::OK)
}

async fn find_character<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<character::Model, AppError> {
    repository::character::find_by_id(db, id)
        .await?
        .ok_or_else(AppError::character_not_found)
}

fn missing_catalog_data(id: i32) -> AppError {
    AppError::Internal(format!(
        "Character {id} references missing species, background, or class data"
    ))
}

async fn character_response(
    db: &DatabaseConnection,
    model: character::Model,
) -> Result<CharacterResponse, AppError> {
    let refs = CatalogRefs::load_for(db, &model)
        .await?
        .ok_or_else(|| missing_catalog_data(model.id))?;
    Ok(CharacterResponse::new(model, refs))
}

/// Look up every referenced catalog record. Unknown ids are client errors.
async fn resolve_catalog_refs(
    db: &DatabaseConnection,
    ids: &CatalogIds,
) -> Result<CatalogRefs, AppError> {
    let species = Species::find_by_id_with_children(db, ids.species_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("Species not found with ID: {}", ids.species_id))
        })?;
    let background = Background::find_by_id_with_children(db, ids.background_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Background not found with ID: {}",
                ids.background_id
            ))
        })?;
    let class = CharacterClass::find_by_id_with_children(db, ids.class_id)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("Class not found with ID: {}", ids.class_id))
        })?;

    Ok(CatalogRefs {
        species,
        background,
        class,
    })
}

async fn patch_documents(
    state: &AppState,
    id: i32,
    fields: Vec<(JsonField, Option<String>)>,
) -> Result<Json<CharacterResponse>, AppError> {
    let model = find_character(&state.db, id).await?;
    let patch = JsonPatch::validate(fields)?;

    let model = if patch.is_empty() {
        model
    } else {
        info!(fields = ?patch.fields(), "Updating character documents");
        let mut active: character::ActiveModel = model.into();
        patch.apply(&mut active);
        repository::character::update(&state.db, active).await?
    };

    Ok(Json(character_response(&state.db, model).await?))
}
