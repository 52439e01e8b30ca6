use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{catalog, character, debug};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            character::list_characters,
            character::create_character
        ))
        .routes(routes!(
            character::get_character,
            character::update_character,
            character::delete_character
        ))
        .routes(routes!(character::update_inventory))
        .routes(routes!(character::update_details))
        .routes(routes!(character::update_skills))
        .routes(routes!(character::update_class_actions))
        .routes(routes!(character::update_spell_slots))
        .routes(routes!(character::update_spells))
        .routes(routes!(character::update_weapons))
        .routes(routes!(catalog::list_species))
        .routes(routes!(catalog::list_backgrounds))
        .routes(routes!(catalog::list_classes))
        .routes(routes!(debug::create_debug_character))
}
