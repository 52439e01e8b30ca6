use charsheet_common::{Background, Catalog, CharacterClass, HitDie, Species};
use charsheet_server::repository::CatalogStore;

use crate::common::{TestApp, routes};

/// `instantiate` -> `save` -> `find_by_id_with_children` for every name.
async fn assert_round_trip<T>(app: &TestApp)
where
    T: CatalogStore + Clone + std::fmt::Debug + PartialEq,
{
    for name in T::names() {
        let record = T::instantiate(name).unwrap();
        let id = record.id();
        let saved = T::save(&app.db, record.clone()).await.unwrap();
        assert_eq!(saved, record);

        let loaded = T::find_by_id_with_children(&app.db, id)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("{name} should be stored"));
        assert_eq!(loaded, record, "{name}");
    }
}

mod catalog_listing {
    use super::*;

    #[tokio::test]
    async fn species_are_listed_by_name_with_traits() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::SPECIES).await;

        assert_eq!(res.status, 200);
        let species = res.body.as_array().unwrap();
        let names: Vec<&str> = species.iter().map(|s| s["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["Aasimar", "Dragonborn", "Dwarf", "Halfling", "Human"]
        );

        let dwarf = &species[2];
        assert!(dwarf["id"].is_string());
        let traits = dwarf["traits"].as_array().unwrap();
        let expected = Species::instantiate("Dwarf").unwrap();
        assert_eq!(traits.len(), expected.traits.len());
        for (json, def) in traits.iter().zip(&expected.traits) {
            assert_eq!(json["title"], def.title.as_str());
            assert_eq!(json["description"], def.description.as_str());
            assert!(json.get("speciesId").is_none());
        }
    }

    #[tokio::test]
    async fn backgrounds_are_listed_with_features() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::BACKGROUNDS).await;

        assert_eq!(res.status, 200);
        let backgrounds = res.body.as_array().unwrap();
        assert_eq!(backgrounds.len(), 2);
        assert_eq!(backgrounds[0]["name"], "Acolyte");
        assert_eq!(backgrounds[1]["name"], "Criminal");

        let expected = Background::instantiate("Acolyte").unwrap();
        let titles: Vec<&str> = backgrounds[0]["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["title"].as_str().unwrap())
            .collect();
        let expected_titles: Vec<&str> =
            expected.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, expected_titles);
    }

    #[tokio::test]
    async fn classes_are_listed_with_hit_die_and_leveled_features() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::CLASSES).await;

        assert_eq!(res.status, 200);
        let classes = res.body.as_array().unwrap();
        assert_eq!(classes.len(), 2);

        let fighter = &classes[0];
        assert_eq!(fighter["name"], "Fighter");
        assert_eq!(fighter["hitDie"], "d10");
        let levels: Vec<i64> = fighter["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["level"].as_i64().unwrap())
            .collect();
        assert_eq!(levels, vec![1, 1, 2, 1, 2]);

        let wizard = &classes[1];
        assert_eq!(wizard["name"], "Wizard");
        assert_eq!(wizard["hitDie"], "d6");
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = TestApp::spawn_empty().await;

        for path in [routes::SPECIES, routes::BACKGROUNDS, routes::CLASSES] {
            let res = app.get(path).await;
            assert_eq!(res.status, 200);
            assert_eq!(res.body, serde_json::json!([]), "{path}");
        }
    }
}

mod catalog_store {
    use super::*;

    #[tokio::test]
    async fn every_definition_round_trips_through_the_store() {
        let app = TestApp::spawn_empty().await;

        assert_round_trip::<Species>(&app).await;
        assert_round_trip::<Background>(&app).await;
        assert_round_trip::<CharacterClass>(&app).await;

        assert_eq!(Species::count(&app.db).await.unwrap(), 5);
        assert_eq!(Background::count(&app.db).await.unwrap(), 2);
        assert_eq!(CharacterClass::count(&app.db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn saving_again_replaces_children() {
        let app = TestApp::spawn_empty().await;
        let mut wizard = CharacterClass::instantiate("Wizard").unwrap();
        CharacterClass::save(&app.db, wizard.clone()).await.unwrap();

        wizard.features.truncate(1);
        wizard.features[0].title = "Renamed".into();
        wizard.description = Some("Changed".into());
        CharacterClass::save(&app.db, wizard.clone()).await.unwrap();

        let loaded = CharacterClass::find_by_id_with_children(&app.db, wizard.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.features.len(), 1);
        assert_eq!(loaded.features[0].title, "Renamed");
        assert_eq!(loaded.description.as_deref(), Some("Changed"));
        assert_eq!(loaded.hit_die, HitDie::D6);
        assert_eq!(CharacterClass::count(&app.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let app = TestApp::spawn().await;

        let found = Species::find_by_id_with_children(&app.db, uuid::Uuid::new_v4())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_first_follows_name_order() {
        let app = TestApp::spawn_empty().await;
        assert!(Species::find_first(&app.db).await.unwrap().is_none());

        charsheet_server::seed::seed_catalogs(&app.db).await;

        let first = Species::find_first(&app.db).await.unwrap().unwrap();
        assert_eq!(first.name, "Aasimar");
        assert!(!first.traits.is_empty());
        let first = Background::find_first(&app.db).await.unwrap().unwrap();
        assert_eq!(first.name, "Acolyte");
        let first = CharacterClass::find_first(&app.db).await.unwrap().unwrap();
        assert_eq!(first.name, "Fighter");
    }

    #[tokio::test]
    async fn delete_removes_record_and_children() {
        let app = TestApp::spawn_empty().await;
        let halfling = Species::instantiate("Halfling").unwrap();
        Species::save(&app.db, halfling.clone()).await.unwrap();

        assert!(Species::delete(&app.db, halfling.id).await.unwrap());
        assert!(!Species::delete(&app.db, halfling.id).await.unwrap());
        assert!(
            Species::find_by_id_with_children(&app.db, halfling.id)
                .await
                .unwrap()
                .is_none()
        );

        // Re-saving the same record works once its children are gone.
        Species::save(&app.db, halfling.clone()).await.unwrap();
        assert_eq!(Species::count(&app.db).await.unwrap(), 1);
    }
}

mod surface {
    use super::*;

    #[tokio::test]
    async fn any_origin_is_allowed() {
        let app = TestApp::spawn().await;

        let res = app
            .get_with_origin(routes::SPECIES, "http://example.test")
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));

        let res = app
            .preflight(routes::CHARACTERS, "http://example.test", "PUT")
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.header("access-control-allow-origin"), Some("*"));
        assert_eq!(res.header("access-control-max-age"), Some("3600"));
    }

    #[tokio::test]
    async fn openapi_document_lists_character_routes() {
        let app = TestApp::spawn_empty().await;

        let res = app.get(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().unwrap();
        for path in [
            "/api/characters",
            "/api/characters/{id}",
            "/api/characters/{id}/spell-slots",
            "/api/species",
            "/api/debug/character",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
