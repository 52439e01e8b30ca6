use serde_json::json;

use crate::common::{TestApp, routes};

mod character_creation {
    use super::*;

    #[tokio::test]
    async fn aria_is_created_with_defaults_and_modifiers() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let res = app
            .post(
                routes::CHARACTERS,
                &json!({
                    "name": "Aria",
                    "speciesId": pick.species_id,
                    "backgroundId": pick.background_id,
                    "classId": pick.class_id,
                    "strength": "16"
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let body = &res.body;
        assert!(body["id"].is_number());
        assert_eq!(body["name"], "Aria");
        assert_eq!(body["strength"], 16);
        assert_eq!(body["strengthModifier"], 3);
        assert_eq!(body["dexterity"], 0);
        assert_eq!(body["dexterityModifier"], -5);
        assert_eq!(body["level"], 1);
        assert_eq!(body["currentHp"], 0);
        assert_eq!(body["species"]["id"], pick.species_id.as_str());
        assert_eq!(body["species"]["name"], "Dwarf");
        assert!(!body["species"]["traits"].as_array().unwrap().is_empty());
        assert_eq!(body["background"]["id"], pick.background_id.as_str());
        assert_eq!(body["characterClass"]["id"], pick.class_id.as_str());
        assert_eq!(body["characterClass"]["hitDie"], "d10");
        assert_eq!(
            body["coins"],
            r#"{"platinum":0,"gold":0,"electrum":0,"silver":0,"copper":0}"#
        );
        assert_eq!(body["items"], "[]");
        assert_eq!(body["details"], "{}");
        assert_eq!(body["spellSlots"], "[]");
        assert!(body["createdAt"].is_string());
    }

    #[tokio::test]
    async fn numeric_scores_are_accepted() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Human", "Criminal", "Wizard").await;

        let mut body = pick.update_body("Numbers");
        body["intelligence"] = json!(17);
        body["wisdom"] = json!("8");
        let res = app.post(routes::CHARACTERS, &body).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["intelligence"], 17);
        assert_eq!(res.body["intelligenceModifier"], 3);
        assert_eq!(res.body["wisdomModifier"], -1);
    }

    #[tokio::test]
    async fn unknown_species_is_rejected_without_creating_a_row() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;
        let unknown = uuid::Uuid::new_v4();

        let res = app
            .post(
                routes::CHARACTERS,
                &json!({
                    "name": "Ghost",
                    "speciesId": unknown.to_string(),
                    "backgroundId": pick.background_id,
                    "classId": pick.class_id
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.text, format!("Species not found with ID: {unknown}"));
        assert_eq!(app.character_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_with_format_reason() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let res = app
            .post(
                routes::CHARACTERS,
                &json!({
                    "name": "Typo",
                    "speciesId": pick.species_id,
                    "backgroundId": pick.background_id,
                    "classId": "not-a-uuid"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.text.starts_with("Invalid UUID format"), "{}", res.text);
        assert_eq!(app.character_count().await, 0);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let mut body = pick.update_body("");
        let res = app.post(routes::CHARACTERS, &body).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.text, "Character name cannot be empty");

        body["name"] = json!("Aria");
        body.as_object_mut().unwrap().remove("backgroundId");
        let res = app.post(routes::CHARACTERS, &body).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.text, "Background ID cannot be null");

        assert_eq!(app.character_count().await, 0);
    }

    #[tokio::test]
    async fn negative_score_is_rejected() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let mut body = pick.update_body("Aria");
        body["constitution"] = json!("-3");
        let res = app.post(routes::CHARACTERS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.text, "Constitution cannot be negative");
        assert_eq!(app.character_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_body_is_a_plain_text_400() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::CHARACTERS))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }
}

mod character_reads {
    use super::*;

    #[tokio::test]
    async fn list_returns_characters_in_id_order() {
        let app = TestApp::spawn().await;
        let first = app.create_character("First").await;
        let second = app.create_character("Second").await;

        let res = app.get(routes::CHARACTERS).await;

        assert_eq!(res.status, 200);
        let list = res.body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], first);
        assert_eq!(list[1]["id"], second);
        assert_eq!(list[0]["species"]["name"], "Dwarf");
        assert!(list[1]["charismaModifier"].is_number());
    }

    #[tokio::test]
    async fn get_returns_one_character() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let res = app.get(&routes::character(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.id(), id);
        assert_eq!(res.body["name"], "Aria");
        assert_eq!(res.body["background"]["name"], "Acolyte");
    }

    #[tokio::test]
    async fn get_unknown_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::character(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.text, "Character not found");
    }
}

mod character_update {
    use super::*;

    #[tokio::test]
    async fn full_update_changes_every_sent_field() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;
        let pick = app.pick("Halfling", "Criminal", "Wizard").await;

        let mut body = pick.update_body("Aria the Bold");
        body["level"] = json!("4");
        body["temporaryHp"] = json!("2");
        body["currentHp"] = json!(18);
        body["maxHp"] = json!("22");
        body["speed"] = json!("25");
        body["dexterity"] = json!("15");
        body["details"] = json!(r#"{"alignment":"chaotic good"}"#);
        let res = app.put(&routes::character(id), &body).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Aria the Bold");
        assert_eq!(res.body["species"]["name"], "Halfling");
        assert_eq!(res.body["characterClass"]["name"], "Wizard");
        assert_eq!(res.body["level"], 4);
        assert_eq!(res.body["temporaryHp"], 2);
        assert_eq!(res.body["currentHp"], 18);
        assert_eq!(res.body["maxHp"], 22);
        assert_eq!(res.body["speed"], 25);
        assert_eq!(res.body["dexterity"], 15);
        assert_eq!(res.body["dexterityModifier"], 2);
        assert_eq!(res.body["details"], r#"{"alignment":"chaotic good"}"#);
        assert_eq!(res.body["items"], "[]");

        let fetched = app.get(&routes::character(id)).await;
        assert_eq!(fetched.body["level"], 4);
    }

    #[tokio::test]
    async fn negative_strength_leaves_stored_value() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;
        let mut body = pick.update_body("Aria");
        body["strength"] = json!("12");
        let id = app.post(routes::CHARACTERS, &body).await.id();

        body["strength"] = json!("-1");
        body["level"] = json!("5");
        let res = app.put(&routes::character(id), &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.text, "Strength cannot be negative");
        let fetched = app.get(&routes::character(id)).await;
        assert_eq!(fetched.body["strength"], 12);
        assert_eq!(fetched.body["level"], 1);
    }

    #[tokio::test]
    async fn level_out_of_range_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let mut body = pick.update_body("Aria");
        body["level"] = json!("21");
        let res = app.put(&routes::character(id), &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.text, "Level must be between 1 and 20");
    }

    #[tokio::test]
    async fn unknown_class_on_update_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;
        let unknown = uuid::Uuid::new_v4();

        let mut body = pick.update_body("Renamed");
        body["classId"] = json!(unknown.to_string());
        let res = app.put(&routes::character(id), &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.text, format!("Class not found with ID: {unknown}"));
        let fetched = app.get(&routes::character(id)).await;
        assert_eq!(fetched.body["name"], "Aria");
    }

    #[tokio::test]
    async fn update_unknown_is_404() {
        let app = TestApp::spawn().await;
        let pick = app.pick("Dwarf", "Acolyte", "Fighter").await;

        let res = app
            .put(&routes::character(4242), &pick.update_body("Nobody"))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod character_documents {
    use super::*;

    #[tokio::test]
    async fn skills_must_be_valid_json() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let res = app
            .put(
                &routes::character_doc(id, "skills"),
                &json!({ "skills": "not json" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(
            res.text.starts_with("Invalid skills JSON format: "),
            "{}",
            res.text
        );
        let fetched = app.get(&routes::character(id)).await;
        assert_eq!(fetched.body["skills"], "[]");
    }

    #[tokio::test]
    async fn each_document_endpoint_updates_only_its_field() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let cases = [
            ("skills", "skills", r#"[{"name":"Athletics"}]"#),
            ("class-actions", "classActions", r#"[{"name":"Second Wind"}]"#),
            ("spell-slots", "spellSlots", r#"[{"level":1,"total":2}]"#),
            ("spells", "spells", r#"[{"name":"Magic Missile"}]"#),
            ("weapons", "weapons", r#"[{"name":"Longsword"}]"#),
            ("details", "details", r#"{"age":"40"}"#),
        ];

        for (doc, key, value) in cases {
            let before = app.get(&routes::character(id)).await.body;

            let res = app
                .put(&routes::character_doc(id, doc), &json!({ key: value }))
                .await;

            assert_eq!(res.status, 200, "{doc}: {}", res.text);
            assert_eq!(res.body[key], value, "{doc}");
            for other in ["skills", "classActions", "spellSlots", "spells", "weapons", "details"] {
                if other != key {
                    assert_eq!(res.body[other], before[other], "{doc} touched {other}");
                }
            }
            assert_eq!(res.body["name"], "Aria");
        }
    }

    #[tokio::test]
    async fn inventory_updates_coins_and_items() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;
        let coins = r#"{"platinum":1,"gold":2,"electrum":0,"silver":0,"copper":9}"#;

        let res = app
            .put(
                &routes::character_doc(id, "inventory"),
                &json!({ "coins": coins }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["coins"], coins);
        assert_eq!(res.body["items"], "[]");

        let res = app
            .put(
                &routes::character_doc(id, "inventory"),
                &json!({ "items": "[oops" }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.starts_with("Invalid items JSON format: "));
        let fetched = app.get(&routes::character(id)).await;
        assert_eq!(fetched.body["coins"], coins);
        assert_eq!(fetched.body["items"], "[]");
    }

    #[tokio::test]
    async fn raw_json_values_are_stored_as_text() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let res = app
            .put(
                &routes::character_doc(id, "weapons"),
                &json!({ "weapons": [{"name": "Dagger"}] }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["weapons"], r#"[{"name":"Dagger"}]"#);
    }

    #[tokio::test]
    async fn absent_field_leaves_document_unchanged() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let res = app
            .put(&routes::character_doc(id, "spells"), &json!({}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["spells"], "[]");
    }

    #[tokio::test]
    async fn unknown_character_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::character_doc(777, "spell-slots"),
                &json!({ "spellSlots": "[]" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod character_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_removes_character_only() {
        let app = TestApp::spawn().await;
        let id = app.create_character("Aria").await;

        let res = app.delete(&routes::character(id)).await;

        assert_eq!(res.status, 200);
        assert!(res.text.is_empty());
        assert_eq!(app.get(&routes::character(id)).await.status, 404);
        assert_eq!(app.character_count().await, 0);

        let species = app.get(routes::SPECIES).await;
        assert_eq!(species.body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn delete_unknown_is_rejected_and_count_unchanged() {
        let app = TestApp::spawn().await;
        app.create_character("Aria").await;

        let res = app.delete(&routes::character(12345)).await;

        assert_eq!(res.status, 404);
        assert_eq!(app.character_count().await, 1);
    }
}

mod debug_character {
    use super::*;

    #[tokio::test]
    async fn debug_character_uses_first_catalog_entries() {
        let app = TestApp::spawn().await;

        let res = app.post_empty(routes::DEBUG_CHARACTER).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let name = res.body["name"].as_str().unwrap();
        let millis = name.strip_prefix("Debug Character ").unwrap();
        assert!(millis.parse::<i64>().is_ok(), "{name}");
        assert_eq!(res.body["level"], 3);
        assert_eq!(res.body["currentHp"], 25);
        assert_eq!(res.body["maxHp"], 25);
        assert_eq!(res.body["speed"], 30);
        assert_eq!(res.body["strengthModifier"], 3);
        assert_eq!(res.body["species"]["name"], "Aasimar");
        assert_eq!(res.body["background"]["name"], "Acolyte");
        assert_eq!(res.body["characterClass"]["name"], "Fighter");
        let skills: serde_json::Value =
            serde_json::from_str(res.body["skills"].as_str().unwrap()).unwrap();
        assert_eq!(skills[0]["name"], "Athletics");
        assert_eq!(app.character_count().await, 1);
    }

    #[tokio::test]
    async fn debug_character_needs_seeded_catalogs() {
        let app = TestApp::spawn_empty().await;

        let res = app.post_empty(routes::DEBUG_CHARACTER).await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.text,
            "Cannot create debug character: missing species, background, or class data"
        );
        assert_eq!(app.character_count().await, 0);
    }
}
