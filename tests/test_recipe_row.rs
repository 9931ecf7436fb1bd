use profession_scraper::{parse_profession_row, FieldValue, Quantity, RecordKind, TierOutput};

const RECIPE_ROW: &str = r#"
<noinclude>{{Table header profession}}</noinclude>{{Table row profession
  |level=70
  |icon=Crafting_Resource_Adeptselectuary.png
  |rarity=common
  |name=Adept's Electuary
  |link=Alchemy/Adept's Electuary
  |commission=7512
  |proficiency=800
  |focus=694-901
  |materials=6x {{itemlink|Wild Mint|*}}, 3x {{itemlink|Honey|*}}, 3x {{itemlink|Spring Water|*}}
  |tier1=3x {{itemlink|Adept's Electuary|*}}
  |tier2=3x {{itemlink|Adept's Electuary +1|*}}
  |tier3=
  |morale=40
  |interval=180
  |pxp=59973
}}<noinclude>|}[[Category:{{BASEPAGENAME}} tasks]]</noinclude>
"#;

fn quantity(quantity: u32, item: &str) -> Quantity {
    Quantity {
        quantity,
        item: item.to_string(),
    }
}

#[test]
fn test_canonical_recipe_row() {
    let record = parse_profession_row(RECIPE_ROW).unwrap();
    assert_eq!(record.kind(), RecordKind::Recipe);

    assert_eq!(
        record.get("produces"),
        Some(&FieldValue::Produces(vec![
            TierOutput {
                tier: "tier1".to_string(),
                quantity: 3,
                item: "Adept's Electuary".to_string(),
            },
            TierOutput {
                tier: "tier2".to_string(),
                quantity: 3,
                item: "Adept's Electuary +1".to_string(),
            },
        ]))
    );
    assert_eq!(
        record.get("materials"),
        Some(&FieldValue::Materials(vec![
            quantity(6, "Wild Mint"),
            quantity(3, "Honey"),
            quantity(3, "Spring Water"),
        ]))
    );
    assert_eq!(record.text("profession"), Some("Alchemy"));
    assert_eq!(record.text("level"), Some("70"));
    assert_eq!(record.text("name"), Some("Adept's Electuary"));
    assert_eq!(record.text("focus"), Some("694-901"));
    assert_eq!(record.text("pxp"), Some("59973"));
}

#[test]
fn test_empty_tier_is_not_recorded() {
    let record = parse_profession_row(RECIPE_ROW).unwrap();
    assert!(!record.contains("tier3"));
    assert!(!record.contains("tier1"));
    assert!(!record.contains("link"));
}

#[test]
fn test_field_order_follows_template() {
    let record = parse_profession_row(RECIPE_ROW).unwrap();
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(
        keys,
        vec![
            "produces",
            "level",
            "icon",
            "rarity",
            "name",
            "profession",
            "commission",
            "proficiency",
            "focus",
            "materials",
            "morale",
            "interval",
            "pxp",
        ]
    );
}

#[test]
fn test_recipe_json_line() {
    let record = parse_profession_row(RECIPE_ROW).unwrap();
    let line = record.to_json_line().unwrap();
    assert!(!line.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "recipe");
    assert_eq!(value["produces"].as_array().unwrap().len(), 2);
    assert_eq!(value["produces"][1]["item"], "Adept's Electuary +1");
    assert_eq!(value["materials"][0]["quantity"], 6);
    // pass-through fields stay strings
    assert_eq!(value["level"], "70");
}

#[test]
fn test_unknown_arguments_pass_through() {
    let record = parse_profession_row(
        "{{Table row profession|name=Honey|  notes  = rare drop |tier1=Honey}}",
    )
    .unwrap();
    assert_eq!(record.text("notes"), Some("rare drop"));
    assert_eq!(
        record.get("produces"),
        Some(&FieldValue::Produces(vec![TierOutput {
            tier: "tier1".to_string(),
            quantity: 1,
            item: "Honey".to_string(),
        }]))
    );
}

#[test]
fn test_first_matching_row_wins() {
    let record = parse_profession_row(
        "{{Table row profession|name=First}}{{Table row profession|name=Second}}",
    )
    .unwrap();
    assert_eq!(record.text("name"), Some("First"));
}

#[test]
fn test_commas_inside_item_links_stay_in_the_name() {
    let record = parse_profession_row(
        "{{Table row profession|materials=2x {{itemlink|Potion, Greater|*}}, 1x {{itemlink|Honey|*}}}}",
    )
    .unwrap();
    assert_eq!(
        record.get("materials"),
        Some(&FieldValue::Materials(vec![
            quantity(2, "Potion, Greater"),
            quantity(1, "Honey"),
        ]))
    );
}
