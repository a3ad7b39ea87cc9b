//! Catalog loading, filtering, grouping and winner selection.

use proptest::prelude::*;
use serde_json::{Value, json};
use shelf_catalog::*;
use shelf_layout::{LayoutConfig, LayoutEngine, Transition};

fn character(name: &str, gender: Option<&str>, box_office: f64) -> Value {
    let mut analysis = json!({ "demographics": {} });
    if let Some(gender) = gender {
        analysis["demographics"]["gender"] = json!(gender);
    }
    json!({
        "film_info": { "film_name": name, "box_office": box_office },
        "character_analysis": analysis
    })
}

fn catalog(records: Vec<Value>) -> FilmCatalog {
    match FilmCatalog::from_value(json!({ "characters": records })) {
        Ok(catalog) => catalog,
        Err(err) => panic!("fixture should load: {err}"),
    }
}

fn three_films() -> FilmCatalog {
    catalog(vec![
        character("Alpha", Some("female"), 100.0),
        character("Beta", Some("male"), 300.0),
        character("Gamma", Some("male"), 50.0),
    ])
}

fn ids(raw: &[&str]) -> Vec<ItemId> {
    raw.iter().map(|&s| ItemId::from(s)).collect()
}

// ---- loading ----

#[test]
fn films_generated_in_document_order() {
    let catalog = three_films();
    let names: Vec<&str> = catalog.films().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    assert_eq!(catalog.items(), ids(&["film1", "film2", "film3"]));
    assert_eq!(catalog.film(&ItemId::from("film2")).map(|f| f.text.as_str()), Some("BETA"));
}

#[test]
fn missing_characters_is_an_error() {
    let err = FilmCatalog::from_json_str(r#"{"films": []}"#).err();
    assert!(matches!(
        err,
        Some(CatalogError::MissingField {
            record: None,
            field: "characters"
        })
    ));
}

#[test]
fn record_without_name_is_an_error() {
    let err = FilmCatalog::from_json_str(r#"{"characters": [{"film_info": {}}]}"#).err();
    assert!(matches!(
        err,
        Some(CatalogError::MissingField { record: Some(0), .. })
    ));
}

#[test]
fn bad_json_is_a_parse_error() {
    let err = FilmCatalog::from_json_str("{ nope").err();
    assert!(matches!(err, Some(CatalogError::Parse(_))));
}

#[test]
fn unreadable_path_is_an_io_error() {
    let err = FilmCatalog::from_path("/definitely/not/here/catalog.json").err();
    assert!(matches!(err, Some(CatalogError::Io { .. })));
}

#[test]
fn attributes_and_metrics_resolve_through_records() {
    let catalog = three_films();
    let beta = ItemId::from("film2");
    assert_eq!(
        catalog.attribute(&beta, "character_analysis.demographics.gender"),
        Some(json!("male"))
    );
    assert_eq!(catalog.metric(&beta, DEFAULT_METRIC_PATH), 300.0);
    assert_eq!(catalog.metric(&ItemId::from("film9"), DEFAULT_METRIC_PATH), 0.0);
}

// ---- filters ----

#[test]
fn filter_splits_on_exact_string() {
    let mut catalog = catalog(vec![
        character("Alpha", Some("female"), 1.0),
        character("Beta", Some("Female"), 1.0),
        character("Gamma", None, 1.0),
        character("Delta", Some("female"), 1.0),
    ]);
    let partition = catalog.filter("demographics.gender", "female");
    assert_eq!(partition.matching, ids(&["film1", "film4"]));
    assert_eq!(partition.non_matching, ids(&["film2", "film3"]));
    assert_eq!(
        catalog.active_filter(),
        Some(&FilterDescriptor::Binary {
            category: "demographics.gender".into(),
            value: "female".into(),
        })
    );
}

#[test]
fn prefixed_category_paths_are_accepted() {
    let mut catalog = three_films();
    let partition = catalog.filter("character_analysis.demographics.gender", "male");
    assert_eq!(partition.matching, ids(&["film2", "film3"]));
}

#[test]
fn grouping_collects_missing_values_as_unknown() {
    let mut catalog = catalog(vec![
        character("Alpha", Some("female"), 1.0),
        character("Beta", None, 1.0),
        character("Gamma", Some(""), 1.0),
        character("Delta", Some("male"), 1.0),
    ]);
    let groups = catalog.group_by_category("demographics.gender");
    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, ["female", "unknown", "male"]);
    assert_eq!(groups["unknown"], ids(&["film2", "film3"]));
    assert!(matches!(
        catalog.active_filter(),
        Some(FilterDescriptor::Grouped { category, .. }) if category == "demographics.gender"
    ));

    catalog.clear_filter();
    assert!(catalog.active_filter().is_none());
}

#[test]
fn update_film_edits_text_and_image() {
    let mut catalog = three_films();
    let alpha = ItemId::from("film1");
    assert!(catalog.update_film(
        &alpha,
        FilmUpdate {
            text: Some("ALPHA2".into()),
            image: Some("/covers/alpha.jpg".into()),
        }
    ));
    // Empty text is ignored, an explicit image always applies.
    assert!(catalog.update_film(
        &alpha,
        FilmUpdate {
            text: Some(String::new()),
            image: Some(String::new()),
        }
    ));
    let film = catalog.film(&alpha).cloned();
    assert_eq!(film.as_ref().map(|f| f.text.as_str()), Some("ALPHA2"));
    assert_eq!(film.as_ref().map(|f| f.image.as_str()), Some(""));
    assert!(!catalog.update_film(&ItemId::from("film99"), FilmUpdate::default()));
}

// ---- winner ----

#[test]
fn winner_is_first_film_with_most_top_group_appearances() {
    // Every category but gender puts all three films in one "unknown" group.
    // Gender's top group is male (350) so Beta and Gamma tie on 14; Beta was
    // counted first.
    let catalog = three_films();
    let winner = catalog.winner();
    assert_eq!(winner.as_ref().map(|w| w.film.id.as_str()), Some("film2"));
    assert_eq!(winner.as_ref().map(|w| w.top_group_count), Some(14));
    assert_eq!(
        winner.as_ref().map(|w| w.total_categories),
        Some(FILTER_CATEGORIES.len())
    );
}

#[test]
fn empty_catalog_has_no_winner() {
    assert!(catalog(Vec::new()).winner().is_none());
}

#[test]
fn winner_does_not_touch_the_active_filter() {
    let mut catalog = three_films();
    let _ = catalog.filter("demographics.gender", "male");
    let before = catalog.active_filter().cloned();
    let _ = catalog.winner();
    assert_eq!(catalog.active_filter().cloned(), before);
}

// ---- engine wiring ----

#[test]
fn catalog_drives_the_engine() {
    let mut catalog = three_films();
    let mut engine = LayoutEngine::new(LayoutConfig::default(), &catalog);
    assert_eq!(engine.registry().total_occupants(), 3);
    assert_eq!(engine.item(&ItemId::from("film2")).map(|i| i.metric), Some(300.0));

    let partition = catalog.filter("demographics.gender", "male");
    assert_eq!(
        engine.apply_binary_partition(&partition.matching, &partition.non_matching),
        Transition::Started
    );
    let groups = catalog.group_by_category("demographics.gender");
    assert_eq!(engine.apply_group_partition(&groups), Transition::Rejected);
}

proptest! {
    #[test]
    fn filter_and_group_cover_every_film(
        genders in prop::collection::vec(prop::option::of(0usize..3), 0..40),
        pick in 0usize..3,
    ) {
        const VALUES: [&str; 3] = ["male", "female", "non-binary"];
        let records = genders
            .iter()
            .enumerate()
            .map(|(i, g)| character(&format!("Film {i}"), g.map(|g| VALUES[g]), i as f64))
            .collect();
        let mut catalog = catalog(records);

        let partition = catalog.filter("demographics.gender", VALUES[pick]);
        prop_assert_eq!(partition.matching.len() + partition.non_matching.len(), genders.len());
        let expected = genders.iter().filter(|g| **g == Some(pick)).count();
        prop_assert_eq!(partition.matching.len(), expected);

        let groups = catalog.group_by_category("demographics.gender");
        let mut all: Vec<ItemId> = groups.values().flatten().cloned().collect();
        all.sort();
        let mut items = catalog.items();
        items.sort();
        prop_assert_eq!(all, items);
    }
}
