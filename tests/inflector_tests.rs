//! Integration tests for the inflection transforms.
//!
//! These exercise the crate-root re-exports with the full table of
//! regular, irregular, and case-preserving forms the naming layer relies
//! on.

use active_resource::{camelize, dasherize, pluralize, singularize, underscore};

#[test]
fn pluralize_table() {
    let cases = [
        ("asset", "assets"),
        ("duck", "ducks"),
        ("query", "queries"),
        ("ability", "abilities"),
        ("agency", "agencies"),
        ("box", "boxes"),
        ("search", "searches"),
        ("switch", "switches"),
        ("address", "addresses"),
        ("wish", "wishes"),
        ("bus", "buses"),
        ("status", "statuses"),
        ("alias", "aliases"),
        ("quiz", "quizzes"),
        ("matrix", "matrices"),
        ("vertex", "vertices"),
        ("index", "indices"),
        ("axis", "axes"),
        ("testis", "testes"),
        ("crisis", "crises"),
        ("half", "halves"),
        ("calf", "calves"),
        ("wife", "wives"),
        ("knife", "knives"),
        ("hive", "hives"),
        ("octopus", "octopi"),
        ("virus", "viri"),
        ("buffalo", "buffaloes"),
        ("tomato", "tomatoes"),
        ("datum", "data"),
        ("medium", "media"),
        ("analysis", "analyses"),
        ("ox", "oxen"),
        ("person", "people"),
        ("child", "children"),
        ("cow", "kine"),
    ];
    for (singular, plural) in cases {
        assert_eq!(pluralize(singular), plural, "pluralize({singular})");
    }
}

#[test]
fn singularize_table() {
    let cases = [
        ("assets", "asset"),
        ("queries", "query"),
        ("boxes", "box"),
        ("searches", "search"),
        ("addresses", "address"),
        ("buses", "bus"),
        ("statuses", "status"),
        ("aliases", "alias"),
        ("quizzes", "quiz"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("indices", "index"),
        ("axes", "axis"),
        ("testes", "testis"),
        ("crises", "crisis"),
        ("halves", "half"),
        ("wives", "wife"),
        ("hives", "hive"),
        ("octopi", "octopus"),
        ("viri", "virus"),
        ("buffaloes", "buffalo"),
        ("tomatoes", "tomato"),
        ("data", "datum"),
        ("media", "medium"),
        ("analyses", "analysis"),
        ("theses", "thesis"),
        ("diagnoses", "diagnosis"),
        ("prognoses", "prognosis"),
        ("synopses", "synopsis"),
        ("parentheses", "parenthesis"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("shoes", "shoe"),
        ("movies", "movie"),
        ("oxen", "ox"),
        ("people", "person"),
        ("children", "child"),
        ("kine", "cow"),
        ("news", "news"),
    ];
    for (plural, singular) in cases {
        assert_eq!(singularize(plural), singular, "singularize({plural})");
    }
}

#[test]
fn case_of_the_unmatched_prefix_is_preserved() {
    assert_eq!(pluralize("Axis"), "Axes");
    assert_eq!(pluralize("AXIS"), "AXes");
    assert_eq!(pluralize("QUEry"), "QUEries");
    assert_eq!(pluralize("Person"), "People");
    assert_eq!(pluralize("Cow"), "Kine");
    assert_eq!(singularize("People"), "Person");
    assert_eq!(singularize("Kine"), "Cow");
    assert_eq!(singularize("OXen"), "OX");
}

#[test]
fn uncountables_pass_through_both_ways() {
    for word in ["equipment", "information", "rice", "money", "species", "series", "fish", "sheep", "moose", "deer"] {
        assert_eq!(pluralize(word), word);
        assert_eq!(singularize(word), word);
    }
}

#[test]
fn representative_irregulars_round_trip() {
    for (singular, plural) in [
        ("ox", "oxen"),
        ("person", "people"),
        ("half", "halves"),
        ("axis", "axes"),
        ("index", "indices"),
        ("cow", "kine"),
    ] {
        assert_eq!(singularize(&pluralize(singular)), singular);
        assert_eq!(pluralize(&singularize(plural)), plural);
    }
}

#[test]
fn canonical_forms_are_idempotent() {
    for plural in ["people", "children", "kine", "oxen", "axes", "assets"] {
        assert_eq!(pluralize(plural), plural, "pluralize({plural})");
    }
    assert_eq!(underscore("asset_type"), "asset_type");
    assert_eq!(dasherize("created-at"), "created-at");
}

#[test]
fn camelize_and_underscore_are_inverses_on_namespaced_words() {
    assert_eq!(camelize("active_record", true), "ActiveRecord");
    assert_eq!(camelize("active_record", false), "activeRecord");
    assert_eq!(
        camelize("active_record/errors", true),
        "ActiveRecord::Errors"
    );
    assert_eq!(underscore("ActiveRecord::Errors"), "active_record/errors");
    assert_eq!(
        underscore(&camelize("asset_type", true)),
        "asset_type"
    );
}

#[test]
fn underscore_keeps_acronym_runs_together() {
    assert_eq!(underscore("HTTPResponse"), "http_response");
    assert_eq!(underscore("AssetType"), "asset_type");
    assert_eq!(underscore("Person"), "person");
}

#[test]
fn empty_input_maps_to_empty_output() {
    assert_eq!(pluralize(""), "");
    assert_eq!(singularize(""), "");
    assert_eq!(camelize("", true), "");
    assert_eq!(underscore(""), "");
    assert_eq!(dasherize(""), "");
}
