use chrono::NaiveDate;
use flag_league::league::{
    CategoryCode, CategoryRuleBook, EligibilityEngine, RefusalReason, Sex,
};

fn on(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn master_category_admits_veterans_only() {
    let engine = EligibilityEngine::default();
    let today = on(2024, 6, 15);

    let veteran = engine.can_join_category("GOMR850412HDFRRN09", CategoryCode::Varmast, today);
    assert!(veteran.allowed);
    assert_eq!(veteran.age, Some(39));

    let young = engine.can_join_category("SADI950120HDFNNG02", CategoryCode::Varmast, today);
    assert_eq!(
        young.reason,
        Some(RefusalReason::BelowMinimumAge {
            category: CategoryCode::Varmast,
            age: 29,
            min_age: 35,
        })
    );

    for document in ["LOPA700930MDFPRN01", "LOPA920930MDFPRN01", "MESO011102MDFRRF03"] {
        let verdict = engine.can_join_category(document, CategoryCode::Varmast, today);
        assert!(
            matches!(verdict.reason, Some(RefusalReason::SexNotPermitted { .. })),
            "{document} should be refused on sex"
        );
    }
}

#[test]
fn youth_categories_enforce_upper_bound() {
    let engine = EligibilityEngine::default();
    let today = on(2024, 6, 15);

    // born 2006-06-16: still 17 the day before the birthday
    let seventeen = engine.can_join_category("ABCD060616HDFXXX01", CategoryCode::Varjuv, today);
    assert!(seventeen.allowed);
    assert_eq!(seventeen.age, Some(17));

    let eighteen =
        engine.can_join_category("ABCD060616HDFXXX01", CategoryCode::Varjuv, on(2024, 6, 16));
    assert!(matches!(
        eighteen.reason,
        Some(RefusalReason::AboveMaximumAge { age: 18, max_age: 17, .. })
    ));
}

#[test]
fn unknown_category_is_reported_before_document_errors() {
    let engine = EligibilityEngine::default();
    let verdict = engine.can_join_code("??", "rugby", on(2024, 6, 15));
    assert_eq!(
        verdict.reason,
        Some(RefusalReason::UnknownCategory {
            category: "rugby".to_string()
        })
    );
    assert!(verdict.age.is_none());
}

#[test]
fn injected_rule_book_replaces_the_standard_table() {
    let json = r#"{
        "varmast": {
            "label": "Veteranos 40+",
            "permitted_sexes": ["male"],
            "min_age": 40
        }
    }"#;
    let book = CategoryRuleBook::from_json_reader(json.as_bytes()).expect("rule book parses");
    assert_eq!(book.len(), 1);
    assert_eq!(book.label(CategoryCode::Varmast), "Veteranos 40+");
    assert_eq!(
        book.rule(CategoryCode::Varmast).map(|rule| rule.permits(Sex::Male)),
        Some(true)
    );

    let engine = EligibilityEngine::new(book);
    let verdict = engine.can_join_category("GOMR850412HDFRRN09", CategoryCode::Varmast, on(2024, 6, 15));
    assert!(matches!(
        verdict.reason,
        Some(RefusalReason::BelowMinimumAge { age: 39, min_age: 40, .. })
    ));

    let missing = engine.can_join_category("GOMR850412HDFRRN09", CategoryCode::Mixgold, on(2024, 6, 15));
    assert!(matches!(
        missing.reason,
        Some(RefusalReason::UnknownCategory { .. })
    ));
}

#[test]
fn verdicts_serialize_with_tagged_reasons() {
    let engine = EligibilityEngine::default();
    let verdict = engine.can_join_code("XX", "mixgold", on(2024, 6, 15));
    let json = serde_json::to_value(&verdict).expect("verdict serializes");
    assert_eq!(json["allowed"], false);
    assert_eq!(json["reason"]["kind"], "unparseable_identifier");
    assert!(json.get("age").is_none());
}
