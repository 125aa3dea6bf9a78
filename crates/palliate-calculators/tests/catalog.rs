use palliate_calculators::calculator::{
    Calculator, CalculatorInput, CalculatorOutput, CalculatorSchema, ScoreInput,
};
use palliate_calculators::catalog::{Catalog, builtin_records};
use palliate_calculators::error::CalculatorError;
use palliate_calculators::opioid::rotation::UnknownDrugPolicy;
use palliate_core::models::calculator::{CalculatorKind, CalculatorRecord};
use serde_json::json;

fn record(slug: &str, kind: CalculatorKind, config: serde_json::Value) -> CalculatorRecord {
    CalculatorRecord {
        id: format!("id-{slug}"),
        slug: slug.to_string(),
        title: slug.to_uppercase(),
        kind,
        config,
        created_at: None,
    }
}

#[test]
fn builtin_catalog_offers_three_calculators() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.len(), 3);

    let titles: Vec<&str> = catalog.list().iter().map(|e| e.record.title.as_str()).collect();
    assert_eq!(
        titles,
        ["ECOG Performance Status", "Opioid Rotation", "Palliative Performance Scale"]
    );

    assert_eq!(builtin_records()[0].id, "local-ecog");
    assert_eq!(builtin_records()[0].config["version"], "fallback-1.0");
}

#[test]
fn find_prefers_slug_then_id() {
    let mut shadow = record("local-pps", CalculatorKind::Ecog, json!(null));
    shadow.id = "pps".to_string();
    let records = vec![record("pps", CalculatorKind::Pps, json!(null)), shadow];
    let catalog = Catalog::from_records(records).unwrap();

    assert_eq!(catalog.find("pps").unwrap().record.kind, CalculatorKind::Pps);
    assert_eq!(catalog.find("id-pps").unwrap().record.slug, "pps");
    assert_eq!(catalog.find("local-pps").unwrap().record.kind, CalculatorKind::Ecog);
    assert!(catalog.find("missing").is_none());
    assert!(matches!(
        catalog.get("missing"),
        Err(CalculatorError::UnknownCalculator(_))
    ));
}

#[test]
fn duplicate_slugs_are_rejected() {
    let records = vec![
        record("ecog", CalculatorKind::Ecog, json!(null)),
        record("ecog", CalculatorKind::Ecog, json!({})),
    ];
    assert!(matches!(
        Catalog::from_records(records),
        Err(CalculatorError::DuplicateSlug(slug)) if slug == "ecog"
    ));
}

#[test]
fn invalid_config_names_the_record() {
    let records = vec![record(
        "rotation",
        CalculatorKind::OpioidRotation,
        json!({ "drugs": [{ "name": "Morphine oral", "routes": ["PO"], "ome_factor": 0 }] }),
    )];
    let err = Catalog::from_records(records).unwrap_err();
    assert!(matches!(err, CalculatorError::InvalidRecord { ref slug, .. } if slug == "rotation"));
    assert!(err.to_string().starts_with("calculator 'rotation': invalid opioid-rotation config"));
}

#[test]
fn config_must_be_an_object() {
    let rec = record("pps", CalculatorKind::Pps, json!([100, 50]));
    assert!(matches!(
        Calculator::from_record(&rec),
        Err(CalculatorError::InvalidConfig { kind: CalculatorKind::Pps, .. })
    ));
}

#[test]
fn config_extra_keys_are_ignored() {
    let rec = record(
        "rotation",
        CalculatorKind::OpioidRotation,
        json!({ "version": "2.1", "cross_tolerance": { "default_reduce_percent": 50 } }),
    );
    let Calculator::OpioidRotation(rotation) = Calculator::from_record(&rec).unwrap() else {
        panic!("expected opioid rotation");
    };
    assert_eq!(rotation.default_reduction_percent(), 50.0);
    assert_eq!(rotation.table().entries().len(), 5);
}

#[test]
fn evaluate_dispatches_on_kind() {
    let catalog = Catalog::builtin();
    let policy = UnknownDrugPolicy::default();

    let ecog = &catalog.get("ecog").unwrap().calculator;
    let output = ecog
        .evaluate(&CalculatorInput::Score(ScoreInput { score: 3.0 }), policy)
        .unwrap();
    assert!(matches!(output, CalculatorOutput::Ecog(ref s) if s.score == 3.0));

    let rotation = &catalog.get("opioid-rotation").unwrap().calculator;
    let input: CalculatorInput = serde_json::from_value(json!({
        "from_drug": "Morphine oral",
        "to_drug": "Hydromorphone oral",
        "daily_dose": "60"
    }))
    .unwrap();
    let CalculatorOutput::OpioidRotation(outcome) = rotation.evaluate(&input, policy).unwrap() else {
        panic!("expected opioid rotation output");
    };
    assert_eq!(outcome.display.suggested_new_dose, "10.1");

    let serialized = serde_json::to_value(CalculatorOutput::OpioidRotation(outcome)).unwrap();
    assert_eq!(serialized["kind"], "opioid-rotation");
}

#[test]
fn mismatched_input_is_rejected() {
    let catalog = Catalog::builtin();
    let pps = &catalog.get("pps").unwrap().calculator;
    let input: CalculatorInput = serde_json::from_value(json!({ "daily_dose": 10 })).unwrap();
    assert!(matches!(
        pps.evaluate(&input, UnknownDrugPolicy::default()),
        Err(CalculatorError::InputMismatch { expected: CalculatorKind::Pps })
    ));
}

#[test]
fn custom_calculators_cannot_be_evaluated() {
    let rec = record("bespoke", CalculatorKind::Custom, json!({ "anything": true }));
    let calculator = Calculator::from_record(&rec).unwrap();
    assert!(matches!(calculator.schema(), CalculatorSchema::Custom));
    assert!(matches!(
        calculator.evaluate(
            &CalculatorInput::Score(ScoreInput { score: 1.0 }),
            UnknownDrugPolicy::default()
        ),
        Err(CalculatorError::NotImplemented(CalculatorKind::Custom))
    ));
}

#[test]
fn schema_exposes_rotation_defaults() {
    let catalog = Catalog::builtin();
    let CalculatorSchema::OpioidRotation {
        drugs,
        default_reduction_percent,
        default_selection,
    } = catalog.get("opioid-rotation").unwrap().calculator.schema()
    else {
        panic!("expected opioid rotation schema");
    };
    assert_eq!(drugs.len(), 5);
    assert_eq!(default_reduction_percent, 33.0);
    assert_eq!(default_selection.as_deref(), Some("Morphine oral"));
}
