use palliate_calculators::error::CalculatorError;
use palliate_calculators::opioid::dose::DoseInput;
use palliate_calculators::opioid::equianalgesic::{
    CROSS_TOLERANCE_NOTE, PairwiseConversion, PairwiseRequest, PairwiseTable, convert_pairwise,
};
use palliate_core::models::route::Route;

fn request(from: &str, from_route: Route, to: &str, to_route: Route, dose: DoseInput) -> PairwiseRequest {
    PairwiseRequest {
        from_med: from.to_string(),
        from_route,
        to_med: to.to_string(),
        to_route,
        from_dose: dose,
    }
}

#[test]
fn morphine_to_oxycodone() {
    let req = request(
        "Morphine",
        Route::Oral,
        "Oxycodone",
        Route::Oral,
        DoseInput::Text("90".to_string()),
    );
    let result = convert_pairwise(&PairwiseTable::standard(), &req).unwrap();

    assert!((result.converted_dose - 60.3).abs() < 1e-9);
    assert_eq!(result.converted_dose_display, "60.30");
    assert_eq!(result.conversion.evidence_level, "Category 1");
    assert_eq!(result.clinical_note, CROSS_TOLERANCE_NOTE);
}

#[test]
fn route_is_part_of_the_lookup() {
    let table = PairwiseTable::standard();
    let iv = request("Morphine", Route::Intravenous, "Morphine", Route::Oral, DoseInput::Amount(10.0));
    assert_eq!(convert_pairwise(&table, &iv).unwrap().converted_dose_display, "30.00");

    let po = request("Morphine", Route::Oral, "Morphine", Route::Intravenous, DoseInput::Amount(30.0));
    assert_eq!(convert_pairwise(&table, &po).unwrap().converted_dose_display, "9.90");

    let patch = request("Fentanyl", Route::Transdermal, "Morphine", Route::Oral, DoseInput::Amount(0.6));
    assert_eq!(convert_pairwise(&table, &patch).unwrap().converted_dose_display, "60.00");
}

#[test]
fn missing_combination_is_an_error() {
    let req = request("Methadone", Route::Oral, "Morphine", Route::Oral, DoseInput::Amount(20.0));
    let err = convert_pairwise(&PairwiseTable::standard(), &req).unwrap_err();
    assert!(matches!(err, CalculatorError::ConversionNotFound { .. }));
    assert_eq!(err.to_string(), "no conversion available from Methadone PO to Morphine PO");
}

#[test]
fn unreadable_or_negative_dose_is_an_error() {
    let table = PairwiseTable::standard();
    for dose in [
        DoseInput::Text("twenty".to_string()),
        DoseInput::Text(String::new()),
        DoseInput::Amount(-5.0),
    ] {
        let req = request("Codeine", Route::Oral, "Morphine", Route::Oral, dose);
        assert!(matches!(
            convert_pairwise(&table, &req),
            Err(CalculatorError::InvalidDose(_))
        ));
    }
}

#[test]
fn table_rejects_non_positive_ratio() {
    let bad = PairwiseConversion {
        from_med: "Morphine".to_string(),
        to_med: "Oxycodone".to_string(),
        route_from: Route::Oral,
        route_to: Route::Oral,
        conversion_factor: 0.0,
        notes: None,
        evidence_level: "Category 1".to_string(),
    };
    assert!(PairwiseTable::new(vec![bad]).is_err());
    assert!(PairwiseTable::new(PairwiseTable::standard().entries().to_vec()).is_ok());
}
