use chrono::NaiveDate;
use ferric_storage::lsmc::{LsmcValuationResult, LsmcValuationResultBuilder};
use ferric_storage::time::{Month, Quarter, TimeSeries};

fn roundtrip_json<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).expect("json serialize");
    let decoded: T = serde_json::from_str(&json).expect("json deserialize");
    assert_eq!(*value, decoded);
}

fn roundtrip_msgpack<T>(value: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let bytes = rmp_serde::to_vec_named(value).expect("msgpack serialize");
    let decoded: T = rmp_serde::from_slice(&bytes).expect("msgpack deserialize");
    assert_eq!(*value, decoded);
}

fn monthly_result() -> LsmcValuationResult<Month> {
    let start = Month::new(2026, 11).unwrap();
    LsmcValuationResultBuilder::new(12_345.67)
        .period(
            start,
            vec![0.0, 500.0, 1000.0],
            vec![vec![-200.0], vec![0.0, 50.0], vec![-300.0]],
        )
        .period(
            Month::new(2026, 12).unwrap(),
            vec![0.0, 1000.0],
            vec![vec![100.0], vec![]],
        )
        .build()
        .unwrap()
}

#[test]
fn results_roundtrip_for_each_period_type() {
    roundtrip_json(&monthly_result());
    roundtrip_msgpack(&monthly_result());

    let daily = LsmcValuationResultBuilder::new(-3.5)
        .period(
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            vec![10.0],
            vec![vec![-10.0, 0.0]],
        )
        .period(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            vec![0.0, 10.0],
            vec![vec![0.0], vec![-10.0]],
        )
        .build()
        .unwrap();
    roundtrip_json(&daily);
    roundtrip_msgpack(&daily);

    roundtrip_json(&LsmcValuationResult::<Quarter>::expired());
    roundtrip_msgpack(&LsmcValuationResult::<Quarter>::expired());
}

#[test]
fn json_layout_is_period_keyed() {
    let json = serde_json::to_value(monthly_result()).unwrap();
    assert_eq!(json["npv"], serde_json::json!(12_345.67));
    assert_eq!(
        json["inventory_space_grids"]["2026-11"],
        serde_json::json!([0.0, 500.0, 1000.0])
    );
    assert_eq!(
        json["inject_withdraw_decisions"]["2026-12"],
        serde_json::json!([[100.0], []])
    );

    let expired = serde_json::to_string(&LsmcValuationResult::<Month>::expired()).unwrap();
    assert_eq!(
        expired,
        r#"{"npv":0.0,"inventory_space_grids":{},"inject_withdraw_decisions":{}}"#
    );
}

#[test]
fn deserialization_enforces_result_invariants() {
    let mismatched = r#"{
        "npv": 1.0,
        "inventory_space_grids": {"2026-01": [0.0, 500.0, 1000.0]},
        "inject_withdraw_decisions": {"2026-01": [[-200.0], [0.0, 50.0]]}
    }"#;
    let err = serde_json::from_str::<LsmcValuationResult<Month>>(mismatched).unwrap_err();
    assert!(err.to_string().contains("2 decision lists for 3 inventory grid points"));

    let asymmetric = r#"{
        "npv": 1.0,
        "inventory_space_grids": {"2026-01": [0.0]},
        "inject_withdraw_decisions": {}
    }"#;
    assert!(serde_json::from_str::<LsmcValuationResult<Month>>(asymmetric).is_err());

    let repeated_period = r#"{
        "npv": 1.0,
        "inventory_space_grids": {"2026-01": [0.0, 500.0, 1000.0], "2026-01": [0.0]},
        "inject_withdraw_decisions": {"2026-01": [[1.0]]}
    }"#;
    let err = serde_json::from_str::<LsmcValuationResult<Month>>(repeated_period).unwrap_err();
    assert!(err.to_string().contains("period 2026-01 is not after 2026-01"));

    let bad_period = r#"{"2026-13": [0.0]}"#;
    assert!(serde_json::from_str::<TimeSeries<Month, Vec<f64>>>(bad_period).is_err());
}
