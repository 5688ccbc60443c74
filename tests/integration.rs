//! Integration tests for the PAYE engine.
//!
//! This test suite drives the HTTP router end to end and covers:
//! - The canonical 6,000,000 scenario, annual and monthly
//! - Zero and first-band incomes
//! - Top band income
//! - Each relief, including capped claims
//! - Schedules loaded from YAML, including a reduced relief set
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use paye_engine::api::{AppState, create_router};
use paye_engine::config::{ConfigLoader, TaxSchedule};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    create_router(AppState::new(TaxSchedule::nta_2025()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn calculate_ok(body: Value) -> Value {
    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK, "Unexpected response: {}", json);
    json
}

/// Compares a decimal string field numerically, ignoring trailing zeros.
fn assert_amount(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn warning_codes(body: &Value) -> Vec<String> {
    body["result"]["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

fn scenario_options() -> Value {
    json!({
        "annual_rent": "1200000",
        "dependents": 2
    })
}

// =============================================================================
// Canonical Scenario
// =============================================================================

#[tokio::test]
async fn test_six_million_annual_scenario() {
    let body = calculate_ok(json!({
        "gross_income": "6000000",
        "period": "annual",
        "options": scenario_options()
    }))
    .await;

    let result = &body["result"];
    assert_amount(&result["pension_contribution"], "480000");
    assert_amount(&result["housing_fund_contribution"], "150000");
    assert_amount(&result["employer_insurance_contribution"], "60000");
    assert_amount(&result["rent_relief"], "240000");
    assert_amount(&result["dependent_relief"], "200000");
    assert_amount(&result["total_reliefs"], "440000");
    assert_amount(&result["taxable_income"], "5080000");
    assert_amount(&result["paye_tax"], "704400");
    assert_amount(&result["total_deductions"], "1334400");
    assert_amount(&result["take_home"], "4665600");
    assert_amount(&result["effective_rate"], "22.24");

    assert_eq!(body["schedule_code"], "NTA2025");
    assert_eq!(body["period"], "annual");
    assert!(body["calculation_id"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_monthly_income_matches_annual_equivalent() {
    let monthly = calculate_ok(json!({
        "gross_income": "500000",
        "period": "monthly",
        "options": scenario_options()
    }))
    .await;
    let annual = calculate_ok(json!({
        "gross_income": "6000000",
        "period": "annual",
        "options": scenario_options()
    }))
    .await;

    assert_eq!(monthly["result"], annual["result"]);

    let breakdown = &monthly["breakdown"];
    assert_eq!(breakdown["period"], "monthly");
    assert_amount(&breakdown["gross"], "500000");
    assert_amount(&breakdown["paye_tax"], "58700");
    assert_amount(&breakdown["pension_contribution"], "40000");
    assert_amount(&breakdown["housing_fund_contribution"], "12500");
    assert_amount(&breakdown["total_deductions"], "111200");
    assert_amount(&breakdown["take_home"], "388800");
    assert_amount(&breakdown["effective_rate"], "22.2");
}

#[tokio::test]
async fn test_period_defaults_to_monthly() {
    let body = calculate_ok(json!({ "gross_income": "500000" })).await;

    assert_eq!(body["period"], "monthly");
    assert_amount(&body["result"]["gross_annual"], "6000000");
}

#[tokio::test]
async fn test_audit_trace_covers_every_step() {
    let body = calculate_ok(json!({
        "gross_income": "6000000",
        "period": "annual",
        "options": scenario_options()
    }))
    .await;

    let steps = body["result"]["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "pension_contribution",
            "housing_fund_contribution",
            "employer_insurance_contribution",
            "rent_relief",
            "life_assurance_relief",
            "dependent_relief",
            "disability_relief",
            "taxable_income",
            "paye_brackets",
            "take_home",
        ]
    );

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"].as_u64().unwrap(), i as u64 + 1);
    }
}

// =============================================================================
// Income Ranges
// =============================================================================

#[tokio::test]
async fn test_zero_income() {
    let body = calculate_ok(json!({ "gross_income": "0" })).await;
    let result = &body["result"];

    assert_amount(&result["taxable_income"], "0");
    assert_amount(&result["paye_tax"], "0");
    assert_amount(&result["take_home"], "0");
    assert_amount(&result["effective_rate"], "0");
    assert_eq!(body["breakdown"]["show_relief_summary"], false);
}

#[tokio::test]
async fn test_first_band_income_is_untaxed() {
    let body = calculate_ok(json!({
        "gross_income": "800000",
        "period": "annual",
        "options": { "include_pension": false, "include_housing_fund": false }
    }))
    .await;

    assert_amount(&body["result"]["paye_tax"], "0");
    assert_amount(&body["result"]["take_home"], "800000");
}

#[tokio::test]
async fn test_top_band_income() {
    let body = calculate_ok(json!({
        "gross_income": "60000000",
        "period": "annual",
        "options": { "include_pension": false, "include_housing_fund": false }
    }))
    .await;

    assert_amount(&body["result"]["paye_tax"], "12930000");
    assert_amount(&body["result"]["take_home"], "47070000");
    assert_amount(&body["result"]["effective_rate"], "21.55");
    // Rounded half away from zero for display
    assert_amount(&body["breakdown"]["effective_rate"], "21.6");
}

#[tokio::test]
async fn test_employer_insurance_not_deducted() {
    let body = calculate_ok(json!({
        "gross_income": "1000000",
        "period": "annual",
        "options": { "include_pension": false, "include_housing_fund": false }
    }))
    .await;

    assert_amount(&body["result"]["employer_insurance_contribution"], "10000");
    // 200,000 @ 15%
    assert_amount(&body["result"]["total_deductions"], "30000");
    assert_amount(&body["result"]["take_home"], "970000");
}

// =============================================================================
// Reliefs
// =============================================================================

#[tokio::test]
async fn test_rent_relief_capped() {
    let body = calculate_ok(json!({
        "gross_income": "10000000",
        "period": "annual",
        "options": { "annual_rent": "3000000" }
    }))
    .await;

    assert_amount(&body["result"]["rent_relief"], "500000");
    assert!(warning_codes(&body).contains(&"RENT_RELIEF_CAPPED".to_string()));
}

#[tokio::test]
async fn test_life_assurance_capped_by_income() {
    let body = calculate_ok(json!({
        "gross_income": "2000000",
        "period": "annual",
        "options": {
            "include_pension": false,
            "include_housing_fund": false,
            "life_assurance_premium": "300000"
        }
    }))
    .await;

    assert_amount(&body["result"]["life_assurance_relief"], "200000");
    assert_amount(&body["result"]["taxable_income"], "1800000");
    // 1,000,000 @ 15%
    assert_amount(&body["result"]["paye_tax"], "150000");
    assert!(warning_codes(&body).contains(&"LIFE_ASSURANCE_CAPPED".to_string()));
}

#[tokio::test]
async fn test_dependents_capped_at_four() {
    let six = calculate_ok(json!({
        "gross_income": "6000000",
        "period": "annual",
        "options": { "dependents": 6 }
    }))
    .await;
    let four = calculate_ok(json!({
        "gross_income": "6000000",
        "period": "annual",
        "options": { "dependents": 4 }
    }))
    .await;

    assert_amount(&six["result"]["dependent_relief"], "400000");
    assert_eq!(six["result"]["take_home"], four["result"]["take_home"]);
    assert!(warning_codes(&six).contains(&"DEPENDENTS_CAPPED".to_string()));
    assert!(warning_codes(&four).is_empty());
}

#[tokio::test]
async fn test_disability_relief() {
    let body = calculate_ok(json!({
        "gross_income": "2000000",
        "period": "annual",
        "options": {
            "include_pension": false,
            "include_housing_fund": false,
            "has_disability": true
        }
    }))
    .await;

    assert_amount(&body["result"]["disability_relief"], "500000");
    assert_amount(&body["result"]["taxable_income"], "1500000");
    assert_amount(&body["result"]["paye_tax"], "105000");
    assert_eq!(body["breakdown"]["granted_reliefs"], json!(["disability"]));
}

#[tokio::test]
async fn test_reliefs_exceeding_income_clamp_to_zero() {
    let body = calculate_ok(json!({
        "gross_income": "1000000",
        "period": "annual",
        "options": {
            "annual_rent": "5000000",
            "dependents": 4,
            "has_disability": true
        }
    }))
    .await;

    assert_amount(&body["result"]["taxable_income"], "0");
    assert_amount(&body["result"]["paye_tax"], "0");
    // Contributions are still deducted
    assert_amount(&body["result"]["take_home"], "895000");
}

// =============================================================================
// Loaded Schedules
// =============================================================================

#[tokio::test]
async fn test_yaml_schedule_matches_built_in() {
    let loader = ConfigLoader::load("./config/nta2025").expect("Failed to load config");
    let router = create_router(AppState::new(loader.into_schedule()));

    let (status, body) = post_calculate(
        router,
        json!({
            "gross_income": "6000000",
            "period": "annual",
            "options": scenario_options()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&body["result"]["take_home"], "4665600");
}

#[tokio::test]
async fn test_rent_only_relief_set() {
    let built_in = TaxSchedule::nta_2025();
    let mut rates = built_in.rates().clone();
    rates.reliefs.life_assurance.enabled = false;
    rates.reliefs.dependents.enabled = false;
    rates.reliefs.disability.enabled = false;
    let schedule = TaxSchedule::new(
        built_in.metadata().clone(),
        built_in.brackets().to_vec(),
        rates,
    )
    .unwrap();

    let (status, body) = post_calculate(
        create_router(AppState::new(schedule)),
        json!({
            "gross_income": "6000000",
            "period": "annual",
            "options": {
                "annual_rent": "1200000",
                "dependents": 2,
                "has_disability": true
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&body["result"]["rent_relief"], "240000");
    assert_amount(&body["result"]["dependent_relief"], "0");
    assert_amount(&body["result"]["disability_relief"], "0");
    // 6,000,000 - 480,000 - 240,000
    assert_amount(&body["result"]["taxable_income"], "5280000");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_negative_income_rejected() {
    let (status, body) =
        post_calculate(create_router_for_test(), json!({ "gross_income": "-500000" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_non_numeric_income_rejected() {
    let (status, body) =
        post_calculate(create_router_for_test(), json!({ "gross_income": "lots" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_fractional_dependents_rejected() {
    let (status, body) = post_calculate(
        create_router_for_test(),
        json!({ "gross_income": "500000", "options": { "dependents": 1.5 } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
