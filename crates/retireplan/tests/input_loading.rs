use std::fs;

use retireplan::{InputFormat, load_user_data, parse_user_data};
use retireplan_core::date_math::MonthStamp;
use retireplan_core::model::Frequency;
use retireplan_core::{ProjectionOptions, calculate};
use tempfile::TempDir;

const JSON_DOC: &str = r#"{
  "currentAge": 30,
  "retirementAge": 31,
  "incomeSources": [
    {"name": "Salary", "amount": 1000, "frequency": "monthly", "startDate": "2025-01"}
  ],
  "retirement": {"withdrawalStrategy": {"kind": "fixed", "monthlyAmount": 500}, "horizonAge": 40}
}"#;

const YAML_DOC: &str = r#"
currentAge: 45
retirementAge: 60
currentSavings: 120000
expectedReturn: 5
incomeSources:
  - name: Salary
    amount: 4200
    frequency: weekly
    startDate: "2024-06"
    cpfEligible: true
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Test a JSON document loads with defaults filled in
#[test]
fn test_load_json() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "plan.json", JSON_DOC);

    let data = load_user_data(&path).unwrap();
    assert_eq!(data.current_age, 30);
    assert_eq!(data.income_sources.len(), 1);
    assert_eq!(data.income_sources[0].frequency, Frequency::Monthly);
    assert_eq!(data.retirement.horizon_age, Some(40));
    assert!(data.cpf.is_none());
}

/// Test YAML documents use the same field names as JSON
#[test]
fn test_load_yaml() {
    let dir = TempDir::new().unwrap();
    for name in ["plan.yaml", "plan.YML"] {
        let path = write(&dir, name, YAML_DOC);
        let data = load_user_data(&path).unwrap();
        assert_eq!(data.current_age, 45);
        assert_eq!(data.current_savings, 120_000.0);
        let salary = &data.income_sources[0];
        assert_eq!(salary.frequency, Frequency::Weekly);
        assert_eq!(salary.start_date, MonthStamp::new(2024, 6).unwrap());
        assert!(salary.cpf_eligible);
    }
}

/// Test an unknown extension is rejected before reading
#[test]
fn test_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "plan.toml", "currentAge = 30");

    assert_eq!(InputFormat::from_path(&path), None);
    let err = load_user_data(&path).unwrap_err();
    assert!(err.to_string().contains("plan.toml"));
}

/// Test a missing file reports its path
#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_user_data(&path).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

/// Test malformed content is an error rather than a default document
#[test]
fn test_malformed_json() {
    assert!(parse_user_data(r#"{"currentAge": "thirty"}"#, InputFormat::Json).is_err());
    assert!(parse_user_data("{", InputFormat::Json).is_err());
}

/// Test a loaded document projects end to end
#[test]
fn test_loaded_document_projects() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "plan.json", JSON_DOC);
    let data = load_user_data(&path).unwrap();

    let options = ProjectionOptions::anchored(MonthStamp::new(2025, 1).unwrap());
    let result = calculate(&data, &options).unwrap();

    assert_eq!(result.future_value, 12_000.0);
    assert_eq!(result.years_to_retirement, 1.0);
    // 24 months at 500 exhaust the 12,000 exactly
    assert!(result.sustainability_warning);
    assert_eq!(result.years_until_depletion, Some(2.0));
    assert_eq!(result.depletion_age, Some(33.0));
}
