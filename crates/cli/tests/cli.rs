use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixtures(dir: &TempDir) -> PathBuf {
    let fixtures = serde_json::json!({
        "job_postings": [
            {
                "id": 10,
                "title": "영어 회화 강사 모집",
                "description": "주 2회 오전반",
                "tag": "영어",
                "created_at": "2099-01-01T00:00:00Z",
                "is_paid": false,
                "created_by": "employer_kim",
            },
            {
                "id": 11,
                "title": "경비 모집",
                "description": "",
                "tag": "시설",
                "created_at": "2099-01-01T00:00:00Z",
                "is_paid": false,
                "created_by": "employer_kim",
            }
        ],
        "job_applications": [
            {
                "posting_id": 10,
                "applicant_id": "park",
                "applied_at": "2025-06-01T00:00:00Z",
            }
        ],
        "profiles": [
            {
                "username": "park",
                "name": "박영수",
                "region": "서울",
                "activity_tier": 1,
                "birth_date": "1958-03-02",
            }
        ],
        "careers": [
            {
                "username": "park",
                "start_date": "2000-01-01",
                "end_date": "2012-01-01",
            }
        ],
    });

    let path = dir.path().join("fixtures.json");
    fs::write(&path, serde_json::to_string_pretty(&fixtures).unwrap()).expect("write fixtures");
    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("silverwork");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("base_url"));
    assert!(content.contains("job_postings"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# existing").expect("write existing");

    let mut cmd = cargo_bin_cmd!("silverwork");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn recommend_outputs_ranked_json_from_fixtures() {
    let dir = TempDir::new().expect("temp dir");
    let fixtures = write_fixtures(&dir);

    let mut cmd = cargo_bin_cmd!("silverwork");
    let output = cmd
        .args(["recommend", "--flags", "talent=1000000000", "--fixtures"])
        .arg(&fixtures)
        .arg("--json")
        .output()
        .expect("run recommend");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let recommendations = value.as_array().expect("array output");
    assert_eq!(recommendations.len(), 2);
    // the tagged English posting must outrank the unrelated one
    assert_eq!(
        recommendations[0]["item"]["title"],
        "영어 회화 강사 모집"
    );
    assert!(recommendations[0]["score"].as_u64() > recommendations[1]["score"].as_u64());
    assert!(recommendations[0]["dday"].is_string());
}

#[test]
fn recommend_requires_flags() {
    let mut cmd = cargo_bin_cmd!("silverwork");
    cmd.args(["recommend"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No interest flags"));
}

#[test]
fn recommend_rejects_unknown_category() {
    let mut cmd = cargo_bin_cmd!("silverwork");
    cmd.args(["recommend", "--flags", "hobby=10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn dashboard_outputs_summaries_from_fixtures() {
    let dir = TempDir::new().expect("temp dir");
    let fixtures = write_fixtures(&dir);

    let mut cmd = cargo_bin_cmd!("silverwork");
    let output = cmd
        .args(["dashboard", "--employer", "employer_kim", "--fixtures"])
        .arg(&fixtures)
        .arg("--json")
        .output()
        .expect("run dashboard");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let summaries = value.as_array().expect("array output");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["name"], "박영수");
    assert_eq!(summaries[0]["experience_label"], "경력 12년");
    assert_eq!(summaries[0]["badge"], "tier1");
}

#[test]
fn dashboard_with_unknown_employer_is_empty_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let fixtures = write_fixtures(&dir);

    let mut cmd = cargo_bin_cmd!("silverwork");
    let output = cmd
        .args(["dashboard", "--employer", "nobody", "--fixtures"])
        .arg(&fixtures)
        .arg("--json")
        .output()
        .expect("run dashboard");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value.as_array().map(Vec::len), Some(0));
}

#[test]
fn doctor_reports_json() {
    let mut cmd = cargo_bin_cmd!("silverwork");
    let output = cmd
        .args(["doctor", "--json"])
        .env_remove("SILVERWORK_API_KEY")
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(value.get("config").is_some());
    // no API key in the environment, so the backend probe is skipped
    assert_eq!(value["backend"]["status"], "warn");
    assert_ne!(value["overall"], "error");
}
