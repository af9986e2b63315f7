use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn tipcodec() -> Command {
    Command::cargo_bin("tipcodec").unwrap()
}

const CUSTOMER_CARD: &str = r#"[
  {
    "type": 8,
    "number": 21,
    "name": "Customer Card",
    "elements": [
      { "type": 30, "id": 1, "properties": { "ToolTipML": "ENU=Specifies the name.;\nDEU=Gibt den Namen an." } },
      { "type": 30, "id": 2, "properties": { "CaptionML": "ENU=Customer No." } },
      { "type": 30, "id": 3, "properties": { "SourceExpr": "Balance" } }
    ]
  }
]
"#;

#[test]
fn test_export_writes_exchange_file() {
    let temp_dir = TempDir::new().unwrap();
    let objects = temp_dir.path().join("objects");
    fs::create_dir(&objects).unwrap();
    fs::write(objects.join("Page21.json"), CUSTOMER_CARD).unwrap();
    let output = temp_dir.path().join("tooltips.tsv");

    let assert = tipcodec()
        .arg("export")
        .arg(objects.join("*.json"))
        .arg(&output)
        .arg("--generate-tooltips")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("1 object(s) with 3 tooltip(s) processed."));

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Page21.json\t8\t21\t30\tControl\t1\tENU\tSpecifies the name.\t0\tDEU\tGibt den Namen an.\t0",
            "Page21.json\t8\t21\t30\tControl\t2\tENU\t### Customer No.\t0",
            "Page21.json\t8\t21\t30\tControl\t3\t@@@\t### Balance\t0",
        ]
    );
}

#[test]
fn test_export_without_generation() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Page21.json"), CUSTOMER_CARD).unwrap();
    let output = temp_dir.path().join("tooltips.tsv");

    tipcodec()
        .arg("export")
        .arg(temp_dir.path().join("*.json"))
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_import_merges_translations() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Page21.json"), CUSTOMER_CARD).unwrap();
    let exchange = temp_dir.path().join("tooltips.tsv");
    fs::write(
        &exchange,
        "Page21.json\t8\t21\t30\tControl\t2\tENU\tSpecifies the customer number.\t0\tDEU\tGibt die Debitorennummer an.\t0\n",
    )
    .unwrap();

    let assert = tipcodec()
        .arg("import")
        .arg(temp_dir.path())
        .arg(&exchange)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("1 object(s) with 1 tooltip(s) processed."));
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("processing"));

    let updated = fs::read_to_string(temp_dir.path().join("Page21.json")).unwrap();
    let objects: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(
        objects[0]["elements"][1]["properties"]["ToolTipML"],
        "ENU=Specifies the customer number.;\nDEU=Gibt die Debitorennummer an."
    );
    assert_eq!(
        objects[0]["elements"][0]["properties"]["ToolTipML"],
        "ENU=Specifies the name.;\nDEU=Gibt den Namen an."
    );
}

#[test]
fn test_import_fails_when_target_file_is_missing() {
    let temp_dir = TempDir::new().unwrap();
    let exchange = temp_dir.path().join("tooltips.tsv");
    fs::write(
        &exchange,
        "Missing.json\t8\t21\t30\tControl\t2\tENU\tText\t0\n",
    )
    .unwrap();

    tipcodec()
        .arg("import")
        .arg(temp_dir.path())
        .arg(&exchange)
        .assert()
        .failure();
}

#[test]
fn test_export_missing_source_directory_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("tooltips.tsv");

    let assert = tipcodec()
        .arg("export")
        .arg(temp_dir.path().join("nowhere").join("*.json"))
        .arg(&output)
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Directory does not exist"));
    assert!(!output.exists());
}

#[test]
fn test_import_missing_exchange_file_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();

    let assert = tipcodec()
        .arg("import")
        .arg(temp_dir.path())
        .arg(temp_dir.path().join("missing.tsv"))
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("File does not exist"));
}

#[test]
fn test_missing_arguments() {
    tipcodec().arg("export").assert().failure();
}
