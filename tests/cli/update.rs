use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, keys_json, trans_json};

#[test]
fn test_update_creates_translation_files() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false), ("apple", true)]))?;

    assert_cli_snapshot!(test, test.l10n(&["update"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Updated app en: 2 entries (2 new, 0 obsolete, 0 fallback)
    Updated app ko: 2 entries (2 new, 0 obsolete, 0 fallback)
    Updated app fr: 2 entries (2 new, 0 obsolete, 0 fallback)
    ✓ Updated 3 locales - no issues found

    ----- stderr -----
    ");

    assert_eq!(
        test.read_json("cache/app/trans-ko.json")?,
        json!([
            {"context": null, "key": "Hello", "messages": {"other": ""}, "flag": "new"},
            {"context": null, "key": "apple", "messages": {"other": ""}, "flag": "new"},
        ])
    );
    assert_eq!(
        test.read_json("cache/app/trans-fr.json")?[1]["messages"],
        json!({"one": "", "many": "", "other": ""})
    );
    Ok(())
}

#[test]
fn test_update_is_idempotent() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false), ("Bye", false)]))?;

    test.run(&["update"])?;
    let first = test.read_file("cache/app/trans-ko.json")?;
    let result = test.run(&["update"])?;
    assert_eq!(result.code, Some(0));
    assert_eq!(test.read_file("cache/app/trans-ko.json")?, first);
    Ok(())
}

#[test]
fn test_update_fills_from_fallback_locale() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false), ("Bye", false)]))?;
    test.write_file(
        "cache/app/trans-en.json",
        &format!("[{}]", trans_json("Hello", "Hello!", None)),
    )?;

    assert_cli_snapshot!(test, test.l10n(&["update", "-l", "ko"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Updated app ko: 2 entries (1 new, 0 obsolete, 1 fallback)
    ✓ Updated 1 locale - no issues found

    ----- stderr -----
    ");

    let ko = test.read_json("cache/app/trans-ko.json")?;
    assert_eq!(ko[0]["messages"], json!({"other": "Hello!"}));
    assert_eq!(ko[0]["flag"], json!("fallback"));
    assert_eq!(ko[1]["flag"], json!("new"));
    assert!(!test.root().join("cache/app/trans-fr.json").exists());
    Ok(())
}

#[test]
fn test_update_marks_vanished_keys_obsolete() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false)]))?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!(
            "[{},{}]",
            trans_json("Gone", "사라짐", None),
            trans_json("Hello", "안녕", None)
        ),
    )?;

    assert_cli_snapshot!(test, test.l10n(&["update", "-l", "ko"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Updated app ko: 2 entries (0 new, 1 obsolete, 0 fallback)
    ✓ Updated 1 locale - no issues found

    ----- stderr -----
    ");

    let ko = test.read_json("cache/app/trans-ko.json")?;
    assert_eq!(ko[0]["key"], json!("Hello"));
    assert_eq!(ko[0]["flag"], json!(null));
    assert_eq!(ko[1]["key"], json!("Gone"));
    assert_eq!(ko[1]["messages"], json!({"other": "사라짐"}));
    assert_eq!(ko[1]["flag"], json!("obsolete"));
    Ok(())
}

#[test]
fn test_update_reports_invalid_messages() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("%s files", false)]))?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!("[{}]", trans_json("%s files", "파일", None)),
    )?;

    assert_cli_snapshot!(test, test.l10n(&["update", "-l", "ko"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    Updated app ko: 1 entries (0 new, 0 obsolete, 0 fallback)

    error: format %s not found  invalid-message
      --> [TEMP_DIR]/cache/app/trans-ko.json [ko]
       |
       | key     "%s files"
       = note: other "파일" translated from "%s files"

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);

    let ko = test.read_json("cache/app/trans-ko.json")?;
    assert_eq!(ko[0]["flag"], json!("format-not-found"));
    Ok(())
}

#[test]
fn test_update_skip_validation() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("%s files", false)]))?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!("[{}]", trans_json("%s files", "파일", None)),
    )?;

    let result = test.run(&["-s", "update", "-l", "ko"])?;
    assert_eq!(result.code, Some(0), "stdout: {}", result.stdout);

    let ko = test.read_json("cache/app/trans-ko.json")?;
    assert_eq!(ko[0]["flag"], json!(null));
    Ok(())
}

#[test]
fn test_update_validates_against_base_locale() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("greeting", false)]))?;
    test.write_file(
        "cache/app/trans-en.json",
        &format!("[{}]", trans_json("greeting", "Hello <b>{name}</b>", None)),
    )?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!("[{}]", trans_json("greeting", "안녕 {name}", None)),
    )?;

    assert_cli_snapshot!(test, test.l10n(&["-b", "en", "update", "-l", "en,ko"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    Updated app en: 1 entries (0 new, 0 obsolete, 0 fallback)
    Updated app ko: 1 entries (0 new, 0 obsolete, 0 fallback)

    error: tag <b> not found  invalid-message
      --> [TEMP_DIR]/cache/app/trans-ko.json [ko]
       |
       | key     "greeting"
       = note: other "안녕 {name}" translated from "Hello <b>{name}</b>"

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    "#);
    Ok(())
}

#[test]
fn test_corrupt_locale_does_not_block_others() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false)]))?;
    test.write_file("cache/app/trans-fr.json", "{ not json")?;

    let result = test.run(&["update"])?;
    assert_eq!(result.code, Some(1));
    assert!(result.stdout.contains("store-error"));
    assert!(result.stdout.contains("trans-fr.json [fr]"));
    assert!(result.stdout.contains("Updated app ko: 1 entries"));

    assert_eq!(test.read_file("cache/app/trans-fr.json")?, "{ not json");
    assert!(test.root().join("cache/app/trans-ko.json").exists());
    Ok(())
}

#[test]
fn test_missing_keys_file_is_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nrc.json", crate::APP_CONFIG)?;

    let result = test.run(&["update"])?;
    assert_eq!(result.code, Some(1), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("error: Failed to update domain 'app'"));
    assert!(result.stdout.contains("domain-error"));
    assert!(result.stdout.contains("--> ") && result.stdout.contains("cache/app/keys.json\n"));
    assert!(result.stdout.contains("= note: domain app was skipped"));
    assert!(!test.root().join("cache/app/trans-ko.json").exists());
    Ok(())
}

#[test]
fn test_failed_domain_keeps_other_domains_reported() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".l10nrc.json",
        r#"{
  "domains": {
    "aaa": {"type": "javascript", "locales": ["ko"], "cache-dir": "cache"},
    "bbb": {"type": "javascript", "locales": ["ko"], "cache-dir": "cache"}
  }
}"#,
    )?;
    test.write_file("cache/aaa/keys.json", &keys_json(&[("%s files", false)]))?;
    test.write_file(
        "cache/aaa/trans-ko.json",
        &format!("[{}]", trans_json("%s files", "파일", None)),
    )?;

    for command in ["update", "check"] {
        let result = test.run(&[command])?;
        assert_eq!(result.code, Some(1), "{}: {}", command, result.stderr);
        assert!(result.stderr.is_empty(), "{}: {}", command, result.stderr);
        assert!(result.stdout.contains("error: format %s not found  invalid-message"));
        assert!(result.stdout.contains("cache/aaa/trans-ko.json [ko]"));
        assert!(result.stdout.contains("error: Failed to update domain 'bbb'"));
        assert!(result.stdout.contains("= note: domain bbb was skipped"));
        assert!(result.stdout.contains("2 problems (2 errors, 0 warnings)"));
    }

    let result = test.run(&["update"])?;
    assert!(result.stdout.contains("Updated aaa ko: 1 entries"));
    let aaa = test.read_json("cache/aaa/trans-ko.json")?;
    assert_eq!(aaa[0]["flag"], json!("format-not-found"));
    Ok(())
}

#[test]
fn test_update_with_keys_and_trans_dirs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nrc.json", crate::APP_CONFIG)?;
    test.write_file("extracted/app/keys.json", &keys_json(&[("Hello", false)]))?;
    test.write_file(
        "cache/app/trans-ko.json",
        &format!("[{}]", trans_json("Hello", "안녕", None)),
    )?;

    let result = test.run(&[
        "update",
        "-l",
        "ko",
        "--keys-dir",
        "extracted",
        "--trans-dir",
        "out",
    ])?;
    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);

    let ko = test.read_json("out/app/trans-ko.json")?;
    assert_eq!(ko[0]["messages"], json!({"other": "안녕"}));
    assert!(!test.root().join("cache/app/keys.json").exists());
    Ok(())
}

#[test]
fn test_update_finds_config_from_subdirectory() -> Result<()> {
    let test = CliTest::with_keys(&keys_json(&[("Hello", false)]))?;
    test.write_file("src/components/.keep", "")?;

    let result = test
        .command()
        .current_dir(test.root().join("src/components"))
        .args(["update", "-l", "ko"])
        .output()?;
    assert_eq!(result.status.code(), Some(0));
    assert!(test.root().join("cache/app/trans-ko.json").exists());
    Ok(())
}
