use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cli_snapshot!(test, test.l10n(&["init"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .l10nrc.json

    ----- stderr -----
    ");

    let config = test.read_json(".l10nrc.json")?;
    assert_eq!(config["domains"]["app"]["locales"], json!(["en", "ko"]));
    assert_eq!(config["domains"]["app"]["cache-dir"], json!(".l10n-tools"));
    assert!(test.read_file(".l10nrc.json")?.ends_with("}\n"));
    Ok(())
}

#[test]
fn test_init_does_not_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".l10nrc.json", "{}")?;

    let result = test.run(&["init"])?;
    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains(".l10nrc.json already exists"));
    assert_eq!(test.read_file(".l10nrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_initialized_config_is_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file(
        ".l10n-tools/app/keys.json",
        r#"[{"context": null, "key": "Hello", "isPlural": false, "references": [], "comments": []}]"#,
    )?;

    let result = test.run(&["update"])?;
    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);

    let result = test.run(&["count", "-s", "untranslated"])?;
    assert_eq!(result.stdout, "app,en:1,ko:1\n");
    Ok(())
}
