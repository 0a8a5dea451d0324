use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn localizer_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("localizer"))
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn resources() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "strings.json",
        r#"{"greeting": "Hello", "weekdays": "Mon; Tue; Wed", "menu": {"quit": "Quit"}}"#,
    );
    write(
        root,
        "fr.lproj/strings.strings",
        "\"greeting\" = \"Bonjour\";\n\"weekdays\" = \"lun| mar| mer\";\n",
    );
    write(root, "fonts.json", r#"{"title": "Avenir; 24", "caption": "Menlo"}"#);
    write(root, "images/logo.png", "");
    write(root, "images/logo_fr.png", "");
    write(root, "images/walk1.png", "");
    write(root, "images/walk2.png", "");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> std::process::Output {
    localizer_cmd()
        .arg("--resources")
        .arg(dir.path())
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_get_string_and_fallback() {
    let dir = resources();
    assert_eq!(stdout(&run(&dir, &["get", "greeting"])).trim(), "Hello");
    assert_eq!(stdout(&run(&dir, &["get", "menu.quit"])).trim(), "Quit");
    assert_eq!(stdout(&run(&dir, &["get", "nope"])).trim(), "nope");
}

#[test]
fn test_get_with_language() {
    let dir = resources();
    let output = run(&dir, &["--lang", "fr", "get", "greeting"]);
    assert_eq!(stdout(&output).trim(), "Bonjour");
}

#[test]
fn test_get_indexed() {
    let dir = resources();
    assert_eq!(stdout(&run(&dir, &["get", "weekdays", "--index", "1"])).trim(), "Tue");

    let output = run(&dir, &["get", "weekdays", "--index", "7"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_array_plain_and_json() {
    let dir = resources();
    let lines = stdout(&run(&dir, &["array", "weekdays"]));
    assert_eq!(lines.lines().collect::<Vec<_>>(), vec!["Mon", "Tue", "Wed"]);

    let json = stdout(&run(&dir, &["array", "weekdays", "--json"]));
    let items: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(items, vec!["Mon", "Tue", "Wed"]);

    let empty = stdout(&run(&dir, &["array", "missing", "--json"]));
    let items: Vec<String> = serde_json::from_str(&empty).unwrap();
    assert!(items.is_empty());
}

#[test]
fn test_custom_separator() {
    let dir = resources();
    let output = run(&dir, &["--lang", "fr", "--separator", "|", "array", "weekdays"]);
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        vec!["lun", "mar", "mer"]
    );
}

#[test]
fn test_exists_exit_status() {
    let dir = resources();
    let output = run(&dir, &["exists", "greeting"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");

    let output = run(&dir, &["exists", "missing"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "false");
}

#[test]
fn test_font() {
    let dir = resources();
    let out = stdout(&run(&dir, &["font", "title"]));
    assert!(out.contains("Name: Avenir"));
    assert!(out.contains("Size: 24"));

    let output = run(&dir, &["font", "body"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_image_and_frames() {
    let dir = resources();
    let out = stdout(&run(&dir, &["image", "logo"]));
    assert!(out.starts_with("logo\t"));

    let out = stdout(&run(&dir, &["--lang", "fr", "image", "logo"]));
    assert!(out.starts_with("logo_fr\t"));

    let out = stdout(&run(&dir, &["--remove-density-suffix", "image", "logo@2x"]));
    assert!(out.starts_with("logo\t"));

    let out = stdout(&run(&dir, &["image", "walk", "--frames", "2"]));
    assert_eq!(out.lines().count(), 2);

    let output = run(&dir, &["image", "walk", "--frames", "3"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_info_json() {
    let dir = resources();
    let out = stdout(&run(&dir, &["--lang", "fr", "info", "--json"]));
    let info: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(info["language"], "fr");
    assert_eq!(info["is_default"], false);
    assert_eq!(info["is_english"], false);
    assert_eq!(info["entries"]["strings"], 2);
    assert_eq!(info["entries"]["fonts"], 2);
}

#[test]
fn test_info_text() {
    let dir = resources();
    let out = stdout(&run(&dir, &["info"]));
    assert!(out.contains("Language: en"));
    assert!(out.contains("Is English: true"));
}

#[test]
fn test_config_file() {
    let dir = resources();
    write(
        dir.path(),
        "localizer.toml",
        "default_language = \"fr\"\nseparator = \"|\"\nresource_dir = \".\"\n",
    );

    let output = localizer_cmd()
        .arg("--config")
        .arg(dir.path().join("localizer.toml"))
        .args(["get", "weekdays", "--index", "2"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), "mer");
}

#[test]
fn test_lang_flag_does_not_change_remembered_language() {
    let dir = resources();
    write(
        dir.path(),
        "localizer.toml",
        "resource_dir = \".\"\npreferences_file = \"prefs.json\"\n",
    );
    write(dir.path(), "prefs.json", r#"{"app_language": "en"}"#);
    let config = dir.path().join("localizer.toml");

    let output = localizer_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--lang", "fr", "get", "greeting"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), "Bonjour");

    let prefs: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("prefs.json")).unwrap()).unwrap();
    assert_eq!(prefs["app_language"], "en");

    let output = localizer_cmd()
        .arg("--config")
        .arg(&config)
        .args(["get", "greeting"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), "Hello");

    write(dir.path(), "prefs.json", r#"{"app_language": "fr"}"#);
    let output = localizer_cmd()
        .arg("--config")
        .arg(&config)
        .args(["get", "greeting"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output).trim(), "Bonjour");
}

#[test]
fn test_unknown_language_fails() {
    let dir = resources();
    fs::remove_file(dir.path().join("strings.json")).unwrap();
    let output = run(&dir, &["--lang", "de", "get", "greeting"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_export_catalog() {
    let dir = resources();
    let out_dir = TempDir::new().unwrap();
    let output_file = out_dir.path().join("strings_fr.plist");

    let out = stdout(&run(
        &dir,
        &[
            "--lang",
            "fr",
            "export",
            "--domain",
            "strings",
            "--output",
            output_file.to_str().unwrap(),
        ],
    ));
    assert!(out.contains("Exported 2 strings entries"));

    let plist = fs::read_to_string(&output_file).unwrap();
    assert!(plist.contains("<key>greeting</key>"));
    assert!(plist.contains("<string>Bonjour</string>"));

    let output = run(
        &dir,
        &["export", "--domain", "colors", "--output", output_file.to_str().unwrap()],
    );
    assert!(!output.status.success());
}
