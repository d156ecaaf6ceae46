use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HELLO: &str = r#"<template>
  <p>{{ $t('hello') }}</p>
</template>

<i18n>
{
  "en": { "hello": "Hello!" },
  "ja": { "hello": "こんにちは！" }
}
</i18n>
"#;

const USERS: &str = r#"<template><table/></template>
<i18n locale="en" lang="yaml">
title: Users
actions:
  remove: Remove
</i18n>
<style>
.users { color: red; }
</style>
"#;

#[allow(deprecated)]
fn cli(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sfc-locale").expect("binary");
    cmd.current_dir(workdir).arg("--quiet");
    cmd
}

fn setup_components(root: &Path) {
    fs::create_dir_all(root.join("src/components")).unwrap();
    fs::create_dir_all(root.join("src/pages/admin")).unwrap();
    fs::write(root.join("src/components/Hello.vue"), HELLO).unwrap();
    fs::write(root.join("src/pages/admin/Users.vue"), USERS).unwrap();
    fs::write(root.join("src/App.vue"), "<template><div/></template>\n").unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn squeeze_nests_messages_by_component_path() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);

    cli(root)
        .args(["squeeze", "--target", "src", "--output", "messages.json"])
        .arg("--structure-prefix")
        .assert()
        .success();

    assert_eq!(
        read_json(&root.join("messages.json")),
        json!({
            "en": {
                "components": {"Hello": {"hello": "Hello!"}},
                "pages": {"admin": {"Users": {"title": "Users", "actions": {"remove": "Remove"}}}}
            },
            "ja": {"components": {"Hello": {"hello": "こんにちは！"}}}
        })
    );
}

#[test]
fn squeeze_then_infuse_leaves_components_untouched() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);

    cli(root)
        .args(["sqz", "-t", "src", "-o", "messages.json", "-p"])
        .assert()
        .success();
    cli(root)
        .args(["infuse", "--target", "src", "--locales", "messages.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("src/components/Hello.vue")).unwrap(),
        HELLO
    );
    assert_eq!(
        fs::read_to_string(root.join("src/pages/admin/Users.vue")).unwrap(),
        USERS
    );
}

#[test]
fn infuse_applies_edits_and_new_locales() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);

    let messages = json!({
        "en": {
            "components": {"Hello": {"hello": "Hi!"}},
            "pages": {"admin": {"Users": {"title": "Users", "actions": {"remove": "Remove"}}}}
        },
        "ja": {"components": {"Hello": {"hello": "こんにちは！"}}},
        "fr": {"pages": {"admin": {"Users": {"title": "Utilisateurs"}}}}
    });
    fs::write(
        root.join("messages.json"),
        serde_json::to_string_pretty(&messages).unwrap(),
    )
    .unwrap();

    cli(root)
        .args(["infuse", "-t", "src", "-l", "messages.json", "--dry-run"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(root.join("src/components/Hello.vue")).unwrap(),
        HELLO
    );

    cli(root)
        .args(["infuse", "-t", "src", "-l", "messages.json"])
        .assert()
        .success();

    let hello = fs::read_to_string(root.join("src/components/Hello.vue")).unwrap();
    assert!(hello.starts_with("<template>\n  <p>{{ $t('hello') }}</p>\n</template>\n"));
    assert!(hello.contains("\"hello\": \"Hi!\""));
    assert!(hello.contains("\"hello\": \"こんにちは！\""));

    let users = fs::read_to_string(root.join("src/pages/admin/Users.vue")).unwrap();
    assert!(users.starts_with(USERS));
    assert!(users.ends_with(
        "\n<i18n locale=\"fr\">\n{\n  \"title\": \"Utilisateurs\"\n}\n</i18n>\n"
    ));
}

#[test]
fn infuse_reads_per_locale_directory_with_match() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);
    fs::create_dir_all(root.join("locales")).unwrap();
    fs::write(
        root.join("locales/en.json"),
        r#"{"components": {"Hello": {"hello": "Hey"}}}"#,
    )
    .unwrap();

    cli(root)
        .args(["infuse", "-t", "src", "-l", "locales", "--match", r"^(\w+)\.json$"])
        .assert()
        .success();

    let hello = fs::read_to_string(root.join("src/components/Hello.vue")).unwrap();
    assert!(hello.contains("\"hello\": \"Hey\""));
    // locales absent from the input stay as they were
    assert!(hello.contains("\"hello\": \"こんにちは！\""));
}

#[test]
fn squeeze_split_writes_one_file_per_locale() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);

    cli(root)
        .args(["squeeze", "-t", "src", "-o", "out", "--split", "-p", "--format", "yaml"])
        .assert()
        .success();

    let ja = sfc_locale_core::read_value(&root.join("out/ja.yaml")).unwrap();
    assert_eq!(ja, json!({"components": {"Hello": {"hello": "こんにちは！"}}}));
    assert!(root.join("out/en.yaml").exists());
}

#[test]
fn bundles_round_trip_through_squeeze_and_infuse() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);
    fs::create_dir_all(root.join("locales")).unwrap();
    fs::write(root.join("locales/common.en"), r#"{"yes": "Yes", "no": "No"}"#).unwrap();
    fs::write(root.join("locales/common.ja"), r#"{"yes": "はい"}"#).unwrap();
    fs::write(
        root.join("namespace.json"),
        r#"{"locales/common.*": "common"}"#,
    )
    .unwrap();

    cli(root)
        .args(["squeeze", "-t", "src", "-o", "messages.json", "-p"])
        .args(["--bundle-with", "locales/common.*", "--namespace", "namespace.json"])
        .assert()
        .success();

    let mut messages = read_json(&root.join("messages.json"));
    assert_eq!(messages["en"]["common"], json!({"yes": "Yes", "no": "No"}));
    assert_eq!(messages["ja"]["common"], json!({"yes": "はい"}));

    messages["ja"]["common"]["no"] = json!("いいえ");
    fs::write(
        root.join("messages.json"),
        serde_json::to_string(&messages).unwrap(),
    )
    .unwrap();

    cli(root)
        .args(["infuse", "-t", "src", "-l", "messages.json"])
        .args(["--unbundle-to", "locales/common.*", "-n", "namespace.json"])
        .assert()
        .success();

    assert_eq!(
        read_json(&root.join("locales/common.ja")),
        json!({"yes": "はい", "no": "いいえ"})
    );
    assert_eq!(
        fs::read_to_string(root.join("src/components/Hello.vue")).unwrap(),
        HELLO
    );
}

#[test]
fn unchanged_bundles_keep_their_bytes() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);
    fs::create_dir_all(root.join("locales")).unwrap();
    fs::write(root.join("locales/common.en"), r#"{"yes":"Yes"}"#).unwrap();
    fs::write(root.join("namespace.json"), r#"{"locales/common.*": "common"}"#).unwrap();

    cli(root)
        .args(["squeeze", "-t", "src", "-o", "messages.json", "-p"])
        .args(["-b", "locales/common.*", "-n", "namespace.json"])
        .assert()
        .success();
    cli(root)
        .args(["infuse", "-t", "src", "-l", "messages.json"])
        .args(["-u", "locales/common.*", "-n", "namespace.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("locales/common.en")).unwrap(),
        r#"{"yes":"Yes"}"#
    );
}

#[test]
fn directory_bundle_without_match_is_rejected() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_components(root);
    fs::create_dir_all(root.join("locales")).unwrap();

    cli(root)
        .args(["squeeze", "-t", "src", "--bundle-with", "locales"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("regex is required"));
}

#[test]
fn unterminated_block_fails_squeeze() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/Open.vue"),
        "<i18n locale=\"en\">{\"a\": 1}</i18n>\n<i18n locale=\"ja\">{\"a\": 2}\n",
    )
    .unwrap();

    cli(root)
        .args(["squeeze", "-t", "src"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Malformed component")
                .and(predicate::str::contains("Open.vue")),
        );
    assert!(!root.join("messages.json").exists());
}

#[test]
fn malformed_block_fails_squeeze() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/Broken.vue"), "<i18n>{\"en\": </i18n>\n").unwrap();

    cli(root)
        .args(["squeeze", "-t", "src"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken.vue"));
    assert!(!root.join("messages.json").exists());
}
