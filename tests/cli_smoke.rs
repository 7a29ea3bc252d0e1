mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{taskrepo_cmd, TestDir};

fn json_stdout(output: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(output)
}

#[test]
fn taskrepo_help_works() {
    let dir = TestDir::new().expect("tempdir");
    taskrepo_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task repository"));
}

#[test]
fn subcommand_help_works() {
    let dir = TestDir::new().expect("tempdir");
    for cmd in ["add", "get", "list", "update", "delete"] {
        taskrepo_cmd(&dir).arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn add_list_update_delete_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;

    taskrepo_cmd(&dir)
        .args(["add", "write report"])
        .assert()
        .success()
        .stdout(contains("Created task #1"));
    taskrepo_cmd(&dir).args(["add", "review PR"]).assert().success();

    taskrepo_cmd(&dir)
        .args(["update", "2", "--done"])
        .assert()
        .success()
        .stdout(contains("done: true"));

    taskrepo_cmd(&dir)
        .args(["list", "--open"])
        .assert()
        .success()
        .stdout(contains("[ ] #1 write report"));

    taskrepo_cmd(&dir)
        .args(["list", "--done"])
        .assert()
        .success()
        .stdout(contains("[x] #2 review PR"));

    taskrepo_cmd(&dir).args(["delete", "1"]).assert().success();

    let snapshot = dir.read_snapshot()?;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.values().next().map(|task| task.title.as_str()), Some("review PR"));
    Ok(())
}

#[test]
fn json_list_paginates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    for title in ["a", "b", "c"] {
        taskrepo_cmd(&dir).args(["add", title]).assert().success();
    }

    let output = taskrepo_cmd(&dir)
        .args(["--json", "list", "--page", "2", "--limit", "1"])
        .output()?;
    assert!(output.status.success());

    let value = json_stdout(&output.stdout)?;
    assert_eq!(value["status"], "success");
    assert_eq!(value["command"], "list");
    let tasks = value["data"]["tasks"].as_array().ok_or("tasks array")?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 2);
    assert_eq!(tasks[0]["title"], "b");
    Ok(())
}

#[test]
fn missing_task_exits_with_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;

    taskrepo_cmd(&dir)
        .args(["get", "7"])
        .assert()
        .code(2)
        .stderr(contains("Task not found: 7"));

    let output = taskrepo_cmd(&dir).args(["--json", "delete", "7"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    let value = json_stdout(&output.stdout)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["command"], "delete");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["details"]["id"], 7);
    Ok(())
}

#[test]
fn file_flag_and_config_choose_snapshot_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_file(
        ".taskrepo.toml",
        "[storage]\ndata_file = \"state/tasks.json\"\n",
    )?;

    taskrepo_cmd(&dir).args(["add", "configured"]).assert().success();
    assert!(dir.path().join("state").join("tasks.json").exists());

    let custom = dir.path().join("custom.json");
    taskrepo_cmd(&dir)
        .arg("--file")
        .arg(&custom)
        .args(["add", "overridden"])
        .assert()
        .success();
    assert!(custom.exists());
    Ok(())
}

#[test]
fn explicit_page_zero_lists_everything() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    for title in ["a", "b", "c"] {
        taskrepo_cmd(&dir).args(["add", title]).assert().success();
    }

    let output = taskrepo_cmd(&dir)
        .args(["--json", "list", "--page", "0", "--limit", "1"])
        .output()?;
    assert!(output.status.success());
    let value = json_stdout(&output.stdout)?;
    assert_eq!(value["data"]["page"], 0);
    assert_eq!(value["data"]["tasks"].as_array().ok_or("tasks array")?.len(), 3);

    // Without --page a limit means the first page.
    let output = taskrepo_cmd(&dir)
        .args(["--json", "list", "--limit", "1"])
        .output()?;
    let value = json_stdout(&output.stdout)?;
    assert_eq!(value["data"]["page"], 1);
    let tasks = value["data"]["tasks"].as_array().ok_or("tasks array")?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    Ok(())
}

#[test]
fn file_flag_keeps_configured_formatting() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new()?;
    dir.write_file(".taskrepo.toml", "[storage]\npretty = true\n")?;

    let custom = dir.path().join("custom.json");
    taskrepo_cmd(&dir)
        .arg("--file")
        .arg(&custom)
        .args(["add", "pretty"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&custom)?;
    assert!(content.lines().count() > 1);
    assert!(!dir.data_file().exists());
    Ok(())
}
