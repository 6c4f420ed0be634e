use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn passage(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("passage").unwrap();
    cmd.env("PASSAGE_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("PASSAGE_LOG");
    cmd
}

fn create(home: &TempDir, title: &str, content: &str) {
    passage(home)
        .args(["create", "--no-editor", title, content])
        .assert()
        .success();
}

#[test]
fn test_create_stores_storage_form() {
    let home = TempDir::new().unwrap();
    passage(&home)
        .args([
            "create",
            "--no-editor",
            "Reading Passage 1",
            "The ⟦Q1:blanks⟧ river and {{2}mcq}",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created reading section: Reading Passage 1 (2 questions)"));

    passage(&home)
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The {{1}blanks} river and {{2}mcq}"));

    passage(&home)
        .args(["view", "1", "--display"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The ⟦Q1:blanks⟧ river and {{2}mcq}"));
}

#[test]
fn test_refs_are_numeric_and_unique() {
    let home = TempDir::new().unwrap();
    create(&home, "Mixed", "{{10}mcq} and {{2}blanks} and ⟦Q10:dropdown⟧");

    passage(&home)
        .args(["refs", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mixed: 2, 10"));

    passage(&home)
        .args(["refs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"10\""));
}

#[test]
fn test_check_fails_until_key_is_complete() {
    let home = TempDir::new().unwrap();
    create(&home, "Listening 1", "{{1}blanks} {{2}boolean}");

    passage(&home)
        .args(["answer", "set", "1", "1", "harbour|harbor"])
        .assert()
        .success();

    passage(&home)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("no answer for 2"));

    passage(&home)
        .args(["answer", "set", "1", "2", "true"])
        .assert()
        .success();

    passage(&home)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All answer keys are complete"));
}

#[test]
fn test_grade_from_stdin() {
    let home = TempDir::new().unwrap();
    create(&home, "Reading 2", "{{1}blanks} {{2}boolean} {{3}dropdown}");
    for (number, answer) in [("1", "harbour|harbor"), ("2", "false"), ("3", "north")] {
        passage(&home)
            .args(["answer", "set", "1", number, answer])
            .assert()
            .success();
    }

    passage(&home)
        .args(["grade", "1"])
        .write_stdin("1=Harbor\n2=F\n3=south\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading 2: 2/3"));

    passage(&home)
        .args(["grade", "1", "--json"])
        .write_stdin("{\"1\": \"harbour\"}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unanswered\""));
}

#[test]
fn test_convert_needs_no_store() {
    let home = TempDir::new().unwrap();
    passage(&home)
        .args(["convert", "to-display"])
        .write_stdin("{{5}mcq} and {{6}blanks}")
        .assert()
        .success()
        .stdout("{{5}mcq} and ⟦Q6:blanks⟧");

    passage(&home)
        .args(["convert", "to-storage"])
        .write_stdin("Choose: ⟦Q1:dropdown⟧ then ⟦Q2:boolean⟧")
        .assert()
        .success()
        .stdout("Choose: {{1}dropdown} then {{2}boolean}");

    assert!(!home.path().join("data.json").exists());
}

#[test]
fn test_import_then_export() {
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    std::fs::write(src.path().join("part1.txt"), "Part 1\n\nComplete ⟦Q1:blanks⟧").unwrap();
    std::fs::write(src.path().join("part2.txt"), "Part 2\n\n{{2}mcq}").unwrap();

    passage(&home)
        .args(["import", "--module", "listening"])
        .arg(src.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total imported: 2"));

    passage(&home)
        .args(["list", "--module", "listening"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Part 1").and(predicate::str::contains("Part 2")));

    let archive = src.path().join("out.tar.gz");
    passage(&home)
        .arg("export")
        .arg("--output")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 sections"));
    assert!(archive.exists());
}

#[test]
fn test_config_round_trip() {
    let home = TempDir::new().unwrap();
    passage(&home)
        .args(["config", "case-sensitive", "true"])
        .assert()
        .success();

    passage(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("case-sensitive: true"));

    passage(&home)
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_unknown_index_is_an_error() {
    let home = TempDir::new().unwrap();
    passage(&home)
        .args(["view", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 3 not found"));
}

#[test]
fn test_edit_without_changes_saves_nothing() {
    let home = TempDir::new().unwrap();
    create(&home, "Listening 3", "Notes ⟦Q1:blanks⟧\n\n");

    passage(&home)
        .args(["edit", "1"])
        .env("EDITOR", "true")
        .env_remove("VISUAL")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));
}
