use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shopfront_cli").unwrap();
    cmd.env("SHOPFRONT_CLI_SCRIPT", "1")
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"));
    cmd
}

#[test]
fn script_mode_runs_a_basic_shop_day() {
    let home = TempDir::new().unwrap();
    let input = "\
new-shop demo
register admin@example.com Ada Obi pw
login admin@example.com pw
add-product Soap SP-1 50 35 10 2030-01-01
new-sale Ada cash 1x2
dashboard today
exit
";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Created shop `demo`"))
        .stdout(contains("Welcome back, Ada Obi"))
        .stdout(contains("recorded"))
        .stdout(contains("Today"));

    let shop_file = home
        .path()
        .join("data")
        .join("shopfront")
        .join("shops")
        .join("demo.json");
    let json = std::fs::read_to_string(shop_file).unwrap();
    assert!(json.contains("\"Soap\""));
}

#[test]
fn unknown_commands_do_not_abort_the_script() {
    let home = TempDir::new().unwrap();
    let input = "frobnicate\nversion\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("shopfront"))
        .stderr(contains("Unknown command `frobnicate`"));
}
