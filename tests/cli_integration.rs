use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dualfuel-cost"))
        .args(args)
        .output()
        .expect("dualfuel-cost process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn report_line<'a>(stdout: &'a str, label: &str) -> &'a str {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));
    line.split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"))
}

fn parse_metric(stdout: &str, label: &str) -> f64 {
    let raw = report_line(stdout, label);
    raw.parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{raw}` for `{label}`"))
}

#[test]
fn rated_preset_prints_worked_example() {
    let stdout = stdout_of(&["--preset", "rated"]);
    assert_eq!(report_line(&stdout, "Recommendation:"), "Refueling is cheaper");
    assert!((parse_metric(&stdout, "Electric cost per km:") - 0.5800).abs() < 1e-9);
    assert!((parse_metric(&stdout, "Fuel cost per km:") - 0.4900).abs() < 1e-9);
    assert!((parse_metric(&stdout, "Critical elec. price:") - 1.7741).abs() < 1e-9);
    assert!(report_line(&stdout, "Annual saving:").starts_with("1,350"));
}

#[test]
fn overrides_flip_the_recommendation() {
    let stdout = stdout_of(&["--preset", "rated", "--set", "electric.unit_price=1.0"]);
    assert_eq!(report_line(&stdout, "Recommendation:"), "Charging is cheaper");
}

#[test]
fn presets_produce_distinct_recommendations() {
    let home = stdout_of(&["--preset", "home_charging"]);
    let spike = stdout_of(&["--preset", "fuel_spike"]);
    let rated = stdout_of(&["--preset", "rated"]);
    assert_eq!(report_line(&home, "Recommendation:"), "Charging is cheaper");
    assert_eq!(report_line(&rated, "Recommendation:"), "Refueling is cheaper");
    assert!(
        parse_metric(&spike, "Fuel cost per km:") > parse_metric(&rated, "Fuel cost per km:"),
        "fuel spike should raise the fuel cost"
    );
}

#[test]
fn profile_file_is_loaded() {
    let stdout = stdout_of(&["--profile", "profiles/commute.toml"]);
    assert!((parse_metric(&stdout, "Electric cost per km:") - 0.1920).abs() < 1e-9);
    assert!((parse_metric(&stdout, "Fuel cost per km:") - 0.7500).abs() < 1e-9);
    assert_eq!(report_line(&stdout, "Recommendation:"), "Charging is cheaper");
    assert!(report_line(&stdout, "Annual saving:").ends_with("(12,000 km)"));
}

#[test]
fn json_output_is_machine_readable() {
    let stdout = stdout_of(&["--preset", "rated", "--json"]);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["recommendation"]["decision"], "fuel_cheaper");
    assert_eq!(
        json["charts"]["electric_cost"]["points"]
            .as_array()
            .map(Vec::len),
        Some(46)
    );
}

#[test]
fn export_dir_receives_csv_files() {
    let dir = std::env::temp_dir().join(format!("dualfuel-cost-export-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let dir_arg = dir.to_string_lossy().into_owned();

    stdout_of(&["--preset", "rated", "--export-dir", &dir_arg]);

    for name in [
        "cost_vs_electric_price.csv",
        "critical_vs_fuel_price.csv",
        "scenarios.csv",
        "cost_ratio.csv",
        "sensitivity.csv",
    ] {
        assert!(dir.join(name).is_file(), "missing export {name}");
    }
    let sensitivity = std::fs::read_to_string(dir.join("sensitivity.csv")).unwrap_or_default();
    assert_eq!(sensitivity.lines().count(), 100);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn interactive_edits_update_summary() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dualfuel-cost"))
        .args(["--preset", "rated", "--interactive"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("dualfuel-cost process should spawn");
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(b"electric.unit_price=1.0\nquit\n")
            .expect("stdin should accept edits");
    }
    let output = child.wait_with_output().expect("process should finish");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summaries: Vec<&str> = stdout
        .lines()
        .map(|l| l.trim_start_matches("> "))
        .filter(|l| l.contains("is cheaper"))
        .collect();
    assert!(summaries.iter().any(|l| l.starts_with("Refueling is cheaper")));
    assert!(
        summaries.last().is_some_and(|l| l.starts_with("Charging is cheaper")),
        "last summary should reflect the edit: {stdout}"
    );
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "moon_base"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn invalid_profile_is_rejected() {
    let output = run(&["--profile", "profiles/bad_mode.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("electric.mode"));
}

#[test]
fn unknown_override_field_fails() {
    let output = run(&["--set", "electric.voltage=400"]);
    assert!(!output.status.success());
}

#[test]
fn zero_distance_is_warned_per_source() {
    let output = run(&["--set", "fuel.distance_km=0"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("distance is 0"), "stderr: {stderr}");
    assert!(stderr.contains("Fuel"), "stderr: {stderr}");
    assert!(!stderr.contains("Electric"), "stderr: {stderr}");
}
