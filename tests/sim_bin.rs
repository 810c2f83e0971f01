use std::process::Command;

#[test]
fn sim_prints_json_summary() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "3", "4"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("could not launch sim");
    assert!(output.status.success(), "sim exited with {:?}", output.status);
    let stdout = String::from_utf8(output.stdout).expect("sim wrote non-utf8");
    let summary: serde_json::Value = serde_json::from_str(stdout.trim()).expect("sim wrote bad json");
    assert!(summary["winner"].is_string());
    assert!(summary["moves"].as_u64().unwrap() > 0);
    assert_eq!(summary["seeds"][1], 4);
    assert!(summary["human"]["score"].is_i64());
}
