mod common;

use common::{dead_backend, json_of, run_mfind, serve_once, stdout_of};

fn names(value: &serde_json::Value) -> Vec<(String, String)> {
    value["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|item| {
            (
                item["name"].as_str().unwrap_or_default().to_string(),
                item["company"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn search_keeps_catalog_order_and_lists_duplicates() {
    let backend = dead_backend();
    let output = run_mfind(&["--backend", &backend, "search", "SALAD", "--json"]);
    let value = json_of(&output);
    assert_eq!(
        names(&value),
        vec![
            ("Caesar Salad".to_string(), "Green Bowl".to_string()),
            ("Chicken Salad".to_string(), "Burger Hut".to_string()),
            ("Chicken Salad".to_string(), "Sub Stop".to_string()),
        ]
    );
    assert_eq!(value["recommendation_base"], "Caesar Salad");
}

#[test]
fn unreachable_backend_leaves_recommendations_empty() {
    let backend = dead_backend();
    let output = run_mfind(&["--backend", &backend, "search", "caesar"]);
    let text = stdout_of(&output);
    assert!(text.contains("1 result(s)"));
    assert!(text.contains("Recommendations for Caesar Salad:\n  (none)"));
}

#[test]
fn search_without_matches_has_no_recommendation_base() {
    let output = run_mfind(&["search", "pizza", "--json", "--no-recommend"]);
    let value = json_of(&output);
    assert_eq!(value["results"].as_array().map(Vec::len), Some(0));
    assert!(value["recommendation_base"].is_null());
    assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(0));
}

#[test]
fn seal_and_range_flags_combine() {
    let output = run_mfind(&["search", "--seal", "none", "--json", "--no-recommend"]);
    assert_eq!(
        names(&json_of(&output)),
        vec![
            ("Caesar Salad".to_string(), "Green Bowl".to_string()),
            ("Sparkling Water".to_string(), "Green Bowl".to_string()),
            ("Chicken Salad".to_string(), "Sub Stop".to_string()),
        ]
    );

    let output = run_mfind(&[
        "search",
        "--seal",
        "Alto en calorias",
        "--max-carbs",
        "60",
        "--json",
        "--no-recommend",
    ]);
    assert_eq!(
        names(&json_of(&output)),
        vec![("Double Burger".to_string(), "Burger Hut".to_string())]
    );

    let output = run_mfind(&[
        "search",
        "--restaurant",
        "Burger Hut",
        "--category",
        "Salads",
        "--json",
        "--no-recommend",
    ]);
    assert_eq!(
        names(&json_of(&output)),
        vec![("Chicken Salad".to_string(), "Burger Hut".to_string())]
    );

    let output = run_mfind(&[
        "search",
        "water",
        "--min-calories",
        "-10",
        "--max-calories",
        "-1",
        "--json",
        "--no-recommend",
    ]);
    assert!(names(&json_of(&output)).is_empty());
}

#[test]
fn table_shows_zero_and_missing_distinctly() {
    let output = run_mfind(&["search", "sparkling", "--no-recommend"]);
    let text = stdout_of(&output);
    let row = text
        .lines()
        .find(|line| line.contains("Sparkling Water"))
        .expect("sparkling water row");
    assert!(row.contains(" 0 "));
    assert!(row.contains("n/a"));
    assert!(!text.contains("Recommendations"));
}

#[test]
fn search_renders_backend_recommendations() {
    let (backend, handle) = serve_once(
        "200 OK",
        r#"{"plato_base":"Caesar Salad","recomendaciones":[{"name":"Chicken Salad","company":"Sub Stop","category":"Salads","calories":350,"protein":28,"fat":12,"carbs":25,"seals":[]}]}"#,
    );
    let output = run_mfind(&["--backend", &backend, "search", "caesar"]);
    let text = stdout_of(&output);
    let request = handle.join().expect("server thread");
    assert!(request.starts_with("GET /recomendar?nombre=Caesar"));
    assert!(text.contains("Recommendations for Caesar Salad:"));
    assert!(text.contains("Chicken Salad (Sub Stop)  Cal: 350 | Prot: 28g"));
}

#[test]
fn suggest_is_capped_and_empty_text_lists_nothing() {
    let text = stdout_of(&run_mfind(&["suggest", "a", "--limit", "2"]));
    assert_eq!(
        text,
        "Caesar Salad\tGreen Bowl\nChicken Salad\tBurger Hut\n"
    );

    let text = stdout_of(&run_mfind(&["suggest", ""]));
    assert_eq!(text, "");
}

#[test]
fn facets_are_sorted_and_distinct() {
    let value = json_of(&run_mfind(&["facets", "--json"]));
    assert_eq!(
        value["restaurants"],
        serde_json::json!(["Burger Hut", "Green Bowl", "Sub Stop"])
    );
    assert_eq!(
        value["categories"],
        serde_json::json!(["Burgers", "Drinks", "Salads"])
    );
    assert_eq!(
        value["seals"],
        serde_json::json!([
            "Alto en azucares",
            "Alto en calorias",
            "Alto en grasas saturadas",
            "Alto en sodio"
        ])
    );
}

#[test]
fn recommend_reports_backend_failure() {
    let backend = dead_backend();
    let output = run_mfind(&["--backend", &backend, "recommend", "Caesar Salad"]);
    assert!(!output.status.success());
}

#[test]
fn missing_catalog_file_is_an_error() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_mfind"))
        .args(["--catalog", "/nonexistent/catalog.json", "facets"])
        .env("XDG_CONFIG_HOME", std::env::temp_dir())
        .output()
        .expect("run mfind");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("load catalog"));
}

#[test]
fn browse_refuses_without_a_terminal() {
    let output = run_mfind(&["browse"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interactive terminal"));
}
