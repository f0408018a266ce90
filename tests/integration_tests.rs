use pop_insights::core::insights::neighbors::NeighborPair;
use pop_insights::{
    InsightConfig, InsightEngine, InsightPipeline, JsonDirectoryRepository, LocalStorage,
};
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn snapshot(total: u64, median_age: f64) -> Value {
    let male = total / 2;
    let female = total - male;
    let (young_m, young_f) = (male / 4, female / 4);
    let (adult_m, adult_f) = (male / 2, female / 2);
    let (old_m, old_f) = (male - young_m - adult_m, female - young_f - adult_f);
    json!({
        "totalPopulation": total,
        "malePopulation": male,
        "femalePopulation": female,
        "medianAge": median_age,
        "ageGroups": [
            {"ageRange": "0-4", "male": young_m, "female": young_f},
            {"ageRange": "25-29", "male": adult_m, "female": adult_f},
            {"ageRange": "70-74", "male": old_m, "female": old_f}
        ]
    })
}

fn write_region(dir: &Path, file: &str, document: Value) {
    std::fs::write(dir.join(file), serde_json::to_vec_pretty(&document).unwrap()).unwrap();
}

fn seed_data(dir: &Path) {
    write_region(
        dir,
        "alpha.json",
        json!({
            "identity": {"code": "AA", "name": "Alpha", "group": "North"},
            "years": {
                "2000": snapshot(1_000_000, 35.0),
                "2012": snapshot(1_100_000, 36.0),
                "2024": snapshot(1_200_000, 38.0)
            }
        }),
    );
    write_region(
        dir,
        "beta.json",
        json!({
            "countryCode": "BB",
            "countryName": "Beta",
            "region": "North",
            "years": {
                "2000": snapshot(1_000_000, 40.0),
                "2012": snapshot(950_000, 42.0),
                "2024": snapshot(900_000, 45.0)
            }
        }),
    );
    // 缺少中間年份：不進入成長型態分析
    write_region(
        dir,
        "gamma.json",
        json!({
            "stateCode": "CC",
            "stateName": "Gamma",
            "years": {
                "2000": snapshot(950_000, 30.0),
                "2024": snapshot(1_050_000, 31.0)
            }
        }),
    );
    std::fs::write(dir.join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
}

fn config(data_dir: &Path, output_dir: &Path) -> InsightConfig {
    let mut config = InsightConfig::default();
    config.input.data_dir = data_dir.display().to_string();
    config.output.output_path = output_dir.display().to_string();
    config.analysis.sample_years = vec![2000, 2012, 2024];
    config.analysis.neighbors = vec![
        NeighborPair::new("AA", "Beta"),
        NeighborPair::new("AA", "ZZ"),
    ];
    config
}

fn read_entry(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
    let mut content = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_report_from_json_directory() {
    let data_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    seed_data(data_dir.path());

    let config = config(data_dir.path(), output_dir.path());
    let repository = JsonDirectoryRepository::new(config.data_dir());
    let storage = LocalStorage::new(output_dir.path());
    let engine = InsightEngine::new(InsightPipeline::new(repository, storage, config));

    let output_path = engine.run().await.unwrap();
    assert!(output_path.ends_with("insights.zip"));

    let full_path = output_dir.path().join("insights.zip");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let report: Value = serde_json::from_str(&read_entry(&mut archive, "report.json")).unwrap();

    // broken.json 被略過
    assert_eq!(report["regionCount"], 3);

    let growth = report["extremes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["metric"] == "growthRate")
        .unwrap();
    assert_eq!(growth["max"]["name"], "Alpha");
    assert_eq!(growth["max"]["value"], 20.0);
    assert_eq!(growth["min"]["name"], "Beta");
    assert_eq!(growth["min"]["value"], -10.0);

    let patterns = report["growthPatterns"].as_array().unwrap();
    let codes: Vec<&str> = patterns.iter().map(|p| p["code"].as_str().unwrap()).collect();
    assert_eq!(patterns.len(), 2);
    assert!(!codes.contains(&"CC"));

    let milestones = report["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 2);
    let gamma = milestones.iter().find(|m| m["code"] == "CC").unwrap();
    assert_eq!(gamma["direction"], "upward");
    assert_eq!(gamma["fromUnits"], 0);
    assert_eq!(gamma["toUnits"], 1);

    let contrasts = report["neighborContrasts"].as_array().unwrap();
    assert_eq!(contrasts.len(), 1);
    assert_eq!(contrasts[0]["pair"], "Alpha vs Beta");

    let groups = report["regionalGroups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["label"], "North");
    assert_eq!(groups[0]["memberCount"], 2);

    let summaries = read_entry(&mut archive, "summaries.csv");
    assert_eq!(summaries.lines().count(), 4);
    assert!(summaries.lines().nth(1).unwrap().starts_with("AA,Alpha,North,1000000,1200000"));
}

#[tokio::test]
async fn test_missing_data_directory_fails() {
    let output_dir = TempDir::new().unwrap();
    let config = config(Path::new("/nonexistent/pop-insights"), output_dir.path());

    let repository = JsonDirectoryRepository::new(config.data_dir());
    let storage = LocalStorage::new(output_dir.path());
    let engine = InsightEngine::new(InsightPipeline::new(repository, storage, config));

    let err = engine.run().await.unwrap_err();
    assert_eq!(err.severity(), pop_insights::utils::error::ErrorSeverity::Critical);
    assert!(!output_dir.path().join("insights.zip").exists());
}
