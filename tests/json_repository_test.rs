use pop_insights::core::RegionRepository;
use pop_insights::JsonDirectoryRepository;
use tempfile::TempDir;

const REGION: &str = r#"{
    "stateCode": "06",
    "stateName": "California",
    "region": "West",
    "years": {
        "2000": {"malePopulation": 50, "femalePopulation": 50, "medianAge": 33.3},
        "2024": {"malePopulation": 60, "femalePopulation": 60, "medianAge": 37.9}
    }
}"#;

#[tokio::test]
async fn test_loads_regions_sorted_by_file_name() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.json"), REGION.replace("\"06\"", "\"48\"")).unwrap();
    std::fs::write(dir.path().join("a.json"), REGION).unwrap();

    let regions = JsonDirectoryRepository::new(dir.path())
        .list_regions()
        .await
        .unwrap();

    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].code(), "06");
    assert_eq!(regions[1].code(), "48");
    assert_eq!(regions[0].years.len(), 2);
    assert_eq!(regions[0].snapshot(2024).unwrap().total_population, 120);
}

#[tokio::test]
async fn test_malformed_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("good.json"), REGION).unwrap();
    std::fs::write(dir.path().join("index.json"), r#"["06", "48"]"#).unwrap();
    std::fs::write(dir.path().join("bad-year.json"), r#"{"code": "X", "years": {"soon": {}}}"#)
        .unwrap();

    let regions = JsonDirectoryRepository::new(dir.path())
        .list_regions()
        .await
        .unwrap();

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].name(), "California");
}

#[tokio::test]
async fn test_empty_directory_yields_no_regions() {
    let dir = TempDir::new().unwrap();
    let regions = JsonDirectoryRepository::new(dir.path())
        .list_regions()
        .await
        .unwrap();
    assert!(regions.is_empty());
}
