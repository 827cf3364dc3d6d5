use pollen_alert::utils::logger;
use tempfile::TempDir;

#[test]
fn test_log_file_is_appended() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("pollen_alert.log");
    std::fs::write(&log_path, "earlier run\n").unwrap();

    logger::init_cli_logger(false, &log_path).unwrap();
    tracing::info!(target: "pollen_alert", "Starting pollen data scraping script");

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.starts_with("earlier run\n"));
    assert!(content.contains("Starting pollen data scraping script"));
    assert!(content.contains("INFO"));
    assert!(!content.contains("\u{1b}["));
}
