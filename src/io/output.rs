use std::path::Path;

use anyhow::{Context, Result};

use crate::eval::EvalReport;

/// Write the machine-readable report as pretty-printed JSON
pub fn write_json_report(report: &EvalReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, report).context("Failed to write JSON report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{evaluate, EvalConfig};

    #[test]
    fn test_report_round_trips_as_json() {
        let config = EvalConfig {
            track_confusions: true,
            min_confusion_count: 1,
            ..Default::default()
        };
        let report = evaluate(
            vec![Ok("the cat sat".to_string())],
            vec![Ok("the dog sat".to_string())],
            &config,
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["totals"]["sentence_count"], 1);
        assert_eq!(value["totals"]["error_count"], 1);
        assert_eq!(value["substitutions"][0]["reference"], "cat");
        assert_eq!(value["substitutions"][0]["hypothesis"], "dog");
        assert!(value["metrics"]["wer"]["defined"].as_bool().unwrap());
    }
}
