//! Integration tests for qescope

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn qescope() -> Command {
        cargo_bin_cmd!("qescope")
    }

    #[test]
    fn help_displays() {
        qescope()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("quality-estimation"));
    }

    #[test]
    fn version_displays() {
        qescope()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("qescope"));
    }

    #[test]
    fn config_shows_locations() {
        qescope()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Model registry:"))
            .stdout(predicate::str::contains("Cache root:"));
    }

    #[test]
    fn datasets_lists_builtin() {
        qescope()
            .args(["datasets", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("sample-en-de"));
    }

    #[test]
    fn models_from_registry() {
        let dir = TempDir::new().unwrap();
        let registry = dir.path().join("models.toml");
        fs::write(
            &registry,
            "[models.demo]\nlp = \"en-de\"\nurl = \"https://example.org/model.zip\"\n",
        )
        .unwrap();

        qescope()
            .args(["models", "--models"])
            .arg(&registry)
            .assert()
            .success()
            .stdout(predicate::str::contains("demo"))
            .stdout(predicate::str::contains("en-de"));
    }

    #[test]
    fn models_registry_with_unknown_key_fails() {
        let dir = TempDir::new().unwrap();
        let registry = dir.path().join("models.toml");
        fs::write(
            &registry,
            "[models.demo]\nlp = \"en-de\"\nurl = \"x\"\nextra = true\n",
        )
        .unwrap();

        qescope()
            .args(["models", "--models"])
            .arg(&registry)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid registry"));
    }

    #[test]
    fn missing_explicit_registry_fails() {
        qescope()
            .args(["models", "--models", "/definitely/not/models.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("registry file not found"));
    }

    #[test]
    fn show_renders_builtin_pair() {
        qescope()
            .args(["show", "--index", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("sample-en-de"))
            .stdout(predicate::str::contains("HTER"));
    }

    #[test]
    fn predict_replays_gold_tags() {
        qescope()
            .args(["predict", "--index", "0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Target tags"))
            .stdout(predicate::str::contains("BAD"));
    }

    #[test]
    fn predict_edited_target_has_no_gold() {
        qescope()
            .args(["predict", "--index", "0", "--target", "ein anderer Satz ."])
            .assert()
            .success()
            .stdout(predicate::str::contains("No target tags prediction"));
    }

    #[test]
    fn predict_unregistered_model_fails() {
        let dir = TempDir::new().unwrap();
        let registry = dir.path().join("models.toml");
        fs::write(&registry, "[models]\n").unwrap();

        qescope()
            .args(["predict", "--model", "absent", "--models"])
            .arg(&registry)
            .assert()
            .failure()
            .stderr(predicate::str::contains("model not registered"));
    }

    #[test]
    fn fetch_local_file_passes_through() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("artifact.bin");
        fs::write(&file, b"bytes").unwrap();

        qescope()
            .arg("fetch")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains(file.to_str().unwrap()));
    }

    #[test]
    fn fetch_missing_path_fails() {
        qescope()
            .args(["fetch", "/definitely/not/here.bin"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn fetch_unknown_scheme_fails() {
        qescope()
            .args(["fetch", "s3://bucket/model.zip"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unable to parse"));
    }

    #[test]
    fn fetch_offline_without_cache_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        qescope()
            .args([
                "fetch",
                "https://example.org/never-cached.bin",
                "--offline",
                "--cache-root",
            ])
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("offline mode requested"))
            .stderr(predicate::str::contains("pre-populate"));
    }

    #[test]
    fn fetch_offline_uses_cached_entry_and_extracts() {
        let dir = TempDir::new().unwrap();

        // Pre-populate the cache the way a prior online fetch would have.
        let url = "https://example.org/model.zip";
        let cache_path = dir.path().join(url_hash(url));
        write_sample_zip(&cache_path);

        let assert = qescope()
            .args(["fetch", url, "--offline", "--extract", "--cache-root"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("-extracted"));

        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let extracted = std::path::PathBuf::from(stdout.trim());
        assert!(extracted.join("weights.bin").exists());

        // Second call resolves to the same directory.
        qescope()
            .args(["fetch", url, "--offline", "--extract", "--cache-root"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(extracted.to_str().unwrap()));
    }

    #[test]
    fn cache_reports_empty_root() {
        let dir = TempDir::new().unwrap();
        qescope()
            .args(["cache", "--cache-root"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached artifacts"));
    }

    /// Cache filename for a URL with no freshness token
    fn url_hash(url: &str) -> String {
        qescope::cache::cache_filename(url, "")
    }

    fn write_sample_zip(path: &std::path::Path) {
        use std::io::Write;
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("weights.bin", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"w").unwrap();
        writer.finish().unwrap();
    }
}
