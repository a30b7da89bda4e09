mod linkcheck_cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::str::contains;

    use std::fs;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "linkcheck";

    #[test]
    fn test_output__when_no_directory_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().stderr(contains(
            "error: the following required arguments were not provided:",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_directory_missing() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("/definitely/not/a/directory");

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[test]
    fn test_output__mixed_results_still_exit_success() -> TestResult {
        let mut server = Server::new();
        let _ok = server.mock("HEAD", "/ok").with_status(200).create();
        let _dead = server.mock("HEAD", "/dead").with_status(404).create();

        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            format!(
                r#"<a href="{0}/ok">ok</a> <a href="{0}/dead">dead</a> <a href="/relative">rel</a>"#,
                server.url()
            ),
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--no-progress");

        // Broken links are data, not a process failure.
        cmd.assert()
            .success()
            .stdout(contains("Found 2 absolute links, 1 relative/unparseable links."))
            .stdout(contains("=== Link Status ==="))
            .stdout(contains(format!("   [OK] {}/ok", server.url())))
            .stdout(contains(format!(" [FAIL] {}/dead", server.url())))
            .stdout(contains("=== Relative or Unparseable Links ==="))
            .stdout(contains("[??] /relative"));
        Ok(())
    }

    #[test]
    fn test_output__dry_run_skips_checking() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            r#"<a href="https://example.com/page">x</a>"#,
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--dry-run").arg("--no-progress");

        let assert = cmd.assert().success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

        assert!(stdout.contains("Dry-run mode: skipping link checking."));
        assert!(stdout.contains("Found 1 absolute links"));
        // Nothing was probed, so the summary has no status lines.
        assert!(!stdout.contains("[OK]"));
        assert!(!stdout.contains("[FAIL]"));
        Ok(())
    }

    #[test]
    fn test_output__json_format_is_parseable() -> TestResult {
        let mut server = Server::new();
        let _ok = server.mock("HEAD", "/ok").with_status(200).create();

        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            format!(r#"<a href="{}/ok">ok</a>"#, server.url()),
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--format").arg("json");

        let output = cmd.assert().success().get_output().stdout.clone();
        let parsed: serde_json::Value = serde_json::from_slice(&output)?;

        let page = parsed
            .as_object()
            .unwrap()
            .values()
            .next()
            .expect("one file in summary");
        assert_eq!(page["ok"].as_array().unwrap().len(), 1);
        assert_eq!(page["fail"].as_array().unwrap().len(), 0);
        Ok(())
    }

    #[test]
    fn test_output__csv_written_to_file() -> TestResult {
        let mut server = Server::new();
        let _dead = server.mock("HEAD", "/dead").with_status(500).create();

        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            format!(r#"<a href="{}/dead">dead</a>"#, server.url()),
        )?;
        let report = temp_dir.path().join("report.csv");

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path())
            .arg("--format")
            .arg("csv")
            .arg("-o")
            .arg(&report);

        cmd.assert().success();
        let content = fs::read_to_string(&report)?;
        assert!(content.starts_with("source_file,status,url"));
        assert!(content.contains(&format!("fail,{}/dead", server.url())));
        Ok(())
    }

    #[test]
    fn test_output__exclude_drops_links_before_checking() -> TestResult {
        let mut server = Server::new();
        let _ok = server.mock("HEAD", "/keep").with_status(200).create();
        let dropped = server.mock("HEAD", "/drop").with_status(200).expect(0).create();

        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            format!(
                r#"<a href="{0}/keep">keep</a> <a href="{0}/drop">drop</a>"#,
                server.url()
            ),
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path())
            .arg("--no-progress")
            .arg("--exclude")
            .arg("/drop$");

        let assert = cmd.assert().success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

        // Never probed, never reported
        dropped.assert();
        assert!(stdout.contains("Found 1 absolute links"));
        assert!(stdout.contains("/keep"));
        assert!(!stdout.contains("/drop"));
        Ok(())
    }

    #[test]
    fn test_output__invalid_exclude_regex_is_fatal() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("page.html"), "<html></html>")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--exclude").arg("[unclosed");

        cmd.assert().failure().stderr(contains("Error:"));
        Ok(())
    }

    #[test]
    fn test_output__max_caps_the_working_set() -> TestResult {
        let mut server = Server::new();
        // Lexicographically first URL is the one kept
        let _a = server.mock("HEAD", "/a").with_status(200).create();
        let b = server.mock("HEAD", "/b").with_status(200).expect(0).create();

        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("page.html"),
            format!(
                r#"<a href="{0}/b">b</a> <a href="{0}/a">a</a>"#,
                server.url()
            ),
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--no-progress").arg("--max").arg("1");

        cmd.assert()
            .success()
            .stdout(contains("Found 1 absolute links"))
            .stdout(contains(format!("   [OK] {}/a", server.url())));

        b.assert();
        Ok(())
    }

    #[test]
    fn test_output__shared_url_probed_once_attributed_to_last_file() -> TestResult {
        let mut server = Server::new();
        let shared = server
            .mock("HEAD", "/shared")
            .with_status(200)
            .expect(1)
            .create();

        let temp_dir = tempfile::tempdir()?;
        let link = format!(r#"<a href="{}/shared">s</a>"#, server.url());
        fs::write(temp_dir.path().join("a.html"), &link)?;
        fs::write(temp_dir.path().join("b.html"), &link)?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path()).arg("--no-progress");

        let assert = cmd.assert().success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

        // Exactly one probe despite two origins
        shared.assert();

        assert!(stdout.contains("Found 1 absolute links"));
        assert!(stdout.contains("b.html"));
        assert!(!stdout.contains("a.html\n"));
        Ok(())
    }

    #[test]
    fn test_output__base_url_resolves_relative_links() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir(temp_dir.path().join("docs"))?;
        fs::write(
            temp_dir.path().join("docs/index.html"),
            r#"<a href="about.html">about</a>"#,
        )?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(temp_dir.path())
            .arg("--dry-run")
            .arg("--no-progress")
            .arg("--base-url")
            .arg("https://site.test");

        // The relative link resolves and counts as absolute now.
        cmd.assert()
            .success()
            .stdout(contains("Found 1 absolute links, 0 relative/unparseable links."));
        Ok(())
    }
}
