use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use scraper::{Html, Selector};
use url::Url;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{BatchError, Result};
use crate::logging;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Links pulled out of a set of HTML documents.
#[derive(Debug, Default)]
pub struct ExtractedLinks {
    /// Absolute URL -> file it was extracted from. When several files link
    /// to the same URL the last file seen wins; URLs map to exactly one
    /// reporting file.
    pub origins: FxHashMap<String, PathBuf>,
    /// Scheme-less links with no base URL to resolve against, plus links
    /// with non-http schemes (mailto:, tel:, ...). Reported, never checked.
    pub relative: BTreeSet<String>,
}

impl ExtractedLinks {
    /// The unique absolute URLs in lexicographic order, so that slicing
    /// the working set (`--max`) is deterministic.
    pub fn absolute_urls_sorted(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.origins.keys().cloned().collect();
        urls.sort();
        urls
    }
}

/// Classification of a single href value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedHref {
    /// Checkable http/https URL, either taken verbatim from the markup or
    /// produced by joining against the virtual document URL.
    Absolute(String),
    /// Everything else: relative with no base, unparseable, or a scheme
    /// outside http/https.
    Relative,
}

/// Resolve one href found in a document.
///
/// `doc_url` is the synthetic URL the document would be served at if the
/// scanned tree were deployed under the base URL ("virtual hosting");
/// `None` when no base URL was supplied. Pure function: the result depends
/// only on the arguments.
pub fn resolve_href(href: &str, doc_url: Option<&Url>) -> ResolvedHref {
    match Url::parse(href) {
        // Absolute links are recorded exactly as written in the markup.
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            ResolvedHref::Absolute(href.to_string())
        }
        // A scheme we will not probe (mailto:, tel:, javascript:, ...).
        // Never joined against the base, even when one is supplied.
        Ok(_) => ResolvedHref::Relative,
        Err(url::ParseError::RelativeUrlWithoutBase) => match doc_url {
            Some(doc) => match doc.join(href) {
                Ok(resolved) => ResolvedHref::Absolute(resolved.to_string()),
                Err(_) => ResolvedHref::Relative,
            },
            None => ResolvedHref::Relative,
        },
        Err(_) => ResolvedHref::Relative,
    }
}

/// Compute the synthetic document URL for `file` under `base`, joining the
/// base URL with the file's path relative to the scan root.
pub fn document_url(base: &Url, root: &Path, file: &Path) -> Option<Url> {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let rel: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    base.join(&rel.join("/")).ok()
}

/// Parse the base URL once, normalizing the path to end in `/` so that
/// joining a tree-relative path appends instead of replacing the last
/// segment.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&normalized)
        .map_err(|e| BatchError::InvalidArgument(format!("invalid base URL '{base}': {e}")))
}

/// Extract and resolve the anchor hrefs of every file.
///
/// Unreadable files are logged and contribute nothing; malformed markup is
/// parsed best-effort and never aborts the batch.
pub fn extract_links(
    files: &[PathBuf],
    root: &Path,
    base_url: Option<&Url>,
) -> ExtractedLinks {
    let mut extracted = ExtractedLinks::default();

    for file in files {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(err) => {
                logging::log_file_error(file, &err);
                continue;
            }
        };

        let doc_url = base_url.and_then(|base| document_url(base, root, file));

        for href in anchor_hrefs(&content) {
            match resolve_href(&href, doc_url.as_ref()) {
                ResolvedHref::Absolute(url) => {
                    extracted.origins.insert(url, file.clone());
                }
                ResolvedHref::Relative => {
                    extracted.relative.insert(href);
                }
            }
        }
    }

    extracted
}

/// The distinct href values of a document's anchor elements, in
/// lexicographic order.
fn anchor_hrefs(content: &str) -> BTreeSet<String> {
    let document = Html::parse_document(content);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn base(url: &str) -> Url {
        parse_base_url(url).unwrap()
    }

    #[test]
    fn test_resolve_href__absolute_recorded_as_is() {
        // No normalization: the markup string is what gets probed.
        let resolved = resolve_href("https://example.com/2019/page", None);
        assert_eq!(
            resolved,
            ResolvedHref::Absolute("https://example.com/2019/page".to_string())
        );
    }

    #[test]
    fn test_resolve_href__relative_without_base() {
        assert_eq!(resolve_href("/relative", None), ResolvedHref::Relative);
        assert_eq!(resolve_href("about.html", None), ResolvedHref::Relative);
    }

    #[test]
    fn test_resolve_href__non_http_scheme_never_joined() {
        let doc = base("https://site.test").join("docs/index.html").unwrap();
        assert_eq!(
            resolve_href("mailto:someone@example.com", Some(&doc)),
            ResolvedHref::Relative
        );
        assert_eq!(resolve_href("tel:+12025550133", Some(&doc)), ResolvedHref::Relative);
        assert_eq!(
            resolve_href("javascript:void(0)", Some(&doc)),
            ResolvedHref::Relative
        );
    }

    #[test]
    fn test_resolve_href__join_semantics() {
        let doc = base("https://site.test").join("docs/guide/index.html").unwrap();

        let cases = vec![
            ("about.html", "https://site.test/docs/guide/about.html"),
            ("../up.html", "https://site.test/docs/up.html"),
            ("/rooted.html", "https://site.test/rooted.html"),
            ("?q=1", "https://site.test/docs/guide/index.html?q=1"),
            ("#frag", "https://site.test/docs/guide/index.html#frag"),
        ];

        for (href, expected) in cases {
            assert_eq!(
                resolve_href(href, Some(&doc)),
                ResolvedHref::Absolute(expected.to_string()),
                "failed for href: {href}"
            );
        }
    }

    #[test]
    fn test_document_url__joins_tree_relative_path() {
        let base = base("https://site.test");
        let root = Path::new("/tmp/site");
        let file = Path::new("/tmp/site/docs/index.html");

        let doc = document_url(&base, root, file).unwrap();
        assert_eq!(doc.as_str(), "https://site.test/docs/index.html");
    }

    #[test]
    fn test_parse_base_url__appends_trailing_slash() {
        let url = parse_base_url("https://site.test/sub").unwrap();
        assert_eq!(url.as_str(), "https://site.test/sub/");

        // Joining must append under the base, not replace its last segment
        let doc = document_url(&url, Path::new("/r"), Path::new("/r/index.html")).unwrap();
        assert_eq!(doc.as_str(), "https://site.test/sub/index.html");
    }

    #[test]
    fn test_parse_base_url__when_invalid() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_extract_links__no_base_url_end_to_end() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let page = root.join("page.html");
        fs::write(
            &page,
            r#"<html><body>
                <a href="https://example.com/2019/page">old</a>
                <a href="/relative">rel</a>
            </body></html>"#,
        )?;

        let extracted = extract_links(&[page.clone()], root, None);

        assert_eq!(
            extracted.absolute_urls_sorted(),
            vec!["https://example.com/2019/page".to_string()]
        );
        assert_eq!(extracted.origins.get("https://example.com/2019/page"), Some(&page));
        assert_eq!(
            extracted.relative.iter().cloned().collect::<Vec<_>>(),
            vec!["/relative".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_extract_links__with_base_url_end_to_end() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        fs::create_dir(root.join("docs"))?;
        let page = root.join("docs/index.html");
        fs::write(&page, r#"<a href="about.html">about</a>"#)?;

        let base = base("https://site.test");
        let extracted = extract_links(&[page.clone()], root, Some(&base));

        assert_eq!(
            extracted.absolute_urls_sorted(),
            vec!["https://site.test/docs/about.html".to_string()]
        );
        assert!(extracted.relative.is_empty());
        Ok(())
    }

    #[test]
    fn test_extract_links__origin_last_file_wins() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let first = root.join("a.html");
        let second = root.join("b.html");
        fs::write(&first, r#"<a href="https://shared.example/x">x</a>"#)?;
        fs::write(&second, r#"<a href="https://shared.example/x">x</a>"#)?;

        let extracted = extract_links(&[first, second.clone()], root, None);

        // One unique URL, attributed to the most recently seen file.
        assert_eq!(extracted.origins.len(), 1);
        assert_eq!(extracted.origins.get("https://shared.example/x"), Some(&second));
        Ok(())
    }

    #[test]
    fn test_extract_links__hrefs_deduped_within_document() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let page = root.join("page.html");
        fs::write(
            &page,
            r#"<a href="https://example.com/a">one</a>
               <a href="https://example.com/a">two</a>"#,
        )?;

        let extracted = extract_links(&[page], root, None);
        assert_eq!(extracted.origins.len(), 1);
        Ok(())
    }

    #[test]
    fn test_extract_links__malformed_markup_is_best_effort() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let page = root.join("broken.html");
        fs::write(
            &page,
            r#"<div><a href="https://example.com/ok">ok<div></a><td></html></span>"#,
        )?;

        let extracted = extract_links(&[page], root, None);
        assert_eq!(
            extracted.absolute_urls_sorted(),
            vec!["https://example.com/ok".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_extract_links__unreadable_file_is_skipped() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let good = root.join("good.html");
        fs::write(&good, r#"<a href="https://example.com/ok">ok</a>"#)?;
        let missing = root.join("missing.html");

        let extracted = extract_links(&[missing, good], root, None);
        assert_eq!(extracted.origins.len(), 1);
        Ok(())
    }

    #[test]
    fn test_extract_links__tag_and_attribute_case_insensitive() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let page = root.join("caps.html");
        fs::write(&page, r#"<A HREF="https://example.com/caps">caps</A>"#)?;

        let extracted = extract_links(&[page], root, None);
        assert_eq!(
            extracted.absolute_urls_sorted(),
            vec!["https://example.com/caps".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_absolute_urls_sorted__is_lexicographic() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        let page = root.join("page.html");
        fs::write(
            &page,
            r#"<a href="https://z.example/1">z</a>
               <a href="https://a.example/1">a</a>
               <a href="https://m.example/1">m</a>"#,
        )?;

        let extracted = extract_links(&[page], root, None);
        assert_eq!(
            extracted.absolute_urls_sorted(),
            vec![
                "https://a.example/1".to_string(),
                "https://m.example/1".to_string(),
                "https://z.example/1".to_string(),
            ]
        );
        Ok(())
    }
}
