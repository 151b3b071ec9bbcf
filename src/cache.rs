//! # Download and Archive Cache
//!
//! Idempotent, URL-keyed caching of downloaded files and extracted
//! archives. Each entry lives under a deterministic path derived from the
//! scrubbed URL, next to a zero-byte `.completed` marker file.
//!
//! The marker is the single source of truth for "already fetched": a
//! payload without its marker is always treated as an incomplete previous
//! attempt, discarded, and re-fetched. Markers are written only after the
//! payload (or extraction) is fully on disk, so an interruption at any
//! point is observed as incomplete on the next run. This gives at-most-one
//! fetch per URL per cache lifetime without any locking - execution is
//! strictly sequential.
//!
//! The network side sits behind the [`Transport`] trait so tests can count
//! requests or serve canned bodies without touching the network. The
//! default implementation performs a single blocking GET; there is no retry
//! or backoff.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use url::Url;

use crate::error::{Error, Result};
use crate::fileops::{self, PathKind};

/// Suffix of the zero-byte file marking a fully populated cache entry.
const MARKER_SUFFIX: &str = ".completed";

/// Network transport used by [`CacheStore`] - allows mocking in tests.
pub trait Transport {
    /// Perform a single blocking GET and return the full response body.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// The default transport, backed by a blocking HTTP client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let body = response.bytes().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

/// Replace URL characters that are unsafe in file names.
///
/// The result keys cache entries, so it must be deterministic: equal URLs
/// always scrub to equal names.
pub fn scrub_url(url: &str) -> String {
    url.chars()
        .map(|c| match c {
            '/' | ':' | '?' => '_',
            c => c,
        })
        .collect()
}

/// URL-keyed store of downloaded files and extracted archives.
///
/// The store exclusively owns its on-disk namespace: raw downloads under
/// `<root>/file/`, extractions under `<root>/archive/`.
pub struct CacheStore {
    root: PathBuf,
    transport: Box<dyn Transport>,
}

impl CacheStore {
    /// Create a store rooted at `root` using the default HTTP transport.
    pub fn new(root: PathBuf) -> Self {
        Self::with_transport(root, Box::new(HttpTransport::new()))
    }

    /// Create a store with a custom transport.
    ///
    /// This is primarily used by tests to observe or fake network traffic.
    pub fn with_transport(root: PathBuf, transport: Box<dyn Transport>) -> Self {
        Self { root, transport }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Download `url` to the cache, at most once per cache lifetime.
    ///
    /// If the completion marker exists the cached path is returned without
    /// any network access. Otherwise any stale partial payload is deleted,
    /// the body is fetched with a single GET and written in full, and only
    /// then is the marker created.
    pub fn fetch_file(&self, url: &str) -> Result<PathBuf> {
        if url.is_empty() {
            return Err(Error::InvalidArgument {
                name: "url".to_string(),
            });
        }

        let file_root = self.root.join("file");
        let target = file_root.join(scrub_url(url));
        let marker = marker_path(&target);
        if !fileops::exists(PathKind::File, &marker) {
            info!("downloading file: {url}");

            // delete any previous partial attempt
            if fileops::exists(PathKind::File, &target) {
                fileops::remove(&target)?;
            }

            fileops::make_dir(&file_root)?;
            let body = self.transport.get(url)?;
            fs::write(&target, body)?;

            // the marker goes down only after the payload is fully on disk
            fs::write(&marker, "")?;
        }

        Ok(target)
    }

    /// Download and extract the archive at `url`, at most once per cache
    /// lifetime.
    ///
    /// When `strict` is true the URL path must end in `.zip`; index
    /// endpoints that serve archives without the suffix fetch with
    /// `strict` false.
    pub fn fetch_archive(&self, url: &str, strict: bool) -> Result<PathBuf> {
        if url.is_empty() {
            return Err(Error::InvalidArgument {
                name: "url".to_string(),
            });
        }
        if strict && !Url::parse(url)?.path().ends_with(".zip") {
            return Err(Error::UnsupportedArchive {
                url: url.to_string(),
            });
        }

        let target = self.root.join("archive").join(scrub_url(url));
        let marker = marker_path(&target);
        if !fileops::exists(PathKind::File, &marker) {
            let archive_path = self.fetch_file(url)?;
            info!("extracting archive: {url}");

            // delete any previously attempted extraction
            if fileops::exists(PathKind::Dir, &target) {
                fileops::remove(&target)?;
            }

            fileops::make_dir(&target)?;
            extract_zip(&archive_path, &target)?;
            fs::write(&marker, "")?;
        }

        Ok(target)
    }
}

/// The marker path for a cache entry: the entry path with `.completed`
/// appended to its file name.
fn marker_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(MARKER_SUFFIX);
    PathBuf::from(name)
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| Error::Extract {
        archive: archive.display().to_string(),
        message: e.to_string(),
    })?;
    zip.extract(dest).map_err(|e| Error::Extract {
        archive: archive.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Transport returning a fixed body and counting requests.
    struct CountingTransport {
        body: Vec<u8>,
        calls: Rc<RefCell<usize>>,
    }

    impl CountingTransport {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                calls: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl Transport for CountingTransport {
        fn get(&self, _url: &str) -> Result<Vec<u8>> {
            *self.calls.borrow_mut() += 1;
            Ok(self.body.clone())
        }
    }

    /// Transport that always fails, proving a call never went out.
    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            panic!("unexpected network access for {url}");
        }
    }

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_scrub_url() {
        assert_eq!(
            scrub_url("https://example.com/a/b.zip?x=1"),
            "https___example.com_a_b.zip_x=1"
        );
    }

    #[test]
    fn test_fetch_file_rejects_empty_url() {
        let temp = TempDir::new().unwrap();
        let cache = CacheStore::with_transport(
            temp.path().to_path_buf(),
            Box::new(CountingTransport::new(b"x")),
        );
        assert!(cache.fetch_file("").is_err());
    }

    #[test]
    fn test_fetch_file_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let transport = Box::new(CountingTransport::new(b"payload"));
        let calls = Rc::clone(&transport.calls);
        let cache = CacheStore::with_transport(temp.path().to_path_buf(), transport);

        let url = "https://example.com/tool.tgz";
        let first = cache.fetch_file(url).unwrap();
        let second = cache.fetch_file(url).unwrap();

        assert_eq!(first, second);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(fs::read(&first).unwrap(), b"payload");
    }

    #[test]
    fn test_marker_presence_skips_network_entirely() {
        let temp = TempDir::new().unwrap();
        let url = "https://example.com/tool.tgz";
        let target = temp.path().join("file").join(scrub_url(url));
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, b"cached").unwrap();
        fs::write(marker_path(&target), "").unwrap();

        let cache =
            CacheStore::with_transport(temp.path().to_path_buf(), Box::new(PanickingTransport));
        let path = cache.fetch_file(url).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"cached");
    }

    #[test]
    fn test_partial_payload_without_marker_is_refetched() {
        let temp = TempDir::new().unwrap();
        let url = "https://example.com/tool.tgz";
        // simulate a crash after the payload write but before the marker
        let target = temp.path().join("file").join(scrub_url(url));
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, b"partial").unwrap();

        let transport = Box::new(CountingTransport::new(b"complete"));
        let calls = Rc::clone(&transport.calls);
        let cache = CacheStore::with_transport(temp.path().to_path_buf(), transport);

        let path = cache.fetch_file(url).unwrap();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(fs::read(&path).unwrap(), b"complete");
        assert!(marker_path(&path).is_file());
    }

    #[test]
    fn test_fetch_archive_strict_rejects_non_zip() {
        let temp = TempDir::new().unwrap();
        let cache = CacheStore::with_transport(
            temp.path().to_path_buf(),
            Box::new(CountingTransport::new(b"")),
        );
        let result = cache.fetch_archive("https://example.com/pkg.tar.gz", true);
        assert!(matches!(result, Err(Error::UnsupportedArchive { .. })));
    }

    #[test]
    fn test_fetch_archive_extracts_contents() {
        let temp = TempDir::new().unwrap();
        let body = zip_bytes(&[("tool.ps1", "Write-Host hi"), ("lib/dep.psm1", "module")]);
        let cache = CacheStore::with_transport(
            temp.path().to_path_buf(),
            Box::new(CountingTransport::new(&body)),
        );

        let dir = cache
            .fetch_archive("https://example.com/pkg.zip", true)
            .unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("tool.ps1")).unwrap(),
            "Write-Host hi"
        );
        assert_eq!(
            fs::read_to_string(dir.join("lib/dep.psm1")).unwrap(),
            "module"
        );
    }

    #[test]
    fn test_fetch_archive_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let body = zip_bytes(&[("a.txt", "a")]);
        let transport = Box::new(CountingTransport::new(&body));
        let calls = Rc::clone(&transport.calls);
        let cache = CacheStore::with_transport(temp.path().to_path_buf(), transport);

        let url = "https://example.com/pkg.zip";
        let first = cache.fetch_archive(url, true).unwrap();
        let second = cache.fetch_archive(url, true).unwrap();
        assert_eq!(first, second);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_fetch_archive_non_strict_allows_index_urls() {
        let temp = TempDir::new().unwrap();
        let body = zip_bytes(&[("nested/file.dll", "bits")]);
        let cache = CacheStore::with_transport(
            temp.path().to_path_buf(),
            Box::new(CountingTransport::new(&body)),
        );

        let dir = cache
            .fetch_archive("https://feed.example.com/package/Sdk/0.7.1", false)
            .unwrap();
        assert!(dir.join("nested/file.dll").is_file());
    }

    #[test]
    fn test_stale_extraction_is_replaced_on_refetch() {
        let temp = TempDir::new().unwrap();
        let url = "https://example.com/pkg.zip";
        // a stale extraction directory with no marker, as left by a crash
        let target = temp.path().join("archive").join(scrub_url(url));
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("stale.txt"), "stale").unwrap();

        let body = zip_bytes(&[("fresh.txt", "fresh")]);
        let cache = CacheStore::with_transport(
            temp.path().to_path_buf(),
            Box::new(CountingTransport::new(&body)),
        );

        let dir = cache.fetch_archive(url, true).unwrap();
        assert!(!dir.join("stale.txt").exists());
        assert_eq!(fs::read_to_string(dir.join("fresh.txt")).unwrap(), "fresh");
    }
}
