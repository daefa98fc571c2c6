//! Static file serving module
//!
//! Maps request paths to files under the asset root, caches file contents, and
//! falls back to the root document for paths the single-page app routes itself.

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::http::cache::{check_etag_match, generate_etag};
use crate::http::{self, mime, CachePolicy, ResponseEnvelope};
use crate::logger;
use hyper::body::Bytes;
use hyper::header::ETAG;
use hyper::StatusCode;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;

/// Resolves asset paths against a root directory through the static cache
pub struct StaticResolver {
    root: PathBuf,
    index_file: String,
    cache: TtlCache<String, Bytes>,
}

impl StaticResolver {
    pub fn new(root: &Path, index_file: &str, ttl: Duration) -> Self {
        Self::with_clock(root, index_file, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(root: &Path, index_file: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.to_path_buf(),
            index_file: index_file.to_string(),
            cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of cached files, stale ones included
    pub fn cached_files(&self) -> usize {
        self.cache.len()
    }

    /// Turn a request path into a cache key relative to the root.
    ///
    /// The key is rebuilt from the path's normal segments, so `./` and empty segments
    /// never produce a second key for the same file. `/` and any path ending in `/`
    /// get the index file appended. Returns `None` for paths that are not valid
    /// percent-encoding or that step outside the root.
    pub fn normalize(&self, path: &str) -> Option<String> {
        let decoded = urlencoding::decode(path).ok()?;
        if decoded.contains('\0') {
            return None;
        }

        let mut segments = Vec::new();
        for component in Path::new(decoded.as_ref()).components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => return None,
            }
        }
        if segments.is_empty() || decoded.ends_with('/') {
            segments.push(self.index_file.as_str());
        }
        Some(segments.join("/"))
    }

    /// Serve `path`, falling back to the root document and finally to a 404 page
    pub async fn serve(&self, path: &str, if_none_match: Option<&str>) -> ResponseEnvelope {
        let Some(key) = self.normalize(path) else {
            logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
            return http::build_404_response();
        };

        match self.load(&key).await {
            Ok(content) => {
                let content_type = mime::content_type_for_path(&key);
                return build_file_response(&content, content_type, if_none_match);
            }
            // resolved outside the root, e.g. through a symlink
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return http::build_404_response();
            }
            Err(_) => {}
        }

        logger::log_not_found(path);
        match self.load(&self.index_file).await {
            Ok(index) => {
                logger::log_spa_fallback(path);
                ResponseEnvelope::from_bytes(
                    StatusCode::OK,
                    mime::content_type_for_path(&self.index_file),
                    &index,
                )
                .with_cache_policy(CachePolicy::NoStore)
            }
            Err(_) => http::build_404_response(),
        }
    }

    /// Cached file contents for `key`; read failures are not cached
    async fn load(&self, key: &str) -> io::Result<Bytes> {
        self.cache
            .get_or_try_insert_with(key.to_string(), || read_under_root(&self.root, key))
            .await
    }
}

/// Read `relative` from `root`, refusing anything whose real path leaves the root
async fn read_under_root(root: &Path, relative: &str) -> io::Result<Bytes> {
    let root_canonical = fs::canonicalize(root).await.map_err(|e| {
        logger::log_warning(&format!(
            "Static directory not found or inaccessible '{}': {e}",
            root.display()
        ));
        e
    })?;

    let file_canonical = fs::canonicalize(root.join(relative)).await?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            file_canonical.display()
        ));
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "outside asset root"));
    }

    fs::read(&file_canonical).await.map(Bytes::from)
}

/// Build a file response with content-class caching, ETag and conditional 304
fn build_file_response(
    content: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
) -> ResponseEnvelope {
    let etag = generate_etag(content);
    let policy = CachePolicy::for_content_type(content_type);

    if check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag, policy);
    }

    ResponseEnvelope::from_bytes(StatusCode::OK, content_type, content)
        .with_cache_policy(policy)
        .with_header(ETAG, &etag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::fs as std_fs;
    use tempfile::TempDir;

    const INDEX: &str = "<!DOCTYPE html><title>certs</title>";

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        std_fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std_fs::create_dir(dir.path().join("css")).unwrap();
        std_fs::write(dir.path().join("css/app.css"), "body{margin:0}").unwrap();
        std_fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        std_fs::write(dir.path().join("manifest.json"), "{}").unwrap();
        dir
    }

    fn resolver(dir: &TempDir) -> StaticResolver {
        StaticResolver::new(dir.path(), "index.html", Duration::from_secs(300))
    }

    #[test]
    fn test_normalize() {
        let dir = site();
        let r = resolver(&dir);
        assert_eq!(r.normalize("/").as_deref(), Some("index.html"));
        assert_eq!(r.normalize("/docs/").as_deref(), Some("docs/index.html"));
        assert_eq!(r.normalize("/css/app.css").as_deref(), Some("css/app.css"));
        assert_eq!(r.normalize("/a%20b.txt").as_deref(), Some("a b.txt"));
        assert_eq!(r.normalize("/../etc/passwd"), None);
        assert_eq!(r.normalize("/css/%2e%2e/%2e%2e/secret"), None);
    }

    #[test]
    fn test_normalize_collapses_aliases() {
        let dir = site();
        let r = resolver(&dir);
        for alias in ["/logo.png", "/./logo.png", "//logo.png", "/././logo.png", "/%2e/logo.png"] {
            assert_eq!(r.normalize(alias).as_deref(), Some("logo.png"), "{alias}");
        }
        assert_eq!(r.normalize("/css//./app.css").as_deref(), Some("css/app.css"));
        assert_eq!(r.normalize("/./").as_deref(), Some("index.html"));
        assert_eq!(r.normalize("//docs//").as_deref(), Some("docs/index.html"));
    }

    #[tokio::test]
    async fn test_aliases_share_one_cache_entry() {
        let dir = site();
        let r = resolver(&dir);
        let mut alias = "/logo.png".to_string();
        for _ in 0..20 {
            let envelope = r.serve(&alias, None).await;
            assert_eq!(envelope.status, StatusCode::OK);
            assert!(envelope.is_binary);
            alias.insert_str(0, "/.");
        }
        assert_eq!(r.cached_files(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_is_404() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        std_fs::create_dir(&public).unwrap();
        std_fs::write(public.join("index.html"), INDEX).unwrap();
        std_fs::write(dir.path().join("secret.txt"), "nope").unwrap();
        std::os::unix::fs::symlink(dir.path().join("secret.txt"), public.join("leak.txt")).unwrap();

        let r = StaticResolver::new(&public, "index.html", Duration::from_secs(300));
        let envelope = r.serve("/leak.txt", None).await;
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert!(!envelope.body.contains("nope"));
        assert_ne!(envelope.body, INDEX);
        assert_eq!(r.cached_files(), 0);
    }

    #[tokio::test]
    async fn test_serves_root_document_with_revalidate() {
        let dir = site();
        let envelope = resolver(&dir).serve("/", None).await;
        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(envelope.body, INDEX);
        assert_eq!(envelope.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(
            envelope.header("cache-control"),
            Some("public, max-age=0, must-revalidate")
        );
        assert!(envelope.header("etag").is_some());
    }

    #[tokio::test]
    async fn test_cache_policy_by_content_class() {
        let dir = site();
        let r = resolver(&dir);

        let css = r.serve("/css/app.css", None).await;
        assert!(!css.is_binary);
        assert_eq!(
            css.header("cache-control"),
            Some("public, max-age=31536000, immutable")
        );

        let json = r.serve("/manifest.json", None).await;
        assert_eq!(json.header("cache-control"), Some("public, max-age=3600"));
    }

    #[tokio::test]
    async fn test_binary_is_base64() {
        let dir = site();
        let envelope = resolver(&dir).serve("/logo.png", None).await;
        assert!(envelope.is_binary);
        assert_eq!(envelope.header("content-type"), Some("image/png"));
        assert_eq!(envelope.decoded_body().unwrap().as_ref(), &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_spa_fallback() {
        let dir = site();
        let envelope = resolver(&dir).serve("/countries/japan", None).await;
        assert_eq!(envelope.status, StatusCode::OK);
        assert_eq!(envelope.body, INDEX);
        assert_eq!(
            envelope.header("cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert!(envelope.header("etag").is_none());
    }

    #[tokio::test]
    async fn test_404_without_root_document() {
        let dir = TempDir::new().unwrap();
        let envelope = resolver(&dir).serve("/missing.js", None).await;
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert!(envelope.body.contains("404"));
    }

    #[tokio::test]
    async fn test_traversal_is_not_found() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        std_fs::create_dir(&public).unwrap();
        std_fs::write(dir.path().join("secret.txt"), "nope").unwrap();

        let r = StaticResolver::new(&public, "index.html", Duration::from_secs(300));
        let envelope = r.serve("/%2e%2e/secret.txt", None).await;
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert!(!envelope.body.contains("nope"));
    }

    #[tokio::test]
    async fn test_if_none_match_yields_304() {
        let dir = site();
        let r = resolver(&dir);
        let first = r.serve("/css/app.css", None).await;
        let etag = first.header("etag").unwrap().to_string();

        let second = r.serve("/css/app.css", Some(&etag)).await;
        assert_eq!(second.status, StatusCode::NOT_MODIFIED);
        assert!(second.body.is_empty());
    }

    #[tokio::test]
    async fn test_cached_until_ttl_expires() {
        let dir = site();
        let clock = Arc::new(ManualClock::new());
        let r = StaticResolver::with_clock(
            dir.path(),
            "index.html",
            Duration::from_secs(300),
            clock.clone(),
        );

        assert_eq!(r.serve("/css/app.css", None).await.body, "body{margin:0}");
        std_fs::write(dir.path().join("css/app.css"), "body{margin:1px}").unwrap();

        clock.advance(Duration::from_secs(299));
        assert_eq!(r.serve("/css/app.css", None).await.body, "body{margin:0}");

        clock.advance(Duration::from_secs(1));
        assert_eq!(r.serve("/css/app.css", None).await.body, "body{margin:1px}");
        assert_eq!(r.cached_files(), 1);
    }

    #[tokio::test]
    async fn test_missing_files_are_not_cached() {
        let dir = site();
        let r = resolver(&dir);
        r.serve("/later.txt", None).await;
        std_fs::write(dir.path().join("later.txt"), "here now").unwrap();
        assert_eq!(r.serve("/later.txt", None).await.body, "here now");
    }
}
