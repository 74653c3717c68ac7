//! Icon Tools
//!
//! Site icons are stored once per hostname under a fixed directory. The local
//! path is a pure function of the site URL, so it doubles as the cache key: an
//! existing file is never downloaded again.

mod utils;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, WsawError};
use crate::tools::fetch::HttpFetcher;
use crate::types::Category;
use utils::*;

pub struct IconStore<F: ?Sized> {
    dir: PathBuf,
    fetcher: Arc<F>,
}

impl<F: ?Sized> Clone for IconStore<F> {
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F> IconStore<F>
where
    F: HttpFetcher + ?Sized,
{
    pub fn new(dir: impl Into<PathBuf>, fetcher: Arc<F>) -> Self {
        Self {
            dir: dir.into(),
            fetcher,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path for the icon of `site_url`, or `None` when the URL has no
    /// usable hostname. Sites sharing a hostname share a path.
    pub fn icon_path(&self, site_url: &str) -> Option<PathBuf> {
        icon_file_name(site_url).map(|name| self.dir.join(name))
    }

    /// Make sure the icon of `site_url` exists locally and return its path.
    ///
    /// Returns an empty string on any failure; the caller keeps going.
    pub async fn ensure_local_icon(&self, icon_url: &str, site_url: &str) -> String {
        let Some(path) = self.icon_path(site_url) else {
            log::debug!("no icon path for site url {site_url:?}");
            return String::new();
        };

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return path.to_string_lossy().into_owned();
        }

        if icon_url.trim().is_empty() {
            return String::new();
        }

        match self.download(icon_url, &path).await {
            Ok(()) => path.to_string_lossy().into_owned(),
            Err(e) => {
                log::debug!("icon {icon_url} for {site_url} not stored: {e}");
                String::new()
            }
        }
    }

    async fn download(&self, icon_url: &str, path: &Path) -> Result<()> {
        let bytes = self.fetcher.get(icon_url).await?;
        if bytes.is_empty() {
            return Err(WsawError::Http(format!("empty icon body from {icon_url}")));
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        // Write aside, then rename: concurrent writers for one host never
        // expose a partial file.
        let tmp = temp_path_for(path);
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Delete stored icons whose hostname no longer appears in `categories`.
    ///
    /// Returns the number of files removed.
    pub fn prune(&self, categories: &[Category]) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let keep: HashSet<String> = categories
            .iter()
            .flat_map(|c| c.sites.iter())
            .filter_map(|s| icon_file_name(&s.url))
            .collect();

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_icon_file_name(&name) || keep.contains(&name) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("could not remove stale icon {name}: {e}"),
            }
        }
        Ok(removed)
    }
}
