use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

pub(super) const ICON_PREFIX: &str = "site-";
pub(super) const ICON_SUFFIX: &str = "-icon";
pub(super) const ICON_EXT: &str = "png";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hostname of a site URL, lowercase and punycoded.
///
/// Bare hosts such as `github.com/foo` are accepted as if they were http URLs.
pub(super) fn site_host(site_url: &str) -> Option<String> {
    let raw = site_url.trim();
    if raw.is_empty() {
        return None;
    }
    let url = match Url::parse(raw) {
        Ok(u) => u,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{raw}")).ok()?,
        Err(_) => return None,
    };
    let host = url.host_str()?.trim_end_matches('.');
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// `https://www.github.com/x` -> `site-www-github-com-icon.png`
pub(super) fn icon_file_name(site_url: &str) -> Option<String> {
    let host = site_host(site_url)?;
    Some(format!(
        "{ICON_PREFIX}{}{ICON_SUFFIX}.{ICON_EXT}",
        host.replace('.', "-")
    ))
}

/// Whether `name` looks like a file this store wrote.
pub(super) fn is_icon_file_name(name: &str) -> bool {
    name.starts_with(ICON_PREFIX) && name.ends_with(&format!("{ICON_SUFFIX}.{ICON_EXT}"))
}

/// Unique sibling path for writing before the final rename.
pub(super) fn temp_path_for(path: &Path) -> std::path::PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.{n}.part", std::process::id()))
}
