//! Tests

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use chrono::Utc;

    use crate::config::{CacheMode, Config};
    use crate::fixtures::{card, page, section, DIRECTORY_HTML, FIGMA_ICON_URL, GITHUB_ICON_URL, PAGE_URL};
    use crate::services::{ActivityLogger, CacheStore, MemoryCache};
    use crate::tools::feedback::MemorySink;
    use crate::tools::fetch::MemoryFetcher;
    use crate::types::CategorySet;
    use crate::workflow::{Outcome, Workflow, CATEGORIES_KEY, CONTENT_HASH_KEY};
    use crate::WsawError;

    type TestWorkflow = Workflow<MemoryCache, MemoryFetcher, MemorySink>;

    const NO_ARGS: &[&str] = &[];

    fn fetcher() -> Arc<MemoryFetcher> {
        Arc::new(
            MemoryFetcher::new()
                .with(PAGE_URL, DIRECTORY_HTML)
                .with(GITHUB_ICON_URL, b"github-png".to_vec())
                .with(FIGMA_ICON_URL, b"figma-png".to_vec()),
        )
    }

    fn workflow(root: &Path, fetcher: &Arc<MemoryFetcher>, mode: CacheMode) -> TestWorkflow {
        let mut config = Config::with_root(PAGE_URL, root).unwrap();
        config.cache_mode = mode;
        Workflow::new(config, MemoryCache::new(), Arc::clone(fetcher), MemorySink::default())
    }

    fn titles(workflow: &TestWorkflow) -> Vec<String> {
        workflow
            .sink()
            .last()
            .map(|f| f.items.iter().map(|i| i.title.clone()).collect())
            .unwrap_or_default()
    }

    fn expire(workflow: &TestWorkflow) {
        let long_ago = Utc::now() - chrono::Duration::hours(13);
        workflow.cache().inner().set_modified(CATEGORIES_KEY, long_ago);
    }

    #[tokio::test]
    async fn test_no_terms_lists_every_site() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        let outcome = wf.run(NO_ARGS).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 2 });
        assert_eq!(titles(&wf), ["GitHub", "Figma"]);

        let feedback = wf.sink().last().unwrap();
        let github = &feedback.items[0];
        assert_eq!(github.arg, "https://github.com");
        assert_eq!(github.subtitle, "");
        assert!(github.valid);
        let icon = github.icon.as_ref().expect("github icon stored");
        assert!(Path::new(&icon.path).starts_with(dir.path().join("data").join("icons")));
        assert_eq!(std::fs::read(&icon.path).unwrap(), b"github-png");

        assert_eq!(feedback.items[1].subtitle, "Collaborative interface design");
    }

    #[tokio::test]
    async fn test_single_term_prefers_category() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        wf.run(&["Dev Tools"]).await.unwrap();
        assert_eq!(titles(&wf), ["GitHub"]);

        wf.run(&["git"]).await.unwrap();
        assert_eq!(titles(&wf), ["GitHub"]);

        // Matches the url, not the name.
        wf.run(&["figma.com"]).await.unwrap();
        assert_eq!(titles(&wf), ["Figma"]);
    }

    #[tokio::test]
    async fn test_scoped_search() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        let outcome = wf.run(&["Dev Tools", "hub"]).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 1 });
        assert_eq!(titles(&wf), ["GitHub"]);

        let outcome = wf.run(&["Design", "x"]).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 0 });
        assert!(wf.sink().last().unwrap().is_empty());

        let outcome = wf.run(&["Nope", "git"]).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 0 });
    }

    #[tokio::test]
    async fn test_too_many_terms_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        let outcome = wf.run(&["a", "b", "c"]).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert!(wf.sink().sent.is_empty());
        assert_eq!(fetcher.requests(), 0);
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        wf.run(NO_ARGS).await.unwrap();
        // Page plus two icons.
        assert_eq!(fetcher.requests(), 3);

        wf.run(&["git"]).await.unwrap();
        assert_eq!(fetcher.requests(), 3);
        assert_eq!(titles(&wf), ["GitHub"]);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches_page_only() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        wf.run(NO_ARGS).await.unwrap();
        expire(&wf);
        wf.run(NO_ARGS).await.unwrap();

        // Icons already on disk are not downloaded again.
        assert_eq!(fetcher.requests(), 4);
    }

    #[tokio::test]
    async fn test_unreachable_page_keeps_stored_categories() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        wf.run(NO_ARGS).await.unwrap();
        fetcher.remove(PAGE_URL);
        expire(&wf);

        let outcome = wf.run(NO_ARGS).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 2 });

        let stored: CategorySet = wf.cache().load_json(CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_page_with_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(MemoryFetcher::new());
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl)
            .with_activity_log(ActivityLogger::new(dir.path().join("data")).unwrap());

        let outcome = wf.run(NO_ARGS).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 0 });
        assert!(wf.cache().load(CATEGORIES_KEY).unwrap().is_none());

        let logger = ActivityLogger::new(dir.path().join("data")).unwrap();
        let entries = logger.read_logs(None, false).unwrap();
        assert!(entries.iter().any(|e| e.event == "unreachable"));
    }

    #[tokio::test]
    async fn test_cache_hits_leave_activity_log_alone() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let data = dir.path().join("data");
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl)
            .with_activity_log(ActivityLogger::new(&data).unwrap());

        // One keystroke per run, as the launcher sends them.
        for prefix in ["g", "gi", "git", "gith", "githu", "github"] {
            wf.run(&[prefix]).await.unwrap();
        }

        let entries = ActivityLogger::new(&data).unwrap().read_logs(Some("nav.test"), false).unwrap();
        let events: Vec<_> = entries.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, ["refresh"]);
    }

    #[tokio::test]
    async fn test_stray_latin1_byte_keeps_page_usable() {
        let dir = tempfile::tempdir().unwrap();
        let (head, tail) = DIRECTORY_HTML.split_once("interface").unwrap();
        let mut body = head.as_bytes().to_vec();
        body.push(0xE9);
        body.extend_from_slice(tail.as_bytes());
        let fetcher = fetcher();
        fetcher.insert(PAGE_URL, body);
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);

        assert_eq!(wf.run(&["git"]).await.unwrap(), Outcome::Emitted { items: 1 });
        assert_eq!(wf.run(&["git"]).await.unwrap(), Outcome::Emitted { items: 1 });
        assert_eq!(titles(&wf), ["GitHub"]);
        // Stored on the first run: page plus two icons, nothing after.
        assert_eq!(fetcher.requests(), 3);

        wf.run(&["Design"]).await.unwrap();
        let figma = &wf.sink().last().unwrap().items[0];
        assert_eq!(figma.subtitle, "Collaborative \u{fffd} design");
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl);
        wf.cache().store(CATEGORIES_KEY, b"{not json").unwrap();

        let err = wf.run(NO_ARGS).await.unwrap_err();
        assert!(matches!(err, WsawError::Cache { op: "decode", .. }));
        assert!(wf.sink().sent.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Ttl).force_refresh(true);
        wf.cache().store(CATEGORIES_KEY, b"{not json").unwrap();

        wf.run(NO_ARGS).await.unwrap();
        wf.run(NO_ARGS).await.unwrap();
        assert_eq!(titles(&wf), ["GitHub", "Figma"]);
        // Two page fetches, icons once.
        assert_eq!(fetcher.requests(), 4);
    }

    #[tokio::test]
    async fn test_hash_mode_reextracts_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Hash);

        wf.run(NO_ARGS).await.unwrap();
        assert!(wf.cache().load(CONTENT_HASH_KEY).unwrap().is_some());

        // Same page: the stored set is served as is, even if it was edited.
        wf.cache().store_json(CATEGORIES_KEY, &CategorySet::new()).unwrap();
        let outcome = wf.run(NO_ARGS).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 0 });

        let changed = page(&[section(
            "Search",
            &[
                card("Kagi", "https://kagi.com", "", ""),
                card("DuckDuckGo", "https://duckduckgo.com", "", ""),
                card("Marginalia", "https://search.marginalia.nu", "", ""),
            ],
        )]);
        fetcher.insert(PAGE_URL, changed);

        let outcome = wf.run(&["Search"]).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 3 });
        assert_eq!(titles(&wf), ["Kagi", "DuckDuckGo", "Marginalia"]);
    }

    #[tokio::test]
    async fn test_hash_mode_missing_categories_reextracts() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut wf = workflow(dir.path(), &fetcher, CacheMode::Hash);

        wf.run(NO_ARGS).await.unwrap();
        wf.cache().inner().remove(CATEGORIES_KEY).unwrap();

        let outcome = wf.run(NO_ARGS).await.unwrap();
        assert_eq!(outcome, Outcome::Emitted { items: 2 });
    }

    #[tokio::test]
    async fn test_sequential_matches_concurrent() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut concurrent = workflow(&dir.path().join("a"), &fetcher, CacheMode::Ttl);
        concurrent.run(NO_ARGS).await.unwrap();

        let mut config = Config::with_root(PAGE_URL, dir.path().join("b")).unwrap();
        config.sequential = true;
        let mut sequential =
            Workflow::new(config, MemoryCache::new(), Arc::clone(&fetcher), MemorySink::default());
        sequential.run(NO_ARGS).await.unwrap();

        assert_eq!(titles(&concurrent), titles(&sequential));
    }

    #[tokio::test]
    async fn test_prune_drops_icons_of_removed_sites() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher();
        let mut config = Config::with_root(PAGE_URL, dir.path()).unwrap();
        config.prune_icons = true;
        let icon_dir = config.icon_dir();
        let mut wf = Workflow::new(config, MemoryCache::new(), Arc::clone(&fetcher), MemorySink::default())
            .force_refresh(true);

        wf.run(NO_ARGS).await.unwrap();
        assert_eq!(std::fs::read_dir(&icon_dir).unwrap().count(), 2);

        let only_figma = page(&[section(
            "Design",
            &[card("Figma", "https://figma.com", "", FIGMA_ICON_URL)],
        )]);
        fetcher.insert(PAGE_URL, only_figma);
        wf.run(NO_ARGS).await.unwrap();

        let left: Vec<_> = std::fs::read_dir(&icon_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(left, ["site-figma-com-icon.png"]);
    }
}
