//! Shared fragment loading for the static site
//!
//! Every page carries placeholder containers that are filled with the shared
//! head, header and footer partials at load time. Fetches run concurrently and
//! fail independently: a failed fetch is logged and its placeholder keeps its
//! previous (empty) content.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{debug, error};

use meddev_data::fragments::FragmentSource;

/// A placeholder container and the partial that fills it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentSlot {
    pub placeholder: &'static str,
    pub path: &'static str,
}

/// The partials every page loads
pub const SHARED_FRAGMENTS: [FragmentSlot; 3] = [
    FragmentSlot {
        placeholder: "head-placeholder",
        path: "head.html",
    },
    FragmentSlot {
        placeholder: "header-placeholder",
        path: "header.html",
    },
    FragmentSlot {
        placeholder: "footer-placeholder",
        path: "footer.html",
    },
];

/// Placeholder containers of a page, keyed by element id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    containers: BTreeMap<String, String>,
}

impl Page {
    /// A page with the given empty placeholders
    pub fn with_placeholders<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            containers: ids.into_iter().map(|id| (id.to_string(), String::new())).collect(),
        }
    }

    /// A page carrying every shared-fragment placeholder
    pub fn shell() -> Self {
        Self::with_placeholders(SHARED_FRAGMENTS.iter().map(|slot| slot.placeholder))
    }

    /// Inner HTML of a container, `None` if the page has no such element
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(String::as_str)
    }

    /// Replace a container's inner HTML; returns `false` if it does not exist
    pub fn set_inner_html(&mut self, id: &str, html: String) -> bool {
        match self.containers.get_mut(id) {
            Some(content) => {
                *content = html;
                true
            }
            None => false,
        }
    }
}

/// Fill the shared-fragment placeholders of `page`
pub async fn load_shared_fragments<S: FragmentSource + ?Sized>(page: &mut Page, source: &S) {
    load_fragments(page, source, &SHARED_FRAGMENTS).await;
}

/// Fetch every slot concurrently and inject the ones that succeed
pub async fn load_fragments<S: FragmentSource + ?Sized>(page: &mut Page, source: &S, slots: &[FragmentSlot]) {
    let fetches = slots.iter().map(|slot| async move { (slot, source.fetch(slot.path).await) });
    let results = join_all(fetches).await;

    for (slot, result) in results {
        match result {
            Ok(html) => {
                if page.set_inner_html(slot.placeholder, html) {
                    debug!("Loaded {} into #{}", slot.path, slot.placeholder);
                } else {
                    error!("Cannot inject {}: no element #{}", slot.path, slot.placeholder);
                }
            }
            Err(err) => error!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use meddev_data::fragments::FragmentError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Serves fixed bodies; paths it does not know answer 404
    struct StaticFragments(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl FragmentSource for StaticFragments {
        async fn fetch(&self, path: &str) -> Result<String, FragmentError> {
            self.0
                .get(path)
                .map(|body| body.to_string())
                .ok_or_else(|| FragmentError::Status {
                    url: format!("http://localhost/{}", path),
                    status: 404,
                })
        }
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn all_fragments() -> StaticFragments {
        StaticFragments(HashMap::from([
            ("head.html", "<meta charset=\"utf-8\">"),
            ("header.html", "<nav id=\"nav-menu\"></nav>"),
            ("footer.html", "<footer>&copy;</footer>"),
        ]))
    }

    #[tokio::test]
    async fn test_loads_every_shared_fragment() {
        let mut page = Page::shell();
        load_shared_fragments(&mut page, &all_fragments()).await;

        assert_eq!(page.inner_html("head-placeholder"), Some("<meta charset=\"utf-8\">"));
        assert_eq!(page.inner_html("header-placeholder"), Some("<nav id=\"nav-menu\"></nav>"));
        assert_eq!(page.inner_html("footer-placeholder"), Some("<footer>&copy;</footer>"));
    }

    #[tokio::test]
    async fn test_missing_fragment_leaves_container_empty_and_logs_once() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut source = all_fragments();
        source.0.remove("footer.html");

        let mut page = Page::shell();
        load_shared_fragments(&mut page, &source).await;

        assert_eq!(page.inner_html("footer-placeholder"), Some(""));
        assert!(!page.inner_html("header-placeholder").unwrap().is_empty());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_page_without_placeholder_is_not_created() {
        let mut page = Page::with_placeholders(["header-placeholder"]);
        load_shared_fragments(&mut page, &all_fragments()).await;

        assert_eq!(page.inner_html("head-placeholder"), None);
        assert_eq!(page.inner_html("header-placeholder"), Some("<nav id=\"nav-menu\"></nav>"));
    }
}
