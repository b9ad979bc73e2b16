use crate::dom::HostPage;
use crate::observer::{MutationFilter, MutationSource, ObserverHandle};
use crate::pages::Page;
use std::cell::RefCell;
use std::rc::Rc;

/// How a route entry matches the host's client-side path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    Contains(String),
}

impl RoutePattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(p) => path == p,
            RoutePattern::Contains(fragment) => path.contains(fragment.as_str()),
        }
    }
}

/// One entry of the resolution table: a pattern and the page it activates.
pub struct Route {
    pattern: RoutePattern,
    page: Rc<RefCell<dyn Page>>,
}

impl Route {
    pub fn exact(path: impl Into<String>, page: Rc<RefCell<dyn Page>>) -> Route {
        Route {
            pattern: RoutePattern::Exact(path.into()),
            page,
        }
    }

    pub fn contains(fragment: impl Into<String>, page: Rc<RefCell<dyn Page>>) -> Route {
        Route {
            pattern: RoutePattern::Contains(fragment.into()),
            page,
        }
    }
}

/// Keeps exactly one page active, in sync with the host SPA's path.
///
/// There is no native navigation event to hook, so the router watches
/// child-list mutations on the document body and compares the path on each
/// batch. On a change it destroys the active page, resolves the first
/// matching table entry and initializes it; with no match, no page is
/// active. Resolution also runs once eagerly at [`Router::start`] so a
/// direct page load is covered, not just navigation.
pub struct Router {
    host: Rc<dyn HostPage>,
    inner: Rc<RefCell<RouterInner>>,
}

struct RouterInner {
    routes: Vec<Route>,
    active: Option<Rc<RefCell<dyn Page>>>,
    last_path: String,
    observer: Option<ObserverHandle>,
}

impl Router {
    pub fn new(host: Rc<dyn HostPage>, routes: Vec<Route>) -> Router {
        Router {
            host,
            inner: Rc::new(RefCell::new(RouterInner {
                routes,
                active: None,
                last_path: String::new(),
                observer: None,
            })),
        }
    }

    /// Resolve the initial path and start watching for navigation.
    pub fn start(&self) {
        if self.inner.borrow().observer.is_some() {
            return; // already started
        }

        let path = self.host.path();
        self.inner.borrow_mut().activate(&path);

        let host = Rc::clone(&self.host);
        let inner = Rc::clone(&self.inner);
        let callback = Box::new(move || {
            let path = host.path();
            let mut inner = inner.borrow_mut();
            // Path compare-and-swap; single-threaded, so no batch can
            // interleave mid-swap.
            if inner.last_path != path {
                log::debug!("router: route change detected: {path}");
                inner.activate(&path);
            }
        });
        let handle = self
            .host
            .observe(MutationFilter::child_list_subtree(), callback);
        self.inner.borrow_mut().observer = Some(handle);
    }

    /// Tear down the active page and stop watching. Idempotent.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(observer) = inner.observer.take() {
            observer.cancel();
        }
        if let Some(page) = inner.active.take() {
            page.borrow_mut().destroy();
        }
    }
}

impl RouterInner {
    fn activate(&mut self, path: &str) {
        self.last_path = path.to_string();

        if let Some(page) = self.active.take() {
            page.borrow_mut().destroy();
        }

        match self.routes.iter().find(|r| r.pattern.matches(path)) {
            Some(route) => {
                let page = Rc::clone(&route.page);
                page.borrow_mut().init();
                self.active = Some(page);
            }
            None => {
                log::info!("router: no page registered for {path:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{MutationCallback, MutationSource};
    use std::cell::Cell;

    #[derive(Default)]
    struct SpyPage {
        inits: Cell<usize>,
        runs: Cell<usize>,
        destroys: Cell<usize>,
    }

    impl Page for Rc<SpyPage> {
        fn init(&mut self) {
            self.inits.set(self.inits.get() + 1);
        }
        fn run(&mut self) {
            self.runs.set(self.runs.get() + 1);
        }
        fn destroy(&mut self) {
            self.destroys.set(self.destroys.get() + 1);
        }
    }

    struct FakeHost {
        path: RefCell<String>,
        callbacks: RefCell<Vec<(Rc<Cell<bool>>, MutationCallback)>>,
    }

    impl FakeHost {
        fn new(path: &str) -> FakeHost {
            FakeHost {
                path: RefCell::new(path.to_string()),
                callbacks: RefCell::new(Vec::new()),
            }
        }

        fn navigate(&self, path: &str) {
            *self.path.borrow_mut() = path.to_string();
            self.emit_mutation();
        }

        fn emit_mutation(&self) {
            let mut callbacks = self.callbacks.borrow_mut();
            for (active, callback) in callbacks.iter_mut() {
                if active.get() {
                    callback();
                }
            }
        }
    }

    impl MutationSource for FakeHost {
        fn observe(&self, _filter: MutationFilter, callback: MutationCallback) -> ObserverHandle {
            let (handle, active) = ObserverHandle::new();
            self.callbacks.borrow_mut().push((active, callback));
            handle
        }
    }

    impl HostPage for FakeHost {
        fn path(&self) -> String {
            self.path.borrow().clone()
        }
    }

    fn spy_route(pattern: RoutePattern, spy: &Rc<SpyPage>) -> Route {
        Route {
            pattern,
            page: Rc::new(RefCell::new(Rc::clone(spy))),
        }
    }

    #[test]
    fn test_eager_resolution_at_start() {
        let host = Rc::new(FakeHost::new("/finance/"));
        let home = Rc::new(SpyPage::default());
        let router = Router::new(
            host.clone(),
            vec![spy_route(RoutePattern::Exact("/finance/".into()), &home)],
        );

        router.start();
        assert_eq!(home.inits.get(), 1);
        assert_eq!(home.destroys.get(), 0);
    }

    #[test]
    fn test_route_change_swaps_pages_once() {
        let host = Rc::new(FakeHost::new("/finance/"));
        let home = Rc::new(SpyPage::default());
        let detail = Rc::new(SpyPage::default());
        let router = Router::new(
            host.clone(),
            vec![
                spy_route(RoutePattern::Exact("/finance/".into()), &home),
                spy_route(RoutePattern::Contains("/finance/portfolio/".into()), &detail),
            ],
        );
        router.start();

        host.navigate("/finance/portfolio/123");
        assert_eq!(home.destroys.get(), 1);
        assert_eq!(detail.inits.get(), 1);

        // Mutation batches without a path change must not re-resolve.
        host.emit_mutation();
        host.emit_mutation();
        assert_eq!(home.destroys.get(), 1);
        assert_eq!(detail.inits.get(), 1);
    }

    #[test]
    fn test_unmatched_path_leaves_no_page_active() {
        let host = Rc::new(FakeHost::new("/finance/"));
        let home = Rc::new(SpyPage::default());
        let router = Router::new(
            host.clone(),
            vec![spy_route(RoutePattern::Exact("/finance/".into()), &home)],
        );
        router.start();

        host.navigate("/mail/");
        assert_eq!(home.destroys.get(), 1);

        // Navigating back re-initializes the home page.
        host.navigate("/finance/");
        assert_eq!(home.inits.get(), 2);
    }

    #[test]
    fn test_stop_destroys_active_page_and_disconnects() {
        let host = Rc::new(FakeHost::new("/finance/"));
        let home = Rc::new(SpyPage::default());
        let router = Router::new(
            host.clone(),
            vec![spy_route(RoutePattern::Exact("/finance/".into()), &home)],
        );
        router.start();
        router.stop();

        assert_eq!(home.destroys.get(), 1);
        host.navigate("/finance/portfolio/1");
        assert_eq!(home.destroys.get(), 1);

        router.stop(); // idempotent
        assert_eq!(home.destroys.get(), 1);
    }

    #[test]
    fn test_pattern_matching() {
        let exact = RoutePattern::Exact("/finance/".into());
        assert!(exact.matches("/finance/"));
        assert!(!exact.matches("/finance/portfolio/1"));

        let contains = RoutePattern::Contains("/finance/portfolio/".into());
        assert!(contains.matches("/finance/portfolio/1"));
        assert!(contains.matches("/u/0/finance/portfolio/1"));
        assert!(!contains.matches("/finance/"));
    }
}
