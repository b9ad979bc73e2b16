use crate::dom::DetailDom;
use crate::observer::{MutationFilter, MutationSource, ObserverHandle};
use crate::pages::Page;
use std::rc::Rc;

/// Controller for a single portfolio's detail page.
///
/// No computation here: it only makes sure the allocation column header
/// exists in the holdings table, and keeps it there while the host app
/// re-renders the table.
pub struct PortfolioDetail {
    dom: Rc<dyn DetailDom>,
    observer: Option<ObserverHandle>,
}

impl PortfolioDetail {
    pub fn new(dom: Rc<dyn DetailDom>) -> PortfolioDetail {
        PortfolioDetail {
            dom,
            observer: None,
        }
    }

    // The header is added once; repeated runs must not duplicate it.
    fn ensure_header(dom: &dyn DetailDom) {
        if !dom.has_allocation_header() {
            dom.insert_allocation_header();
        }
    }
}

impl Page for PortfolioDetail {
    fn init(&mut self) {
        log::debug!("detail: init");
        self.run();

        if self.observer.is_none() {
            let dom = Rc::clone(&self.dom);
            let callback = Box::new(move || {
                log::debug!("detail: mutation detected");
                PortfolioDetail::ensure_header(dom.as_ref());
            });
            self.observer = Some(
                self.dom
                    .observe(MutationFilter::child_list_subtree(), callback),
            );
        }
    }

    fn run(&mut self) {
        PortfolioDetail::ensure_header(self.dom.as_ref());
    }

    fn destroy(&mut self) {
        log::debug!("detail: destroy");
        if let Some(observer) = self.observer.take() {
            observer.cancel();
        }
    }
}
