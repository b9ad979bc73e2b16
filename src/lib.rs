//! portfolio_plus enriches a third-party single-page finance-portfolio UI:
//! it scrapes the rendered combined total and sub-portfolio values, derives
//! each sub-portfolio's actual allocation share, persists user-entered
//! target allocations locally and renders `actual% / target%` back into the
//! page. A router keeps exactly one page controller active as the host app
//! navigates client-side.
//!
//! The embedding supplies the DOM adapters ([`dom::HomeDom`],
//! [`dom::DetailDom`], [`dom::HostPage`]); everything behind those seams
//! lives here. Wiring is explicit constructor injection throughout, see
//! [`attach`].

pub mod dom;
pub mod error;
pub mod money;
pub mod observer;
pub mod pages;
pub mod portfolio;
pub mod router;
pub mod settings;
pub mod store;

pub use error::{ScrapeError, StoreError, ValidationError};
pub use pages::{Home, Page, PortfolioDetail};
pub use portfolio::{CombinedPortfolio, PortfolioRecord, PortfolioRepository};
pub use router::{Route, RoutePattern, Router};
pub use settings::Settings;
pub use store::KvStore;

use std::cell::RefCell;
use std::rc::Rc;

/// Build the whole enrichment stack against a host page.
///
/// Opens the local store, wires the repository into the page controllers
/// and the controllers into the router's resolution table. The returned
/// router is not yet started; call [`Router::start`] once the host document
/// is ready.
pub fn attach(
    host: Rc<dyn dom::HostPage>,
    home_dom: Rc<dyn dom::HomeDom>,
    detail_dom: Rc<dyn dom::DetailDom>,
    settings: &Settings,
) -> Result<Router, StoreError> {
    let store = Rc::new(KvStore::open(&settings.store_path)?);
    let repo = Rc::new(PortfolioRepository::new(store));

    let home: Rc<RefCell<dyn Page>> = Rc::new(RefCell::new(Home::new(home_dom, repo)));
    let detail: Rc<RefCell<dyn Page>> = Rc::new(RefCell::new(PortfolioDetail::new(detail_dom)));

    let routes = vec![
        Route::exact(settings.home_path.clone(), home),
        Route::contains(settings.detail_path_fragment.clone(), detail),
    ];

    Ok(Router::new(host, routes))
}
