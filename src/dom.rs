//! Adapter seams between the core and the host page's markup.
//!
//! Selectors, templates and the actual node plumbing live on the other side
//! of these traits; they are page-specific and brittle, so the core only
//! ever sees scraped text in and computed percentages out. The embedding
//! supplies one implementation per routed page.

use crate::observer::MutationSource;

/// One scraped sub-portfolio row: the name and the money text exactly as
/// rendered by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRow {
    pub name: String,
    pub raw_value: String,
}

impl ScrapedRow {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> ScrapedRow {
        ScrapedRow {
            name: name.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// Handler the adapter invokes with the row's portfolio name when the
/// user activates an edit affordance.
pub type EditHandler = Box<dyn Fn(&str)>;

/// DOM region of the portfolio overview (home) page.
pub trait HomeDom: MutationSource {
    /// Rendered combined total value, `None` when the region is missing.
    fn combined_total_text(&self) -> Option<String>;

    /// The visible sub-portfolio rows, in page order.
    fn portfolio_rows(&self) -> Vec<ScrapedRow>;

    /// Render `actual% / target%` plus the edit affordance into the named
    /// row, replacing any previously injected rendering for that row.
    ///
    /// Implementations must make sure the injected nodes do not match the
    /// mutation filter the controller observes with, and that activating
    /// the edit affordance suppresses the host page's own row-navigation
    /// (default action and propagation).
    fn render_allocation(&self, name: &str, actual_percent: f64, target_percent: f64);

    /// Register the handler to invoke when a row's edit affordance is
    /// activated. Rebinding replaces the previous handler; the controller
    /// binds once per `init`.
    fn bind_edit(&self, handler: EditHandler);

    /// Ask the user for a new target percentage. `None` means cancelled.
    fn prompt_target(&self, name: &str) -> Option<String>;

    /// Show a blocking notification to the user.
    fn notify(&self, message: &str);
}

/// DOM region of the portfolio-detail page table.
pub trait DetailDom: MutationSource {
    fn has_allocation_header(&self) -> bool;

    /// Insert the one-time allocation column header into the table header
    /// row. Only called when the presence check says it is missing.
    fn insert_allocation_header(&self);
}

/// The host document as the router sees it: the current client-side path
/// plus body mutations as the navigation proxy signal.
pub trait HostPage: MutationSource {
    fn path(&self) -> String;
}
