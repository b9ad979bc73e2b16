pub mod detail;
pub mod home;

pub use detail::PortfolioDetail;
pub use home::Home;

/// Capability set of one routed page.
///
/// Lifecycle per instance: Inactive -> `init` -> Active (observing) ->
/// `destroy` -> Inactive. `run` re-executes the scrape/compute/render cycle
/// and is safe to call any number of times, including from the observer
/// callback. `destroy` is idempotent. Errors inside a cycle are logged and
/// absorbed; a page never takes the host page down with it.
pub trait Page {
    fn init(&mut self);
    fn run(&mut self);
    fn destroy(&mut self);
}
