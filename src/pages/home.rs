use crate::dom::HomeDom;
use crate::error::{ScrapeError, ValidationError};
use crate::money;
use crate::observer::{MutationFilter, MutationSource, ObserverHandle};
use crate::pages::Page;
use crate::portfolio::{PortfolioRecord, PortfolioRepository};
use std::rc::Rc;

/// Controller for the portfolio overview page.
///
/// Scrapes the combined total and every visible sub-portfolio, recomputes
/// each one's actual allocation share, merges in the persisted targets and
/// renders `actual% / target%` back into the rows.
pub struct Home {
    dom: Rc<dyn HomeDom>,
    repo: Rc<PortfolioRepository>,
    observer: Option<ObserverHandle>,
}

impl Home {
    pub fn new(dom: Rc<dyn HomeDom>, repo: Rc<PortfolioRepository>) -> Home {
        Home {
            dom,
            repo,
            observer: None,
        }
    }

    /// Handle an activation of a row's edit affordance.
    ///
    /// Prompts for a new target percentage; invalid input is reported to
    /// the user and nothing is persisted. On success the record is upserted
    /// with the new target, created fresh if the row was never scraped.
    pub fn edit_target(&self, name: &str) {
        Home::handle_edit(self.dom.as_ref(), &self.repo, name);
    }

    // The edit flow, free of the controller itself so the handler bound to
    // the adapter can run it.
    fn handle_edit(dom: &dyn HomeDom, repo: &PortfolioRepository, name: &str) {
        let Some(input) = dom.prompt_target(name) else {
            return; // user cancelled
        };

        let target = match validate_target(&input) {
            Ok(target) => target,
            Err(e) => {
                dom.notify(&e.to_string());
                return;
            }
        };

        let mut record = repo
            .find(name)
            .unwrap_or_else(|| PortfolioRecord::new(name, 0.0, 0.0));
        record.allocation_target_percent = target;
        repo.upsert(record);
    }

    // One scrape/update/render cycle. Associated fn so the observer
    // callback can run it without holding the controller itself.
    fn cycle(dom: &dyn HomeDom, repo: &PortfolioRepository) -> Result<(), ScrapeError> {
        let total_text = dom.combined_total_text().ok_or(ScrapeError::MissingTotal)?;
        let total = money::parse(&total_text)
            .ok_or_else(|| ScrapeError::UnparseableMoney(total_text.clone()))?;
        if total <= 0.0 {
            return Err(ScrapeError::NonPositiveTotal(total));
        }

        let rows = dom.portfolio_rows();

        for row in &rows {
            let value = match money::parse(&row.raw_value) {
                Some(value) => value,
                None => {
                    log::warn!("home: skipping row {:?}: {:?}", row.name, row.raw_value);
                    continue;
                }
            };

            let actual_percent = value / total * 100.0;
            let target_percent = repo
                .find(&row.name)
                .map(|pf| pf.allocation_target_percent)
                .unwrap_or(0.0);

            repo.upsert(PortfolioRecord {
                name: row.name.clone(),
                value,
                allocation_actual_percent: actual_percent,
                allocation_target_percent: target_percent,
            });
        }

        let combined = repo.get_combined();
        for row in &rows {
            let Some(record) = combined
                .portfolios
                .iter()
                .find(|pf| pf.name.eq_ignore_ascii_case(&row.name))
            else {
                continue; // value text never parsed, nothing to render
            };
            dom.render_allocation(
                &row.name,
                record.allocation_actual_percent,
                record.allocation_target_percent,
            );
        }

        Ok(())
    }

    fn run_cycle(dom: &dyn HomeDom, repo: &PortfolioRepository) {
        if let Err(e) = Home::cycle(dom, repo) {
            log::warn!("home: cycle aborted: {e}");
        }
    }
}

impl Page for Home {
    fn init(&mut self) {
        log::debug!("home: init");
        self.run();

        // Let the adapter deliver edit clicks to the controller.
        let dom = Rc::clone(&self.dom);
        let repo = Rc::clone(&self.repo);
        self.dom.bind_edit(Box::new(move |name| {
            Home::handle_edit(dom.as_ref(), &repo, name);
        }));

        // At most one observer per instance.
        if self.observer.is_none() {
            let dom = Rc::clone(&self.dom);
            let repo = Rc::clone(&self.repo);
            let callback = Box::new(move || {
                log::debug!("home: mutation detected");
                Home::run_cycle(dom.as_ref(), &repo);
            });
            self.observer = Some(
                self.dom
                    .observe(MutationFilter::attributes_subtree(), callback),
            );
        }
    }

    fn run(&mut self) {
        Home::run_cycle(self.dom.as_ref(), &self.repo);
    }

    fn destroy(&mut self) {
        log::debug!("home: destroy");
        if let Some(observer) = self.observer.take() {
            observer.cancel();
        }
    }
}

fn validate_target(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let target: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if !(0.0..=100.0).contains(&target) {
        return Err(ValidationError::OutOfRange(target));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target_accepts_bounds() {
        assert_eq!(validate_target("0").unwrap(), 0.0);
        assert_eq!(validate_target("100").unwrap(), 100.0);
        assert_eq!(validate_target(" 62.5 ").unwrap(), 62.5);
    }

    #[test]
    fn test_validate_target_rejects_bad_input() {
        assert!(matches!(
            validate_target("abc"),
            Err(ValidationError::NotANumber(_))
        ));
        assert!(matches!(
            validate_target("150"),
            Err(ValidationError::OutOfRange(_))
        ));
        assert!(matches!(
            validate_target("-1"),
            Err(ValidationError::OutOfRange(_))
        ));
    }
}
