//! Result accumulation.
//!
//! Owned by the scan's consumer loop; each completed probe is recorded once
//! and turned into the event handed to the progress sink.

use crate::models::{FoundAccount, ScanEvent, ScanReport, Verdict};

#[derive(Debug, Default)]
pub struct ResultAggregator {
    total: usize,
    completed: usize,
    errors: usize,
    found: Vec<FoundAccount>,
}

impl ResultAggregator {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, platform: String, verdict: Verdict) -> ScanEvent {
        self.completed += 1;
        match &verdict {
            Verdict::Found(url) => self.found.push(FoundAccount {
                platform: platform.clone(),
                url: url.clone(),
            }),
            Verdict::Error => self.errors += 1,
            Verdict::NotFound => {}
        }

        ScanEvent {
            platform,
            verdict,
            completed: self.completed,
            total: self.total,
            found: self.found.len(),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn finish(self, cancelled: bool) -> ScanReport {
        ScanReport {
            found: self.found,
            total: self.total,
            completed: self.completed,
            errors: self.errors,
            cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_and_events() {
        let mut aggregator = ResultAggregator::new(3);

        let first = aggregator.record("Beta".into(), Verdict::NotFound);
        assert_eq!((first.completed, first.found, first.total), (1, 0, 3));

        let second = aggregator.record("Alpha".into(), Verdict::Found("https://a/bob".into()));
        assert_eq!((second.completed, second.found), (2, 1));

        let third = aggregator.record("Gamma".into(), Verdict::Error);
        assert_eq!((third.completed, third.found), (3, 1));

        let report = aggregator.finish(false);
        assert_eq!(
            report.found,
            vec![FoundAccount {
                platform: "Alpha".into(),
                url: "https://a/bob".into()
            }]
        );
        assert_eq!(report.errors, 1);
        assert_eq!(report.completed, report.total);
        assert!(report.is_complete());
    }

    #[test]
    fn test_found_list_keeps_record_order() {
        let mut aggregator = ResultAggregator::new(2);
        aggregator.record("Zed".into(), Verdict::Found("https://z/bob".into()));
        aggregator.record("Able".into(), Verdict::Found("https://a/bob".into()));

        let platforms: Vec<_> = aggregator
            .finish(false)
            .found
            .into_iter()
            .map(|f| f.platform)
            .collect();
        assert_eq!(platforms, vec!["Zed", "Able"]);
    }

    #[test]
    fn test_empty_finish() {
        let report = ResultAggregator::new(0).finish(false);
        assert_eq!(report, ScanReport::default());
        assert!(report.is_complete());
    }
}
