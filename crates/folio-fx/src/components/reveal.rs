use std::collections::HashSet;

use crate::api::sink::{RevealSink, VisibilitySource};
use crate::api::types::ElementId;
use crate::input::event::IntersectionEntry;

/// Marks elements as shown the first time enough of them scrolls into view.
///
/// The candidate set is fixed at construction. Revealing is one-way: once an
/// element is shown it is unobserved and later entries for it are ignored.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    threshold: f32,
    candidates: Vec<ElementId>,
    revealed: HashSet<ElementId>,
}

impl RevealTrigger {
    pub fn new(threshold: f32, candidates: impl IntoIterator<Item = ElementId>) -> Self {
        let mut seen = HashSet::new();
        let candidates: Vec<ElementId> = candidates.into_iter().filter(|id| seen.insert(*id)).collect();
        Self {
            threshold,
            candidates,
            revealed: HashSet::new(),
        }
    }

    /// Start observing every candidate that is not revealed yet.
    pub fn observe_all(&self, source: &mut impl VisibilitySource) {
        let mut count = 0;
        for &id in &self.candidates {
            if !self.revealed.contains(&id) {
                source.observe(id);
                count += 1;
            }
        }
        log::debug!("reveal: observing {} elements", count);
    }

    /// Apply a batch of intersection entries. Returns the ids revealed by
    /// this batch, in entry order.
    ///
    /// `page` both applies the shown marker and stops observation, the way a
    /// single element registry does in the browser.
    pub fn handle_entries<P>(&mut self, entries: &[IntersectionEntry], page: &mut P) -> Vec<ElementId>
    where
        P: RevealSink + VisibilitySource,
    {
        let mut newly = Vec::new();
        for entry in entries {
            if !entry.reaches(self.threshold) || !self.is_candidate(entry.target) {
                continue;
            }
            if self.revealed.insert(entry.target) {
                page.mark_shown(entry.target);
                page.unobserve(entry.target);
                newly.push(entry.target);
            }
        }
        if !newly.is_empty() {
            log::debug!("reveal: shown {:?} ({} pending)", newly, self.pending());
        }
        newly
    }

    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.revealed.contains(&id)
    }

    pub fn is_candidate(&self, id: ElementId) -> bool {
        self.candidates.contains(&id)
    }

    /// Candidates still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.candidates.len() - self.revealed.len()
    }

    pub fn candidates(&self) -> &[ElementId] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct Page {
        shown: Vec<ElementId>,
        watching: HashSet<ElementId>,
    }

    impl RevealSink for Page {
        fn mark_shown(&mut self, id: ElementId) {
            self.shown.push(id);
        }
    }

    impl VisibilitySource for Page {
        fn observe(&mut self, id: ElementId) {
            self.watching.insert(id);
        }

        fn unobserve(&mut self, id: ElementId) {
            self.watching.remove(&id);
        }
    }

    fn entry(id: u32, ratio: f32) -> IntersectionEntry {
        IntersectionEntry { target: ElementId(id), ratio }
    }

    fn trigger(ids: &[u32]) -> RevealTrigger {
        RevealTrigger::new(0.15, ids.iter().map(|&i| ElementId(i)))
    }

    #[test]
    fn observes_every_candidate() {
        let t = trigger(&[1, 2, 3]);
        let mut page = Page::default();
        t.observe_all(&mut page);
        assert_eq!(page.watching.len(), 3);
    }

    #[test]
    fn reveals_once_and_unobserves() {
        let mut t = trigger(&[1, 2]);
        let mut page = Page::default();
        t.observe_all(&mut page);

        let newly = t.handle_entries(&[entry(1, 0.4)], &mut page);
        assert_eq!(newly, vec![ElementId(1)]);
        assert!(t.is_revealed(ElementId(1)));
        assert!(!page.watching.contains(&ElementId(1)));
        assert!(page.watching.contains(&ElementId(2)));
        assert_eq!(t.pending(), 1);

        // Scrolling away and back does nothing.
        t.handle_entries(&[entry(1, 0.0), entry(1, 1.0)], &mut page);
        assert_eq!(page.shown, vec![ElementId(1)]);
        assert!(t.is_revealed(ElementId(1)));
    }

    #[test]
    fn below_threshold_stays_hidden() {
        let mut t = trigger(&[1]);
        let mut page = Page::default();
        let newly = t.handle_entries(&[entry(1, 0.1499)], &mut page);
        assert!(newly.is_empty());
        assert!(page.shown.is_empty());
        assert!(!t.is_revealed(ElementId(1)));
    }

    #[test]
    fn exactly_threshold_reveals() {
        let mut t = trigger(&[1]);
        t.handle_entries(&[entry(1, 0.15)], &mut Page::default());
        assert!(t.is_revealed(ElementId(1)));
    }

    #[test]
    fn unknown_elements_ignored() {
        let mut t = trigger(&[1]);
        let mut page = Page::default();
        t.handle_entries(&[entry(9, 1.0)], &mut page);
        assert!(page.shown.is_empty());
        assert_eq!(t.pending(), 1);
    }

    #[test]
    fn duplicate_entries_in_one_batch_reveal_once() {
        let mut t = trigger(&[4]);
        let mut page = Page::default();
        let newly = t.handle_entries(&[entry(4, 0.5), entry(4, 0.9)], &mut page);
        assert_eq!(newly.len(), 1);
        assert_eq!(page.shown.len(), 1);
    }

    #[test]
    fn empty_reveal_set_is_fine() {
        let mut t = trigger(&[]);
        let mut page = Page::default();
        t.observe_all(&mut page);
        t.handle_entries(&[entry(1, 1.0)], &mut page);
        assert_eq!(t.pending(), 0);
        assert!(page.shown.is_empty());
    }

    #[test]
    fn duplicate_candidates_collapse() {
        let t = trigger(&[1, 1, 2]);
        assert_eq!(t.candidates(), &[ElementId(1), ElementId(2)]);
    }

    proptest! {
        #[test]
        fn threshold_decides(ratio in 0.0f32..=1.0) {
            let mut t = trigger(&[7]);
            t.handle_entries(&[entry(7, ratio)], &mut Page::default());
            prop_assert_eq!(t.is_revealed(ElementId(7)), ratio >= 0.15);
        }

        #[test]
        fn revealed_never_reverts(ratios in proptest::collection::vec(0.0f32..=1.0, 1..20)) {
            let mut t = trigger(&[7]);
            let mut page = Page::default();
            t.handle_entries(&[entry(7, 1.0)], &mut page);
            for r in ratios {
                t.handle_entries(&[entry(7, r)], &mut page);
                prop_assert!(t.is_revealed(ElementId(7)));
            }
            prop_assert_eq!(page.shown.len(), 1);
        }
    }
}
