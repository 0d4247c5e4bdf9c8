use crate::domain::events::DomainEvent;
use crate::ports::lending_journal::LendingJournal as LendingJournalTrait;

/// In-memory implementation of LendingJournal
///
/// Keeps events in a Vec for the lifetime of the process.
#[derive(Debug, Default)]
pub struct LendingJournal {
    events: Vec<DomainEvent>,
}

impl LendingJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl LendingJournalTrait for LendingJournal {
    fn record(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn events(&self) -> Vec<DomainEvent> {
        self.events.clone()
    }
}
