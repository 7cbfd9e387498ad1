use lexis_types::{DefinitionView, GroupedCategory, LookupKey, LookupTicket, WordRecord};

use crate::grouping::{definition_view, group_categories};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded, the result was dropped
    Stale,
}

/// The single "current word record" slot.
///
/// Every settled key bumps the generation, so only the most recently issued
/// ticket can write the record.
#[derive(Debug, Default)]
pub struct LookupSlot {
    generation: u64,
    active: Option<LookupKey>,
    record: Option<WordRecord>,
}

impl LookupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes any in-flight lookup. Returns a ticket when there is a key to look up.
    pub fn begin(&mut self, key: Option<LookupKey>) -> Option<LookupTicket> {
        self.generation = self.generation.wrapping_add(1);
        self.active = key.clone();

        key.map(|key| LookupTicket {
            generation: self.generation,
            key,
        })
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.generation && self.active.as_ref() == Some(&ticket.key)
    }

    pub fn resolve(&mut self, ticket: &LookupTicket, record: Option<WordRecord>) -> Resolution {
        if !self.is_current(ticket) {
            return Resolution::Stale;
        }

        self.record = record;
        Resolution::Applied
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_key(&self) -> Option<&LookupKey> {
        self.active.as_ref()
    }

    pub fn record(&self) -> Option<&WordRecord> {
        self.record.as_ref()
    }

    pub fn categories(&self) -> Vec<GroupedCategory> {
        self.record.as_ref().map(group_categories).unwrap_or_default()
    }

    pub fn view(&self) -> Option<DefinitionView> {
        self.record.as_ref().map(definition_view)
    }
}
