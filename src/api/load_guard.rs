use serde::{Deserialize, Serialize};

/// Generation handed out when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Orders concurrent loads so only the most recently started one may commit.
///
/// A parse that finishes after a newer load began is stale and its result
/// must be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadGuard {
    issued: u64,
}

impl LoadGuard {
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            generation: self.issued,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.issued
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.issued
    }
}
