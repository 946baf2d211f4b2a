//! # Session State
//!
//! In-memory store for the lifetime of one `pantry session`.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use pantry_core::catalog::seed_inventory;
use pantry_core::ids::{Clock, Context, IdGenerator, SystemClock, TimestampIds};
use pantry_core::state::{Command, StoreState};
use pantry_core::CoreResult;

/// What a successful command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub created_id: Option<u64>,
    pub logged: Vec<u64>,
}

pub struct Session {
    state: StoreState,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Session {
    pub fn new(ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Session {
            state: StoreState::default(),
            ids,
            clock,
        }
    }

    /// Millisecond ids and the wall clock.
    pub fn system() -> Self {
        Self::new(Box::new(TimestampIds::new()), Box::new(SystemClock))
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replaces the store with the demo pantry built from `names`.
    pub fn seed(&mut self, names: &[&str]) {
        let items = seed_inventory(names, self.clock.today());
        let mut ctx = Context::new(self.ids.as_mut(), self.clock.as_ref());
        self.state = StoreState::seeded(items, &mut ctx);
        info!(items = self.state.items.len(), "Seeded demo inventory");
    }

    /// Applies `command`; the store is untouched when it fails.
    pub fn dispatch(&mut self, command: Command) -> CoreResult<Outcome> {
        let name = command.name();
        let mut ctx = Context::new(self.ids.as_mut(), self.clock.as_ref());

        match self.state.apply(command, &mut ctx) {
            Ok(transition) => {
                debug!(
                    command = name,
                    created_id = ?transition.created_id,
                    logged = transition.logged.len(),
                    "Command applied"
                );
                self.state = transition.state;
                Ok(Outcome {
                    created_id: transition.created_id,
                    logged: transition.logged,
                })
            }
            Err(err) => {
                warn!(command = name, error = %err, "Command rejected");
                Err(err)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::system()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::ids::{FixedClock, SequentialIds};
    use pantry_core::{CoreError, Money, NewItem, Quantity};

    fn session() -> Session {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        Session::new(Box::new(SequentialIds::new()), Box::new(FixedClock::on(today)))
    }

    fn rice() -> NewItem {
        NewItem {
            name: "Rice".to_string(),
            category: "Grains & Flours".to_string(),
            quantity: Quantity::from_units(10),
            unit: "kg".to_string(),
            purchase_price: Money::from_major(100),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            expiry_date: None,
            low_stock_threshold: Quantity::from_units(2),
        }
    }

    #[test]
    fn test_dispatch_replaces_state_on_success() {
        let mut session = session();
        let outcome = session.dispatch(Command::AddItem(rice())).unwrap();

        let id = outcome.created_id.unwrap();
        assert_eq!(outcome.logged.len(), 1);
        assert_eq!(session.state().item(id).unwrap().name, "Rice");
    }

    #[test]
    fn test_failed_command_keeps_state() {
        let mut session = session();
        session.dispatch(Command::AddItem(rice())).unwrap();
        let before = session.state().clone();

        let result = session.dispatch(Command::Bill { id: 999 });
        assert!(matches!(result, Err(CoreError::ItemNotFound(999))));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_seed_builds_store_without_history() {
        let mut session = session();
        session.seed(&["tuwar daal", "haldi"]);

        assert_eq!(session.state().items.len(), 2);
        assert!(session.state().transactions.is_empty());
        assert_eq!(session.state().items[0].name, "Tuwar Daal");
    }
}
