use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use datastore_service_cli::client::DatastoreClient;
use datastore_service_cli::OperationResult;

/// Last known state of a mutation for one entity. Successful mutations drop
/// their entry, so the map only holds in-flight work and last failures.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationStatus {
    InFlight,
    Failed { error: String },
}

/// Shared application state: the store client plus a per-entity guard so the
/// same row is never mutated by two overlapping requests (the server-side
/// version of disabling the button while a call is outstanding).
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: DatastoreClient,
    mutations: Arc<DashMap<String, MutationStatus>>,
}

impl AppState {
    pub fn new(store: DatastoreClient) -> Self {
        AppState {
            store,
            mutations: Arc::new(DashMap::new()),
        }
    }

    /// Marks a mutation as running. Returns false when one is already in
    /// flight for this entity.
    pub fn begin_mutation(&self, id: &str) -> bool {
        match self.mutations.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == MutationStatus::InFlight {
                    false
                } else {
                    entry.insert(MutationStatus::InFlight);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(MutationStatus::InFlight);
                true
            }
        }
    }

    pub fn finish_mutation(&self, id: &str, result: &OperationResult) {
        if result.success {
            self.mutations.remove(id);
        } else {
            self.mutations.insert(
                id.to_string(),
                MutationStatus::Failed {
                    error: result
                        .error
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                },
            );
        }
    }

    pub fn mutation_status(&self, id: &str) -> Option<MutationStatus> {
        self.mutations.get(id).map(|s| s.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn state() -> AppState {
        let store = DatastoreClient::new(
            Url::parse("http://127.0.0.1:1").unwrap(),
            "test-key".to_string(),
        )
        .unwrap();
        AppState::new(store)
    }

    #[test]
    fn second_mutation_of_same_entity_is_refused() {
        let state = state();
        assert!(state.begin_mutation("u1"));
        assert!(!state.begin_mutation("u1"));
        // a different entity is unaffected
        assert!(state.begin_mutation("u2"));
    }

    #[test]
    fn successful_mutation_drops_its_entry() {
        let state = state();
        assert!(state.begin_mutation("u1"));
        state.finish_mutation("u1", &OperationResult::ok());
        assert_eq!(state.mutation_status("u1"), None);
        assert!(state.begin_mutation("u1"));
    }

    #[test]
    fn failed_mutation_keeps_the_last_error() {
        let state = state();
        assert!(state.begin_mutation("u1"));
        state.finish_mutation("u1", &OperationResult::failed("row not found"));
        assert_eq!(
            state.mutation_status("u1"),
            Some(MutationStatus::Failed {
                error: "row not found".to_string()
            })
        );
        // a recorded failure does not block the next attempt
        assert!(state.begin_mutation("u1"));
    }
}
