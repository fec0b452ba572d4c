use super::api;
use crate::shared::config::config;
use crate::shared::load_guard::LoadGuard;
use crate::shared::retry::{fetch_list_with_retry, RetryPolicy};
use contracts::domain::a001_department::aggregate::Department;
use leptos::prelude::*;

/// Department list with its loading state
#[derive(Clone, Copy)]
pub struct DepartmentsState {
    pub departments: RwSignal<Vec<Department>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    guard: StoredValue<LoadGuard>,
}

impl DepartmentsState {
    fn load(&self, policy: RetryPolicy) {
        let guard = self.guard.get_value();
        let ticket = guard.begin();
        let departments = self.departments;
        let loading = self.loading;
        let error = self.error;

        loading.set(true);
        error.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result =
                fetch_list_with_retry(policy, "Department list", api::fetch_departments).await;
            if !guard.is_current(ticket) {
                log::debug!("Dropping stale department list response");
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("Loaded {} departments", list.len());
                    departments.set(list);
                }
                Err(e) => {
                    log::error!("Failed to load departments: {}", e);
                    error.set(Some(format!("Could not load departments: {}", e)));
                }
            }
            loading.set(false);
        });
    }

    /// Manual reload; a single attempt
    pub fn refresh(&self) {
        self.load(RetryPolicy::NONE);
    }
}

/// Load departments once for the calling component, retrying empty or
/// failed answers per the configured policy.
pub fn use_departments() -> DepartmentsState {
    let state = DepartmentsState {
        departments: RwSignal::new(Vec::new()),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        guard: StoredValue::new(LoadGuard::new()),
    };

    state.load(RetryPolicy::from_config(&config().retry));

    let guard = state.guard.get_value();
    on_cleanup(move || guard.cancel());

    state
}
