use super::api;
use crate::shared::load_guard::LoadGuard;
use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a002_program::aggregate::{Program, ProgramId};
use leptos::prelude::*;

/// Program list of the selected department
#[derive(Clone, Copy)]
pub struct ProgramsState {
    pub programs: RwSignal<Vec<Program>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    department: Signal<Option<DepartmentId>>,
    guard: StoredValue<LoadGuard>,
}

impl ProgramsState {
    fn load(&self, department_id: Option<DepartmentId>) {
        let guard = self.guard.get_value();
        let ticket = guard.begin();
        let programs = self.programs;
        let loading = self.loading;
        let error = self.error;

        programs.set(Vec::new());
        error.set(None);

        let Some(department_id) = department_id else {
            loading.set(false);
            return;
        };
        loading.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_programs(department_id).await;
            if !guard.is_current(ticket) {
                log::debug!("Dropping stale program list for department {}", department_id);
                return;
            }
            match result {
                Ok(list) => {
                    // Some backends ignore the filter; keep what belongs here.
                    let list: Vec<Program> = list
                        .into_iter()
                        .filter(|p| p.department_id.is_none() || p.belongs_to(department_id))
                        .collect();
                    log::debug!(
                        "Loaded {} programs for department {}",
                        list.len(),
                        department_id
                    );
                    programs.set(list);
                }
                Err(e) => {
                    log::error!("Failed to load programs for department {}: {}", department_id, e);
                    error.set(Some(format!("Could not load programs: {}", e)));
                }
            }
            loading.set(false);
        });
    }

    /// Reload the current department's programs (after a save or on demand)
    pub fn refresh(&self) {
        self.load(self.department.get_untracked());
    }

    pub fn find(&self, id: ProgramId) -> Option<Program> {
        self.programs
            .with(|list| list.iter().find(|p| p.id == id).cloned())
    }
}

/// Follow `department`: every change clears the list and loads the new
/// department's programs; answers for a department no longer selected are
/// dropped.
pub fn use_programs(department: Signal<Option<DepartmentId>>) -> ProgramsState {
    let state = ProgramsState {
        programs: RwSignal::new(Vec::new()),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        department,
        guard: StoredValue::new(LoadGuard::new()),
    };

    Effect::new(move |_| {
        let department_id = department.get();
        state.load(department_id);
    });

    let guard = state.guard.get_value();
    on_cleanup(move || guard.cancel());

    state
}
