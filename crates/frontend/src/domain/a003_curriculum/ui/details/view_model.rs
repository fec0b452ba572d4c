use super::state::{EditorState, SaveBlocked};
use crate::domain::a003_curriculum::api;
use crate::shared::api_utils::ApiError;
use crate::shared::load_guard::LoadGuard;
use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a002_program::aggregate::{Program, ProgramId};
use contracts::domain::a003_curriculum::Curriculum;
use leptos::prelude::*;

/// How a loaded curriculum is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    View,
    Edit,
}

/// ViewModel for the curriculum editor
#[derive(Clone, Copy)]
pub struct CurriculumEditorViewModel {
    pub state: RwSignal<EditorState>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
    /// Set when the selected program has no curriculum yet
    pub not_found: RwSignal<Option<ProgramId>>,
    guard: StoredValue<LoadGuard>,
}

impl CurriculumEditorViewModel {
    pub fn new() -> Self {
        let vm = Self {
            state: RwSignal::new(EditorState::default()),
            loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
            not_found: RwSignal::new(None),
            guard: StoredValue::new(LoadGuard::new()),
        };

        let guard = vm.guard.get_value();
        on_cleanup(move || guard.cancel());

        vm
    }

    pub fn is_saving(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_saving()))
    }

    /// Fetch the curriculum of a program and open it
    pub fn open_program(&self, program_id: ProgramId, mode: OpenMode) {
        if self.state.with_untracked(|s| s.is_saving()) {
            log::debug!("Save in progress, not opening program {}", program_id);
            return;
        }

        let guard = self.guard.get_value();
        let ticket = guard.begin();
        let state = self.state;
        let loading = self.loading;
        let load_error = self.load_error;
        let not_found = self.not_found;

        loading.set(true);
        load_error.set(None);
        not_found.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result = api::fetch_by_program(program_id).await;
            if !guard.is_current(ticket) {
                log::debug!("Dropping stale curriculum for program {}", program_id);
                return;
            }
            match result {
                Ok(Some(curriculum)) => {
                    log::info!(
                        "Loaded curriculum for program {} ({} rows)",
                        program_id,
                        curriculum.items.len()
                    );
                    state.update(|s| {
                        match mode {
                            OpenMode::View => s.view(curriculum),
                            OpenMode::Edit => s.edit(curriculum),
                        };
                    });
                }
                Ok(None) => {
                    log::info!("Program {} has no curriculum yet", program_id);
                    state.update(|s| {
                        s.back();
                    });
                    not_found.set(Some(program_id));
                }
                Err(e) => {
                    log::error!("Failed to load curriculum for program {}: {}", program_id, e);
                    load_error.set(Some(format!("Could not load curriculum: {}", e)));
                }
            }
            loading.set(false);
        });
    }

    /// Blank curriculum, pre-filled with the selected department
    pub fn create_new(&self, department_id: Option<DepartmentId>) {
        self.discard_pending_load();
        self.state.update(|s| {
            s.create(department_id);
        });
    }

    /// Curriculum for a program that has none yet: program metadata copied
    /// in and one seed row per declared year.
    pub fn create_for_program(&self, program: &Program) {
        self.discard_pending_load();

        let mut shell = Curriculum::new_shell(program.department_id);
        shell.program_id = Some(program.id);
        shell.program_code = program.code.clone();
        shell.program_name = program.name.clone();
        if let Some(years) = program.duration_in_years {
            shell.change_duration(&years.to_string());
        }

        self.state.update(|s| {
            s.start_draft(shell);
        });
    }

    pub fn edit_viewed(&self) {
        self.state.update(|s| {
            s.edit_viewed();
        });
    }

    pub fn back(&self) {
        self.discard_pending_load();
        self.state.update(|s| {
            s.back();
        });
    }

    fn discard_pending_load(&self) {
        self.guard.get_value().cancel();
        self.loading.set(false);
        self.load_error.set(None);
        self.not_found.set(None);
    }

    /// Validate and send the draft. `on_saved` gets the department whose
    /// program list changed.
    pub fn save_command(&self, on_saved: Callback<DepartmentId>) {
        let state = self.state;
        let request = match state.try_update(|s| s.begin_save()) {
            Some(Ok(request)) => request,
            Some(Err(SaveBlocked::Invalid(errors))) => {
                log::warn!("Save blocked by validation: {}", errors);
                return;
            }
            Some(Err(blocked)) => {
                log::debug!("Save ignored: {}", blocked);
                return;
            }
            None => return,
        };

        let department_id = request.department_id();
        log::info!(
            "{} curriculum '{}' ({} rows)",
            if request.is_update() { "Updating" } else { "Creating" },
            request.payload().program_name,
            request.payload().items.len()
        );

        wasm_bindgen_futures::spawn_local(async move {
            match api::save(&request).await {
                Ok(()) => {
                    log::info!("Curriculum saved");
                    if state.try_update(|s| s.save_succeeded()).is_some() {
                        on_saved.run(department_id);
                    }
                }
                Err(e) => {
                    log::error!("Failed to save curriculum: {}", e);
                    let message = match &e {
                        ApiError::Http { message, .. } => message.clone(),
                        other => other.to_string(),
                    };
                    state.try_update(|s| s.save_failed(message));
                }
            }
        });
    }
}
