use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct CurriculumListState {
    pub sort_field: String,
    pub sort_ascending: bool,
    pub filter: String,
}

impl Default for CurriculumListState {
    fn default() -> Self {
        Self {
            sort_field: "program_name".to_string(),
            sort_ascending: true,
            filter: String::new(),
        }
    }
}

pub fn create_state() -> RwSignal<CurriculumListState> {
    RwSignal::new(CurriculumListState::default())
}
