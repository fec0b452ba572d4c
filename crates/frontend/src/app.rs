use crate::domain::a003_curriculum::ui::page::{CatalogSelection, CurriculumPage};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Department/program choice shared by the catalog views of one session.
    provide_context(CatalogSelection::new());

    view! {
        <CurriculumPage />
    }
}
