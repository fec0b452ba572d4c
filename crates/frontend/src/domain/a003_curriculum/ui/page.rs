use super::details::state::EditorPhase;
use super::details::{CurriculumEditor, CurriculumEditorViewModel, CurriculumSummaryView, OpenMode};
use super::list::CurriculumList;
use crate::domain::a001_department::hooks::use_departments;
use crate::domain::a002_program::hooks::use_programs;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a002_program::aggregate::ProgramId;
use contracts::domain::common::AggregateId;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Department/program picked in the catalog toolbar. Provided once per
/// editing session and read through context by the views under it.
#[derive(Clone, Copy)]
pub struct CatalogSelection {
    pub department_id: RwSignal<Option<DepartmentId>>,
    pub program_id: RwSignal<Option<ProgramId>>,
}

impl CatalogSelection {
    pub fn new() -> Self {
        Self {
            department_id: RwSignal::new(None),
            program_id: RwSignal::new(None),
        }
    }

    pub fn select_department(&self, department_id: Option<DepartmentId>) {
        if self.department_id.get_untracked() != department_id {
            self.department_id.set(department_id);
            self.program_id.set(None);
        }
    }
}

impl Default for CatalogSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Directory,
    Summary,
    Editor,
}

#[component]
pub fn CurriculumPage() -> impl IntoView {
    let selection =
        use_context::<CatalogSelection>().expect("CatalogSelection not found in context");
    let departments = use_departments();
    let programs = use_programs(Signal::derive(move || selection.department_id.get()));
    let vm = CurriculumEditorViewModel::new();

    let screen = Memo::new(move |_| {
        vm.state.with(|s| match s.phase {
            EditorPhase::Browsing => Screen::Directory,
            EditorPhase::Viewing => Screen::Summary,
            EditorPhase::Editing | EditorPhase::Saving => Screen::Editor,
        })
    });

    // Make the saved program visible without a full reload.
    let on_saved = Callback::new(move |department_id: DepartmentId| {
        if selection.department_id.get_untracked() == Some(department_id) {
            programs.refresh();
        } else {
            selection.select_department(Some(department_id));
        }
    });

    let on_open = Callback::new(move |(program_id, mode): (ProgramId, OpenMode)| {
        vm.open_program(program_id, mode);
    });

    let open_selected = move |mode: OpenMode| {
        move |_: ev::MouseEvent| {
            if let Some(program_id) = selection.program_id.get_untracked() {
                vm.open_program(program_id, mode);
            }
        }
    };

    let no_program = Signal::derive(move || {
        selection.program_id.get().is_none() || vm.loading.get() || vm.is_saving().get()
    });

    view! {
        <PageFrame page_id="a003_curriculum--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2>"Curriculum catalog"</h2>
            </div>

            <div class="page__content">
                <Flex align=FlexAlign::End gap=FlexGap::Large>
                    <div class="form-group">
                        <label for="catalog-department">"Department"</label>
                        <Flex align=FlexAlign::Center gap=FlexGap::Small>
                            <select
                                id="catalog-department"
                                disabled=move || departments.loading.get()
                                prop:value=move || {
                                    selection.department_id.get().map(|id| id.as_string()).unwrap_or_default()
                                }
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    selection.select_department(DepartmentId::from_string(&value).ok());
                                }
                            >
                                <option value="">
                                    {move || if departments.loading.get() { "Loading departments..." } else { "-- Select department --" }}
                                </option>
                                {move || departments.departments.get().into_iter().map(|d| {
                                    view! { <option value=d.id.as_string()>{d.display_name()}</option> }
                                }).collect_view()}
                            </select>
                            <Button
                                appearance=ButtonAppearance::Transparent
                                on_click=move |_| departments.refresh()
                                disabled=departments.loading
                            >
                                {icon("refresh")}
                            </Button>
                        </Flex>
                    </div>

                    <div class="form-group">
                        <label for="catalog-program">"Program"</label>
                        <select
                            id="catalog-program"
                            disabled=move || programs.loading.get() || selection.department_id.get().is_none()
                            prop:value=move || {
                                selection.program_id.get().map(|id| id.as_string()).unwrap_or_default()
                            }
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                selection.program_id.set(ProgramId::from_string(&value).ok());
                            }
                        >
                            <option value="">
                                {move || if programs.loading.get() { "Loading programs..." } else { "-- Select program --" }}
                            </option>
                            {move || programs.programs.get().into_iter().map(|p| {
                                let label = format!("{} - {}", p.code_or_name(), p.name);
                                view! { <option value=p.id.as_string()>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>

                    <Space>
                        <Button appearance=ButtonAppearance::Secondary on_click=open_selected(OpenMode::View) disabled=no_program>
                            {icon("eye")}
                            " View"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=open_selected(OpenMode::Edit) disabled=no_program>
                            {icon("edit")}
                            " Edit"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.create_new(selection.department_id.get_untracked())
                            disabled=vm.is_saving()
                        >
                            {icon("plus")}
                            " New curriculum"
                        </Button>
                    </Space>
                </Flex>

                {move || departments.error.get().map(|err| view! {
                    <div class="error">
                        {err}" "
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| departments.refresh()>
                            "Retry"
                        </Button>
                    </div>
                })}

                {move || programs.error.get().map(|err| view! {
                    <div class="error">
                        {err}" "
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| programs.refresh()>
                            "Retry"
                        </Button>
                    </div>
                })}

                {move || vm.load_error.get().map(|err| view! { <div class="error">{err}</div> })}

                {move || vm.loading.get().then(|| view! {
                    <Flex align=FlexAlign::Center gap=FlexGap::Small>
                        <Spinner />
                        "Loading curriculum..."
                    </Flex>
                })}

                {move || vm.not_found.get().map(|program_id| {
                    let program = programs.find(program_id);
                    let name = program
                        .as_ref()
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| format!("program #{}", program_id));
                    view! {
                        <div class="empty-state">
                            <p>{format!("No curriculum exists for {} yet.", name)}</p>
                            {program.map(|program| view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| vm.create_for_program(&program)
                                >
                                    {icon("plus")}
                                    " Create curriculum"
                                </Button>
                            })}
                        </div>
                    }
                })}

                {move || match screen.get() {
                    Screen::Directory => view! { <CurriculumList on_open=on_open /> }.into_any(),
                    Screen::Summary => view! { <CurriculumSummaryView vm=vm /> }.into_any(),
                    Screen::Editor => view! {
                        <CurriculumEditor vm=vm departments=departments on_saved=on_saved />
                    }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}
