pub mod state;

use self::state::create_state;
use super::details::OpenMode;
use crate::domain::a003_curriculum::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ignore_case, filter_list, get_sort_indicator, sort_list, Searchable, Sortable,
};
use crate::shared::load_guard::LoadGuard;
use contracts::domain::a002_program::aggregate::ProgramId;
use contracts::domain::a003_curriculum::CurriculumSummary;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct CurriculumRow {
    pub program_id: ProgramId,
    pub program_name: String,
    pub department: String,
    pub duration: Option<u32>,
    pub items_count: usize,
}

impl From<CurriculumSummary> for CurriculumRow {
    fn from(s: CurriculumSummary) -> Self {
        Self {
            department: s.department_name().to_string(),
            program_id: s.program_id,
            program_name: s.program_name,
            duration: s.duration_in_years,
            items_count: s.items_count,
        }
    }
}

impl Sortable for CurriculumRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "program_name" => self
                .program_name
                .to_lowercase()
                .cmp(&other.program_name.to_lowercase()),
            "department" => self
                .department
                .to_lowercase()
                .cmp(&other.department.to_lowercase()),
            "duration" => self.duration.cmp(&other.duration),
            "items_count" => self.items_count.cmp(&other.items_count),
            _ => Ordering::Equal,
        }
    }
}

impl Searchable for CurriculumRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ignore_case(&self.program_name, filter)
            || contains_ignore_case(&self.department, filter)
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Directory of all curricula
#[component]
pub fn CurriculumList(on_open: Callback<(ProgramId, OpenMode)>) -> impl IntoView {
    let state = create_state();
    let (rows, set_rows) = signal::<Vec<CurriculumRow>>(Vec::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let busy = RwSignal::new(false);
    let guard = StoredValue::new(LoadGuard::new());

    let load = move || {
        let guard = guard.get_value();
        let ticket = guard.begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_directory().await;
            if !guard.is_current(ticket) {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("Loaded {} curricula", list.len());
                    set_rows.set(list.into_iter().map(Into::into).collect());
                }
                Err(e) => {
                    log::error!("Failed to fetch curricula: {}", e);
                    set_error.set(Some(format!("Could not load curricula: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    {
        let guard = guard.get_value();
        on_cleanup(move || guard.cancel());
    }

    let delete_row = move |row: CurriculumRow| {
        if !confirm(&format!("Delete the curriculum of \"{}\"?", row.program_name)) {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            match api::delete_for_program(row.program_id).await {
                Ok(true) => log::info!("Deleted curriculum of program {}", row.program_id),
                Ok(false) => log::warn!("Program {} had no curriculum to delete", row.program_id),
                Err(e) => {
                    log::error!("Failed to delete curriculum: {}", e);
                    set_error.set(Some(format!("Delete failed: {}", e)));
                }
            }
            busy.set(false);
            load();
        });
    };

    let clone_row = move |row: CurriculumRow| {
        busy.set(true);
        spawn_local(async move {
            match api::clone_program(row.program_id).await {
                Ok(()) => log::info!("Cloned program {}", row.program_id),
                Err(e) => {
                    log::error!("Failed to clone program {}: {}", row.program_id, e);
                    set_error.set(Some(format!("Clone failed: {}", e)));
                }
            }
            busy.set(false);
            load();
        });
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
        }
    };

    let header = move |field: &'static str, title: &'static str| {
        move || {
            let s = state.get();
            format!("{}{}", title, get_sort_indicator(&s.sort_field, field, s.sort_ascending))
        }
    };

    let visible_rows = move || {
        let s = state.get();
        let mut list = filter_list(rows.get(), &s.filter);
        sort_list(&mut list, &s.sort_field, s.sort_ascending);
        list
    };

    load();

    view! {
        <div class="curriculum-list">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h3 style="margin: 0;">"Curricula"</h3>
                <Space>
                    <input
                        type="text"
                        placeholder="Filter by program or department"
                        prop:value=move || state.with(|s| s.filter.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.filter = value);
                        }
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </Space>
            </Flex>

            {move || error.get().map(|err| view! { <div class="error">{err}</div> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>
                            <span class="sortable" on:click=toggle_sort("program_name")>{header("program_name", "Program")}</span>
                        </TableHeaderCell>
                        <TableHeaderCell>
                            <span class="sortable" on:click=toggle_sort("department")>{header("department", "Department")}</span>
                        </TableHeaderCell>
                        <TableHeaderCell attr:style="width: 110px;">
                            <span class="sortable" on:click=toggle_sort("duration")>{header("duration", "Years")}</span>
                        </TableHeaderCell>
                        <TableHeaderCell attr:style="width: 110px;">
                            <span class="sortable" on:click=toggle_sort("items_count")>{header("items_count", "Subjects")}</span>
                        </TableHeaderCell>
                        <TableHeaderCell attr:style="width: 170px; text-align: center;">"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        if loading.get() {
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="5" attr:style="padding: 40px; text-align: center;">
                                        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small>
                                            <Spinner />
                                            "Loading..."
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }.into_any();
                        }
                        let list = visible_rows();
                        if list.is_empty() {
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="5" attr:style="padding: 40px; text-align: center;">
                                        "No curricula found"
                                    </TableCell>
                                </TableRow>
                            }.into_any();
                        }
                        list.into_iter().map(|row| {
                            let program_id = row.program_id;
                            let for_delete = row.clone();
                            let for_clone = row.clone();
                            view! {
                                <TableRow
                                    on:dblclick=move |_| on_open.run((program_id, OpenMode::View))
                                    attr:style="cursor: pointer;"
                                >
                                    <TableCell><TableCellLayout truncate=true>{row.program_name}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{row.department}</TableCellLayout></TableCell>
                                    <TableCell>{row.duration.map(|d| d.to_string()).unwrap_or_else(|| "—".to_string())}</TableCell>
                                    <TableCell>{row.items_count}</TableCell>
                                    <TableCell>
                                        <Space>
                                            <Button
                                                appearance=ButtonAppearance::Transparent
                                                on_click=move |e: ev::MouseEvent| {
                                                    e.stop_propagation();
                                                    on_open.run((program_id, OpenMode::View));
                                                }
                                            >
                                                {icon("eye")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Transparent
                                                on_click=move |e: ev::MouseEvent| {
                                                    e.stop_propagation();
                                                    on_open.run((program_id, OpenMode::Edit));
                                                }
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Transparent
                                                disabled=busy
                                                on_click=move |e: ev::MouseEvent| {
                                                    e.stop_propagation();
                                                    clone_row(for_clone.clone());
                                                }
                                            >
                                                {icon("copy")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Transparent
                                                disabled=busy
                                                on_click=move |e: ev::MouseEvent| {
                                                    e.stop_propagation();
                                                    delete_row(for_delete.clone());
                                                }
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </Space>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view().into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
