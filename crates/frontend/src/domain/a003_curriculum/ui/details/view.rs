use super::view_model::CurriculumEditorViewModel;
use crate::domain::a001_department::hooks::DepartmentsState;
use crate::shared::icons::icon;
use contracts::domain::a001_department::aggregate::DepartmentId;
use contracts::domain::a003_curriculum::resize::{ResizeOutcome, MAX_DURATION_YEARS};
use contracts::domain::a003_curriculum::{
    group_for_edit, year_label_for, Curriculum, CurriculumField, ItemField, YearGroup,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

/// Subject row columns, in display order
const ROW_COLUMNS: [(ItemField, &str); 5] = [
    (ItemField::SubjectCode, "Subject code"),
    (ItemField::Description, "Description"),
    (ItemField::Prerequisite, "Prerequisite"),
    (ItemField::EquivSubjectCode, "Equivalent"),
    (ItemField::Units, "Units"),
];

#[component]
pub fn CurriculumEditor(
    vm: CurriculumEditorViewModel,
    departments: DepartmentsState,
    on_saved: Callback<DepartmentId>,
) -> impl IntoView {
    let is_saving = vm.is_saving();

    // Only add/remove/regroup changes this; typing into a cell does not,
    // so inputs keep their focus.
    let groups = Memo::new(move |_| {
        vm.state.with(|s| {
            s.draft
                .as_ref()
                .map(|d| group_for_edit(&d.items))
                .unwrap_or_default()
        })
    });

    let draft_text = move |read: fn(&Curriculum) -> String| {
        move || vm.state.with(|s| s.draft.as_ref().map(read).unwrap_or_default())
    };

    let field_error = move |field: CurriculumField| {
        move || {
            vm.state.with(|s| {
                s.errors
                    .field(field)
                    .map(|msg| view! { <div class="field-error">{msg.to_string()}</div> })
            })
        }
    };

    view! {
        <div class="details-container curriculum-editor">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3>
                    {move || vm.state.with(|s| {
                        let draft = s.draft.as_ref();
                        let title = draft.map(|d| d.title()).unwrap_or_default();
                        if draft.map(|d| d.is_new).unwrap_or(false) {
                            format!("New curriculum: {}", title)
                        } else {
                            format!("Editing: {}", title)
                        }
                    })}
                </h3>
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save_command(on_saved)
                        disabled=is_saving
                    >
                        {icon("save")}
                        {move || if is_saving.get() { " Saving..." } else { " Save" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.back()
                        disabled=is_saving
                    >
                        {icon("arrow-left")}
                        " Back"
                    </Button>
                </Space>
            </Flex>

            {move || vm.state.with(|s| s.save_error.clone()).map(|err| view! {
                <div class="alert alert--error" role="alert">
                    <strong>"Save failed: "</strong>{err}
                </div>
            })}

            {move || vm.state.with(|s| s.errors.first_message().map(str::to_string)).map(|msg| view! {
                <div class="error">{msg}</div>
            })}

            <div class="details-form">
                <div class="form-group">
                    <label for="curriculum-department">"Department"</label>
                    <select
                        id="curriculum-department"
                        prop:value=move || vm.state.with(|s| {
                            s.draft
                                .as_ref()
                                .and_then(|d| d.department_id)
                                .map(|id| id.as_string())
                                .unwrap_or_default()
                        })
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            let department_id = DepartmentId::from_string(&value).ok();
                            vm.state.update(|s| s.set_department(department_id));
                        }
                    >
                        <option value="">"-- Select department --"</option>
                        {move || departments.departments.get().into_iter().map(|d| {
                            view! { <option value=d.id.as_string()>{d.display_name()}</option> }
                        }).collect_view()}
                    </select>
                    {field_error(CurriculumField::DepartmentId)}
                </div>

                <div class="form-group">
                    <label for="curriculum-code">"Program code"</label>
                    <input
                        type="text"
                        id="curriculum-code"
                        prop:value=draft_text(|d| d.program_code.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.state.update(|s| s.set_program_code(value));
                        }
                    />
                    {field_error(CurriculumField::ProgramCode)}
                </div>

                <div class="form-group">
                    <label for="curriculum-name">"Program name"</label>
                    <input
                        type="text"
                        id="curriculum-name"
                        prop:value=draft_text(|d| d.program_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.state.update(|s| s.set_program_name(value));
                        }
                    />
                    {field_error(CurriculumField::ProgramName)}
                </div>

                <div class="form-group">
                    <label for="curriculum-duration">"Duration (years)"</label>
                    <input
                        type="number"
                        min="1"
                        max=MAX_DURATION_YEARS.to_string()
                        id="curriculum-duration"
                        prop:value=draft_text(|d| {
                            d.duration_in_years.map(|y| y.to_string()).unwrap_or_default()
                        })
                        on:change=move |ev| {
                            let input = event_target_value(&ev);
                            let outcome = vm.state.try_update(|s| s.change_duration(&input)).flatten();
                            match outcome {
                                Some(ResizeOutcome::Grown { seeded_years }) => {
                                    log::debug!("Duration {}: seeded years {:?}", input, seeded_years)
                                }
                                Some(ResizeOutcome::Shrunk { removed }) => {
                                    log::debug!("Duration {}: removed {} rows", input, removed)
                                }
                                Some(other) => log::debug!("Duration {:?}: {:?}", input, other),
                                None => {}
                            }
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="curriculum-version">"Version name"</label>
                    <input
                        type="text"
                        id="curriculum-version"
                        prop:value=draft_text(|d| d.version_name.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.state.update(|s| s.set_version_name(value));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="curriculum-effectivity">"Effectivity year"</label>
                    <input
                        type="number"
                        id="curriculum-effectivity"
                        prop:value=draft_text(|d| {
                            d.effectivity_year.map(|y| y.to_string()).unwrap_or_default()
                        })
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            vm.state.update(|s| s.set_effectivity_year(&value));
                        }
                    />
                </div>
            </div>

            <div class="curriculum-years">
                {move || {
                    let groups = groups.get();
                    if groups.is_empty() {
                        view! {
                            <div class="empty-state">
                                "No subjects yet. Set a duration or add a year below."
                            </div>
                        }.into_any()
                    } else {
                        groups.into_iter()
                            .map(|group| view! { <YearSection vm=vm group=group /> })
                            .collect_view()
                            .into_any()
                    }
                }}
                <NewYearButton vm=vm />
            </div>
        </div>
    }
}

/// Appends a first-term row for the year after the highest one present
#[component]
fn NewYearButton(vm: CurriculumEditorViewModel) -> impl IntoView {
    let add_year = move |_| {
        vm.state.update(|s| {
            let next = s.draft.as_ref().map(|d| d.max_resolved_year()).unwrap_or(0) + 1;
            let label = year_label_for(next);
            s.add_term(&label);
        });
    };

    view! {
        <Button appearance=ButtonAppearance::Subtle on_click=add_year disabled=vm.is_saving()>
            {icon("plus")}
            " Add year"
        </Button>
    }
}

#[component]
fn YearSection(vm: CurriculumEditorViewModel, group: YearGroup) -> impl IntoView {
    let year_label = group.year_label.clone();
    let add_term = {
        let year_label = year_label.clone();
        move |_| {
            vm.state.update(|s| {
                s.add_term(&year_label);
            });
        }
    };

    view! {
        <section class="curriculum-year">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h4>{group.year_label.clone()}</h4>
                <Button appearance=ButtonAppearance::Subtle on_click=add_term>
                    {icon("plus")}
                    " Add term"
                </Button>
            </Flex>
            {group.terms.into_iter().map(|term| {
                let year_label = year_label.clone();
                let term_name = term.term.clone();
                let add_subject = {
                    let year_label = year_label.clone();
                    let term_name = term_name.clone();
                    move |_| {
                        vm.state.update(|s| {
                            s.add_item(&year_label, &term_name);
                        });
                    }
                };
                let remove_term = {
                    let year_label = year_label.clone();
                    let term_name = term_name.clone();
                    move |_| {
                        vm.state.update(|s| s.remove_bucket(&year_label, &term_name));
                    }
                };

                view! {
                    <div class="curriculum-term">
                        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                            <h5>{term.term.clone()}</h5>
                            <Space>
                                <Button appearance=ButtonAppearance::Subtle on_click=add_subject>
                                    {icon("plus")}
                                    " Add subject"
                                </Button>
                                <Button appearance=ButtonAppearance::Subtle on_click=remove_term>
                                    {icon("delete")}
                                    " Remove term"
                                </Button>
                            </Space>
                        </Flex>
                        <table class="curriculum-rows">
                            <thead>
                                <tr>
                                    <th>"Year"</th>
                                    <th>"Term"</th>
                                    {ROW_COLUMNS.iter().map(|(_, title)| view! { <th>{*title}</th> }).collect_view()}
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {term.item_indices.into_iter()
                                    .map(|index| view! { <ItemRow vm=vm index=index /> })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
            }).collect_view()}
        </section>
    }
}

#[component]
fn ItemRow(vm: CurriculumEditorViewModel, index: usize) -> impl IntoView {
    view! {
        <tr>
            // Bucket columns commit on change: they move the row to another group.
            <td>{cell_input(vm, index, ItemField::YearLabel, true)}</td>
            <td>{cell_input(vm, index, ItemField::Term, true)}</td>
            {ROW_COLUMNS.iter().map(|(field, _)| {
                view! { <td>{cell_input(vm, index, *field, false)}</td> }
            }).collect_view()}
            <td>
                <Button
                    appearance=ButtonAppearance::Transparent
                    on_click=move |_| vm.state.update(|s| s.remove_item(index))
                >
                    {icon("delete")}
                </Button>
            </td>
        </tr>
    }
}

fn cell_input(
    vm: CurriculumEditorViewModel,
    index: usize,
    field: ItemField,
    commit_on_change: bool,
) -> AnyView {
    let value = move || {
        vm.state.with(|s| {
            s.draft
                .as_ref()
                .and_then(|d| d.item(index))
                .map(|item| item.get(field).to_string())
                .unwrap_or_default()
        })
    };
    let error = move || {
        vm.state.with(|s| {
            s.errors
                .item(index, field)
                .map(|msg| view! { <div class="field-error">{msg.to_string()}</div> })
        })
    };
    let class = move || {
        let invalid = vm.state.with(|s| s.errors.item(index, field).is_some());
        if invalid {
            "cell-input cell-input--invalid"
        } else {
            "cell-input"
        }
    };

    if commit_on_change {
        view! {
            <input
                type="text"
                class=class
                prop:value=value
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    vm.state.update(|s| s.update_item(index, field, text));
                }
            />
            {error}
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                class=class
                prop:value=value
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    vm.state.update(|s| s.update_item(index, field, text));
                }
            />
            {error}
        }
        .into_any()
    }
}
