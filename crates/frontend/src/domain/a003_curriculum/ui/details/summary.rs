use super::view_model::CurriculumEditorViewModel;
use crate::shared::icons::icon;
use contracts::domain::a003_curriculum::{group_for_summary, Curriculum};
use leptos::prelude::*;
use thaw::*;

/// Format a unit total without a trailing ".0" for whole numbers
fn format_units(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{}", total as i64)
    } else {
        format!("{:.1}", total)
    }
}

/// Read-only curriculum view, years in order and terms alphabetically
#[component]
pub fn CurriculumSummaryView(vm: CurriculumEditorViewModel) -> impl IntoView {
    let viewing = Memo::new(move |_| vm.state.with(|s| s.viewing.clone()));

    move || {
        let Some(curriculum) = viewing.get() else {
            return view! { <div></div> }.into_any();
        };
        render_summary(vm, curriculum).into_any()
    }
}

fn render_summary(vm: CurriculumEditorViewModel, curriculum: Curriculum) -> impl IntoView {
    let groups = group_for_summary(&curriculum.items);
    let items = curriculum.items.clone();

    let meta = [
        ("Code", curriculum.program_code.clone()),
        ("Department", curriculum.department_name.clone().unwrap_or_default()),
        (
            "Duration",
            curriculum
                .duration_in_years
                .map(|y| format!("{} year(s)", y))
                .unwrap_or_else(|| "—".to_string()),
        ),
        ("Version", curriculum.version_name.clone().unwrap_or_default()),
        (
            "Effective",
            curriculum
                .effectivity_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
        ),
        ("Total units", format_units(curriculum.total_units())),
    ];

    view! {
        <div class="details-container curriculum-summary">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3>{curriculum.title()}</h3>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.edit_viewed()>
                        {icon("edit")}
                        " Edit"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.back()>
                        {icon("arrow-left")}
                        " Back"
                    </Button>
                </Space>
            </Flex>

            <dl class="curriculum-meta">
                {meta.into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                    .collect_view()}
            </dl>

            {if groups.is_empty() {
                view! { <div class="empty-state">"This curriculum has no subjects."</div> }.into_any()
            } else {
                groups.into_iter().map(|year| {
                    let count = year.item_count();
                    view! {
                        <section class="curriculum-year">
                            <h4>{year.year_label.clone()}" "<small>{format!("({} subjects)", count)}</small></h4>
                            {year.terms.into_iter().map(|term| {
                                let total = format_units(term.total_units(&items));
                                let rows: Vec<_> = term.item_indices.iter()
                                    .filter_map(|&i| items.get(i).cloned())
                                    .collect();
                                view! {
                                    <div class="curriculum-term">
                                        <h5>{term.term.clone()}</h5>
                                        <Table>
                                            <TableHeader>
                                                <TableRow>
                                                    <TableHeaderCell attr:style="width: 140px;">"Subject code"</TableHeaderCell>
                                                    <TableHeaderCell>"Description"</TableHeaderCell>
                                                    <TableHeaderCell attr:style="width: 140px;">"Prerequisite"</TableHeaderCell>
                                                    <TableHeaderCell attr:style="width: 140px;">"Equivalent"</TableHeaderCell>
                                                    <TableHeaderCell attr:style="width: 80px; text-align: right;">"Units"</TableHeaderCell>
                                                </TableRow>
                                            </TableHeader>
                                            <TableBody>
                                                {rows.into_iter().map(|item| view! {
                                                    <TableRow>
                                                        <TableCell><TableCellLayout>{item.subject_code}</TableCellLayout></TableCell>
                                                        <TableCell><TableCellLayout truncate=true>{item.description}</TableCellLayout></TableCell>
                                                        <TableCell><TableCellLayout>{item.prerequisite}</TableCellLayout></TableCell>
                                                        <TableCell><TableCellLayout>{item.equiv_subject_code}</TableCellLayout></TableCell>
                                                        <TableCell attr:style="text-align: right;">{item.units}</TableCell>
                                                    </TableRow>
                                                }).collect_view()}
                                                <TableRow>
                                                    <TableCell attr:colspan="4" attr:style="text-align: right; font-weight: 600;">"Total"</TableCell>
                                                    <TableCell attr:style="text-align: right; font-weight: 600;">{total}</TableCell>
                                                </TableRow>
                                            </TableBody>
                                        </Table>
                                    </div>
                                }
                            }).collect_view()}
                        </section>
                    }
                }).collect_view().into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(0.0), "0");
        assert_eq!(format_units(21.0), "21");
        assert_eq!(format_units(7.5), "7.5");
    }
}
