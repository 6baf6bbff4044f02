use leptos::prelude::*;
use crate::state::AppState;
use crate::table::{self, Column};
use crate::types::Record;

fn render_cell(col: &Column, rec: &Record, width_px: u32) -> AnyView {
    match col {
        Column::Plot(key) => {
            let img = table::plot_image(rec, key.as_deref());
            let style = if img.is_placeholder() {
                String::new()
            } else {
                format!("width: {width_px}px; height: auto;")
            };
            view! {
                <td class="plot-cell">
                    <img src=img.src alt=img.alt style=style />
                </td>
            }.into_any()
        }
        other => view! { <td>{other.text(rec)}</td> }.into_any(),
    }
}

/// Trials table and result count. Header and body are both rebuilt from the
/// full column set on every change.
#[component]
pub fn DataTable() -> impl IntoView {
    let state = expect_context::<AppState>();
    let layout = state.layout();
    let width_px = state.config.with_value(|c| c.image_width_px);

    let columns = Memo::new(move |_| {
        state.selected_plot_keys.with(|keys| table::columns(layout, keys))
    });

    let label = move || {
        let loaded = state.dataset.with(|d| d.is_some());
        loaded.then(|| table::result_label(state.filtered.with(|rows| rows.len())))
    };

    view! {
        <div class="table-container">
            <div id="dataTable-label" class="table-label">{label}</div>
            <table id="dataTable" class="data-table">
                <thead>
                    <tr>
                        {move || columns.get().into_iter().map(|col| view! {
                            <th>{col.header()}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let cols = columns.get();
                        state.filtered.get().into_iter().map(|rec| view! {
                            <tr>
                                {cols.iter().map(|col| render_cell(col, &rec, width_px)).collect_view()}
                            </tr>
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
