use leptos::prelude::*;
use wasm_bindgen::JsCast;
use crate::config::PlotLayout;
use crate::state::AppState;

fn selected_values(select: &web_sys::HtmlSelectElement) -> Vec<String> {
    let chosen = select.selected_options();
    (0..chosen.length())
        .filter_map(|i| chosen.item(i))
        .filter_map(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
        .map(|opt| opt.value())
        .collect()
}

/// Plot-type selector. Hidden for the fixed layout, a plain select for the
/// selectable layout, and a multi-select otherwise.
#[component]
pub fn PlotKeyPicker() -> impl IntoView {
    let state = expect_context::<AppState>();
    let layout = state.layout();

    let key_options = move || {
        state.available_plot_keys().into_iter().map(|key| {
            let k = key.clone();
            let text = key.clone();
            view! {
                <option
                    value=key
                    prop:selected=move || state.selected_plot_keys.with(|s| s.contains(&k))
                >{text}</option>
            }
        }).collect_view()
    };

    let picker = match layout {
        PlotLayout::Fixed => None,
        PlotLayout::Selectable => Some(view! {
            <select
                id="plotKeySelector"
                class="setting-select"
                on:change=move |ev| {
                    let key = event_target_value(&ev);
                    state.selected_plot_keys.set(vec![key]);
                }
            >
                {key_options}
            </select>
        }.into_any()),
        PlotLayout::Multi => Some(view! {
            <select
                id="plotKeySelector"
                class="setting-select"
                multiple=true
                on:change=move |ev| {
                    let select: web_sys::HtmlSelectElement = event_target(&ev);
                    state.selected_plot_keys.set(selected_values(&select));
                }
            >
                {key_options}
            </select>
        }.into_any()),
    };

    picker.map(|picker| view! {
        <div class="sidebar-panel plot-key-picker">
            <div class="setting-group">
                <div class="setting-group-title">"Plot type"</div>
                <div class="setting-row">{picker}</div>
            </div>
        </div>
    })
}
