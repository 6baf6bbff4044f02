use leptos::prelude::*;
use crate::filter::{FilterField, FilterOptions};
use crate::state::AppState;

fn options_of(state: AppState, pick: fn(&FilterOptions) -> &Vec<String>) -> Signal<Vec<String>> {
    Signal::derive(move || {
        state
            .dataset
            .with(|d| d.as_ref().map(|d| pick(&d.options).clone()).unwrap_or_default())
    })
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="sidebar-panel filter-bar">
            <div class="setting-group">
                <div class="setting-group-title">"Filters"</div>
                <FilterSelect id="birdFilter" label="Bird" field=FilterField::Bird
                    options=options_of(state, |o| &o.birds) />
                <FilterSelect id="stimPhaseFilter" label="Stim phase" field=FilterField::StimPhase
                    options=options_of(state, |o| &o.stim_phases) />
                <FilterSelect id="blockFilter" label="Block" field=FilterField::Block
                    options=options_of(state, |o| &o.blocks) />
                <FilterSelect id="putativeCallFilter" label="Putative call" field=FilterField::PutativeCall
                    options=options_of(state, |o| &o.putative_calls) />
                <FilterText id="wavFilenameFilter" label="WAV filename" field=FilterField::WavFilename />
                <FilterText id="plotIDFilter" label="Plot ID" field=FilterField::PlotId />
                <div class="setting-row">
                    <button
                        class="setting-button"
                        disabled=move || state.filters.with(|f| f.is_empty())
                        on:click=move |_| state.clear_filters()
                    >
                        {move || match state.filters.with(|f| f.active_count()) {
                            0 => "Clear filters".to_string(),
                            n => format!("Clear filters ({n})"),
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FilterSelect(
    id: &'static str,
    label: &'static str,
    field: FilterField,
    #[prop(into)] options: Signal<Vec<String>>,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let current = move || state.filters.with(|f| f.get(field).unwrap_or_default().to_string());

    view! {
        <div class="setting-row">
            <label class="setting-label" for=id>{label}</label>
            <select
                id=id
                class="setting-select"
                on:change=move |ev| state.set_filter(field, &event_target_value(&ev))
            >
                <option value="" prop:selected=move || current().is_empty()>"All"</option>
                {move || options.get().into_iter().map(|value| {
                    let is_current = value.clone();
                    let text = value.clone();
                    view! {
                        <option
                            value=value
                            prop:selected=move || current() == is_current
                        >{text}</option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// Free-text substring filter, applied on `change` (blur or Enter).
#[component]
fn FilterText(id: &'static str, label: &'static str, field: FilterField) -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="setting-row">
            <label class="setting-label" for=id>{label}</label>
            <input
                id=id
                type="text"
                class="setting-input"
                placeholder="contains..."
                prop:value=move || state.filters.with(|f| f.get(field).unwrap_or_default().to_string())
                on:change=move |ev| state.set_filter(field, &event_target_value(&ev))
            />
        </div>
    }
}
