use leptos::prelude::*;
use crate::config::ViewerConfig;
use crate::loader;
use crate::state::AppState;
use crate::components::data_table::DataTable;
use crate::components::filter_bar::FilterBar;
use crate::components::plot_key_picker::PlotKeyPicker;

#[component]
pub fn App() -> impl IntoView {
    let config = ViewerConfig::from_location();
    let url = config.metadata_url.clone();
    let state = AppState::new(config);
    provide_context(state);

    // Single fetch; on failure the controls stay empty and nothing renders.
    wasm_bindgen_futures::spawn_local(async move {
        match loader::fetch_records(&url).await {
            Ok(records) => {
                log::info!("Data loaded! {} records from {}", records.len(), url);
                state.load(records);
            }
            Err(e) => log::error!("Failed to fetch JSON data: {e}"),
        }
    });

    view! {
        <div class="app">
            <div class="toolbar">
                <span class="toolbar-brand">"Breath figures"</span>
            </div>
            <div class="controls">
                <FilterBar />
                <PlotKeyPicker />
            </div>
            <MainArea />
        </div>
    }
}

#[component]
fn MainArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let loaded = move || state.dataset.with(|d| d.is_some());

    view! {
        <div class="main">
            <DataTable />
            {move || (!loaded()).then(|| view! {
                <div class="empty-state">"Loading trial metadata..."</div>
            })}
        </div>
    }
}
