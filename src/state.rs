use std::sync::Arc;

use leptos::prelude::*;

use crate::config::{PlotLayout, ViewerConfig};
use crate::filter::{FilterField, FilterOptions, FilterState};
use crate::types::Record;

/// The full fetched dataset plus the control options derived from it.
/// Built once when the fetch succeeds; never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub records: Arc<[Record]>,
    pub options: FilterOptions,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let options = FilterOptions::from_records(&records);
        Self { records: records.into(), options }
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<ViewerConfig>,
    /// `None` until the metadata fetch succeeds.
    pub dataset: RwSignal<Option<Dataset>>,
    pub filters: RwSignal<FilterState>,
    pub selected_plot_keys: RwSignal<Vec<String>>,
    /// Current filtered view, recomputed whenever `dataset` or `filters` change.
    pub filtered: Memo<Vec<Record>>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let dataset: RwSignal<Option<Dataset>> = RwSignal::new(None);
        let filters = RwSignal::new(FilterState::default());

        let filtered = Memo::new(move |_| {
            let state = filters.get();
            dataset.with(|d| match d {
                Some(d) => {
                    let view: Vec<Record> = state.apply(&d.records).into_iter().cloned().collect();
                    log::debug!(
                        "{} of {} records match {} active filter(s)",
                        view.len(),
                        d.records.len(),
                        state.active_count()
                    );
                    view
                }
                None => Vec::new(),
            })
        });

        Self {
            config: StoredValue::new(config),
            dataset,
            filters,
            selected_plot_keys: RwSignal::new(Vec::new()),
            filtered,
        }
    }

    pub fn layout(&self) -> PlotLayout {
        self.config.with_value(|c| c.layout)
    }

    /// Installs the loaded dataset and picks the initial plot-type selection.
    pub fn load(&self, records: Vec<Record>) {
        let dataset = Dataset::new(records);
        let keys = self.plot_keys_for(&dataset);
        let initial = match self.layout() {
            PlotLayout::Fixed => Vec::new(),
            PlotLayout::Selectable | PlotLayout::Multi => keys.into_iter().take(1).collect(),
        };
        self.selected_plot_keys.set(initial);
        self.dataset.set(Some(dataset));
    }

    /// Plot-type keys offered by the selector.
    pub fn available_plot_keys(&self) -> Vec<String> {
        self.dataset.with(|d| match d {
            Some(d) => self.plot_keys_for(d),
            None => Vec::new(),
        })
    }

    fn plot_keys_for(&self, dataset: &Dataset) -> Vec<String> {
        let pinned = self.config.with_value(|c| c.plot_keys.clone());
        if pinned.is_empty() {
            dataset.options.plot_keys.clone()
        } else {
            pinned
        }
    }

    pub fn set_filter(&self, field: FilterField, raw: &str) {
        let next = self.filters.with_untracked(|f| f.with(field, raw));
        self.filters.set(next);
    }

    pub fn clear_filters(&self) {
        self.filters.set(FilterState::default());
    }
}
