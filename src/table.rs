use crate::config::PlotLayout;
use crate::types::Record;

pub const NO_PLOT_ALT: &str = "No plot available";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Bird,
    StimPhase,
    PutativeCall,
    Block,
    /// Image column. `None` for the fixed layout's single plot.
    Plot(Option<String>),
    PlotId,
    WavFilename,
}

impl Column {
    pub fn header(&self) -> String {
        match self {
            Column::Bird => "Bird".into(),
            Column::StimPhase => "Stim phase".into(),
            Column::PutativeCall => "Putative call".into(),
            Column::Block => "Block".into(),
            Column::Plot(None) => "Plot".into(),
            Column::Plot(Some(key)) => key.clone(),
            Column::PlotId => "Plot ID".into(),
            Column::WavFilename => "WAV filename".into(),
        }
    }

    /// Text content for non-image columns.
    pub fn text(&self, rec: &Record) -> Option<String> {
        match self {
            Column::Bird => Some(rec.bird.clone()),
            Column::StimPhase => Some(rec.stim_phase.clone()),
            Column::PutativeCall => Some(rec.putative_call.to_string()),
            Column::Block => Some(rec.block.to_string()),
            Column::Plot(_) => None,
            Column::PlotId => Some(rec.plot_id.clone()),
            Column::WavFilename => Some(rec.wav_filename.clone()),
        }
    }
}

/// Full column set for the given layout and selected plot-type keys.
///
/// Always 4 leading columns, then the image column(s), then 2 trailing ones.
/// `Selectable` uses at most the first selected key; `Fixed` ignores keys.
pub fn columns(layout: PlotLayout, selected_keys: &[String]) -> Vec<Column> {
    let mut cols = vec![Column::Bird, Column::StimPhase, Column::PutativeCall, Column::Block];
    match layout {
        PlotLayout::Fixed => cols.push(Column::Plot(None)),
        PlotLayout::Selectable => {
            let key = selected_keys.first().cloned();
            cols.push(Column::Plot(Some(key.unwrap_or_default())));
        }
        PlotLayout::Multi => {
            cols.extend(selected_keys.iter().cloned().map(|k| Column::Plot(Some(k))));
        }
    }
    cols.push(Column::PlotId);
    cols.push(Column::WavFilename);
    cols
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotImage {
    pub src: String,
    pub alt: String,
}

impl PlotImage {
    pub fn placeholder() -> Self {
        Self { src: String::new(), alt: NO_PLOT_ALT.to_string() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.src.is_empty()
    }
}

/// Image for one record in one plot column. Missing paths never fail the
/// row; they yield the placeholder.
pub fn plot_image(rec: &Record, key: Option<&str>) -> PlotImage {
    let Some(plots) = &rec.plot_filename else {
        return PlotImage::placeholder();
    };
    let found = match key {
        None => plots.single(),
        Some(key) => plots.path_for(key),
    };
    match (found, key) {
        (Some(path), Some(key)) => PlotImage {
            src: path.to_string(),
            alt: format!("{} - {}", rec.plot_id, key),
        },
        (Some(path), None) => PlotImage {
            src: path.to_string(),
            alt: rec.plot_id.clone(),
        },
        (None, _) => PlotImage::placeholder(),
    }
}

pub fn result_label(count: usize) -> String {
    format!("{count} trials found.")
}
