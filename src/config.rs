use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_METADATA_URL: &str = "data/breath_figs/plot_metadata.json";
pub const DEFAULT_IMAGE_WIDTH_PX: u32 = 800;

/// How plot images are laid out in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlotLayout {
    /// One image column showing the record's single plot.
    Fixed,
    /// One image column for the plot type chosen in the selector.
    Selectable,
    /// One image column per selected plot type.
    #[default]
    Multi,
}

impl PlotLayout {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(PlotLayout::Fixed),
            "selectable" | "single" => Ok(PlotLayout::Selectable),
            "multi" => Ok(PlotLayout::Multi),
            other => Err(ConfigError::UnknownLayout(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown plot layout: {0}")]
    UnknownLayout(String),

    #[error("invalid image width: {0}")]
    InvalidWidth(String),

    #[error("malformed query string: {0}")]
    Query(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    pub metadata_url: String,
    pub layout: PlotLayout,
    /// Pinned plot-type keys. Empty means use the keys found in the data.
    pub plot_keys: Vec<String>,
    pub image_width_px: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            layout: PlotLayout::default(),
            plot_keys: Vec::new(),
            image_width_px: DEFAULT_IMAGE_WIDTH_PX,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryOverrides {
    data: Option<String>,
    layout: Option<String>,
    keys: Option<String>,
    width: Option<String>,
}

impl ViewerConfig {
    /// Defaults overlaid with `?data=..&layout=..&keys=a,b&width=..`.
    /// Bad values are logged and skipped; the rest still apply.
    pub fn from_query(search: &str) -> Self {
        let mut cfg = Self::default();
        let overrides = match parse_query(search) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("Ignoring query overrides: {e}");
                return cfg;
            }
        };

        if let Some(url) = overrides.data.filter(|u| !u.trim().is_empty()) {
            cfg.metadata_url = url;
        }
        if let Some(layout) = overrides.layout {
            match PlotLayout::parse(&layout) {
                Ok(l) => cfg.layout = l,
                Err(e) => log::warn!("{e}, using {:?}", cfg.layout),
            }
        }
        if let Some(keys) = overrides.keys {
            cfg.plot_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(width) = overrides.width {
            match parse_width(&width) {
                Ok(w) => cfg.image_width_px = w,
                Err(e) => log::warn!("{e}, using {}px", cfg.image_width_px),
            }
        }
        cfg
    }

    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }
}

fn parse_query(search: &str) -> Result<QueryOverrides, ConfigError> {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        return Ok(QueryOverrides::default());
    }
    serde_qs::from_str(query).map_err(|e| ConfigError::Query(e.to_string()))
}

fn parse_width(s: &str) -> Result<u32, ConfigError> {
    match s.trim().trim_end_matches("px").parse::<u32>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(ConfigError::InvalidWidth(s.to_string())),
    }
}
