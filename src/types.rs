use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// One trial's metadata entry, as produced by the plotting pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record {
    pub bird: String,
    pub stim_phase: String,
    pub block: BlockId,
    pub putative_call: PutativeCall,
    pub wav_filename: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub plot_id: String,
    #[serde(default)]
    pub plot_filename: Option<PlotPaths>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Block identifiers show up as both numbers and strings depending on the
/// export script, so both are accepted and compared through `as_filter_value`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BlockId {
    Number(serde_json::Number),
    Text(String),
}

impl BlockId {
    pub fn as_filter_value(&self) -> String {
        match self {
            BlockId::Number(n) => format_number(n),
            BlockId::Text(s) => s.clone(),
        }
    }

    /// Ascending order: numbers by value first, then text lexically.
    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (BlockId::Number(a), BlockId::Number(b)) => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (BlockId::Number(_), BlockId::Text(_)) => Ordering::Less,
            (BlockId::Text(_), BlockId::Number(_)) => Ordering::Greater,
            (BlockId::Text(a), BlockId::Text(b)) => a.cmp(b),
        }
    }
}

/// Integral floats (`1.0` from pandas exports) print without the fraction.
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
            format!("{}", v as i64)
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_filter_value())
    }
}

/// Putative call marker. Older exports wrote a label ("yes"/"no"), newer
/// ones a boolean. Resolved once at deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PutativeCall {
    Flag(bool),
    Label(String),
}

impl PutativeCall {
    pub fn as_filter_value(&self) -> String {
        match self {
            PutativeCall::Flag(b) => b.to_string(),
            PutativeCall::Label(s) => s.clone(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            PutativeCall::Flag(b) => value.parse::<bool>().map_or(false, |v| v == *b),
            PutativeCall::Label(s) => s == value,
        }
    }
}

impl fmt::Display for PutativeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutativeCall::Flag(b) => write!(f, "{b}"),
            PutativeCall::Label(s) => f.write_str(s),
        }
    }
}

/// Image path(s) for a trial: either one plot, or one per plot type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlotPaths {
    Single(String),
    /// `null` entries are plot types that were not generated for this trial.
    Keyed(BTreeMap<String, Option<String>>),
}

impl PlotPaths {
    /// Path for `key`, if any. A single path answers every key.
    pub fn path_for(&self, key: &str) -> Option<&str> {
        let path = match self {
            PlotPaths::Single(path) => path.as_str(),
            PlotPaths::Keyed(map) => map.get(key)?.as_deref()?,
        };
        (!path.is_empty()).then_some(path)
    }

    pub fn single(&self) -> Option<&str> {
        match self {
            PlotPaths::Single(path) if !path.is_empty() => Some(path),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let map = match self {
            PlotPaths::Keyed(map) => Some(map),
            PlotPaths::Single(_) => None,
        };
        map.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }
}
