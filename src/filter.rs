//! Filter options and the filter predicate over loaded trial records.
//!
//! Both halves are pure: `FilterOptions` is derived once from the full
//! dataset, and `FilterState` is an immutable snapshot of the controls that
//! `apply` evaluates against the records without touching the DOM.

use crate::types::{BlockId, Record};

/// Distinct values offered by each enumerated filter control.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub birds: Vec<String>,
    pub stim_phases: Vec<String>,
    pub blocks: Vec<String>,
    pub putative_calls: Vec<String>,
    /// Plot-type keys seen in any keyed `plot_filename`, sorted.
    pub plot_keys: Vec<String>,
}

impl FilterOptions {
    /// First-seen order for everything except blocks, which sort ascending.
    pub fn from_records(records: &[Record]) -> Self {
        let mut opts = FilterOptions::default();
        let mut blocks: Vec<&BlockId> = Vec::new();

        for rec in records {
            push_distinct(&mut opts.birds, &rec.bird);
            push_distinct(&mut opts.stim_phases, &rec.stim_phase);
            push_distinct(&mut opts.putative_calls, &rec.putative_call.as_filter_value());
            if !blocks.iter().any(|b| b.as_filter_value() == rec.block.as_filter_value()) {
                blocks.push(&rec.block);
            }
            if let Some(plots) = &rec.plot_filename {
                for key in plots.keys() {
                    push_distinct(&mut opts.plot_keys, key);
                }
            }
        }

        blocks.sort_by(|a, b| a.cmp_ascending(b));
        opts.blocks = blocks.iter().map(|b| b.as_filter_value()).collect();
        opts.plot_keys.sort();
        opts
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Snapshot of every filter control. `None` means the control imposes no
/// constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub bird: Option<String>,
    pub stim_phase: Option<String>,
    pub block: Option<String>,
    pub putative_call: Option<String>,
    pub wav_filename: Option<String>,
    pub plot_id: Option<String>,
}

/// Which control a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Bird,
    StimPhase,
    Block,
    PutativeCall,
    WavFilename,
    PlotId,
}

impl FilterState {
    /// Returns a new state with `field` set from a raw control value.
    /// Empty or whitespace-only values clear the constraint.
    pub fn with(&self, field: FilterField, raw: &str) -> Self {
        let value = (!raw.trim().is_empty()).then(|| raw.to_string());
        let mut next = self.clone();
        *next.slot_mut(field) = value;
        next
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        let slot = match field {
            FilterField::Bird => &self.bird,
            FilterField::StimPhase => &self.stim_phase,
            FilterField::Block => &self.block,
            FilterField::PutativeCall => &self.putative_call,
            FilterField::WavFilename => &self.wav_filename,
            FilterField::PlotId => &self.plot_id,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Bird => &mut self.bird,
            FilterField::StimPhase => &mut self.stim_phase,
            FilterField::Block => &mut self.block,
            FilterField::PutativeCall => &mut self.putative_call,
            FilterField::WavFilename => &mut self.wav_filename,
            FilterField::PlotId => &mut self.plot_id,
        }
    }

    pub fn active_count(&self) -> usize {
        [
            &self.bird,
            &self.stim_phase,
            &self.block,
            &self.putative_call,
            &self.wav_filename,
            &self.plot_id,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// True when `rec` satisfies every active constraint.
    pub fn matches(&self, rec: &Record) -> bool {
        let eq = |want: &Option<String>, have: &str| want.as_deref().map_or(true, |w| w == have);
        let contains = |want: &Option<String>, have: &str| {
            want.as_deref()
                .map_or(true, |w| have.to_lowercase().contains(&w.to_lowercase()))
        };

        eq(&self.bird, &rec.bird)
            && eq(&self.stim_phase, &rec.stim_phase)
            && eq(&self.block, &rec.block.as_filter_value())
            && self
                .putative_call
                .as_deref()
                .map_or(true, |w| rec.putative_call.matches(w))
            && contains(&self.wav_filename, &rec.wav_filename)
            && contains(&self.plot_id, &rec.plot_id)
    }

    /// Records satisfying every active constraint, in their original order.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|rec| self.matches(rec)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario() -> Vec<Record> {
        serde_json::from_value(json!([
            { "bird": "A", "stim_phase": "pre",  "block": 1, "putative_call": "yes", "wav_filename": "song1.wav" },
            { "bird": "A", "stim_phase": "post", "block": 2, "putative_call": "no",  "wav_filename": "song2.wav" },
            { "bird": "B", "stim_phase": "pre",  "block": 1, "putative_call": "yes", "wav_filename": "call1.wav" }
        ]))
        .unwrap()
    }

    /// Every combination of two birds, two phases, two blocks and both flags.
    fn grid() -> Vec<Record> {
        let mut rows = Vec::new();
        for bird in ["A", "B"] {
            for phase in ["pre", "post"] {
                for block in [1, 2] {
                    for call in [true, false] {
                        rows.push(json!({
                            "bird": bird,
                            "stim_phase": phase,
                            "block": block,
                            "putative_call": call,
                            "wav_filename": format!("{bird}_{phase}_{block}.WAV"),
                            "plot_id": format!("{bird}-{block}")
                        }));
                    }
                }
            }
        }
        serde_json::from_value(json!(rows)).unwrap()
    }

    #[test]
    fn test_scenario_bird_then_phase() {
        let records = scenario();
        let state = FilterState::default().with(FilterField::Bird, "A");
        let view = state.apply(&records);
        assert_eq!(view, vec![&records[0], &records[1]]);

        let state = state.with(FilterField::StimPhase, "pre");
        let view = state.apply(&records);
        assert_eq!(view, vec![&records[0]]);
    }

    #[test]
    fn test_empty_state_matches_everything() {
        let records = grid();
        let view = FilterState::default().apply(&records);
        assert_eq!(view.len(), records.len());
    }

    #[test]
    fn test_blank_value_clears_constraint() {
        let state = FilterState::default()
            .with(FilterField::Bird, "A")
            .with(FilterField::Bird, "  ");
        assert!(state.is_empty());
        assert_eq!(state.get(FilterField::Bird), None);
    }

    #[test]
    fn test_conjunction_law() {
        let records = grid();
        let state = FilterState::default()
            .with(FilterField::Bird, "B")
            .with(FilterField::Block, "2")
            .with(FilterField::PutativeCall, "true");
        assert_eq!(state.active_count(), 3);

        let view = state.apply(&records);
        let expected: Vec<&Record> = records
            .iter()
            .filter(|r| {
                r.bird == "B"
                    && r.block.as_filter_value() == "2"
                    && r.putative_call.as_filter_value() == "true"
            })
            .collect();
        assert_eq!(view, expected);
        assert_eq!(view.len(), 2);
        for rec in &records {
            assert_eq!(view.contains(&rec), state.matches(rec));
        }
    }

    #[test]
    fn test_order_preserved_and_idempotent() {
        let records = grid();
        let state = FilterState::default().with(FilterField::StimPhase, "post");
        let first = state.apply(&records);
        let second = state.apply(&records);
        assert_eq!(first, second);

        let positions: Vec<usize> = first
            .iter()
            .map(|r| records.iter().position(|x| std::ptr::eq(x, *r)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_text_filters_are_case_insensitive_substrings() {
        let records = grid();
        let state = FilterState::default().with(FilterField::WavFilename, "a_PRE");
        let view = state.apply(&records);
        assert_eq!(view.len(), 4);
        assert!(view.iter().all(|r| r.bird == "A" && r.stim_phase == "pre"));

        let state = FilterState::default().with(FilterField::PlotId, "b-1");
        assert_eq!(state.apply(&records).len(), 4);
    }

    #[test]
    fn test_block_matches_numeric_and_text_ids() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "bird": "A", "stim_phase": "pre", "block": 7, "putative_call": "no", "wav_filename": "a.wav" },
            { "bird": "A", "stim_phase": "pre", "block": "7", "putative_call": "no", "wav_filename": "b.wav" },
            { "bird": "A", "stim_phase": "pre", "block": "07", "putative_call": "no", "wav_filename": "c.wav" }
        ]))
        .unwrap();
        let view = FilterState::default().with(FilterField::Block, "7").apply(&records);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_label_call_filter_is_case_sensitive() {
        let records = scenario();
        let view = FilterState::default()
            .with(FilterField::PutativeCall, "Yes")
            .apply(&records);
        assert!(view.is_empty());
    }

    #[test]
    fn test_options_first_seen_and_sorted_blocks() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "bird": "C", "stim_phase": "post", "block": 10, "putative_call": false, "wav_filename": "1.wav",
              "plot_filename": { "spec": "s1.png" } },
            { "bird": "A", "stim_phase": "pre", "block": 2, "putative_call": true, "wav_filename": "2.wav",
              "plot_filename": { "wave": "w2.png", "spec": "s2.png" } },
            { "bird": "C", "stim_phase": "post", "block": 1, "putative_call": false, "wav_filename": "3.wav" },
            { "bird": "B", "stim_phase": "pre", "block": 2, "putative_call": true, "wav_filename": "4.wav" }
        ]))
        .unwrap();

        let opts = FilterOptions::from_records(&records);
        assert_eq!(opts.birds, vec!["C", "A", "B"]);
        assert_eq!(opts.stim_phases, vec!["post", "pre"]);
        assert_eq!(opts.blocks, vec!["1", "2", "10"]);
        assert_eq!(opts.putative_calls, vec!["false", "true"]);
        assert_eq!(opts.plot_keys, vec!["spec", "wave"]);
    }

    #[test]
    fn test_options_from_empty_dataset() {
        assert_eq!(FilterOptions::from_records(&[]), FilterOptions::default());
    }
}
