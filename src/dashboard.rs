// Dashboard: layout description and the selection-changed handler

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::aggregate::{aggregate, YearlyCount};
use crate::chart::TrendChart;
use crate::dataset::Dataset;
use crate::ideology::Ideology;

pub const HEADING: &str = "Political Ideology Trends Over Time";
pub const SELECTOR_LABEL: &str = "Select Ideology:";
pub const SELECTOR_ID: &str = "ideology_selector";
pub const CHART_ID: &str = "trend_chart";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
}

/// What the front end needs to draw the page before any chart exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub heading: String,
    pub selector_id: String,
    pub selector_label: String,
    pub options: Vec<SelectorOption>,
    pub default_value: String,
    pub clearable: bool,
    pub chart_id: String,
}

/// A user picked a value in the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub value: String,
}

impl SelectionChanged {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// Holds the loaded table and answers selection events.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    default_selection: Ideology,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_default(dataset, Ideology::default())
    }

    pub fn with_default(dataset: Arc<Dataset>, default_selection: Ideology) -> Self {
        Self {
            dataset,
            default_selection,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn default_selection(&self) -> Ideology {
        self.default_selection
    }

    pub fn layout(&self) -> Layout {
        Layout {
            heading: HEADING.to_string(),
            selector_id: SELECTOR_ID.to_string(),
            selector_label: SELECTOR_LABEL.to_string(),
            options: Ideology::ALL
                .iter()
                .map(|i| SelectorOption {
                    label: i.label().to_string(),
                    value: i.as_str().to_string(),
                })
                .collect(),
            default_value: self.default_selection.as_str().to_string(),
            clearable: false,
            chart_id: CHART_ID.to_string(),
        }
    }

    pub fn counts(&self, selected: &str) -> Vec<YearlyCount> {
        aggregate(self.dataset.records(), selected)
    }

    /// Counts and chart for one selection, aggregated once.
    pub fn trend(&self, selected: &str) -> (Vec<YearlyCount>, TrendChart) {
        let counts = self.counts(selected);
        let chart = TrendChart::build(selected, &counts);
        (counts, chart)
    }

    /// Re-render the chart for a new selection.
    pub fn handle(&self, event: &SelectionChanged) -> TrendChart {
        let (counts, chart) = self.trend(&event.value);
        debug!(selected = %event.value, years = counts.len(), "selection changed");
        chart
    }

    pub fn update_chart(&self, selected: &str) -> TrendChart {
        self.handle(&SelectionChanged::new(selected))
    }

    /// Chart shown before the user touches the selector.
    pub fn initial_chart(&self) -> TrendChart {
        self.update_chart(self.default_selection.as_str())
    }
}
