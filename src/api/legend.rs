use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::Color;

use super::SeriesView;

/// One row of the graph legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub name: String,
    pub color: Color,
    pub selected: bool,
    /// Another series is selected, so this one is hidden from the plot.
    pub dimmed: bool,
}

/// Visibility of the legend panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendState {
    shown: bool,
    collapsable: bool,
}

impl LegendState {
    #[must_use]
    pub fn new(shown: bool, collapsable: bool) -> Self {
        // A legend that cannot be collapsed is always shown.
        Self {
            shown: shown || !collapsable,
            collapsable,
        }
    }

    #[must_use]
    pub fn is_shown(self) -> bool {
        self.shown
    }

    #[must_use]
    pub fn is_collapsable(self) -> bool {
        self.collapsable
    }

    /// Flips visibility when collapsing is allowed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.collapsable {
            self.shown = !self.shown;
            debug!(shown = self.shown, "legend toggled");
        }
        self.shown
    }
}

/// Legend rows in series order, annotated with the current selection.
#[must_use]
pub fn legend_entries(series: &[SeriesView], selected_key: Option<&str>) -> Vec<LegendEntry> {
    series
        .iter()
        .map(|view| {
            let selected = selected_key == Some(view.series.key.as_str());
            LegendEntry {
                key: view.series.key.clone(),
                name: view.series.name.clone(),
                color: view.color,
                selected,
                dimmed: selected_key.is_some() && !selected,
            }
        })
        .collect()
}

/// Selection after clicking `clicked`: clicking the selected series clears it.
#[must_use]
pub fn toggle_selection(current: Option<&str>, clicked: Option<&str>) -> Option<String> {
    match (current, clicked) {
        (Some(current), Some(clicked)) if current == clicked => None,
        (_, clicked) => clicked.map(str::to_owned),
    }
}
