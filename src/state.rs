use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{FrequencyOrder, frequency_table, scatter_series};
use crate::data::filter::{FilterSelection, FilteredView, apply_filter};
use crate::data::model::{CellValue, Column, WorkerTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// First tab group: worker distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionTab {
    #[default]
    LocationType,
    Age,
    ExperienceYears,
}

impl DistributionTab {
    pub const ALL: [DistributionTab; 3] = [
        DistributionTab::LocationType,
        DistributionTab::Age,
        DistributionTab::ExperienceYears,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DistributionTab::LocationType => "Location Type",
            DistributionTab::Age => "Age Distribution",
            DistributionTab::ExperienceYears => "Experience Years",
        }
    }
}

/// Second tab group: productivity score against a work habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitTab {
    #[default]
    CalendarUsage,
    FocusTime,
    TaskCompletion,
}

impl HabitTab {
    pub const ALL: [HabitTab; 3] = [
        HabitTab::CalendarUsage,
        HabitTab::FocusTime,
        HabitTab::TaskCompletion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HabitTab::CalendarUsage => "Calendar Scheduling Usage",
            HabitTab::FocusTime => "Focus Time (minutes)",
            HabitTab::TaskCompletion => "Task Completion Rate",
        }
    }

    /// Column plotted on the x axis.
    pub fn predictor(self) -> Column {
        match self {
            HabitTab::CalendarUsage => Column::CalendarScheduledUsage,
            HabitTab::FocusTime => Column::FocusTimeMinutes,
            HabitTab::TaskCompletion => Column::TaskCompletionRate,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything the charts draw, derived from the current filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub location_counts: Vec<(CellValue, usize)>,
    pub age_counts: Vec<(CellValue, usize)>,
    pub experience_counts: Vec<(CellValue, usize)>,
    pub calendar_series: Vec<[f64; 2]>,
    pub focus_series: Vec<[f64; 2]>,
    pub completion_series: Vec<[f64; 2]>,
}

impl DashboardViews {
    /// Recompute every view from scratch.
    pub fn compute(view: &FilteredView<'_>) -> Result<Self> {
        let series = |tab: HabitTab| scatter_series(view, tab.predictor(), Column::ProductivityScore);
        Ok(DashboardViews {
            location_counts: frequency_table(view, Column::LocationType, FrequencyOrder::Discovery),
            age_counts: frequency_table(view, Column::Age, FrequencyOrder::Natural),
            experience_counts: frequency_table(view, Column::ExperienceYears, FrequencyOrder::Natural),
            calendar_series: series(HabitTab::CalendarUsage)?,
            focus_series: series(HabitTab::FocusTime)?,
            completion_series: series(HabitTab::TaskCompletion)?,
        })
    }

    pub fn counts(&self, tab: DistributionTab) -> &[(CellValue, usize)] {
        match tab {
            DistributionTab::LocationType => &self.location_counts,
            DistributionTab::Age => &self.age_counts,
            DistributionTab::ExperienceYears => &self.experience_counts,
        }
    }

    pub fn series(&self, tab: HabitTab) -> &[[f64; 2]] {
        match tab {
            HabitTab::CalendarUsage => &self.calendar_series,
            HabitTab::FocusTime => &self.focus_series,
            HabitTab::TaskCompletion => &self.completion_series,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until a load succeeds).
    pub table: Option<Arc<WorkerTable>>,

    /// Options of the industry selector, in first-seen order.
    pub sectors: Vec<String>,

    /// Current industry selection.
    pub selection: FilterSelection,

    /// Indices of workers passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Charts derived from `visible_indices` (cached).
    pub views: DashboardViews,

    /// Location colours, stable across selections.
    pub location_colors: Option<ColorMap>,

    pub distribution_tab: DistributionTab,
    pub habit_tab: HabitTab,

    /// Set when the dataset could not be loaded; the dashboard is not shown.
    pub load_error: Option<String>,

    /// Message shown in the top bar.
    pub status: Option<Status>,
}

impl AppState {
    /// Build the state from the result of the initial load.
    pub fn from_load(result: Result<Arc<WorkerTable>>) -> Self {
        let mut state = AppState::default();
        match result {
            Ok(table) => state.set_table(table),
            Err(e) => state.fail_load(&e),
        }
        state
    }

    /// Ingest a newly loaded table and reset the selection.
    pub fn set_table(&mut self, table: Arc<WorkerTable>) {
        self.sectors = table.industry_sectors();
        self.location_colors = Some(ColorMap::new(&table.distinct_values(Column::LocationType)));
        if table.is_empty() {
            log::warn!("Dataset has a header but no workers");
        }
        self.table = Some(table);
        self.load_error = None;
        self.status = None;
        self.set_selection(FilterSelection::default());
    }

    pub fn fail_load(&mut self, err: &DashboardError) {
        log::error!("Failed to load dataset: {err}");
        self.load_error = Some(err.to_string());
    }

    /// The current filtered view, if a table is loaded.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        let table = self.table.as_deref()?;
        Some(FilteredView::from_indices(table, self.visible_indices.clone()))
    }

    /// Replace the selection wholesale and recompute.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.refilter();
    }

    pub fn toggle_sector(&mut self, sector: &str) {
        self.selection.toggle(sector);
        self.refilter();
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(FilterSelection::default());
    }

    /// Recompute `visible_indices` and every derived view.
    pub fn refilter(&mut self) {
        let Some(table) = self.table.as_deref() else {
            return;
        };
        let view = apply_filter(table, &self.selection);
        match DashboardViews::compute(&view) {
            Ok(views) => self.views = views,
            Err(e) => {
                log::error!("Failed to compute views: {e}");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
        log::debug!(
            "Selection {:?}: {} of {} workers visible",
            self.selection.iter().collect::<Vec<_>>(),
            view.len(),
            table.len()
        );
        self.visible_indices = view.into_indices();
    }
}
