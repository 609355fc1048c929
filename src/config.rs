/// Location of the worker dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/remote_worker_productivity_1000_final.csv";

/// Static dashboard settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of every chart in the tab groups.
    pub chart_height: f32,
    /// Max height of the raw-table inspector before it scrolls.
    pub table_max_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Remote Worker Analysis".to_string(),
            window_size: [1100.0, 900.0],
            min_window_size: [600.0, 400.0],
            chart_height: 320.0,
            table_max_height: 300.0,
        }
    }
}
