use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::Scheme;
use crate::data::model::CellValue;
use crate::state::{AppState, DistributionTab, HabitTab};

// ---------------------------------------------------------------------------
// Tab strip
// ---------------------------------------------------------------------------

fn tab_strip<T: Copy + PartialEq>(
    ui: &mut Ui,
    current: &mut T,
    tabs: &[T],
    label: fn(T) -> &'static str,
) {
    ui.horizontal(|ui: &mut Ui| {
        for &tab in tabs {
            ui.selectable_value(current, tab, label(tab));
        }
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Distribution charts (first tab group)
// ---------------------------------------------------------------------------

/// Render the worker-distribution tabs over the filtered table.
pub fn distribution_tabs(ui: &mut Ui, state: &mut AppState, height: f32) {
    tab_strip(
        ui,
        &mut state.distribution_tab,
        &DistributionTab::ALL,
        DistributionTab::label,
    );

    let counts = state.views.counts(state.distribution_tab);
    match state.distribution_tab {
        DistributionTab::LocationType => {
            ui.heading("Worker Distribution by Location Type");
            location_chart(ui, state, height);
        }
        DistributionTab::Age => {
            ui.heading("Worker Distribution by Age");
            count_chart(ui, "age_chart", "Age", counts, Scheme::Blues, height);
        }
        DistributionTab::ExperienceYears => {
            ui.heading("Worker Distribution by Experience Years");
            count_chart(
                ui,
                "experience_chart",
                "Years of Experience",
                counts,
                Scheme::Greens,
                height,
            );
        }
    }
}

/// Horizontal bars, one coloured series per location so the legend names them.
fn location_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let charts: Vec<BarChart> = state
        .views
        .location_counts
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            let color = state
                .location_colors
                .as_ref()
                .map(|cm| cm.color_for(value))
                .unwrap_or(Color32::LIGHT_BLUE);
            let name = value.to_string();
            let bar = Bar::new(i as f64, *count as f64)
                .name(&name)
                .fill(color)
                .width(0.7);
            BarChart::new(vec![bar])
                .name(&name)
                .color(color)
                .horizontal()
        })
        .collect();

    let labels: Vec<String> = state
        .views
        .location_counts
        .iter()
        .map(|(value, _)| value.to_string())
        .collect();

    Plot::new("location_chart")
        .legend(Legend::default())
        .x_axis_label("Number of Workers")
        .y_axis_label("Location Type")
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .height(height)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Name of the category drawn at `position`, or nothing between bars.
fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Vertical bars over a numeric axis, shaded by count.
fn count_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    counts: &[(CellValue, usize)],
    scheme: Scheme,
    height: f32,
) {
    let min = counts.iter().map(|(_, c)| *c).min().unwrap_or(0) as f64;
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;

    let bars: Vec<Bar> = counts
        .iter()
        .filter_map(|(value, count)| {
            let x = value.as_f64()?;
            let count = *count as f64;
            Some(
                Bar::new(x, count)
                    .name(format!("{x_label} {value}"))
                    .fill(scheme.color(count, min, max))
                    .width(0.8),
            )
        })
        .collect();

    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label("Number of Workers")
        .height(height)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Workers"));
        });
}

// ---------------------------------------------------------------------------
// Productivity charts (second tab group)
// ---------------------------------------------------------------------------

/// Render productivity score against the selected work habit.
pub fn habit_tabs(ui: &mut Ui, state: &mut AppState, height: f32) {
    tab_strip(ui, &mut state.habit_tab, &HabitTab::ALL, HabitTab::label);

    let tab = state.habit_tab;
    let label = tab.label();
    ui.heading(format!("📈 Productivity Score vs {label}"));

    let series = state.views.series(tab);
    let line: PlotPoints = line_order(series).into_iter().collect();
    let points: PlotPoints = series.iter().copied().collect();

    Plot::new(("habit_chart", label))
        .x_axis_label(label)
        .y_axis_label("Productivity Score")
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line).name(label).width(1.0));
            plot_ui.points(Points::new(points).name(label).radius(2.5));
        });
}

/// The line is traced left to right; the markers keep row order.
fn line_order(series: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_order_sorts_by_x_and_keeps_ties() {
        let series = [[3.0, 70.0], [1.0, 50.0], [3.0, 65.0], [2.0, 60.0]];
        assert_eq!(
            line_order(&series),
            vec![[1.0, 50.0], [2.0, 60.0], [3.0, 70.0], [3.0, 65.0]]
        );
        assert!(line_order(&[]).is_empty());
    }

    #[test]
    fn test_category_label_only_on_bar_positions() {
        let labels = vec!["City".to_string(), "Town".to_string(), "Village".to_string()];
        assert_eq!(category_label(&labels, 0.0), "City");
        assert_eq!(category_label(&labels, 2.0), "Village");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 3.0), "");
    }
}
