use serde::Serialize;
use serde_json::{json, Value};

use crate::aggregate::YearlyCount;
use crate::ideology::capitalize;

pub const X_AXIS_TITLE: &str = "Year";
pub const Y_AXIS_TITLE: &str = "Count";
pub const BAR_HOVER_LABEL: &str = "Number of Countries";
pub const BAR_OPACITY: f64 = 0.7;
pub const TEMPLATE_NAME: &str = "plotly_white";

const GRID_COLOR: &str = "#EBF0F8";
const FONT_COLOR: &str = "#2a3f5f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// One trace of the chart. Both series share the same x/y data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub name: String,
    pub x: Vec<i32>,
    pub y: Vec<usize>,
}

/// Bar chart of yearly counts with a trend line drawn over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bar: Series,
    pub line: Series,
}

impl TrendChart {
    pub fn build(selected: &str, counts: &[YearlyCount]) -> Self {
        let x: Vec<i32> = counts.iter().map(|c| c.year).collect();
        let y: Vec<usize> = counts.iter().map(|c| c.count).collect();

        Self {
            title: chart_title(selected),
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            bar: Series {
                kind: SeriesKind::Bar,
                name: BAR_HOVER_LABEL.to_string(),
                x: x.clone(),
                y: y.clone(),
            },
            line: Series {
                kind: SeriesKind::Line,
                name: "Trend".to_string(),
                x,
                y,
            },
        }
    }

    /// No bars to draw (unknown selection, or nothing recorded for it).
    pub fn is_empty(&self) -> bool {
        self.bar.x.is_empty()
    }

    /// Highest bar, used for axis bounds in the terminal view.
    pub fn max_count(&self) -> usize {
        self.bar.y.iter().copied().max().unwrap_or(0)
    }

    /// Plotly figure (`{"data": [...], "layout": {...}}`) for the web page.
    pub fn to_figure(&self) -> Value {
        json!({
            "data": [
                {
                    "type": "bar",
                    "name": self.bar.name,
                    "x": self.bar.x,
                    "y": self.bar.y,
                    "opacity": BAR_OPACITY,
                    "hovertemplate": format!("{}=%{{x}}<br>{}=%{{y}}<extra></extra>", X_AXIS_TITLE, BAR_HOVER_LABEL),
                },
                {
                    "type": "scatter",
                    "mode": "lines",
                    "name": self.line.name,
                    "x": self.line.x,
                    "y": self.line.y,
                }
            ],
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_title } },
                "yaxis": { "title": { "text": self.y_title } },
                "template": plotly_white(),
                "showlegend": false,
            }
        })
    }
}

/// The `plotly_white` theme as a template object. plotly.js only takes template
/// objects, so the theme is spelled out instead of named.
pub fn plotly_white() -> Value {
    let axis = json!({
        "gridcolor": GRID_COLOR,
        "linecolor": GRID_COLOR,
        "zerolinecolor": GRID_COLOR,
        "zerolinewidth": 2,
        "ticks": "",
        "automargin": true,
        "title": { "standoff": 15 },
    });

    json!({
        "layout": {
            "font": { "color": FONT_COLOR },
            "paper_bgcolor": "white",
            "plot_bgcolor": "white",
            "hovermode": "closest",
            "colorway": [
                "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A",
                "#19d3f3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52"
            ],
            "xaxis": axis.clone(),
            "yaxis": axis,
            "title": { "x": 0.05 },
        },
        "data": {
            "bar": [{ "marker": { "line": { "color": "white", "width": 0.5 } } }],
        },
        "name": TEMPLATE_NAME,
    })
}

pub fn chart_title(selected: &str) -> String {
    format!("Number of {} Governments Over Time", capitalize(selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Vec<YearlyCount> {
        vec![
            YearlyCount { year: 1990, count: 4 },
            YearlyCount { year: 1991, count: 7 },
        ]
    }

    #[test]
    fn test_title_names_selection() {
        assert_eq!(chart_title("leftist"), "Number of Leftist Governments Over Time");
        assert_eq!(chart_title("rightist"), "Number of Rightist Governments Over Time");
    }

    #[test]
    fn test_bar_and_line_share_data() {
        let chart = TrendChart::build("centrist", &counts());

        assert_eq!(chart.bar.kind, SeriesKind::Bar);
        assert_eq!(chart.line.kind, SeriesKind::Line);
        assert_eq!(chart.bar.x, vec![1990, 1991]);
        assert_eq!(chart.bar.y, vec![4, 7]);
        assert_eq!(chart.bar.x, chart.line.x);
        assert_eq!(chart.bar.y, chart.line.y);
        assert_eq!(chart.x_title, "Year");
        assert_eq!(chart.y_title, "Count");
        assert_eq!(chart.max_count(), 7);
    }

    #[test]
    fn test_empty_chart() {
        let chart = TrendChart::build("monarchist", &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.max_count(), 0);
        assert_eq!(chart.title, "Number of Monarchist Governments Over Time");
    }

    #[test]
    fn test_figure_layout() {
        let fig = TrendChart::build("leftist", &counts()).to_figure();

        assert_eq!(fig["data"][0]["type"], "bar");
        assert_eq!(fig["data"][0]["opacity"], 0.7);
        assert_eq!(fig["data"][1]["type"], "scatter");
        assert_eq!(fig["data"][1]["mode"], "lines");
        assert_eq!(fig["data"][1]["y"], json!([4, 7]));
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Year");
        assert_eq!(fig["layout"]["yaxis"]["title"]["text"], "Count");

        let template = &fig["layout"]["template"];
        assert!(template.is_object());
        assert_eq!(template["layout"]["plot_bgcolor"], "white");
        assert_eq!(template["layout"]["paper_bgcolor"], "white");
        assert_eq!(template["layout"]["xaxis"]["gridcolor"], "#EBF0F8");
        assert_eq!(template["layout"]["yaxis"]["gridcolor"], "#EBF0F8");
        assert_eq!(
            fig["layout"]["title"]["text"],
            "Number of Leftist Governments Over Time"
        );
    }
}
