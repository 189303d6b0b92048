//! Chart aggregation over the whole material collection.
//!
//! Produces plotly-compatible figure JSON (`{"data": [...], "layout": {...}}`)
//! with every statistic computed server side.

use matdb_persistence::core::MaterialStorage;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::RestResult;

const CRYSTAL_SYSTEM: &str = "crystal_system";
const SPACE_GROUP: &str = "space_group_symbol";
const SITES: &str = "Sites";

/// The three dashboard figures.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    /// Pie of crystal systems.
    pub crystal_pie: Value,
    /// Pie of the most frequent space groups.
    pub space_group_pie: Value,
    /// Histogram of site counts with a box summary above it.
    pub sites_hist: Value,
}

/// One histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Values falling in the bin.
    pub count: u64,
}

impl Bin {
    /// Midpoint of the bin.
    pub fn centre(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Distance between the edges.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Five-number summary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Counts distinct values, ordered by first appearance.
pub fn category_counts<'v, I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'v str>,
{
    let mut counts: Vec<(String, u64)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(label, _)| label == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Keeps the `k` most frequent categories; ties keep first-appearance order.
pub fn top_k(mut counts: Vec<(String, u64)>, k: usize) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(k);
    counts
}

/// Equal-width histogram over the observed range.
///
/// When every value is equal the result is a single bin of width 1 centred
/// on that value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    if max == min {
        return vec![Bin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

/// Quartiles by linear interpolation between closest ranks.
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let quantile = |p: f64| {
        let position = p * (sorted.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
    };

    Some(BoxSummary {
        min: sorted[0],
        q1: quantile(0.25),
        median: quantile(0.5),
        q3: quantile(0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Builds the dashboard figures from a projection scan.
pub struct ChartService<'a, S: ?Sized> {
    storage: &'a S,
    top_space_groups: usize,
    histogram_bins: usize,
}

impl<'a, S> ChartService<'a, S>
where
    S: MaterialStorage + ?Sized,
{
    /// Creates a chart service keeping `top_space_groups` groups and
    /// `histogram_bins` bins.
    pub fn new(storage: &'a S, top_space_groups: usize, histogram_bins: usize) -> Self {
        Self {
            storage,
            top_space_groups,
            histogram_bins,
        }
    }

    /// Scans the collection and assembles all three figures.
    pub async fn compute(&self) -> RestResult<ChartSet> {
        let rows = self
            .storage
            .scan_fields(&[CRYSTAL_SYSTEM, SPACE_GROUP, SITES])
            .await?;
        debug!(rows = rows.len(), "Computing charts");

        let systems = category_counts(rows.iter().filter_map(|r| text(r, CRYSTAL_SYSTEM)));
        let groups = top_k(
            category_counts(rows.iter().filter_map(|r| text(r, SPACE_GROUP))),
            self.top_space_groups,
        );
        let sites: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.get(SITES).and_then(Value::as_f64))
            .collect();

        Ok(ChartSet {
            crystal_pie: pie_figure(&systems, "Distribution of Crystal Systems"),
            space_group_pie: pie_figure(
                &groups,
                &format!("Top {} Space Group Symbols", self.top_space_groups),
            ),
            sites_hist: histogram_figure(
                &histogram(&sites, self.histogram_bins),
                box_summary(&sites),
                "Distribution of Materials by Sites",
            ),
        })
    }
}

fn text<'v>(row: &'v Value, field: &str) -> Option<&'v str> {
    row.get(field).and_then(Value::as_str)
}

fn pie_figure(counts: &[(String, u64)], title: &str) -> Value {
    let labels: Vec<&str> = counts.iter().map(|(label, _)| label.as_str()).collect();
    let values: Vec<u64> = counts.iter().map(|(_, count)| *count).collect();
    json!({
        "data": [{"type": "pie", "labels": labels, "values": values}],
        "layout": {"title": {"text": title}, "legend": {"tracegroupgap": 0}}
    })
}

fn histogram_figure(bins: &[Bin], summary: Option<BoxSummary>, title: &str) -> Value {
    let mut data = vec![json!({
        "type": "bar",
        "name": SITES,
        "x": bins.iter().map(Bin::centre).collect::<Vec<_>>(),
        "y": bins.iter().map(|b| b.count).collect::<Vec<_>>(),
        "width": bins.iter().map(Bin::width).collect::<Vec<_>>(),
        "xaxis": "x",
        "yaxis": "y"
    })];

    if let Some(s) = summary {
        data.push(json!({
            "type": "box",
            "name": SITES,
            "orientation": "h",
            "lowerfence": [s.min],
            "q1": [s.q1],
            "median": [s.median],
            "q3": [s.q3],
            "upperfence": [s.max],
            "xaxis": "x",
            "yaxis": "y2"
        }));
    }

    json!({
        "data": data,
        "layout": {
            "title": {"text": title},
            "barmode": "relative",
            "xaxis": {"title": {"text": SITES}},
            "yaxis": {"title": {"text": "count"}, "domain": [0.0, 0.74]},
            "yaxis2": {"domain": [0.75, 1.0], "showticklabels": false}
        }
    })
}
