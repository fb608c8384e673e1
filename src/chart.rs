use crate::stats::TypeStat;
use serde::Serialize;

/// Slices under this share of the circle get no in-slice label.
const LABEL_MIN_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub count: usize,
    /// Degrees, clockwise from the positive x axis.
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    pub color: String,
    pub show_label: bool,
}

impl PieSlice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep() / 2.0
    }

    /// SVG path for this wedge on a circle centred at (`cx`, `cy`).
    pub fn svg_path(&self, cx: f64, cy: f64, r: f64) -> String {
        let (x1, y1) = polar(cx, cy, r, self.start_angle);
        let (x2, y2) = polar(cx, cy, r, self.end_angle);
        if self.sweep() >= 360.0 - 1e-9 {
            // a single arc cannot close on itself; draw two halves
            let (xm, ym) = polar(cx, cy, r, self.start_angle + 180.0);
            return format!(
                "M {x1:.3} {y1:.3} A {r:.3} {r:.3} 0 1 1 {xm:.3} {ym:.3} A {r:.3} {r:.3} 0 1 1 {x1:.3} {y1:.3} Z"
            );
        }
        let large = u8::from(self.large_arc);
        format!("M {cx:.3} {cy:.3} L {x1:.3} {y1:.3} A {r:.3} {r:.3} 0 {large} 1 {x2:.3} {y2:.3} Z")
    }
}

fn polar(cx: f64, cy: f64, r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarHeight {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub count: usize,
    /// Percent of the tallest bar.
    pub height: f64,
    pub color: String,
}

/// Partition the circle in distribution order. Never re-sorts its input.
pub fn to_pie_slices(distribution: &[TypeStat]) -> Vec<PieSlice> {
    let total: usize = distribution.iter().map(|s| s.count).sum();
    if total == 0 { return Vec::new(); }

    let mut start = 0.0_f64;
    let mut out = Vec::with_capacity(distribution.len());
    for stat in distribution.iter().filter(|s| s.count > 0) {
        let sweep = 360.0 * stat.count as f64 / total as f64;
        let end = start + sweep;
        out.push(PieSlice {
            entry_type: stat.entry_type.clone(),
            count: stat.count,
            start_angle: start,
            end_angle: end,
            large_arc: sweep > 180.0,
            color: stat.color.clone(),
            show_label: stat.count as f64 / total as f64 * 100.0 > LABEL_MIN_PERCENT,
        });
        start = end;
    }
    out
}

pub fn to_bar_heights(distribution: &[TypeStat]) -> Vec<BarHeight> {
    let max = distribution.iter().map(|s| s.count).max().unwrap_or(0);
    if max == 0 { return Vec::new(); }
    distribution
        .iter()
        .map(|s| BarHeight {
            entry_type: s.entry_type.clone(),
            count: s.count,
            height: s.count as f64 / max as f64 * 100.0,
            color: s.color.clone(),
        })
        .collect()
}
