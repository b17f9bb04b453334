// src/dashboard/charts.rs

//! Server-side SVG charts for the analytics tab.

use std::f64::consts::PI;
use std::fmt::Write;

use super::page::escape;
use crate::models::HistogramBin;

const PALETTE: &[&str] = &[
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
];

fn color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Splits values into `bins` equal-width buckets between min and max.
///
/// The last bucket is closed on the right. If every value is the same a
/// single bucket of width 1 holds them all.
pub fn histogram(values: &[i64], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    let (min, max) = (min as f64, max as f64);
    if min == max {
        return vec![HistogramBin { start: min, end: min + 1.0, count: values.len() }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v as f64) - min) / width).floor() as usize;
        out[idx.min(bins - 1)].count += 1;
    }
    out
}

/// Pie chart of labelled counts with a legend on the right.
pub fn pie(title: &str, slices: &[(&str, i64)]) -> String {
    let (w, h) = (420.0, 260.0);
    let (cx, cy, r) = (130.0, 140.0, 100.0);
    let total: i64 = slices.iter().map(|(_, v)| (*v).max(0)).sum();

    let mut svg = open_svg(w, h, title);
    if total == 0 {
        no_data(&mut svg, w, h);
        svg.push_str("</svg>");
        return svg;
    }

    let mut angle = -PI / 2.0;
    for (i, (label, value)) in slices.iter().enumerate() {
        let value = (*value).max(0);
        if value == 0 {
            continue;
        }
        let frac = value as f64 / total as f64;
        if frac >= 1.0 {
            let _ = write!(
                svg,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"><title>{}: {value}</title></circle>"#,
                color(i),
                escape(label)
            );
        } else {
            let end = angle + frac * 2.0 * PI;
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if frac > 0.5 { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M{cx},{cy} L{x1:.2},{y1:.2} A{r},{r} 0 {large} 1 {x2:.2},{y2:.2} Z" fill="{}"><title>{}: {value}</title></path>"#,
                color(i),
                escape(label)
            );
            angle = end;
        }
    }

    for (i, (label, value)) in slices.iter().enumerate() {
        let y = 60.0 + i as f64 * 22.0;
        let pct = (*value).max(0) as f64 * 100.0 / total as f64;
        let _ = write!(
            svg,
            r#"<rect x="260" y="{}" width="12" height="12" fill="{}"/><text x="278" y="{}" class="legend">{} ({pct:.1}%)</text>"#,
            y - 10.0,
            color(i),
            y,
            escape(label)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Vertical bar chart of labelled counts.
pub fn bars(title: &str, bars: &[(&str, i64)]) -> String {
    let (w, h) = (420.0, 260.0);
    let mut svg = open_svg(w, h, title);
    let max = bars.iter().map(|(_, v)| *v).max().unwrap_or(0);
    if bars.is_empty() || max <= 0 {
        no_data(&mut svg, w, h);
        svg.push_str("</svg>");
        return svg;
    }

    let (left, right, top, bottom) = (40.0, 10.0, 40.0, 40.0);
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let slot = plot_w / bars.len() as f64;
    let bar_w = slot * 0.7;

    axes(&mut svg, left, top, plot_w, plot_h);
    for (i, (label, value)) in bars.iter().enumerate() {
        let bh = (*value).max(0) as f64 / max as f64 * plot_h;
        let x = left + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = top + plot_h - bh;
        let _ = write!(
            svg,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{bar_w:.2}" height="{bh:.2}" fill="{}"><title>{}: {value}</title></rect><text x="{:.2}" y="{:.2}" class="tick" text-anchor="middle">{value}</text><text x="{:.2}" y="{:.2}" class="tick" text-anchor="middle">{}</text>"#,
            color(0),
            escape(label),
            x + bar_w / 2.0,
            y - 4.0,
            x + bar_w / 2.0,
            top + plot_h + 16.0,
            escape(label)
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Histogram of pre-binned values.
pub fn histogram_svg(title: &str, bins: &[HistogramBin]) -> String {
    let (w, h) = (420.0, 260.0);
    let mut svg = open_svg(w, h, title);
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
    if max == 0 {
        no_data(&mut svg, w, h);
        svg.push_str("</svg>");
        return svg;
    }

    let (left, right, top, bottom) = (40.0, 10.0, 40.0, 40.0);
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let bw = plot_w / bins.len() as f64;

    axes(&mut svg, left, top, plot_w, plot_h);
    for (i, b) in bins.iter().enumerate() {
        let bh = b.count as f64 / max as f64 * plot_h;
        let x = left + bw * i as f64;
        let _ = write!(
            svg,
            r##"<rect x="{x:.2}" y="{:.2}" width="{:.2}" height="{bh:.2}" fill="{}" stroke="#fff" stroke-width="1"><title>{:.1}–{:.1} min: {}</title></rect>"##,
            top + plot_h - bh,
            bw,
            color(0),
            b.start,
            b.end,
            b.count
        );
    }
    if let (Some(first), Some(last)) = (bins.first(), bins.last()) {
        let _ = write!(
            svg,
            r#"<text x="{left}" y="{:.2}" class="tick">{:.0}</text><text x="{:.2}" y="{:.2}" class="tick" text-anchor="end">{:.0}</text><text x="{:.2}" y="{:.2}" class="tick" text-anchor="middle">delay (min)</text>"#,
            top + plot_h + 16.0,
            first.start,
            left + plot_w,
            top + plot_h + 16.0,
            last.end,
            left + plot_w / 2.0,
            top + plot_h + 32.0
        );
    }

    svg.push_str("</svg>");
    svg
}

fn open_svg(w: f64, h: f64, title: &str) -> String {
    format!(
        r#"<svg class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" role="img"><text x="{}" y="22" class="chart-title" text-anchor="middle">{}</text>"#,
        w / 2.0,
        escape(title)
    )
}

fn no_data(svg: &mut String, w: f64, h: f64) {
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" class="tick" text-anchor="middle">No data</text>"#,
        w / 2.0,
        h / 2.0
    );
}

fn axes(svg: &mut String, left: f64, top: f64, plot_w: f64, plot_h: f64) {
    let _ = write!(
        svg,
        r##"<line x1="{left}" y1="{top}" x2="{left}" y2="{0}" stroke="#888"/><line x1="{left}" y1="{0}" x2="{1}" y2="{0}" stroke="#888"/>"##,
        top + plot_h,
        left + plot_w
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(&[], 20).is_empty());
    }

    #[test]
    fn histogram_splits_range_into_equal_bins() {
        let bins = histogram(&[0, 5, 10, 15, 20], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 20.0);
        // 20 lands in the closed last bin
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 2]);
    }

    #[test]
    fn identical_values_share_one_bin() {
        let bins = histogram(&[7, 7, 7], 20);
        assert_eq!(bins, vec![HistogramBin { start: 7.0, end: 8.0, count: 3 }]);
    }

    #[test]
    fn twenty_bins_hold_every_value() {
        let values: Vec<i64> = (1..=97).collect();
        let bins = histogram(&values, 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 97);
        assert!(bins.windows(2).all(|w| w[0].end == w[1].start));
    }

    #[test]
    fn pie_draws_one_slice_per_status() {
        let svg = pie("Gate Status Distribution", &[("Occupied", 4), ("Available", 6)]);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Occupied (40.0%)"));
        assert!(svg.contains("Available (60.0%)"));
    }

    #[test]
    fn pie_with_single_status_is_a_circle() {
        let svg = pie("Gate Status Distribution", &[("Available", 10)]);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn empty_charts_say_so() {
        assert!(pie("t", &[]).contains("No data"));
        assert!(bars("t", &[]).contains("No data"));
        assert!(histogram_svg("t", &[]).contains("No data"));
    }

    #[test]
    fn chart_labels_are_escaped() {
        let svg = bars("Flight Status (24h)", &[("<script>", 3)]);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }
}
