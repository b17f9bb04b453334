// src/dashboard/page.rs

//! The operator page: KPI tiles, four tabs, and a footer.

use std::fmt::Write;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::{charts, PageData};
use crate::config::Config;
use crate::models::{Alert, FlightStatus, LiveFlight, Severity};

pub const TITLE: &str = "AOCC - Airport Operations Control Centre";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Operations,
    Alerts,
    Analytics,
    Control,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Operations, Tab::Alerts, Tab::Analytics, Tab::Control];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Operations => "operations",
            Tab::Alerts => "alerts",
            Tab::Analytics => "analytics",
            Tab::Control => "control",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Tab::Operations => "📊 Operations",
            Tab::Alerts => "🚨 Alerts",
            Tab::Analytics => "📈 Analytics",
            Tab::Control => "⚙️ Control",
        }
    }
}

/// One-shot banner shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    Added,
    Invalid,
    Conflict,
    Unavailable,
    Error,
    Assign,
}

impl Notice {
    pub fn slug(&self) -> &'static str {
        match self {
            Notice::Added => "added",
            Notice::Invalid => "invalid",
            Notice::Conflict => "conflict",
            Notice::Unavailable => "unavailable",
            Notice::Error => "error",
            Notice::Assign => "assign",
        }
    }

    fn banner(&self) -> (&'static str, &'static str) {
        match self {
            Notice::Added => ("success", "Flight added successfully!"),
            Notice::Invalid => (
                "error",
                "Error adding flight: check the flight ID, origin, ETA and status",
            ),
            Notice::Conflict => (
                "error",
                "Error adding flight: the database rejected the row (duplicate or constraint)",
            ),
            Notice::Unavailable => ("error", "Error adding flight: database unavailable"),
            Notice::Error => ("error", "Error adding flight"),
            Notice::Assign => ("info", "Gate assignment logic would run here"),
        }
    }
}

/// Query string of `GET /`. Unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct View {
    #[serde(default, deserialize_with = "or_default")]
    pub tab: Tab,
    #[serde(default, deserialize_with = "or_default")]
    pub notice: Option<Notice>,
}

pub fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(T::deserialize(de).unwrap_or_default())
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn local(ts: NaiveDateTime, offset: &FixedOffset) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&ts).with_timezone(offset)
}

pub fn render(data: &PageData, config: &Config, view: &View, now: DateTime<Utc>) -> String {
    let mut html = String::with_capacity(32 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>🛫 {TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<h1>🛫 {TITLE}</h1>
<p class="sub">{} Airport Real-time Operations Dashboard</p>
<form method="post" action="/refresh" class="refresh"><input type="hidden" name="tab" value="{}"><button type="submit">🔄 Refresh Data</button></form>
</header>
"#,
        escape(&config.home_airport),
        view.tab.slug()
    );

    if let Some(notice) = view.notice {
        let (class, text) = notice.banner();
        let _ = write!(html, r#"<div class="banner {class}">{}</div>"#, escape(text));
    }

    kpi_tiles(&mut html, data, config);

    html.push_str(r#"<nav class="tabs">"#);
    for tab in Tab::ALL {
        let active = if tab == view.tab { " active" } else { "" };
        let _ = write!(
            html,
            r#"<a class="tab{active}" href="/?tab={}">{}</a>"#,
            tab.slug(),
            tab.label()
        );
    }
    html.push_str("</nav>\n<main>");

    match view.tab {
        Tab::Operations => operations_tab(&mut html, &data.live_feed.data, config),
        Tab::Alerts => alerts_tab(&mut html, &data.alerts.data),
        Tab::Analytics => analytics_tab(&mut html, data, config),
        Tab::Control => control_tab(&mut html, config, now),
    }

    let fetched = [
        data.kpis.fetched_at,
        data.live_feed.fetched_at,
        data.alerts.fetched_at,
        data.gate_utilization.fetched_at,
        data.delays.fetched_at,
        data.status_counts.fetched_at,
    ]
    .into_iter()
    .min()
    .unwrap_or(now);

    let _ = write!(
        html,
        r#"</main>
<footer>👨‍💼 AOCC Operator Dashboard | Last updated: {} {}</footer>
</body>
</html>
"#,
        fetched.with_timezone(&config.display_offset).format("%H:%M:%S"),
        escape(&config.tz_label)
    );

    html
}

fn kpi_tiles(html: &mut String, data: &PageData, config: &Config) {
    let k = &data.kpis.data;
    let avg = k
        .avg_delay
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "n/a".into());
    let tiles = [
        ("Total Flights", k.total_flights.to_string(), format!("{}h", config.kpi_window_hours)),
        ("Delayed Flights", k.delayed_flights.to_string(), "↑".to_string()),
        ("Avg Delay (min)", avg, String::new()),
        (
            "Gate Utilization",
            format!("{}/{}", k.occupied_gates, config.total_gates),
            String::new(),
        ),
    ];

    html.push_str(r#"<section class="kpis">"#);
    for (label, value, delta) in tiles {
        let _ = write!(
            html,
            r#"<div class="tile"><div class="label">{label}</div><div class="value">{}</div><div class="delta">{}</div></div>"#,
            escape(&value),
            escape(&delta)
        );
    }
    html.push_str("</section>\n");
}

fn operations_tab(html: &mut String, flights: &[LiveFlight], config: &Config) {
    html.push_str("<h2>Live Flight Operations</h2>");
    if flights.is_empty() {
        let _ = write!(
            html,
            r#"<p class="empty">No flights created in the last {} hours.</p>"#,
            config.live_window_hours
        );
        return;
    }

    html.push_str(
        r#"<div class="table-wrap"><table><thead><tr><th>Flight</th><th>Origin</th><th>Dest</th><th>ETA</th><th>Status</th><th>Delay (min)</th><th>Gate</th><th>Gate Status</th><th>Min since ETA</th><th>Created</th></tr></thead><tbody>"#,
    );
    for f in flights {
        let status_class = FlightStatus::parse(&f.status).map_or("st-other", |s| s.css_class());
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="badge {status_class}">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            escape(&f.flight_id),
            escape(&f.origin),
            escape(&f.dest),
            local(f.eta, &config.display_offset).format("%Y-%m-%d %H:%M"),
            escape(&f.status),
            f.delay_min.map(|d| d.to_string()).unwrap_or_default(),
            escape(f.gate.as_deref().unwrap_or("")),
            escape(f.gate_status.as_deref().unwrap_or("")),
            f.minutes_since_eta,
            local(f.created_at, &config.display_offset).format("%H:%M:%S"),
        );
    }
    html.push_str("</tbody></table></div>");
}

fn alerts_tab(html: &mut String, alerts: &[Alert]) {
    html.push_str("<h2>🚨 Active Alerts</h2>");
    if alerts.is_empty() {
        html.push_str(r#"<div class="banner success">✅ No active alerts</div>"#);
        return;
    }
    for a in alerts {
        let color = Severity::parse(&a.severity).map_or("red", |s| s.color());
        let _ = write!(
            html,
            r#"<div class="banner error" style="border-left-color:{color}">🚨 {}: {}</div>"#,
            escape(&a.severity),
            escape(&a.message)
        );
    }
}

fn analytics_tab(html: &mut String, data: &PageData, config: &Config) {
    html.push_str("<h2>Gate Utilization</h2>");
    let gates: Vec<(&str, i64)> = data
        .gate_utilization
        .data
        .iter()
        .map(|g| (g.status.as_str(), g.count))
        .collect();
    html.push_str(&charts::pie("Gate Status Distribution", &gates));

    html.push_str(r#"<div class="cols"><div class="col">"#);
    // no positive delays, no histogram
    if !data.delays.data.delays.is_empty() {
        html.push_str(&charts::histogram_svg("Delay Distribution", &data.delays.data.bins));
    }
    html.push_str(r#"</div><div class="col">"#);
    let statuses: Vec<(&str, i64)> = data
        .status_counts
        .data
        .iter()
        .map(|s| (s.status.as_str(), s.count))
        .collect();
    let title = format!("Flight Status ({}h)", config.kpi_window_hours);
    html.push_str(&charts::bars(&title, &statuses));
    html.push_str("</div></div>");
}

fn control_tab(html: &mut String, config: &Config, now: DateTime<Utc>) {
    html.push_str("<h2>Quick Actions</h2>");

    let default_eta = (now + Duration::minutes(30))
        .with_timezone(&config.display_offset)
        .format("%Y-%m-%dT%H:%M");

    let mut origins = String::new();
    for o in &config.origins {
        let _ = write!(origins, r#"<option value="{0}">{0}</option>"#, escape(o));
    }
    let mut statuses = String::new();
    for s in FlightStatus::MANUAL {
        let _ = write!(statuses, r#"<option value="{0}">{0}</option>"#, s.as_str());
    }

    let _ = write!(
        html,
        r#"<details open><summary>➕ Add New Flight</summary>
<form method="post" action="/flights" class="flight-form">
<label>Flight ID <input name="flight_id" value="AIxxx" maxlength="10" required></label>
<label>Origin <select name="origin">{origins}</select></label>
<label>ETA ({tz}) <input type="datetime-local" name="eta" value="{default_eta}" required></label>
<label>Status <select name="status">{statuses}</select></label>
<button type="submit">Add Flight</button>
</form>
</details>
<details><summary>🔧 Assign Gates</summary>
<form method="post" action="/gates/auto-assign"><button type="submit">Auto-assign Available Gates</button></form>
</details>
"#,
        tz = escape(&config.tz_label)
    );
}

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;background:#0e1117;color:#fafafa;font-size:14px}
header{padding:16px 24px;border-bottom:1px solid #262730;display:flex;align-items:center;gap:24px;flex-wrap:wrap}
h1{font-size:24px;margin:0}
h2{font-size:18px;margin:16px 0}
.sub{color:#a3a8b8;margin:0}
.refresh{margin-left:auto}
button{background:#262730;color:#fafafa;border:1px solid #4a4c5a;border-radius:6px;padding:6px 14px;cursor:pointer}
button:hover{border-color:#ff4b4b}
.kpis{display:grid;grid-template-columns:repeat(4,1fr);gap:16px;padding:16px 24px}
.tile{background:#1a1c24;border-radius:8px;padding:12px 16px}
.tile .label{color:#a3a8b8;font-size:13px}
.tile .value{font-size:30px;font-weight:600}
.tile .delta{color:#21c354;font-size:12px;min-height:14px}
.tabs{display:flex;gap:4px;padding:0 24px;border-bottom:1px solid #262730}
.tab{padding:10px 16px;color:#a3a8b8;text-decoration:none;border-bottom:2px solid transparent}
.tab.active{color:#ff4b4b;border-bottom-color:#ff4b4b}
main{padding:0 24px 24px}
.table-wrap{max-height:400px;overflow:auto}
table{border-collapse:collapse;width:100%}
th,td{padding:6px 10px;border-bottom:1px solid #262730;text-align:left;white-space:nowrap}
th{position:sticky;top:0;background:#1a1c24}
.badge{padding:2px 8px;border-radius:10px;font-size:12px}
.st-ontime{background:#1b5e20}.st-delayed{background:#e65100}.st-cancelled{background:#b71c1c}
.st-boarding{background:#0d47a1}.st-departed{background:#424242}.st-other{background:#37474f}
.banner{margin:8px 0;padding:10px 14px;border-radius:6px;border-left:4px solid}
.banner.error{background:#3e1f24;border-left-color:#ff4b4b}
.banner.success{background:#173928;border-left-color:#21c354}
.banner.info{background:#172d43;border-left-color:#1c83e1}
.empty{color:#a3a8b8}
.cols{display:flex;gap:24px;flex-wrap:wrap}
.col{flex:1;min-width:420px}
.chart{background:#1a1c24;border-radius:8px;max-width:100%}
.chart text{fill:#fafafa;font-size:11px}
.chart .chart-title{font-size:14px;font-weight:600}
details{background:#1a1c24;border-radius:8px;padding:10px 14px;margin:10px 0}
summary{cursor:pointer}
.flight-form{display:grid;grid-template-columns:repeat(2,minmax(200px,1fr));gap:12px;margin-top:12px}
.flight-form label{display:flex;flex-direction:column;gap:4px;color:#a3a8b8}
input,select{background:#262730;color:#fafafa;border:1px solid #4a4c5a;border-radius:6px;padding:6px}
footer{padding:12px 24px;border-top:1px solid #262730;color:#a3a8b8;font-size:12px}
"#;
