use chrono::NaiveDate;
use gloo_console::{debug, error};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

const CHART_COLORS: [&str; 8] = [
    "#2563eb", "#16a34a", "#ea580c", "#dc2626", "#9333ea", "#a16207", "#0d9488", "#64748b",
];

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 300.0;
const CHART_PAD: f64 = 42.0;

type CategoryAmounts = BTreeMap<String, Option<f64>>;

#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
struct SummaryRecord {
    #[serde(default, rename = "monthly_spending_data")]
    monthly_spending: BTreeMap<String, CategoryAmounts>,
    #[serde(default)]
    outlier_months: Vec<OutlierMonth>,
    #[serde(default)]
    summary: String,
}

/// (month label, category label, amount), exactly as the API sends it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
struct OutlierMonth(String, String, f64);

#[derive(Clone, PartialEq)]
struct MonthEntry {
    month: String,
    amounts: CategoryAmounts,
}

#[derive(Clone, PartialEq)]
enum SpendingState {
    Loading,
    Ready(SummaryRecord),
    Failed(String),
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("could not reach the summary endpoint: {0}")]
    Transport(String),
    #[error("summary endpoint returned status {0}")]
    Status(u16),
    #[error("could not decode the summary payload: {0}")]
    Shape(String),
}

fn api_base_url() -> String {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Ok(Some(meta)) = document.query_selector("meta[name=\"api-base-url\"]") {
                if let Some(content) = meta.get_attribute("content") {
                    if !content.is_empty() {
                        return content;
                    }
                }
            }
        }
    }
    DEFAULT_API_BASE_URL.to_string()
}

async fn fetch_summary(base_url: &str) -> Result<SummaryRecord, FetchError> {
    let url = format!("{}/api/data", base_url);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    response
        .json::<SummaryRecord>()
        .await
        .map_err(|err| FetchError::Shape(err.to_string()))
}

fn parse_month(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d").ok()
}

// Most recent month first. Labels that do not parse sort after every
// parseable one and keep their incoming order (the sort is stable).
fn sort_months(monthly: &BTreeMap<String, CategoryAmounts>) -> Vec<MonthEntry> {
    let mut entries: Vec<MonthEntry> = monthly
        .iter()
        .map(|(month, amounts)| MonthEntry {
            month: month.clone(),
            amounts: amounts.clone(),
        })
        .collect();
    entries.sort_by(|a, b| parse_month(&b.month).cmp(&parse_month(&a.month)));
    entries
}

// Table columns come from the most recent month; a month missing one of
// these categories renders that cell as N/A.
fn column_categories(entries: &[MonthEntry]) -> Vec<String> {
    entries
        .first()
        .map(|entry| entry.amounts.keys().cloned().collect())
        .unwrap_or_default()
}

fn amount_for(entry: &MonthEntry, category: &str) -> Option<f64> {
    entry.amounts.get(category).copied().flatten()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let current = current?;
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    Some(round2((current - previous) / previous.abs() * 100.0))
}

// Entries are ordered most recent first, so the chronologically previous
// month of position i is position i + 1, not i - 1.
fn change_row(entries: &[MonthEntry], index: usize, categories: &[String]) -> Vec<Option<f64>> {
    let previous = entries.get(index + 1);
    categories
        .iter()
        .map(|category| {
            let current = amount_for(&entries[index], category);
            let prior = previous.and_then(|entry| amount_for(entry, category));
            percent_change(current, prior)
        })
        .collect()
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

fn format_usd(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(amount) => amount,
        None => return "N/A".to_string(),
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(value) if value >= 0.0 => format!("+{:.2}%", value),
        Some(value) => format!("{:.2}%", value),
        None => "N/A".to_string(),
    }
}

fn category_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

fn value_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for value in values {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }
    bounds
}

// Pixel y for a value, origin at the top of the viewbox.
fn scale_value(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        return CHART_HEIGHT / 2.0;
    }
    let ratio = (value - min) / (max - min);
    CHART_HEIGHT - CHART_PAD - ratio * (CHART_HEIGHT - 2.0 * CHART_PAD)
}

// Horizontal slot center for month index `index` out of `count`.
fn slot_x(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return CHART_WIDTH / 2.0;
    }
    CHART_PAD + index as f64 / (count - 1) as f64 * (CHART_WIDTH - 2.0 * CHART_PAD)
}

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Summary,
    SpendingChart,
    ChangeChart,
    Outliers,
    Table,
}

struct TabItem {
    label: &'static str,
    tab: Tab,
    icon: fn() -> Html,
}

#[function_component(App)]
fn app() -> Html {
    let state = use_state(|| SpendingState::Loading);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                let mounted = Rc::new(Cell::new(true));
                let alive = mounted.clone();
                spawn_local(async move {
                    let result = fetch_summary(&api_base_url()).await;
                    if !alive.get() {
                        return;
                    }
                    match result {
                        Ok(record) => {
                            if let Ok(raw) = serde_json::to_string(&record) {
                                debug!("summary data fetched:", raw);
                            }
                            state.set(SpendingState::Ready(record));
                        }
                        Err(err) => {
                            error!("summary fetch failed:", err.to_string());
                            state.set(SpendingState::Failed(err.to_string()));
                        }
                    }
                });
                move || mounted.set(false)
            },
            (),
        );
    }

    let content = match &*state {
        SpendingState::Loading => html! {
            <div class="py-24 text-center text-slate-500">{"Loading..."}</div>
        },
        SpendingState::Failed(message) => html! {
            <div class="py-24 text-center">
                <p class="text-red-600 font-semibold">{ format!("API Error: {}", message) }</p>
            </div>
        },
        SpendingState::Ready(record) => html! { <SpendingView record={record.clone()} /> },
    };

    html! {
        <div class="min-h-screen bg-slate-100">
            <header class="bg-white border-b border-slate-200 h-16 flex items-center px-6">
                <div class="flex items-center gap-3">
                    <div class="p-2 bg-slate-100 rounded-lg">{ icon_bar_chart() }</div>
                    <span class="text-slate-800 text-xl font-bold tracking-tight">{"Spending Insights"}</span>
                </div>
            </header>
            <main class="p-6 max-w-5xl mx-auto">
                { content }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SpendingViewProps {
    record: SummaryRecord,
}

#[function_component(SpendingView)]
fn spending_view(props: &SpendingViewProps) -> Html {
    let active_tab = use_state(|| Tab::Summary);

    let entries = sort_months(&props.record.monthly_spending);
    let categories = column_categories(&entries);

    let tab_items = vec![
        TabItem {
            label: "Summary",
            tab: Tab::Summary,
            icon: icon_file_text,
        },
        TabItem {
            label: "Spending Over Time",
            tab: Tab::SpendingChart,
            icon: icon_trending_up,
        },
        TabItem {
            label: "Change Over Time",
            tab: Tab::ChangeChart,
            icon: icon_bar_chart,
        },
        TabItem {
            label: "Outlier Months",
            tab: Tab::Outliers,
            icon: icon_alert_triangle,
        },
        TabItem {
            label: "Raw Table",
            tab: Tab::Table,
            icon: icon_layout_grid,
        },
    ];

    let body = match *active_tab {
        Tab::Summary => html! { <SummaryText text={props.record.summary.clone()} /> },
        Tab::SpendingChart => {
            html! { <SpendingChart entries={entries.clone()} categories={categories.clone()} /> }
        }
        Tab::ChangeChart => {
            html! { <ChangeView entries={entries.clone()} categories={categories.clone()} /> }
        }
        Tab::Outliers => html! { <OutlierList outliers={props.record.outlier_months.clone()} /> },
        Tab::Table => {
            html! { <SpendingTable entries={entries.clone()} categories={categories.clone()} /> }
        }
    };

    html! {
        <div class="space-y-6">
            <nav class="bg-white rounded-[10px] border border-slate-200 p-2 flex flex-wrap gap-1">
                { for tab_items.iter().map(|item| {
                    let is_active = item.tab == *active_tab;
                    let class_name = if is_active {
                        "flex items-center gap-2 px-4 py-2 rounded-lg text-[13px] font-medium bg-slate-800 text-white"
                    } else {
                        "flex items-center gap-2 px-4 py-2 rounded-lg text-[13px] font-medium text-slate-500 hover:bg-slate-100"
                    };
                    let active_tab = active_tab.clone();
                    let tab = item.tab;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| active_tab.set(tab))}>
                            <span class="shrink-0">{ (item.icon)() }</span>
                            <span class="whitespace-nowrap">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryTextProps {
    text: String,
}

#[function_component(SummaryText)]
fn summary_text(props: &SummaryTextProps) -> Html {
    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 p-6">
            <h2 class="font-bold text-slate-800 text-lg mb-4">{"Summary"}</h2>
            { if props.text.is_empty() {
                html! { <p class="text-sm text-slate-500">{"No summary available."}</p> }
            } else {
                html! {
                    <pre class="whitespace-pre-wrap text-sm text-slate-700 font-mono leading-relaxed">
                        { props.text.clone() }
                    </pre>
                }
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MonthlyProps {
    entries: Vec<MonthEntry>,
    categories: Vec<String>,
}

#[function_component(SpendingTable)]
fn spending_table(props: &MonthlyProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <div class="bg-white rounded-[10px] border border-slate-200 p-6">
                <p class="text-sm text-slate-500">{"No monthly spending data available."}</p>
            </div>
        };
    }

    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
            <div class="p-6 border-b border-slate-200">
                <h2 class="font-bold text-slate-800 text-lg">{"Monthly Spending"}</h2>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                            <th class="px-6 py-4 font-bold">{"Month"}</th>
                            { for props.categories.iter().map(|category| html! {
                                <th class="px-6 py-4 font-bold text-right">{ category.clone() }</th>
                            }) }
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-slate-200">
                        { for props.entries.iter().enumerate().map(|(idx, entry)| html! {
                            <tr key={idx} class="text-sm hover:bg-slate-50 transition-colors">
                                <td class="px-6 py-4 text-slate-500">{ entry.month.clone() }</td>
                                { for props.categories.iter().map(|category| html! {
                                    <td class="px-6 py-4 text-right font-semibold text-slate-700">
                                        { format_usd(amount_for(entry, category)) }
                                    </td>
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn change_badge(change: Option<f64>) -> Html {
    match change {
        Some(value) if value > 0.0 => html! {
            <span class="text-xs text-red-600">{ format!("\u{25b2} {}", format_change(change)) }</span>
        },
        Some(value) if value < 0.0 => html! {
            <span class="text-xs text-green-600">{ format!("\u{25bc} {}", format_change(change)) }</span>
        },
        Some(_) => html! {
            <span class="text-xs text-slate-500">{ format_change(change) }</span>
        },
        None => html! {
            <span class="text-xs text-slate-400">{"N/A"}</span>
        },
    }
}

#[function_component(ChangeView)]
fn change_view(props: &MonthlyProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <div class="bg-white rounded-[10px] border border-slate-200 p-6">
                <p class="text-sm text-slate-500">{"No monthly spending data available."}</p>
            </div>
        };
    }

    let rows: Vec<Vec<Option<f64>>> = (0..props.entries.len())
        .map(|index| change_row(&props.entries, index, &props.categories))
        .collect();

    html! {
        <div class="space-y-6">
            <ChangeChart entries={props.entries.clone()} categories={props.categories.clone()} />
            <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
                <div class="p-6 border-b border-slate-200">
                    <h2 class="font-bold text-slate-800 text-lg">{"Month-over-Month Change"}</h2>
                </div>
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                <th class="px-6 py-4 font-bold">{"Month"}</th>
                                { for props.categories.iter().map(|category| html! {
                                    <th class="px-6 py-4 font-bold text-right">{ category.clone() }</th>
                                }) }
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-slate-200">
                            { for props.entries.iter().enumerate().map(|(idx, entry)| {
                                let row = rows[idx].clone();
                                html! {
                                    <tr key={idx} class="text-sm hover:bg-slate-50 transition-colors">
                                        <td class="px-6 py-4 text-slate-500">{ entry.month.clone() }</td>
                                        { for props.categories.iter().enumerate().map(|(col, category)| html! {
                                            <td class="px-6 py-4 text-right">
                                                <div class="font-semibold text-slate-700">
                                                    { format_usd(amount_for(entry, category)) }
                                                </div>
                                                { change_badge(row[col]) }
                                            </td>
                                        }) }
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}

fn chart_legend(categories: &[String]) -> Html {
    html! {
        <div class="flex flex-wrap gap-4 mt-4">
            { for categories.iter().enumerate().map(|(idx, category)| html! {
                <div class="flex items-center gap-2 text-xs text-slate-600">
                    <span
                        class="inline-block w-3 h-3 rounded-sm"
                        style={format!("background-color: {}", category_color(idx))}
                    ></span>
                    { category.clone() }
                </div>
            }) }
        </div>
    }
}

fn month_axis_labels(months: &[&MonthEntry]) -> Html {
    html! {
        <>
            { for months.iter().enumerate().map(|(idx, entry)| html! {
                <text
                    x={format!("{:.1}", slot_x(idx, months.len()))}
                    y={format!("{:.1}", CHART_HEIGHT - 14.0)}
                    text-anchor="middle"
                    font-size="10"
                    fill="#64748b"
                >
                    { entry.month.clone() }
                </text>
            }) }
        </>
    }
}

#[function_component(SpendingChart)]
fn spending_chart(props: &MonthlyProps) -> Html {
    let bounds = value_bounds(
        props
            .entries
            .iter()
            .flat_map(|entry| entry.amounts.values().copied().flatten()),
    );

    let (min, max) = match bounds {
        Some(bounds) => bounds,
        None => {
            return html! {
                <div class="bg-white rounded-[10px] border border-slate-200 p-6">
                    <p class="text-sm text-slate-500">{"No monthly spending data available."}</p>
                </div>
            };
        }
    };

    // chronologically ascending, left to right
    let months: Vec<&MonthEntry> = props.entries.iter().rev().collect();

    let series = props
        .categories
        .iter()
        .enumerate()
        .map(|(cat_idx, category)| {
            let color = category_color(cat_idx);
            let points = months
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| {
                    amount_for(entry, category).map(|value| {
                        format!(
                            "{:.1},{:.1}",
                            slot_x(idx, months.len()),
                            scale_value(value, min, max)
                        )
                    })
                })
                .collect::<Vec<_>>()
                .join(" ");

            let markers = months
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| {
                    amount_for(entry, category).map(|value| {
                        html! {
                            <circle
                                cx={format!("{:.1}", slot_x(idx, months.len()))}
                                cy={format!("{:.1}", scale_value(value, min, max))}
                                r="3.5"
                                fill={color}
                            >
                                <title>{ format!("{} / {}: {}", entry.month, category, format_usd(Some(value))) }</title>
                            </circle>
                        }
                    })
                })
                .collect::<Vec<Html>>();

            html! {
                <g key={cat_idx}>
                    <polyline points={points} fill="none" stroke={color} stroke-width="2" />
                    { for markers.into_iter() }
                </g>
            }
        })
        .collect::<Vec<Html>>();

    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 p-6">
            <h2 class="font-bold text-slate-800 text-lg mb-4">{"Spending Over Time"}</h2>
            <svg viewBox={format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)} class="w-full">
                <line
                    x1={format!("{:.1}", CHART_PAD)}
                    y1={format!("{:.1}", CHART_HEIGHT - CHART_PAD)}
                    x2={format!("{:.1}", CHART_WIDTH - CHART_PAD)}
                    y2={format!("{:.1}", CHART_HEIGHT - CHART_PAD)}
                    stroke="#cbd5e1"
                />
                <line
                    x1={format!("{:.1}", CHART_PAD)}
                    y1={format!("{:.1}", CHART_PAD)}
                    x2={format!("{:.1}", CHART_PAD)}
                    y2={format!("{:.1}", CHART_HEIGHT - CHART_PAD)}
                    stroke="#cbd5e1"
                />
                <text x="4" y={format!("{:.1}", CHART_PAD + 4.0)} font-size="10" fill="#64748b">
                    { format_usd(Some(max)) }
                </text>
                <text x="4" y={format!("{:.1}", CHART_HEIGHT - CHART_PAD)} font-size="10" fill="#64748b">
                    { format_usd(Some(min)) }
                </text>
                { month_axis_labels(&months) }
                { for series.into_iter() }
            </svg>
            { chart_legend(&props.categories) }
        </div>
    }
}

#[function_component(ChangeChart)]
fn change_chart(props: &MonthlyProps) -> Html {
    let desc_rows: Vec<Vec<Option<f64>>> = (0..props.entries.len())
        .map(|index| change_row(&props.entries, index, &props.categories))
        .collect();

    // chronologically ascending, aligned with the reversed entry order
    let months: Vec<&MonthEntry> = props.entries.iter().rev().collect();
    let rows: Vec<&Vec<Option<f64>>> = desc_rows.iter().rev().collect();

    let has_changes = rows.iter().any(|row| row.iter().any(Option::is_some));
    let bounds = value_bounds(
        rows.iter()
            .flat_map(|row| row.iter().copied().flatten())
            .chain([0.0]),
    );

    let (min, max) = match bounds {
        Some(bounds) if has_changes => bounds,
        _ => {
            return html! {
                <div class="bg-white rounded-[10px] border border-slate-200 p-6">
                    <p class="text-sm text-slate-500">{"No month-over-month change data available."}</p>
                </div>
            };
        }
    };

    let baseline = scale_value(0.0, min, max);
    let group_width = if months.len() > 1 {
        (CHART_WIDTH - 2.0 * CHART_PAD) / months.len() as f64 * 0.7
    } else {
        (CHART_WIDTH - 2.0 * CHART_PAD) * 0.3
    };
    let bar_width = group_width / props.categories.len().max(1) as f64;

    let groups = months
        .iter()
        .enumerate()
        .map(|(month_idx, entry)| {
            let center = slot_x(month_idx, months.len());
            let row = rows[month_idx];

            let bars = props
                .categories
                .iter()
                .enumerate()
                .filter_map(|(cat_idx, category)| {
                    row[cat_idx].map(|value| {
                        let top = scale_value(value, min, max);
                        let x = center - group_width / 2.0 + cat_idx as f64 * bar_width;
                        html! {
                            <rect
                                x={format!("{:.1}", x)}
                                y={format!("{:.1}", top.min(baseline))}
                                width={format!("{:.1}", bar_width * 0.9)}
                                height={format!("{:.1}", (top - baseline).abs().max(1.0))}
                                fill={category_color(cat_idx)}
                            >
                                <title>{ format!("{} / {}: {}", entry.month, category, format_change(Some(value))) }</title>
                            </rect>
                        }
                    })
                })
                .collect::<Vec<Html>>();

            html! { <g key={month_idx}>{ for bars.into_iter() }</g> }
        })
        .collect::<Vec<Html>>();

    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 p-6">
            <h2 class="font-bold text-slate-800 text-lg mb-4">{"Change Over Time"}</h2>
            <svg viewBox={format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)} class="w-full">
                <line
                    x1={format!("{:.1}", CHART_PAD)}
                    y1={format!("{:.1}", baseline)}
                    x2={format!("{:.1}", CHART_WIDTH - CHART_PAD)}
                    y2={format!("{:.1}", baseline)}
                    stroke="#94a3b8"
                />
                <text x="4" y={format!("{:.1}", CHART_PAD + 4.0)} font-size="10" fill="#64748b">
                    { format_change(Some(max)) }
                </text>
                <text x="4" y={format!("{:.1}", CHART_HEIGHT - CHART_PAD)} font-size="10" fill="#64748b">
                    { format_change(Some(min)) }
                </text>
                { month_axis_labels(&months) }
                { for groups.into_iter() }
            </svg>
            { chart_legend(&props.categories) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct OutlierListProps {
    outliers: Vec<OutlierMonth>,
}

#[function_component(OutlierList)]
fn outlier_list(props: &OutlierListProps) -> Html {
    if props.outliers.is_empty() {
        return html! {
            <div class="bg-white rounded-[10px] border border-slate-200 p-6">
                <p class="text-sm text-slate-500">{"No outlier months available."}</p>
            </div>
        };
    }

    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
            <div class="p-6 border-b border-slate-200">
                <h2 class="font-bold text-slate-800 text-lg">{"Outlier Months"}</h2>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                            <th class="px-6 py-4 font-bold">{"Month"}</th>
                            <th class="px-6 py-4 font-bold">{"Category"}</th>
                            <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-slate-200">
                        { for props.outliers.iter().enumerate().map(|(idx, outlier)| html! {
                            <tr key={idx} class="text-sm hover:bg-slate-50 transition-colors">
                                <td class="px-6 py-4 text-slate-500">{ outlier.0.clone() }</td>
                                <td class="px-6 py-4">
                                    <span class="bg-slate-100 text-slate-700 px-3 py-1 rounded-full text-[10px] font-bold">
                                        { outlier.1.clone() }
                                    </span>
                                </td>
                                <td class="px-6 py-4 text-right font-semibold text-slate-700">
                                    { format_usd(Some(outlier.2)) }
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_file_text() -> Html {
    icon_base("M14 2H6a2 2 0 00-2 2v16a2 2 0 002 2h12a2 2 0 002-2V8zM14 2v6h6M16 13H8M16 17H8M10 9H8")
}
fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_alert_triangle() -> Html {
    icon_base("M10.3 3.9L1.8 18a2 2 0 001.7 3h17a2 2 0 001.7-3L13.7 3.9a2 2 0 00-3.4 0zM12 9v4M12 17h.01")
}
fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_from(value: serde_json::Value) -> SummaryRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    #[test]
    fn parse_month_reads_year_month_labels() {
        assert_eq!(parse_month("2024-01"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_month("not a month"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn sort_months_is_descending_and_complete() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "2023-11": {"food": 10.0},
                "2024-02": {"food": 40.0},
                "2023-12": {"food": 20.0},
                "2024-01": {"food": 30.0},
            }
        }));

        let entries = sort_months(&record.monthly_spending);

        assert_eq!(entries.len(), 4);
        let labels: Vec<&str> = entries.iter().map(|entry| entry.month.as_str()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-01", "2023-12", "2023-11"]);
        for pair in entries.windows(2) {
            assert!(parse_month(&pair[0].month) >= parse_month(&pair[1].month));
        }
    }

    #[test]
    fn sort_months_puts_unparseable_labels_last_in_stable_order() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "total": {"food": 1.0},
                "2024-01": {"food": 2.0},
                "adjustment": {"food": 3.0},
                "2024-03": {"food": 4.0},
            }
        }));

        let entries = sort_months(&record.monthly_spending);

        let labels: Vec<&str> = entries.iter().map(|entry| entry.month.as_str()).collect();
        assert_eq!(labels, vec!["2024-03", "2024-01", "adjustment", "total"]);
    }

    #[test]
    fn percent_change_matches_consecutive_months() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "2024-01": {"food": 100.0},
                "2024-02": {"food": 150.0},
            }
        }));

        let entries = sort_months(&record.monthly_spending);
        let categories = column_categories(&entries);

        assert_eq!(change_row(&entries, 0, &categories), vec![Some(50.0)]);
        assert_eq!(change_row(&entries, 1, &categories), vec![None]);
    }

    #[test]
    fn percent_change_is_na_for_zero_or_missing_previous() {
        assert_eq!(percent_change(Some(10.0), Some(0.0)), None);
        assert_eq!(percent_change(Some(10.0), None), None);
        assert_eq!(percent_change(None, Some(10.0)), None);
        assert_eq!(percent_change(Some(10.0), Some(5.0)), Some(100.0));
    }

    #[test]
    fn percent_change_rounds_to_two_decimals() {
        assert_eq!(percent_change(Some(4.0), Some(3.0)), Some(33.33));
        assert_eq!(percent_change(Some(2.0), Some(3.0)), Some(-33.33));
    }

    #[test]
    fn percent_change_divides_by_absolute_previous() {
        // refunds make amounts negative; the change sign must still follow
        // the direction of the move
        assert_eq!(percent_change(Some(-50.0), Some(-100.0)), Some(50.0));
        assert_eq!(percent_change(Some(-150.0), Some(-100.0)), Some(-50.0));
    }

    #[test]
    fn previous_month_is_the_next_array_element() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "2024-01": {"food": 100.0},
                "2024-02": {"food": 200.0},
                "2024-03": {"food": 100.0},
            }
        }));

        let entries = sort_months(&record.monthly_spending);
        let categories = column_categories(&entries);

        // position 1 is 2024-02; its previous month is position 2, 2024-01
        assert_eq!(entries[1].month, "2024-02");
        assert_eq!(change_row(&entries, 1, &categories), vec![Some(100.0)]);
        // position 0 is 2024-03, halving from 2024-02
        assert_eq!(change_row(&entries, 0, &categories), vec![Some(-50.0)]);
    }

    #[test]
    fn format_usd_keeps_null_and_zero_distinct() {
        assert_eq!(format_usd(None), "N/A");
        assert_eq!(format_usd(Some(0.0)), "$0.00");
    }

    #[test]
    fn format_usd_writes_separators_and_sign() {
        assert_eq!(format_usd(Some(1234.5)), "$1,234.50");
        assert_eq!(format_usd(Some(-42.75)), "-$42.75");
        assert_eq!(format_usd(Some(1_000_000.0)), "$1,000,000.00");
        assert_eq!(format_usd(Some(999.999)), "$1,000.00");
    }

    #[test]
    fn format_change_is_signed_with_two_decimals() {
        assert_eq!(format_change(Some(50.0)), "+50.00%");
        assert_eq!(format_change(Some(-3.2)), "-3.20%");
        assert_eq!(format_change(Some(0.0)), "+0.00%");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn summary_record_defaults_every_missing_field() {
        let record = record_from(json!({}));

        assert!(record.monthly_spending.is_empty());
        assert!(record.outlier_months.is_empty());
        assert!(record.summary.is_empty());
    }

    #[test]
    fn summary_record_reads_the_full_payload() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "2024-01": {"food": 100.0, "rent": null},
            },
            "outlier_months": [["2024-01", "food", 100.0]],
            "summary": "Total Spending: $100.00",
        }));

        let amounts = &record.monthly_spending["2024-01"];
        assert_eq!(amounts["food"], Some(100.0));
        assert_eq!(amounts["rent"], None);

        let outlier = &record.outlier_months[0];
        assert_eq!(outlier.0, "2024-01");
        assert_eq!(outlier.1, "food");
        assert_eq!(outlier.2, 100.0);

        assert_eq!(record.summary, "Total Spending: $100.00");
    }

    #[test]
    fn columns_come_from_the_most_recent_month() {
        let record = record_from(json!({
            "monthly_spending_data": {
                "2024-01": {"food": 10.0, "legacy": 5.0},
                "2024-02": {"food": 20.0, "rent": 900.0},
            }
        }));

        let entries = sort_months(&record.monthly_spending);
        let categories = column_categories(&entries);

        assert_eq!(categories, vec!["food", "rent"]);
        // the older month has no rent column; its cell reads as unavailable
        assert_eq!(amount_for(&entries[1], "rent"), None);
        assert_eq!(format_usd(amount_for(&entries[1], "rent")), "N/A");
    }

    #[test]
    fn column_categories_is_empty_without_entries() {
        assert!(column_categories(&[]).is_empty());
    }

    #[test]
    fn scale_value_maps_the_range_onto_the_plot_area() {
        assert_eq!(scale_value(0.0, 0.0, 100.0), CHART_HEIGHT - CHART_PAD);
        assert_eq!(scale_value(100.0, 0.0, 100.0), CHART_PAD);
        // a constant series sits on the vertical midline
        assert_eq!(scale_value(7.0, 7.0, 7.0), CHART_HEIGHT / 2.0);
    }

    #[test]
    fn slot_x_spreads_months_across_the_width() {
        assert_eq!(slot_x(0, 1), CHART_WIDTH / 2.0);
        assert_eq!(slot_x(0, 4), CHART_PAD);
        assert_eq!(slot_x(3, 4), CHART_WIDTH - CHART_PAD);
    }

    #[test]
    fn value_bounds_tracks_min_and_max() {
        assert_eq!(value_bounds([3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(value_bounds(Vec::new()), None);
    }
}
