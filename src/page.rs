//! The dashboard page: its static description and its HTML rendering.

use std::fmt::Write;

use common::{
    reconcile_county, ComponentId, DropdownOption, DropdownSpec, PageLayout, PageText,
    SelectionState, SliderMark, SliderSpec,
};
use compute::views::{county_options, state_options};
use compute::DashboardContext;

const DASHBOARD_JS: &str = include_str!("assets/dashboard.js");
const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const MONTH_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Describe the page for the loaded data.
///
/// The slider starts at the last month. The preferred state and county are
/// used when the data has them; otherwise the first available entries are.
pub fn build_layout(
    context: &DashboardContext,
    preferred_state: &str,
    preferred_county: &str,
) -> PageLayout {
    let months = context.months();
    let last_position = months.last_position().unwrap_or(0);
    let marks = months
        .tick_labels()
        .into_iter()
        .map(|(position, month)| SliderMark {
            position,
            label: month.format(MONTH_LABEL_FORMAT).to_string(),
        })
        .collect();

    let states = state_options(context);
    let state = if context.catalog().contains_region(preferred_state) {
        Some(preferred_state.to_string())
    } else {
        states.first().map(|option| option.value.clone())
    };

    let counties: Vec<DropdownOption> = state
        .as_deref()
        .map(|state| county_options(context, state))
        .unwrap_or_default();
    let county = reconcile_county(Some(preferred_county), &counties);

    PageLayout {
        text: PageText {
            document_title: "Kaggle: GoDaddy Microbusiness by ncozzi".to_string(),
            header: "Kaggle: GoDaddy Microbusiness Growth forecasts".to_string(),
            subheader: "Created by @ncozzi".to_string(),
            description: format!(
                "Dashboard for visualizing microbusiness density + forecasts of {} USA counties",
                context.county_total()
            ),
            link_text: "Link to Jupyter notebook explaining the methodology behind the predictions:"
                .to_string(),
            link_href: "https://github.com/ncozzi/kaggle_godaddy".to_string(),
            box_plot_header: "Box plot of MBD per date".to_string(),
            forecast_header: "MBD forecast per state/county".to_string(),
        },
        slider: SliderSpec {
            id: ComponentId::SliderDate,
            min: 0,
            max: last_position,
            step: 1,
            value: last_position,
            marks,
        },
        state_dropdown: DropdownSpec {
            id: ComponentId::DropdownState,
            options: states,
            value: state.clone(),
        },
        county_dropdown: DropdownSpec {
            id: ComponentId::DropdownCounty,
            options: counties,
            value: county.clone(),
        },
        graphs: vec![
            ComponentId::BoxPlot,
            ComponentId::StateChart,
            ComponentId::CountyChart,
        ],
        initial_selection: SelectionState {
            month_position: last_position,
            state,
            county,
        },
    }
}

/// Render the page. Charts are filled in by the script through the
/// callback endpoint once the page has loaded.
pub fn render_page(layout: &PageLayout) -> serde_json::Result<String> {
    let text = &layout.text;
    // `<` is escaped so the JSON cannot close the script element
    let selection = serde_json::to_string(&layout.initial_selection)?.replace('<', "\\u003c");

    let mut html = String::new();
    // Writing into a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
<script src="{plotly}"></script>
</head>
<body>
<div class="container-fluid">
<h1>{header}</h1>
<h2>{subheader}</h2>
<p>{description}</p>
<a href="{href}" target="_blank">{link_text}</a>
<hr>
<h3>{box_header}</h3>
{slider}
<div id="{box_plot}"></div>
<hr>
<h3>{forecast_header}</h3>
{state_dropdown}
<div id="{state_chart}"></div>
{county_dropdown}
<div id="{county_chart}"></div>
<div id="dashboard-error" class="alert alert-danger d-none" role="alert"></div>
</div>
<script type="application/json" id="initial-selection">{selection}</script>
<script>
{script}
</script>
</body>
</html>
"#,
        title = escape_html(&text.document_title),
        css = BOOTSTRAP_CSS,
        plotly = PLOTLY_JS,
        header = escape_html(&text.header),
        subheader = escape_html(&text.subheader),
        description = escape_html(&text.description),
        href = escape_html(&text.link_href),
        link_text = escape_html(&text.link_text),
        box_header = escape_html(&text.box_plot_header),
        slider = render_slider(&layout.slider),
        box_plot = ComponentId::BoxPlot.as_str(),
        forecast_header = escape_html(&text.forecast_header),
        state_dropdown = render_dropdown(&layout.state_dropdown),
        state_chart = ComponentId::StateChart.as_str(),
        county_dropdown = render_dropdown(&layout.county_dropdown),
        county_chart = ComponentId::CountyChart.as_str(),
        selection = selection,
        script = DASHBOARD_JS,
    );

    Ok(html)
}

fn render_slider(slider: &SliderSpec) -> String {
    // No labelled month means the tables share no month at all
    let disabled = if slider.marks.is_empty() { " disabled" } else { "" };
    let mut html = format!(
        r#"<input type="range" class="form-range" id="{id}" min="{min}" max="{max}" step="{step}" value="{value}"{disabled}>"#,
        id = slider.id.as_str(),
        min = slider.min,
        max = slider.max,
        step = slider.step,
        value = slider.value,
        disabled = disabled,
    );

    html.push_str(r#"<div class="d-flex justify-content-between small">"#);
    for mark in &slider.marks {
        let _ = write!(
            html,
            r#"<span data-position="{}">{}</span>"#,
            mark.position,
            escape_html(&mark.label)
        );
    }
    html.push_str("</div>");
    html
}

fn render_dropdown(dropdown: &DropdownSpec) -> String {
    let mut html = format!(
        r#"<select class="form-select" id="{}">"#,
        dropdown.id.as_str()
    );
    for option in &dropdown.options {
        let selected = if dropdown.value.as_deref() == Some(option.value.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&option.value),
            selected,
            escape_html(&option.label)
        );
    }
    html.push_str("</select>");
    html
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
