//! HTML rendering of the assembled report.
//!
//! Produces a single self-contained document: deck.gl and Vega-Embed come
//! from CDN, every map and chart spec is embedded as JSON, and a section
//! failure renders as that section's error banner in place of its content.

use std::fmt::Write as _;

use mercury_map_analytics_models::{GroupCorrelations, MetricOutcome};

use crate::{Report, SectionError};

const DECK_GL_SRC: &str = "https://unpkg.com/deck.gl@9.0.0/dist.min.js";
const VEGA_SRC: &str = "https://cdn.jsdelivr.net/npm/vega@5";
const VEGA_LITE_SRC: &str = "https://cdn.jsdelivr.net/npm/vega-lite@5";
const VEGA_EMBED_SRC: &str = "https://cdn.jsdelivr.net/npm/vega-embed@6";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 60rem; color: #222; }\n\
h1 { font-size: 1.6rem; }\n\
h2 { margin-top: 2.5rem; }\n\
#map { position: relative; height: 480px; margin: 1rem 0; }\n\
.legend span.swatch { display: inline-block; width: 0.8em; height: 0.8em;\n\
  border-radius: 50%; margin-right: 0.4em; }\n\
.banner { background: #fdecea; border: 1px solid #f5c6cb; color: #721c24;\n\
  padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }\n\
table { border-collapse: collapse; margin: 1rem 0; }\n\
th, td { border: 1px solid #ccc; padding: 0.4rem 1rem; text-align: center;\n\
  min-width: 150px; }\n\
.chart { width: 100%; margin: 1rem 0; }\n\
.references p { font-size: 0.85rem; }\n";

/// Renders the report to a complete HTML document.
#[must_use]
pub fn render(report: &Report) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{}</title>", escape(crate::REPORT_TITLE));
    let _ = writeln!(page, "<script src=\"{DECK_GL_SRC}\"></script>");
    let _ = writeln!(page, "<script src=\"{VEGA_SRC}\"></script>");
    let _ = writeln!(page, "<script src=\"{VEGA_LITE_SRC}\"></script>");
    let _ = writeln!(page, "<script src=\"{VEGA_EMBED_SRC}\"></script>");
    let _ = writeln!(page, "<style>\n{STYLE}</style>");
    page.push_str("</head>\n<body>\n");

    let _ = writeln!(page, "<h1>{}</h1>", escape(crate::REPORT_TITLE));

    render_map_section(&mut page, report);
    render_correlation_section(&mut page, report);
    render_chart_sections(&mut page, report);
    render_references(&mut page, report);

    page.push_str("</body>\n</html>\n");
    page
}

fn render_map_section(page: &mut String, report: &Report) {
    page.push_str("<h2>Basin Map</h2>\n");
    match &report.map {
        Ok(spec) => {
            page.push_str("<div id=\"map\"></div>\n");

            page.push_str("<div class=\"legend\">\n<h3>Legend:</h3>\n");
            for entry in &spec.legend {
                let [red, green, blue, _] = entry.color;
                let _ = writeln!(
                    page,
                    "<p><span class=\"swatch\" style=\"background: rgb({red},{green},{blue})\">\
                     </span><strong>{}</strong></p>",
                    escape(&entry.label)
                );
            }
            page.push_str("</div>\n");

            let _ = writeln!(
                page,
                "<script>\nconst MAP_SPEC = {};\n{MAP_SCRIPT}</script>",
                embed_json(spec)
            );
        }
        Err(e) => banner(page, e),
    }
}

/// Bootstraps the deck.gl embed from the serialized [`MapSpec`].
const MAP_SCRIPT: &str = "\
new deck.DeckGL({\n\
  container: 'map',\n\
  initialViewState: MAP_SPEC.viewState,\n\
  controller: true,\n\
  layers: MAP_SPEC.layers.map(layer => new deck.ScatterplotLayer({\n\
    id: layer.id,\n\
    data: layer.data,\n\
    pickable: layer.pickable,\n\
    getPosition: d => [d.longitude, d.latitude],\n\
    getFillColor: layer.color,\n\
    getRadius: layer.radiusMeters,\n\
  })),\n\
  getTooltip: ({object}) => object && MAP_SPEC.tooltip\n\
    .replace('{latitude}', object.latitude)\n\
    .replace('{longitude}', object.longitude),\n\
});\n";

fn render_correlation_section(page: &mut String, report: &Report) {
    page.push_str("<h2>Correlations and P-values by Mine Type (rounded to 3 decimals)</h2>\n");
    match &report.correlations {
        Ok(correlations) => {
            if correlations.groups.is_empty() {
                page.push_str("<p>No categorized survey rows were found.</p>\n");
            }
            for group in &correlations.groups {
                render_group_table(page, group);
            }
        }
        Err(e) => banner(page, e),
    }
}

fn render_group_table(page: &mut String, group: &GroupCorrelations) {
    let _ = writeln!(page, "<h3>{}:</h3>", group.mine_type);
    page.push_str(
        "<table>\n<thead><tr><th></th><th>Correlation</th><th>P-value</th></tr></thead>\n<tbody>\n",
    );
    for outcome in &group.outcomes {
        match outcome {
            MetricOutcome::Computed(result) => {
                let _ = writeln!(
                    page,
                    "<tr><th>{}</th><td>{}</td><td>{}</td></tr>",
                    result.metric,
                    result.display_r(),
                    result.display_p()
                );
            }
            MetricOutcome::Degenerate { metric, reason } => {
                let _ = writeln!(
                    page,
                    "<tr><th>{metric}</th><td colspan=\"2\">n/a ({})</td></tr>",
                    escape(reason)
                );
            }
        }
    }
    page.push_str("</tbody>\n</table>\n");
}

fn render_chart_sections(page: &mut String, report: &Report) {
    for (index, chart) in report.charts.iter().enumerate() {
        let _ = writeln!(page, "<h2>{}</h2>", escape(chart.title));
        match &chart.outcome {
            Ok(spec) => {
                let _ = writeln!(page, "<div id=\"chart-{index}\" class=\"chart\"></div>");
                let _ = writeln!(
                    page,
                    "<script>vegaEmbed('#chart-{index}', {});</script>",
                    embed_json(&spec.spec)
                );
            }
            Err(e) => banner(page, e),
        }
    }
}

fn render_references(page: &mut String, report: &Report) {
    page.push_str("<h2>References</h2>\n<div class=\"references\">\n");
    for reference in report.references {
        let _ = writeln!(page, "<p>{}</p>", escape(reference));
    }
    page.push_str("</div>\n");
}

fn banner(page: &mut String, error: &SectionError) {
    let _ = writeln!(
        page,
        "<div class=\"banner\">Error loading the files: {}</div>",
        escape(&error.to_string())
    );
}

/// Serializes a spec for embedding inside a `<script>` block.
fn embed_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).map_or_else(
        |e| {
            log::error!("failed to serialize embedded spec: {e}");
            "null".to_owned()
        },
        // `</script>` inside a JSON string would end the block early.
        |json| json.replace("</", "<\\/"),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
