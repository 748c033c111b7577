//! Expands a section's bands into the ordered sequence of flow instances.

use crate::scope::Scope;
use folio_template::{Band, BandType, DataPath, display_value};
use folio_types::{Diagnostic, DiagnosticKind, Diagnostics};
use itertools::Itertools;
use serde_json::Value;
use std::sync::Arc;

/// The visible bands of a section (or frame), bucketed by type in priority
/// order. Declaration order is kept within a bucket.
#[derive(Debug, Default)]
pub(crate) struct SectionBands {
    pub background: Vec<Arc<Band>>,
    pub page_headers: Vec<Arc<Band>>,
    pub column_headers: Vec<Arc<Band>>,
    pub titles: Vec<Arc<Band>>,
    pub group_headers: Vec<Arc<Band>>,
    pub details: Vec<Arc<Band>>,
    pub group_footers: Vec<Arc<Band>>,
    pub bodies: Vec<Arc<Band>>,
    pub summaries: Vec<Arc<Band>>,
    pub no_data: Vec<Arc<Band>>,
    pub column_footers: Vec<Arc<Band>>,
    pub page_footers: Vec<Arc<Band>>,
    pub last_page_footers: Vec<Arc<Band>>,
}

impl SectionBands {
    pub fn classify(bands: &[Band]) -> Self {
        let mut out = SectionBands::default();
        let ordered = bands
            .iter()
            .filter(|b| b.is_visible())
            .sorted_by_key(|b| b.band_type.priority());
        for band in ordered {
            let bucket = match band.band_type {
                BandType::Background => &mut out.background,
                BandType::PageHeader => &mut out.page_headers,
                BandType::ColumnHeader => &mut out.column_headers,
                BandType::Title => &mut out.titles,
                BandType::GroupHeader => &mut out.group_headers,
                BandType::Detail => &mut out.details,
                BandType::GroupFooter => &mut out.group_footers,
                BandType::Body => &mut out.bodies,
                BandType::Summary => &mut out.summaries,
                BandType::NoData => &mut out.no_data,
                BandType::ColumnFooter => &mut out.column_footers,
                BandType::PageFooter => &mut out.page_footers,
                BandType::LastPageFooter => &mut out.last_page_footers,
            };
            bucket.push(Arc::new(band.clone()));
        }
        out
    }
}

/// One band instance waiting to be placed.
#[derive(Debug, Clone)]
pub(crate) struct FlowItem {
    pub band: Arc<Band>,
    pub scope: Scope,
}

/// Consecutive detail bands sharing a data source.
struct DetailRun {
    source: Option<String>,
    bands: Vec<Arc<Band>>,
}

impl DetailRun {
    fn group_by(&self) -> Option<&str> {
        self.bands.iter().find_map(|b| b.group_by.as_deref())
    }

    fn item_name(&self) -> Option<String> {
        self.bands.iter().find_map(|b| b.item_name.clone())
    }
}

/// Reads the array bound by `source`. Missing or non-array values are
/// reported and treated as empty.
fn bind_items(
    source: &str,
    parent: &Scope,
    root: &Value,
    diagnostics: &mut Diagnostics,
) -> Vec<Arc<Value>> {
    match parent.resolve(source, root) {
        Some(Value::Array(items)) => items.iter().cloned().map(Arc::new).collect(),
        Some(other) => {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::TemplateData,
                format!(
                    "data source '{}' is not an array (found {}); treated as empty",
                    source,
                    value_kind(other)
                ),
            ));
            Vec::new()
        }
        None => {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::TemplateData,
                format!("data source '{}' not found; treated as empty", source),
            ));
            Vec::new()
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn group_key(item: &Value, path: &str) -> String {
    DataPath::parse(path)
        .resolve(item)
        .map(display_value)
        .unwrap_or_default()
}

fn push_all(out: &mut Vec<FlowItem>, bands: &[Arc<Band>], scope: &Scope) {
    out.extend(bands.iter().map(|band| FlowItem {
        band: band.clone(),
        scope: scope.clone(),
    }));
}

/// Plans the flow of a section: title, grouped details (or noData), body
/// and summary, each bound to its scope.
pub(crate) fn plan_flow(
    bands: &SectionBands,
    parent: &Scope,
    root: &Arc<Value>,
    diagnostics: &mut Diagnostics,
) -> Vec<FlowItem> {
    let mut flow = Vec::new();
    push_all(&mut flow, &bands.titles, parent);

    let runs: Vec<DetailRun> = bands
        .details
        .iter()
        .chunk_by(|b| b.data_source.clone())
        .into_iter()
        .map(|(source, group)| DetailRun {
            source,
            bands: group.cloned().collect(),
        })
        .collect();

    let has_group_bands = !bands.group_headers.is_empty() || !bands.group_footers.is_empty();
    let group_run = runs
        .iter()
        .position(|r| r.group_by().is_some())
        .or(if has_group_bands && !runs.is_empty() { Some(0) } else { None });

    let mut bound_items = 0;
    let mut detail_flow = Vec::new();
    for (run_index, run) in runs.iter().enumerate() {
        let items = match &run.source {
            Some(source) => bind_items(source, parent, root, diagnostics),
            None => vec![parent.item.clone().unwrap_or_else(|| root.clone())],
        };
        bound_items += items.len();
        let item_name = run.item_name();
        let item_scope = |item: &Arc<Value>, index: usize| {
            parent.clone().with_item(item.clone(), item_name.clone(), index)
        };

        if group_run != Some(run_index) {
            for (index, item) in items.iter().enumerate() {
                push_all(&mut detail_flow, &run.bands, &item_scope(item, index));
            }
            continue;
        }

        // Contiguous runs of equal key, in data order.
        let key_path = run.group_by();
        let groups = items
            .iter()
            .enumerate()
            .chunk_by(|(_, item)| key_path.map(|p| group_key(item, p)));
        for (key, members) in &groups {
            let members: Vec<_> = members.collect();
            let (Some((first_index, first)), Some((last_index, last))) =
                (members.first(), members.last())
            else {
                continue;
            };
            let with_key = |scope: Scope| match &key {
                Some(k) => scope.with_group(k.clone()),
                None => scope,
            };
            push_all(&mut detail_flow, &bands.group_headers, &with_key(item_scope(first, *first_index)));
            for (index, item) in &members {
                push_all(&mut detail_flow, &run.bands, &with_key(item_scope(item, *index)));
            }
            push_all(&mut detail_flow, &bands.group_footers, &with_key(item_scope(last, *last_index)));
        }
    }

    let data_bound = runs.iter().any(|r| r.source.is_some());
    if !bands.details.is_empty() && bound_items == 0 {
        log::debug!("No detail items bound; placing {} noData band(s)", bands.no_data.len());
        push_all(&mut flow, &bands.no_data, parent);
    } else {
        flow.extend(detail_flow);
    }

    push_all(&mut flow, &bands.bodies, parent);

    let suppress_summary = data_bound && bound_items == 0 && bands.no_data.is_empty();
    if !suppress_summary {
        push_all(&mut flow, &bands.summaries, parent);
    }
    flow
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn band(json: Value) -> Band {
        serde_json::from_value(json).unwrap()
    }

    fn types(flow: &[FlowItem]) -> Vec<BandType> {
        flow.iter().map(|f| f.band.band_type).collect()
    }

    #[test]
    fn test_classify_orders_by_priority_and_drops_hidden() {
        let bands = SectionBands::classify(&[
            band(json!({"type": "summary", "height": 10})),
            band(json!({"type": "detail", "height": 10, "id": "a"})),
            band(json!({"type": "detail", "height": 10, "id": "b", "condition": false})),
            band(json!({"type": "detail", "height": 10, "id": "c"})),
            band(json!({"type": "title", "height": 10})),
        ]);
        assert_eq!(bands.titles.len(), 1);
        let ids: Vec<_> = bands.details.iter().map(|b| b.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_groups_are_contiguous_runs() {
        let bands = SectionBands::classify(&[
            band(json!({"type": "groupHeader", "height": 10})),
            band(json!({"type": "detail", "height": 10, "dataSource": "rows", "groupBy": "city"})),
            band(json!({"type": "groupFooter", "height": 10})),
        ]);
        let root = Arc::new(json!({"rows": [
            {"city": "Oslo"}, {"city": "Oslo"}, {"city": "Rome"}, {"city": "Oslo"}
        ]}));
        let mut diags = Diagnostics::new();
        let flow = plan_flow(&bands, &Scope::default(), &root, &mut diags);

        use BandType::*;
        assert_eq!(
            types(&flow),
            vec![
                GroupHeader, Detail, Detail, GroupFooter,
                GroupHeader, Detail, GroupFooter,
                GroupHeader, Detail, GroupFooter,
            ]
        );
        let keys: Vec<_> = flow
            .iter()
            .filter(|f| f.band.band_type == GroupHeader)
            .map(|f| f.scope.group_key.clone().unwrap())
            .collect();
        assert_eq!(keys, vec!["Oslo", "Rome", "Oslo"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_missing_source_uses_no_data_and_keeps_summary() {
        let bands = SectionBands::classify(&[
            band(json!({"type": "detail", "height": 10, "dataSource": "rows"})),
            band(json!({"type": "noData", "height": 10})),
            band(json!({"type": "summary", "height": 10})),
        ]);
        let mut diags = Diagnostics::new();
        let flow = plan_flow(&bands, &Scope::default(), &Arc::new(json!({})), &mut diags);
        assert_eq!(types(&flow), vec![BandType::NoData, BandType::Summary]);
        assert_eq!(diags.of_kind(DiagnosticKind::TemplateData).count(), 1);
    }

    #[test]
    fn test_summary_suppressed_without_items_or_no_data() {
        let bands = SectionBands::classify(&[
            band(json!({"type": "detail", "height": 10, "dataSource": "rows"})),
            band(json!({"type": "summary", "height": 10})),
        ]);
        let mut diags = Diagnostics::new();
        let flow = plan_flow(&bands, &Scope::default(), &Arc::new(json!({"rows": []})), &mut diags);
        assert!(flow.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_unbound_detail_renders_once_with_root() {
        let bands = SectionBands::classify(&[band(json!({"type": "detail", "height": 10}))]);
        let root = Arc::new(json!({"name": "x"}));
        let flow = plan_flow(&bands, &Scope::default(), &root, &mut Diagnostics::new());
        assert_eq!(flow.len(), 1);
        assert_eq!(flow[0].scope.item.as_deref(), Some(&json!({"name": "x"})));
    }

    #[test]
    fn test_consecutive_details_iterate_together() {
        let bands = SectionBands::classify(&[
            band(json!({"type": "detail", "height": 10, "dataSource": "rows", "id": "a"})),
            band(json!({"type": "detail", "height": 10, "dataSource": "rows", "id": "b"})),
        ]);
        let root = Arc::new(json!({"rows": [1, 2]}));
        let flow = plan_flow(&bands, &Scope::default(), &root, &mut Diagnostics::new());
        let ids: Vec<_> = flow.iter().map(|f| f.band.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b", "a", "b"]);
        assert_eq!(flow[2].scope.item_index, Some(1));
    }
}
