mod common;

use common::fixtures::*;
use common::{TestResult, builder, generate_pdf};
use folio::layout::LayoutError;
use folio::{PipelineError, RenderOptions};
use serde_json::json;

#[test]
fn test_details_overflow_onto_new_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let template = single_section(json!([detail("rows", 20.0, vec![field("name", "name")])]));
    let pdf = generate_pdf(&template, rows(120))?;

    // 15 rows of 20pt fill a 300pt page.
    assert_pdf_page_count!(pdf, 8);
    assert_eq!(pdf.output.page_count, 8);
    assert!(pdf.page_contains(1, "Item 1"));
    assert!(pdf.page_contains(1, "Item 15"));
    assert!(!pdf.page_contains(1, "Item 16"));
    assert!(pdf.page_contains(8, "Item 120"));
    Ok(())
}

#[test]
fn test_page_x_of_y_footer() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let template = single_section(json!([
        detail("rows", 20.0, vec![field("name", "name")]),
        band("pageFooter", 20.0, vec![text("footer", "Page {{_pageNumber}} of {{_totalPages}}")])
    ]));
    let pdf = generate_pdf(&template, rows(120))?;

    let total = pdf.page_count();
    assert!(total > 1);
    for page in 1..=total {
        let expected = format!("Page {} of {}", page, total);
        assert!(pdf.page_contains(page as u32, &expected), "missing '{}'", expected);
    }
    Ok(())
}

#[test]
fn test_page_reference_to_anchor() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let template = single_section(json!([
        band("title", 20.0, vec![text("see", "Totals on page {{_pageRef:totals}}")]),
        detail("rows", 20.0, vec![field("name", "name")]),
        {"type": "summary", "height": 20, "anchor": "totals", "elements": [text("sum", "Totals")]}
    ]));
    let pdf = generate_pdf(&template, rows(40))?;

    let last = pdf.page_count();
    assert!(pdf.page_contains(1, &format!("Totals on page {}", last)));
    assert!(pdf.page_contains(last as u32, "Totals"));
    Ok(())
}

#[test]
fn test_unknown_anchor_renders_question_mark() -> TestResult {
    let template = single_section(json!([
        band("title", 20.0, vec![text("see", "See page {{_pageRef:nowhere}}")])
    ]));
    let pdf = generate_pdf(&template, json!({}))?;
    assert_pdf_contains_text!(pdf, "See page ?");
    Ok(())
}

#[test]
fn test_no_data_band_for_empty_source() -> TestResult {
    let template = single_section(json!([
        detail("rows", 20.0, vec![field("name", "name")]),
        band("noData", 20.0, vec![text("empty", "No records")])
    ]));

    let empty = generate_pdf(&template, json!({"rows": []}))?;
    assert_pdf_page_count!(empty, 1);
    assert_pdf_contains_text!(empty, "No records");

    let filled = generate_pdf(&template, rows(2))?;
    assert!(!filled.text().contains("No records"));
    assert_pdf_contains_text!(filled, "Item 2");
    Ok(())
}

#[test]
fn test_last_page_footer_replaces_footer_on_final_page() -> TestResult {
    let template = single_section(json!([
        detail("rows", 20.0, vec![field("name", "name")]),
        band("pageFooter", 20.0, vec![text("footer", "continued")]),
        band("lastPageFooter", 20.0, vec![text("end", "end of report")])
    ]));
    let pdf = generate_pdf(&template, rows(40))?;

    let last = pdf.page_count() as u32;
    assert!(last > 1);
    assert!(pdf.page_contains(1, "continued"));
    assert!(!pdf.page_contains(1, "end of report"));
    assert!(pdf.page_contains(last, "end of report"));
    assert!(!pdf.page_contains(last, "continued"));
    Ok(())
}

#[test]
fn test_table_header_repeats_on_every_page() -> TestResult {
    let template = single_section(json!([{
        "type": "body", "height": 30, "autoHeight": true,
        "elements": [{
            "id": "lines", "type": "table",
            "x": 0, "y": 0, "width": 300, "height": 30,
            "properties": {
                "rows": "rows",
                "columns": [
                    {"header": "Name", "field": "name", "width": 200},
                    {"header": "Qty", "field": "qty", "align": "right"}
                ]
            }
        }]
    }]));
    let pdf = generate_pdf(&template, rows(40))?;

    let pages = pdf.page_count();
    assert!(pages >= 2);
    for page in 1..=pages as u32 {
        assert!(pdf.page_contains(page, "Name"), "header missing on page {}", page);
    }
    assert_pdf_contains_text!(pdf, "Item 40");
    Ok(())
}

#[test]
fn test_table_in_fixed_height_band_continues_on_following_pages() -> TestResult {
    let template = single_section(json!([
        {
            "type": "body", "height": 30,
            "elements": [{
                "id": "lines", "type": "table",
                "x": 0, "y": 0, "width": 300, "height": 30,
                "properties": {
                    "rows": "rows",
                    "headerRepeat": true,
                    "columns": [
                        {"header": "Name", "field": "name", "width": 200},
                        {"header": "Qty", "field": "qty", "align": "right"}
                    ]
                }
            }]
        },
        band("summary", 20.0, vec![text("total", "Grand total")])
    ]));
    let pdf = generate_pdf(&template, rows(40))?;

    let pages = pdf.page_count();
    assert!(pages >= 2);
    assert!(pdf.page_contains(1, "Item 1"));
    assert!(!pdf.page_contains(1, "Item 40"));
    assert!(!pdf.page_contains(1, "Grand total"));
    let last = pages as u32;
    assert!(pdf.page_contains(last, "Grand total"));
    assert_pdf_contains_text!(pdf, "Item 40");
    Ok(())
}

#[test]
fn test_invalid_geometry_is_fatal() {
    let template = json!({
        "page": {"width": 200, "height": 200, "margins": 150},
        "sections": [{"bands": [band("body", 10.0, vec![])]}]
    });
    let pipeline = builder(&template).unwrap().build().unwrap();
    let result = pipeline.render_sync(json!({}), &RenderOptions::default());
    assert!(matches!(
        result,
        Err(PipelineError::Layout(LayoutError::InvalidGeometry { .. }))
    ));
}

#[test]
fn test_page_limit_aborts_render() {
    let template = single_section(json!([detail("rows", 100.0, vec![])]));
    let pipeline = builder(&template).unwrap().with_max_pages(2).build().unwrap();
    let result = pipeline.render_sync(rows(50), &RenderOptions::default());
    assert!(matches!(
        result,
        Err(PipelineError::Layout(LayoutError::PageLimitExceeded(2)))
    ));
}
