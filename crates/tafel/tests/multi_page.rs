//! End-to-end flow: extract per-page grids, then merge them into one table
//! under a canonical schema.

use image::{GrayImage, Luma};
use tafel::{ExtractionOutcome, RawToken, TableConfig, TableInstance, TableType, extract_tables, merge_grids};

fn token(text: &str, left: i32, top: i32, width: i32, height: i32) -> RawToken {
    RawToken {
        text: text.to_string(),
        confidence: 92.0,
        left,
        top,
        width,
        height,
    }
}

fn blank_page() -> GrayImage {
    GrayImage::from_pixel(300, 120, Luma([255]))
}

/// Two pages of the same logical section. OCR mangled the second page's
/// header ("Grantee" -> "Grante") and reported one extra column.
fn pages() -> Vec<TableInstance> {
    let page_one = vec![
        token("Grantee", 10, 0, 70, 12),
        token("Amount", 180, 0, 60, 12),
        token("Acme", 10, 30, 40, 12),
        token("Corp", 55, 30, 40, 12),
        token("1,000", 180, 30, 50, 12),
    ];
    let page_two = vec![
        token("Grante", 10, 0, 60, 12),
        token("Amount", 120, 0, 60, 12),
        token("Purpose", 230, 0, 65, 12),
        token("Beta", 10, 30, 40, 12),
        token("2,500", 120, 30, 50, 12),
        token("Research", 230, 30, 70, 12),
    ];

    vec![
        TableInstance {
            image: blank_page(),
            tokens: page_one,
            table_type: TableType::Borderless,
        },
        TableInstance {
            image: blank_page(),
            tokens: page_two,
            table_type: TableType::Borderless,
        },
    ]
}

#[test]
fn test_extract_then_merge_two_pages() {
    let outcomes = extract_tables(&pages(), &TableConfig::default());
    assert_eq!(outcomes.len(), 2);

    let grids: Vec<_> = outcomes
        .into_iter()
        .map(|outcome| outcome.into_grid().expect("borderless always yields a grid"))
        .collect();

    // Page one: "Acme Corp" lands in one cell, joined left to right.
    assert_eq!(grids[0].header(), vec!["Grantee", "Amount"]);
    assert_eq!(grids[0].data_rows()[0][0].as_deref(), Some("Acme Corp"));

    let merged = merge_grids(&grids, &TableConfig::default());
    assert_eq!(merged.header(), vec!["Grantee", "Amount", "Purpose"]);

    assert_eq!(merged.data_rows().len(), 2);
    assert_eq!(merged.data_rows()[0][0].as_deref(), Some("Acme Corp"));
    assert_eq!(merged.data_rows()[0][1].as_deref(), Some("1,000"));
    assert_eq!(merged.data_rows()[0][2], None);
    assert_eq!(merged.data_rows()[1][0].as_deref(), Some("Beta"));
    assert_eq!(merged.data_rows()[1][1].as_deref(), Some("2,500"));
    assert_eq!(merged.data_rows()[1][2].as_deref(), Some("Research"));
}

#[test]
fn test_merged_markdown_output() {
    let outcomes = extract_tables(&pages(), &TableConfig::default());
    let grids: Vec<_> = outcomes.into_iter().filter_map(ExtractionOutcome::into_grid).collect();

    let markdown = merge_grids(&grids, &TableConfig::default()).to_markdown();
    assert!(markdown.contains("| Grantee | Amount | Purpose | "));
    assert!(markdown.contains("| Acme Corp | 1,000 |  | "));
    assert!(markdown.contains("| Beta | 2,500 | Research | "));
}
