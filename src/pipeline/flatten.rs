//! Flattening: resolve offset references and collapse the page hierarchy.
//!
//! The form processor never returns cell or field text inline. Every value
//! is a [`Layout`] holding text segments — half-open byte ranges into the
//! single shared [`Document::text`] buffer. Flattening materialises those
//! references into plain strings and reshapes tables into header lists plus
//! one name→value map per row, producing a result that serialises directly
//! to the `results.json` contract.
//!
//! Everything here is a pure function of the document; no I/O, no shared
//! state, no mutation. Flattening the same document twice produces equal
//! results, and serialising them produces byte-identical JSON.
//!
//! ## Trimming policy
//!
//! Table cells (headers and body values) are whitespace-trimmed; form field
//! names and values are not. The asymmetry is inherited from the upstream
//! contract and preserved deliberately — consumers of the JSON already
//! depend on untrimmed field text.

use crate::document::{Document, FormField, Layout, Page, Table};
use crate::error::{ExtractError, FlattenError};
use crate::output::{ExtractionResult, FlatField, FlatPage, FlatTable};
use indexmap::IndexMap;

/// Materialise a layout's text: concatenate `text[start..end]` for each
/// segment in order.
///
/// An empty segment list yields an empty string. A segment that falls
/// outside the text, is inverted, or does not land on UTF-8 character
/// boundaries means the upstream response is malformed;
/// [`FlattenError::SegmentOutOfBounds`] surfaces that immediately rather
/// than silently truncating.
pub fn resolve_layout(layout: &Layout, text: &str) -> Result<String, FlattenError> {
    let mut out = String::new();
    for segment in &layout.text_anchor.text_segments {
        let start = segment.start_index as usize;
        let end = segment.end_index as usize;
        let slice = text
            .get(start..end)
            .ok_or(FlattenError::SegmentOutOfBounds {
                start,
                end,
                len: text.len(),
            })?;
        out.push_str(slice);
    }
    Ok(out)
}

/// Flatten one table into headers plus per-row maps.
///
/// Headers come from the *first* header row only, each cell trimmed. Body
/// rows are zipped positionally against the headers: a short row produces
/// entries for its first N columns only, and cells beyond the header count
/// are dropped. Truncation at the header-list length is the intended
/// pairing policy, not an error.
pub fn flatten_table(table: &Table, text: &str) -> Result<FlatTable, FlattenError> {
    let header_row = table.header_rows.first().ok_or(FlattenError::MissingHeader)?;

    let headers = header_row
        .cells
        .iter()
        .map(|cell| Ok(resolve_layout(&cell.layout, text)?.trim().to_string()))
        .collect::<Result<Vec<_>, FlattenError>>()?;

    let mut data = Vec::with_capacity(table.body_rows.len());
    for row in &table.body_rows {
        let mut record = IndexMap::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(&row.cells) {
            let value = resolve_layout(&cell.layout, text)?.trim().to_string();
            record.insert(header.clone(), value);
        }
        data.push(record);
    }

    Ok(FlatTable { headers, data })
}

/// Flatten one form field into a name/value pair. No trimming.
pub fn flatten_field(field: &FormField, text: &str) -> Result<FlatField, FlattenError> {
    Ok(FlatField {
        name: resolve_layout(&field.field_name, text)?,
        value: resolve_layout(&field.field_value, text)?,
    })
}

/// Flatten one page: all tables, then all form fields, in given order.
pub fn flatten_page(page: &Page, text: &str) -> Result<FlatPage, FlattenError> {
    let tables = page
        .tables
        .iter()
        .map(|table| flatten_table(table, text))
        .collect::<Result<Vec<_>, _>>()?;

    let fields = page
        .form_fields
        .iter()
        .map(|field| flatten_field(field, text))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlatPage { tables, fields })
}

/// Assemble the final result: every page flattened, plus the page count and
/// the untouched document text.
///
/// Fails on the first malformed page; no partial result is produced.
pub fn assemble(document: &Document) -> Result<ExtractionResult, ExtractError> {
    let pages = document
        .pages
        .iter()
        .map(|page| {
            flatten_page(page, &document.text).map_err(|source| ExtractError::Flatten {
                page: page.page_number,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExtractionResult {
        page_count: document.pages.len(),
        pages,
        text: document.text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{TableCell, TableRow, TextAnchor, TextSegment};

    // ── Construction helpers ─────────────────────────────────────────────

    fn layout(segments: &[(u64, u64)]) -> Layout {
        Layout {
            text_anchor: TextAnchor {
                text_segments: segments
                    .iter()
                    .map(|&(s, e)| TextSegment::new(s, e))
                    .collect(),
            },
        }
    }

    fn row(cells: &[&[(u64, u64)]]) -> TableRow {
        TableRow {
            cells: cells
                .iter()
                .map(|segs| TableCell {
                    layout: layout(segs),
                })
                .collect(),
        }
    }

    fn table(header_rows: Vec<TableRow>, body_rows: Vec<TableRow>) -> Table {
        Table {
            header_rows,
            body_rows,
        }
    }

    // ── Text resolver ────────────────────────────────────────────────────

    #[test]
    fn empty_segment_list_resolves_to_empty_string() {
        assert_eq!(resolve_layout(&layout(&[]), "abcdefgh").unwrap(), "");
    }

    #[test]
    fn segments_concatenate_in_order() {
        let resolved = resolve_layout(&layout(&[(0, 2), (5, 8)]), "abcdefgh").unwrap();
        assert_eq!(resolved, "abfgh");
    }

    #[test]
    fn out_of_range_segment_is_a_bounds_error() {
        let err = resolve_layout(&layout(&[(0, 99)]), "abc").unwrap_err();
        assert_eq!(
            err,
            FlattenError::SegmentOutOfBounds {
                start: 0,
                end: 99,
                len: 3
            }
        );
    }

    #[test]
    fn inverted_segment_is_a_bounds_error() {
        let err = resolve_layout(&layout(&[(5, 2)]), "abcdefgh").unwrap_err();
        assert!(matches!(err, FlattenError::SegmentOutOfBounds { .. }));
    }

    #[test]
    fn non_char_boundary_is_a_bounds_error() {
        // 'é' is two bytes; offset 1 splits it
        let err = resolve_layout(&layout(&[(1, 2)]), "é").unwrap_err();
        assert!(matches!(err, FlattenError::SegmentOutOfBounds { .. }));
    }

    // ── Table flattener ──────────────────────────────────────────────────

    #[test]
    fn table_rows_are_keyed_by_header() {
        let text = "Name Age Alice 30";
        let t = table(
            vec![row(&[&[(0, 4)], &[(5, 8)]])],
            vec![row(&[&[(9, 14)], &[(15, 17)]])],
        );
        let flat = flatten_table(&t, text).unwrap();
        assert_eq!(flat.headers, vec!["Name", "Age"]);
        assert_eq!(flat.data.len(), 1);
        assert_eq!(flat.data[0]["Name"], "Alice");
        assert_eq!(flat.data[0]["Age"], "30");
    }

    #[test]
    fn headers_and_cells_are_trimmed() {
        let text = " Name  Alice ";
        let t = table(vec![row(&[&[(0, 6)]])], vec![row(&[&[(6, 13)]])]);
        let flat = flatten_table(&t, text).unwrap();
        assert_eq!(flat.headers, vec!["Name"]);
        assert_eq!(flat.data[0]["Name"], "Alice");
    }

    #[test]
    fn short_body_row_fills_leading_headers_only() {
        let text = "A B C x y";
        let t = table(
            vec![row(&[&[(0, 1)], &[(2, 3)], &[(4, 5)]])],
            vec![row(&[&[(6, 7)], &[(8, 9)]])],
        );
        let flat = flatten_table(&t, text).unwrap();
        assert_eq!(flat.headers, vec!["A", "B", "C"]);
        let record = &flat.data[0];
        assert_eq!(record["A"], "x");
        assert_eq!(record["B"], "y");
        assert!(!record.contains_key("C"));
    }

    #[test]
    fn extra_body_cells_are_dropped() {
        let text = "A x y z";
        let t = table(
            vec![row(&[&[(0, 1)]])],
            vec![row(&[&[(2, 3)], &[(4, 5)], &[(6, 7)]])],
        );
        let flat = flatten_table(&t, text).unwrap();
        let record = &flat.data[0];
        assert_eq!(record.len(), 1);
        assert_eq!(record["A"], "x");
    }

    #[test]
    fn missing_header_rows_is_an_error() {
        let t = table(vec![], vec![row(&[&[(0, 1)]])]);
        let err = flatten_table(&t, "abc").unwrap_err();
        assert_eq!(err, FlattenError::MissingHeader);
    }

    #[test]
    fn only_first_header_row_names_columns() {
        let text = "Name Age Extra";
        let t = table(
            vec![row(&[&[(0, 4)], &[(5, 8)]]), row(&[&[(9, 14)]])],
            vec![],
        );
        let flat = flatten_table(&t, text).unwrap();
        assert_eq!(flat.headers, vec!["Name", "Age"]);
    }

    #[test]
    fn row_map_keys_follow_header_order() {
        let text = "Zebra Apple 1 2";
        let t = table(
            vec![row(&[&[(0, 5)], &[(6, 11)]])],
            vec![row(&[&[(12, 13)], &[(14, 15)]])],
        );
        let flat = flatten_table(&t, text).unwrap();
        let keys: Vec<_> = flat.data[0].keys().cloned().collect();
        assert_eq!(keys, vec!["Zebra", "Apple"]);
    }

    // ── Field flattener ──────────────────────────────────────────────────

    #[test]
    fn fields_are_not_trimmed() {
        let text = "  Total   19.99 ";
        let field = FormField {
            field_name: layout(&[(0, 9)]),
            field_value: layout(&[(9, 16)]),
        };
        let flat = flatten_field(&field, text).unwrap();
        assert_eq!(flat.name, "  Total  ");
        assert_eq!(flat.value, " 19.99 ");
    }

    #[test]
    fn field_value_may_span_segments() {
        let text = "abcdefgh";
        let field = FormField {
            field_name: layout(&[(0, 2)]),
            field_value: layout(&[(2, 4), (6, 8)]),
        };
        let flat = flatten_field(&field, text).unwrap();
        assert_eq!(flat.value, "cdgh");
    }

    // ── Page aggregation and assembly ────────────────────────────────────

    fn sample_document() -> Document {
        let text = "Name Age Alice 30 Total 19.99".to_string();
        Document {
            pages: vec![Page {
                page_number: 1,
                tables: vec![table(
                    vec![row(&[&[(0, 4)], &[(5, 8)]])],
                    vec![row(&[&[(9, 14)], &[(15, 17)]])],
                )],
                form_fields: vec![FormField {
                    field_name: layout(&[(18, 23)]),
                    field_value: layout(&[(24, 29)]),
                }],
            }],
            text,
        }
    }

    #[test]
    fn page_keeps_table_and_field_order() {
        let doc = sample_document();
        let page = flatten_page(&doc.pages[0], &doc.text).unwrap();
        assert_eq!(page.tables.len(), 1);
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].name, "Total");
        assert_eq!(page.fields[0].value, "19.99");
    }

    #[test]
    fn assemble_produces_the_contract_shape() {
        let doc = sample_document();
        let result = assemble(&doc).unwrap();
        assert_eq!(result.page_count, 1);
        assert_eq!(result.text, doc.text);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pageCount"], 1);
        assert_eq!(json["pages"][0]["tables"][0]["headers"][0], "Name");
        assert_eq!(json["pages"][0]["tables"][0]["data"][0]["Age"], "30");
        assert_eq!(json["pages"][0]["fields"][0]["name"], "Total");
        assert_eq!(json["text"], doc.text);
    }

    #[test]
    fn assemble_reports_the_failing_page() {
        let mut doc = sample_document();
        doc.pages[0].page_number = 7;
        doc.pages[0].tables[0].header_rows.clear();
        let err = assemble(&doc).unwrap_err();
        match err {
            ExtractError::Flatten { page, source } => {
                assert_eq!(page, 7);
                assert_eq!(source, FlattenError::MissingHeader);
            }
            other => panic!("expected Flatten, got {other:?}"),
        }
    }

    #[test]
    fn assemble_is_deterministic() {
        let doc = sample_document();
        let first = serde_json::to_string(&assemble(&doc).unwrap()).unwrap();
        let second = serde_json::to_string(&assemble(&doc).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_document_assembles_to_empty_result() {
        let result = assemble(&Document::default()).unwrap();
        assert_eq!(result.page_count, 0);
        assert!(result.pages.is_empty());
        assert_eq!(result.text, "");
    }
}
