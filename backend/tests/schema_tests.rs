//! Schema normalizer tests
//!
//! Covers upload parsing, the keyword auto-mapping heuristic, and the
//! normalization into the canonical four-column catalog.

use proptest::prelude::*;
use restock_portal_backend::services::schema::{
    self, EXPIRY_KEYWORDS, NAME_KEYWORDS, QTY_KEYWORDS,
};
use rust_decimal::Decimal;
use shared::ColumnMapping;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

mod parsing {
    use super::*;

    #[test]
    fn parses_a_csv_export() {
        let csv = "Item Description,Expiry Date,Qty On Hand\nParacetamol 500mg,2026-01,12\nIbuprofen 200mg,2025-11,3\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();

        assert_eq!(
            parsed.headers,
            headers(&["Item Description", "Expiry Date", "Qty On Hand"])
        );
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0][0], "Paracetamol 500mg");
    }

    #[test]
    fn parses_a_tab_delimited_export() {
        let tsv = "Product\tDate\tBalance\nAspirin\t2026-03\t7\n";
        let parsed = schema::parse_upload("pos-export.tsv", tsv.as_bytes()).unwrap();

        assert_eq!(parsed.headers, headers(&["Product", "Date", "Balance"]));
        assert_eq!(parsed.rows, vec![vec!["Aspirin", "2026-03", "7"]]);
    }

    #[test]
    fn rejects_unsupported_extensions() {
        let err = schema::parse_upload("stock.xlsx", b"PK\x03\x04").unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn rejects_unreadable_encoding() {
        // Invalid UTF-8 in a data cell
        let bytes = b"Name,Qty\n\xff\xfe,3\n";
        assert!(schema::parse_upload("stock.csv", bytes).is_err());
    }

    #[test]
    fn rejects_header_only_of_empty_cells() {
        assert!(schema::parse_upload("stock.csv", b",,\n").is_err());
    }

    #[test]
    fn tolerates_ragged_rows() {
        let csv = "Name,Expiry,Qty\nShortRow\nFull,2026-01,4\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0], vec!["ShortRow"]);
    }
}

mod heuristic {
    use super::*;

    #[test]
    fn qty_on_hand_header_auto_maps_to_quantity() {
        let headers = headers(&["Item Description", "Expiry Date", "Qty On Hand"]);
        let mapping = schema::suggest_mapping(&headers);

        assert_eq!(mapping.name_col, 0); // "desc" keyword
        assert_eq!(mapping.expiry_col, 1); // "exp" keyword
        assert_eq!(mapping.qty_col, 2); // "qty" (and "hand") keyword
    }

    #[test]
    fn matching_is_case_insensitive() {
        let headers = headers(&["PRODUCT NAME", "VALIDITY", "STK BALANCE"]);
        let mapping = schema::suggest_mapping(&headers);

        assert_eq!(mapping.name_col, 0);
        assert_eq!(mapping.expiry_col, 1);
        assert_eq!(mapping.qty_col, 2);
    }

    #[test]
    fn first_match_wins() {
        // Both columns 1 and 2 contain a name keyword; the first wins.
        let headers = headers(&["Code", "Item", "Description", "Qty"]);
        let mapping = schema::suggest_mapping(&headers);
        assert_eq!(mapping.name_col, 1);
    }

    #[test]
    fn defaults_to_first_column_without_a_match() {
        let headers = headers(&["A", "B", "C"]);
        let mapping = schema::suggest_mapping(&headers);

        assert_eq!(mapping.name_col, 0);
        assert_eq!(mapping.expiry_col, 0);
        assert_eq!(mapping.qty_col, 0);
    }
}

mod normalization {
    use super::*;

    #[test]
    fn produces_the_canonical_catalog() {
        let csv = "Item,Exp,Qty\nParacetamol 500mg,2026-01,12\nParacetamol 500mg,2025-06,2\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        let mapping = schema::suggest_mapping(&parsed.headers);
        let items = schema::normalize(&parsed, &mapping).unwrap();

        // Duplicate product names pass through as separate rows
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "Paracetamol 500mg");
        assert_eq!(items[0].expiry, "2026-01");
        assert_eq!(items[0].available_qty, Decimal::from(12));
        assert_eq!(items[0].order_qty, 0);
        assert_eq!(items[1].expiry, "2025-06");
    }

    #[test]
    fn explicit_mapping_wins_over_the_heuristic() {
        // Heuristic would pick column 0 for the name ("Item Code"); the
        // admin explicitly maps column 1 instead and that must be honored.
        let csv = "Item Code,Label,Count\nP-001,Paracetamol,5\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        let mapping = ColumnMapping {
            name_col: 1,
            expiry_col: 0,
            qty_col: 2,
        };
        let items = schema::normalize(&parsed, &mapping).unwrap();

        assert_eq!(items[0].product_name, "Paracetamol");
        assert_eq!(items[0].expiry, "P-001");
        assert_eq!(items[0].available_qty, Decimal::from(5));
    }

    #[test]
    fn unparsable_and_negative_quantities_become_zero() {
        let csv = "Name,Exp,Qty\nA,2026,n/a\nB,2026,-4\nC,2026,2.5\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        let mapping = schema::suggest_mapping(&parsed.headers);
        let items = schema::normalize(&parsed, &mapping).unwrap();

        assert_eq!(items[0].available_qty, Decimal::ZERO);
        assert_eq!(items[1].available_qty, Decimal::ZERO);
        assert_eq!(items[2].available_qty, Decimal::new(25, 1));
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let csv = "Name,Exp,Qty\nOnlyName\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        let mapping = schema::suggest_mapping(&parsed.headers);
        let items = schema::normalize(&parsed, &mapping).unwrap();

        assert_eq!(items[0].product_name, "OnlyName");
        assert_eq!(items[0].expiry, "");
        assert_eq!(items[0].available_qty, Decimal::ZERO);
    }

    #[test]
    fn out_of_range_mapping_is_an_error() {
        let csv = "Name,Qty\nA,1\n";
        let parsed = schema::parse_upload("stock.csv", csv.as_bytes()).unwrap();
        let mapping = ColumnMapping {
            name_col: 0,
            expiry_col: 5,
            qty_col: 1,
        };
        assert!(schema::normalize(&parsed, &mapping).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z ]{1,12}", 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The suggested mapping always points at existing columns.
    #[test]
    fn prop_suggestion_is_always_in_range(headers in header_strategy()) {
        let mapping = schema::suggest_mapping(&headers);
        prop_assert!(mapping.name_col < headers.len());
        prop_assert!(mapping.expiry_col < headers.len());
        prop_assert!(mapping.qty_col < headers.len());
    }

    /// A header containing a known keyword is never passed over in favor of
    /// a later column.
    #[test]
    fn prop_first_keyword_match_wins(
        headers in header_strategy(),
        keyword_set in 0usize..3,
    ) {
        let keywords: &[&str] = match keyword_set {
            0 => &NAME_KEYWORDS,
            1 => &EXPIRY_KEYWORDS,
            _ => &QTY_KEYWORDS,
        };
        let mapping = schema::suggest_mapping(&headers);
        let selected = match keyword_set {
            0 => mapping.name_col,
            1 => mapping.expiry_col,
            _ => mapping.qty_col,
        };

        let first_match = headers.iter().position(|h| {
            let h = h.to_lowercase();
            keywords.iter().any(|k| h.contains(k))
        });
        prop_assert_eq!(selected, first_match.unwrap_or(0));
    }

    /// Normalization always yields one catalog row per upload row, each with
    /// a non-negative quantity and order quantity 0.
    #[test]
    fn prop_normalize_preserves_row_count(
        rows in prop::collection::vec(
            prop::collection::vec("[A-Za-z0-9 .-]{0,10}", 3..4),
            0..20,
        )
    ) {
        let upload = schema::ParsedUpload {
            headers: vec!["Name".into(), "Exp".into(), "Qty".into()],
            rows,
        };
        let mapping = ColumnMapping { name_col: 0, expiry_col: 1, qty_col: 2 };
        let items = schema::normalize(&upload, &mapping).unwrap();

        prop_assert_eq!(items.len(), upload.rows.len());
        for item in &items {
            prop_assert!(item.available_qty >= Decimal::ZERO);
            prop_assert_eq!(item.order_qty, 0);
        }
    }
}
