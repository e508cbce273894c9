//! Results-table extraction.
//!
//! Parsing is best-effort and never fails: a document without a usable table
//! yields an empty [`ResultSet`].

use std::{collections::HashSet, sync::LazyLock};

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Class the upstream puts on its results table.
pub const MARKER_CLASS: &str = "api-response";

static MARKED_TABLE: LazyLock<Selector> = LazyLock::new(|| {
  Selector::parse(&format!("table.{MARKER_CLASS}"))
    .expect("MARKED_TABLE selector is valid")
});
static ANY_TABLE: LazyLock<Selector> = LazyLock::new(|| {
  Selector::parse("table").expect("ANY_TABLE selector is valid")
});
static TBODY: LazyLock<Selector> = LazyLock::new(|| {
  Selector::parse("tbody").expect("TBODY selector is valid")
});
static ROW: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("tr").expect("ROW selector is valid"));
static CELL: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("td").expect("CELL selector is valid"));

/// One row of the results table. Short rows leave trailing fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub mobile:      Option<String>,
  pub name:        Option<String>,
  pub national_id: Option<String>,
  pub address:     Option<String>,
}

impl Record {
  fn from_cells(cells: Vec<String>) -> Self {
    let mut cells = cells.into_iter();
    Self {
      mobile:      cells.next(),
      name:        cells.next(),
      national_id: cells.next(),
      address:     cells.next(),
    }
  }

  /// Identity used for deduplication. `address` is not part of it.
  fn key(&self) -> (Option<String>, Option<String>, Option<String>) {
    (self.mobile.clone(), self.national_id.clone(), self.name.clone())
  }
}

/// Unique records in first-seen order.
pub type ResultSet = Vec<Record>;

/// Extract the deduplicated rows of the results table in `html`.
///
/// The table carrying [`MARKER_CLASS`] is preferred; otherwise the first
/// table in the document is used. The fallback is tied to one upstream's
/// markup and is kept as a best-effort heuristic.
pub fn parse_table(html: &str) -> ResultSet {
  let document = Html::parse_document(html);

  let Some(table) = document
    .select(&MARKED_TABLE)
    .next()
    .or_else(|| document.select(&ANY_TABLE).next())
  else {
    tracing::debug!("no table in upstream document");
    return ResultSet::new();
  };

  let Some(tbody) = table.select(&TBODY).next() else {
    return ResultSet::new();
  };

  let mut seen = HashSet::new();
  let mut results = ResultSet::new();

  for row in tbody.select(&ROW) {
    let cells: Vec<String> = row.select(&CELL).take(4).map(cell_text).collect();
    if cells.is_empty() {
      continue;
    }
    let record = Record::from_cells(cells);
    if seen.insert(record.key()) {
      results.push(record);
    }
  }

  results
}

/// Trim each text node, drop the empty ones, and join what is left.
fn cell_text(cell: ElementRef<'_>) -> String {
  cell
    .text()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(mobile: &str, name: &str, id: &str, address: &str) -> Record {
    Record {
      mobile:      Some(mobile.into()),
      name:        Some(name.into()),
      national_id: Some(id.into()),
      address:     Some(address.into()),
    }
  }

  #[test]
  fn extracts_rows_in_order() {
    let html = r#"
      <table class="api-response">
        <thead><tr><th>Mobile</th><th>Name</th><th>CNIC</th><th>Address</th></tr></thead>
        <tbody>
          <tr><td> 923001234567 </td><td>Ali Khan</td><td>3520212345671</td><td>Lahore</td></tr>
          <tr><td>923009876543</td><td>Sara Ahmed</td><td>4210112345672</td><td>Karachi</td></tr>
        </tbody>
      </table>"#;

    let rows = parse_table(html);
    assert_eq!(rows, vec![
      record("923001234567", "Ali Khan", "3520212345671", "Lahore"),
      record("923009876543", "Sara Ahmed", "4210112345672", "Karachi"),
    ]);
  }

  #[test]
  fn duplicate_key_keeps_first_occurrence() {
    let html = r#"
      <table class="api-response"><tbody>
        <tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>House 1</td></tr>
        <tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>House 2</td></tr>
        <tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>House 1</td></tr>
      </tbody></table>"#;

    let rows = parse_table(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].address.as_deref(), Some("House 1"));
  }

  #[test]
  fn rows_differing_in_name_are_distinct() {
    let html = r#"
      <table><tbody>
        <tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>X</td></tr>
        <tr><td>923001234567</td><td>Aly</td><td>3520212345671</td><td>X</td></tr>
      </tbody></table>"#;

    assert_eq!(parse_table(html).len(), 2);
  }

  #[test]
  fn already_unique_rows_pass_through_unchanged() {
    let rows: Vec<Record> = (0..5)
      .map(|i| {
        record(
          &format!("92300000000{i}"),
          &format!("Name {i}"),
          &format!("352021234567{i}"),
          &format!("Street {i}"),
        )
      })
      .collect();

    let body: String = rows
      .iter()
      .map(|r| {
        format!(
          "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
          r.mobile.as_deref().unwrap(),
          r.name.as_deref().unwrap(),
          r.national_id.as_deref().unwrap(),
          r.address.as_deref().unwrap(),
        )
      })
      .collect();
    let html = format!("<table class=\"api-response\"><tbody>{body}</tbody></table>");

    assert_eq!(parse_table(&html), rows);
  }

  #[test]
  fn short_rows_leave_trailing_fields_empty() {
    let html = r#"
      <table><tbody>
        <tr><td>923001234567</td><td>Ali</td></tr>
        <tr><td>923009999999</td></tr>
      </tbody></table>"#;

    let rows = parse_table(html);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name.as_deref(), Some("Ali"));
    assert_eq!(rows[0].national_id, None);
    assert_eq!(rows[0].address, None);
    assert_eq!(rows[1].mobile.as_deref(), Some("923009999999"));
    assert_eq!(rows[1].name, None);
  }

  #[test]
  fn extra_cells_are_ignored() {
    let html = r#"
      <table><tbody>
        <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td></tr>
      </tbody></table>"#;

    assert_eq!(parse_table(html), vec![record("1", "2", "3", "4")]);
  }

  #[test]
  fn marked_table_is_preferred_over_first_table() {
    let html = r#"
      <table><tbody><tr><td>layout</td></tr></tbody></table>
      <table class="striped api-response"><tbody>
        <tr><td>923001234567</td><td>Ali</td><td>3520212345671</td><td>Lahore</td></tr>
      </tbody></table>"#;

    let rows = parse_table(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mobile.as_deref(), Some("923001234567"));
  }

  #[test]
  fn falls_back_to_first_table() {
    let html = r#"
      <table><tbody><tr><td>first</td></tr></tbody></table>
      <table><tbody><tr><td>second</td></tr></tbody></table>"#;

    let rows = parse_table(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mobile.as_deref(), Some("first"));
  }

  #[test]
  fn header_only_rows_are_skipped() {
    let html = r#"
      <table>
        <tr><th>Mobile</th><th>Name</th></tr>
        <tr><td>923001234567</td><td>Ali</td></tr>
      </table>"#;

    let rows = parse_table(html);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Ali"));
  }

  #[test]
  fn nested_markup_text_is_joined_and_trimmed() {
    let html = r#"
      <table><tbody>
        <tr><td>
          <b> 92300 </b>
          <span>1234567</span>
        </td><td>  Ali &amp; Sons  </td></tr>
      </tbody></table>"#;

    let rows = parse_table(html);
    assert_eq!(rows[0].mobile.as_deref(), Some("923001234567"));
    assert_eq!(rows[0].name.as_deref(), Some("Ali & Sons"));
  }

  #[test]
  fn no_table_yields_empty_result() {
    assert!(parse_table("").is_empty());
    assert!(parse_table("<html><body><p>No records found</p></body></html>").is_empty());
    assert!(parse_table("<table><tbody></tbody></table>").is_empty());
    assert!(parse_table("<<<not html at all").is_empty());
  }
}
