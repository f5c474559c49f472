//! Print documents: standalone HTML with print styles.

use quick_xml::escape::escape;

use sagnay_model::Table;

/// Print document heading details.
#[derive(Debug, Clone)]
pub struct PrintPage<'a> {
    pub title: &'a str,
    pub company_name: &'a str,
    pub generated_on: String,
    /// Wait after the `load` event before opening the print dialog.
    pub print_delay_ms: u64,
}

const STYLE: &str = "\
@page { size: A4 landscape; margin: 12mm; }
* { box-sizing: border-box; }
body { font-family: 'Segoe UI', Arial, sans-serif; color: #212121; margin: 0; }
header { text-align: center; margin-bottom: 16px; }
header h1 { color: #2E7D32; font-size: 20px; margin: 0 0 4px; }
header h2 { font-size: 16px; margin: 0 0 4px; }
header p { color: #616161; font-size: 12px; margin: 0; }
table { width: 100%; border-collapse: collapse; font-size: 12px; }
th { background: #2E7D32; color: #ffffff; text-align: left; padding: 6px 8px; border: 1px solid #c8c8c8; }
td { padding: 5px 8px; border: 1px solid #c8c8c8; }
tbody tr:nth-child(even) { background: #f5f5f5; }
footer { margin-top: 12px; font-size: 11px; color: #616161; text-align: center; }
@media print {
  th { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  tbody tr:nth-child(even) { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  thead { display: table-header-group; }
  tr { page-break-inside: avoid; }
}
";

/// Render a table as a printable HTML document.
///
/// The embedded script waits for `load`, then `print_delay_ms`, then opens
/// the print dialog and closes the window once printing finishes.
pub fn render_print_html(table: &Table, page: &PrintPage<'_>) -> String {
    let title = escape(page.title);
    let company = escape(page.company_name);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n<style>\n{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<header>\n");
    html.push_str(&format!("<h1>{company}</h1>\n<h2>{title}</h2>\n"));
    html.push_str(&format!(
        "<p>Generated on: {}</p>\n",
        escape(page.generated_on.as_str())
    ));
    html.push_str("</header>\n<table>\n<thead>\n<tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape(header.as_str())));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in table.text_rows() {
        html.push_str("<tr>");
        for text in row {
            html.push_str(&format!("<td>{}</td>", escape(text)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(&format!(
        "<footer>Total records: {}</footer>\n",
        table.row_count()
    ));
    html.push_str(&print_script(page.print_delay_ms));
    html.push_str("</body>\n</html>");
    html
}

fn print_script(delay_ms: u64) -> String {
    format!(
        "<script>\n\
         window.addEventListener('load', function () {{\n\
         \x20 setTimeout(function () {{ window.print(); }}, {delay_ms});\n\
         }});\n\
         window.addEventListener('afterprint', function () {{ window.close(); }});\n\
         </script>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sagnay_model::{MissingFieldPolicy, Record, RecordKind, Records};

    fn page() -> PrintPage<'static> {
        PrintPage {
            title: "Inventory <Q1>",
            company_name: "From Sagnay to Every Home",
            generated_on: "2024-03-02 09:15".to_string(),
            print_delay_ms: 500,
        }
    }

    #[test]
    fn escapes_cells_and_title() {
        let records = Records::new(
            RecordKind::Product,
            vec![Record::new().with("name", "Salt & <Pepper>")],
        );
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let html = render_print_html(&table, &page());
        assert!(html.contains("<td>Salt &amp; &lt;Pepper&gt;</td>"));
        assert!(html.contains("<title>Inventory &lt;Q1&gt;</title>"));
        assert!(!html.contains("<Pepper>"));
    }

    #[test]
    fn includes_print_rules_and_delay() {
        let records = Records::new(RecordKind::Product, Vec::new());
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let html = render_print_html(&table, &page());
        assert!(html.contains("@page { size: A4 landscape; margin: 12mm; }"));
        assert!(html.contains("setTimeout(function () { window.print(); }, 500);"));
        assert!(html.contains("<th>Name</th><th>Category</th>"));
        assert!(html.contains("<footer>Total records: 0</footer>"));
        assert!(html.ends_with("</html>"));
    }
}
