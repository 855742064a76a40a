use prettytable::{row, Cell, Row, Table};
use receipt_engine::{DataSource, ReceiptRecord};
use vipps_tools::Receipt;

pub fn format_receipt(receipt: &Receipt) -> String {
    let currency = receipt.currency();
    let mut table = Table::new();
    table.add_row(row!["Item", "Amount"]);
    let lines = receipt.order_lines();
    for line in &lines {
        let amount = line.total_amount.map(|a| format!("{a} {currency}")).unwrap_or_else(|| "-".to_string());
        table.add_row(Row::new(vec![Cell::new(line.name.as_deref().unwrap_or("-")), Cell::new(&amount)]));
    }
    table.add_row(Row::new(vec![
        Cell::new("Total Amount"),
        Cell::new(&format!("{} {currency}", receipt.total_amount())),
    ]));
    format!("--- Receipt Summary ---\nItems: {}\n{table}", lines.len())
}

pub fn format_receipt_records(records: &[ReceiptRecord]) -> String {
    let mut table = Table::new();
    table.add_row(row!["Order ID", "Fetched At", "Sources", "Total", "Receipt URL"]);
    for record in records {
        let sources = record.source.iter().map(DataSource::to_string).collect::<Vec<String>>().join(", ");
        let total = record
            .receipt
            .as_ref()
            .map(|r| format!("{} {}", r.total_amount(), r.currency()))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(Row::new(vec![
            Cell::new(record.order_id.as_str()),
            Cell::new(&record.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(&sources),
            Cell::new(&total),
            Cell::new(record.receipt_url.as_deref().unwrap_or("-")),
        ]));
    }
    table.to_string()
}

pub fn to_pretty_json<T: serde::Serialize>(value: &T, what: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Could not represent {what} as JSON. {e}"))
}
