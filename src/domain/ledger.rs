use crate::domain::model::OrderRecord;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Service")]
    service: &'a str,
    #[serde(rename = "Link")]
    link: &'a str,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Order ID")]
    order_id: &'a str,
    #[serde(rename = "Cost")]
    cost: String,
}

impl<'a> From<&'a OrderRecord> for CsvRow<'a> {
    fn from(record: &'a OrderRecord) -> Self {
        Self {
            time: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            service: &record.service,
            link: &record.link,
            quantity: record.quantity,
            order_id: &record.order_id,
            cost: record.cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
        }
    }
}

/// 單一工作階段內成功下單的紀錄，只能追加
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    records: Vec<OrderRecord>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: OrderRecord) -> &OrderRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_cost(&self) -> Decimal {
        self.records.iter().filter_map(|r| r.cost).sum()
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        // 空帳本也要輸出標題列
        if self.records.is_empty() {
            writer.write_record(["Time", "Service", "Link", "Quantity", "Order ID", "Cost"])?;
        }
        for record in &self.records {
            writer.serialize(CsvRow::from(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn export_csv<S: Storage>(&self, storage: &S, filename: &str) -> Result<String> {
        let csv = self.to_csv()?;
        tracing::debug!("Exporting {} orders ({} bytes) to {}", self.len(), csv.len(), filename);
        storage.write_file(filename, csv.as_bytes()).await
    }
}
