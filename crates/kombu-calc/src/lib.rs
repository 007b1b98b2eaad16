//! # Kombu Calculation Engine
//!
//! 組合模式產生與結果彙總

pub mod pattern;
pub mod report;

// Re-export 主要類型
pub use pattern::PatternGenerator;
pub use report::{InventoryUsage, PackingRow, ReportCalculator, UsageReport};

/// 報表警告
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportWarning {
    pub weight: Option<rust_decimal::Decimal>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ReportWarning {
    pub fn new(
        weight: Option<rust_decimal::Decimal>,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            weight,
            message,
            severity,
        }
    }

    pub fn warning(weight: Option<rust_decimal::Decimal>, message: String) -> Self {
        Self::new(weight, message, WarningSeverity::Warning)
    }

    pub fn error(weight: Option<rust_decimal::Decimal>, message: String) -> Self {
        Self::new(weight, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum WarningSeverity {
    Warning,
    Error,
}
