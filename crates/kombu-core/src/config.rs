//! 裝袋配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::quantize_tenths;
use crate::{PackingError, Result};

/// 每袋枚數上限（同時限制搜尋遞迴深度）
pub const MAX_PIECES_PER_BAG: u32 = 20;

/// 裝袋配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingConfig {
    /// 目標重量下限（g，含）
    pub target_min: Decimal,

    /// 目標重量上限（g，含）
    pub target_max: Decimal,

    /// 每袋枚數
    pub pieces_per_bag: u32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            target_min: Decimal::from(40),
            target_max: Decimal::from(43),
            pieces_per_bag: 6,
        }
    }
}

impl PackingConfig {
    /// 創建新的配置
    pub fn new(target_min: Decimal, target_max: Decimal, pieces_per_bag: u32) -> Self {
        Self {
            target_min,
            target_max,
            pieces_per_bag,
        }
    }

    /// 建構器模式：設置目標重量範圍
    pub fn with_target_window(mut self, target_min: Decimal, target_max: Decimal) -> Self {
        self.target_min = target_min;
        self.target_max = target_max;
        self
    }

    /// 建構器模式：設置每袋枚數
    pub fn with_pieces_per_bag(mut self, pieces_per_bag: u32) -> Self {
        self.pieces_per_bag = pieces_per_bag;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.pieces_per_bag == 0 {
            return Err(PackingError::InvalidConfig(
                "每袋枚數必須為正整數".to_string(),
            ));
        }
        if self.pieces_per_bag > MAX_PIECES_PER_BAG {
            return Err(PackingError::InvalidConfig(format!(
                "每袋枚數不可超過 {}: {}",
                MAX_PIECES_PER_BAG, self.pieces_per_bag
            )));
        }
        if self.target_min <= Decimal::ZERO || self.target_max <= Decimal::ZERO {
            return Err(PackingError::InvalidConfig(format!(
                "目標重量必須為正數: {}..={}",
                self.target_min, self.target_max
            )));
        }
        if self.target_min > self.target_max {
            return Err(PackingError::InvalidConfig(format!(
                "目標重量下限大於上限: {} > {}",
                self.target_min, self.target_max
            )));
        }
        Ok(())
    }

    /// 驗證並轉換為量化目標範圍
    pub fn quantized_window(&self) -> Result<TargetWindow> {
        self.validate()?;

        let quantize = |value: Decimal| {
            quantize_tenths(value).ok_or_else(|| {
                PackingError::InvalidConfig(format!("目標重量超出範圍: {}", value))
            })
        };

        Ok(TargetWindow {
            min_sum: quantize(self.target_min)?,
            max_sum: quantize(self.target_max)?,
            pieces_per_bag: self.pieces_per_bag,
        })
    }
}

/// 量化目標範圍（0.1g 單位，上下限皆含）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWindow {
    pub min_sum: i64,
    pub max_sum: i64,
    pub pieces_per_bag: u32,
}

impl TargetWindow {
    /// 合計重量是否落在範圍內
    pub fn contains(&self, sum: i64) -> bool {
        self.min_sum <= sum && sum <= self.max_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = PackingConfig::default();
        assert_eq!(config.pieces_per_bag, 6);

        let window = config.quantized_window().unwrap();
        assert_eq!(window.min_sum, 400);
        assert_eq!(window.max_sum, 430);
        assert!(window.contains(400));
        assert!(window.contains(430));
        assert!(!window.contains(399));
        assert!(!window.contains(431));
    }

    #[test]
    fn test_config_builder() {
        let config = PackingConfig::default()
            .with_target_window(dec("8.0"), dec("9.0"))
            .with_pieces_per_bag(2);

        assert_eq!(config, PackingConfig::new(dec("8.0"), dec("9.0"), 2));
        let window = config.quantized_window().unwrap();
        assert_eq!((window.min_sum, window.max_sum), (80, 90));
    }

    #[rstest]
    #[case::zero_pieces("40", "43", 0)]
    #[case::too_many_pieces("40", "43", 21)]
    #[case::inverted_window("43", "40", 6)]
    #[case::zero_min("0", "43", 6)]
    fn test_invalid_config(#[case] min: &str, #[case] max: &str, #[case] pieces: u32) {
        let config = PackingConfig::new(dec(min), dec(max), pieces);
        assert!(matches!(
            config.quantized_window(),
            Err(PackingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_point_window() {
        let window = PackingConfig::new(dec("42.0"), dec("42.0"), 6)
            .quantized_window()
            .unwrap();
        assert!(window.contains(420));
        assert!(!window.contains(419));
        assert!(!window.contains(421));
    }
}
