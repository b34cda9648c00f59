use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 피보나치 되돌림 레벨 (고가에서 범위 비율만큼 하락한 가격)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetracementLevels {
    pub level_0: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    pub level_100: f64,
}

/// 피보나치 확장 레벨 (고가에서 범위 비율만큼 상승한 가격)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtensionLevels {
    pub level_1618: f64,
    pub level_2618: f64,
    pub level_4236: f64,
}

/// 피벗 포인트와 저항/지지 레벨
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub r3: f64,
    pub r2: f64,
    pub r1: f64,
    pub pivot: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// 고가/저가로부터 계산한 피보나치 레벨 묶음
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub retracement: RetracementLevels,
    pub extension: ExtensionLevels,
    pub pivots: PivotLevels,
}

impl FibonacciLevels {
    /// 피보나치 레벨 계산
    ///
    /// 피벗은 `(high + low + level_500) / 3`이며 R1-R3/S1-S3는 표준 피벗 공식을 따릅니다.
    ///
    /// # Arguments
    /// * `high` - 구간 고가
    /// * `low` - 구간 저가
    pub fn calculate(high: f64, low: f64) -> Self {
        let diff = high - low;
        let retracement = RetracementLevels {
            level_0: high,
            level_236: high - diff * 0.236,
            level_382: high - diff * 0.382,
            level_500: high - diff * 0.5,
            level_618: high - diff * 0.618,
            level_786: high - diff * 0.786,
            level_100: low,
        };
        let extension = ExtensionLevels {
            level_1618: high + diff * 1.618,
            level_2618: high + diff * 2.618,
            level_4236: high + diff * 4.236,
        };

        let pivot = (high + low + retracement.level_500) / 3.0;
        let pivots = PivotLevels {
            r3: pivot + diff * 2.0,
            r2: pivot + diff,
            r1: pivot * 2.0 - low,
            pivot,
            s1: pivot * 2.0 - high,
            s2: pivot - diff,
            s3: pivot - diff * 2.0,
        };

        FibonacciLevels {
            retracement,
            extension,
            pivots,
        }
    }
}

impl Display for FibonacciLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fibonacci(38.2%: {:.2}, 61.8%: {:.2}, 161.8%: {:.2}, pivot: {:.2})",
            self.retracement.level_382,
            self.retracement.level_618,
            self.extension.level_1618,
            self.pivots.pivot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_for_unit_range() {
        let levels = FibonacciLevels::calculate(100.0, 0.0);
        assert!((levels.retracement.level_382 - 61.8).abs() < 1e-9);
        assert!((levels.retracement.level_618 - 38.2).abs() < 1e-9);
        assert!((levels.retracement.level_786 - 21.4).abs() < 1e-9);
        assert!((levels.extension.level_1618 - 261.8).abs() < 1e-9);
        assert_eq!(levels.retracement.level_0, 100.0);
        assert_eq!(levels.retracement.level_100, 0.0);
    }

    #[test]
    fn test_pivots() {
        let levels = FibonacciLevels::calculate(100.0, 0.0);
        // (100 + 0 + 50) / 3
        assert!((levels.pivots.pivot - 50.0).abs() < 1e-9);
        assert!((levels.pivots.r1 - 100.0).abs() < 1e-9);
        assert!((levels.pivots.s1 - 0.0).abs() < 1e-9);
        assert!((levels.pivots.r3 - 250.0).abs() < 1e-9);
        assert!((levels.pivots.s2 + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_range_collapses() {
        let levels = FibonacciLevels::calculate(42.0, 42.0);
        assert_eq!(levels.retracement.level_618, 42.0);
        assert_eq!(levels.extension.level_4236, 42.0);
        assert_eq!(levels.pivots.pivot, 42.0);
    }
}
