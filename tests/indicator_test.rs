use common_test_utils::*;

use trading_analysis::AnalysisConfig;
use trading_analysis::indicator::analyze_technical_indicators;
use trading_analysis::indicator::bband::calculate_bollinger_bands;
use trading_analysis::indicator::ma::{calculate_ema, calculate_sma};
use trading_analysis::indicator::macd::{MACD, MACDParams, SignalLineMode};
use trading_analysis::indicator::rsi::{RSI, calculate_rsi, calculate_stoch_rsi};
use trading_analysis::indicator::support_resistance::calculate_support_resistance;
use trading_analysis::indicator::volatility::calculate_volatility;
use trading_analysis::series::PriceSeries;

#[test]
fn test_moving_average_sentinels() {
    let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(calculate_sma(&prices, 3), 4.0);
    assert_eq!(calculate_sma(&prices, 6), 0.0);
    assert_eq!(calculate_ema(&prices, 6), 0.0);
    // 시드 2.0, 이후 (4-2)*0.5+2 = 3, (5-3)*0.5+3 = 4
    assert_eq!(calculate_ema(&prices, 3), 4.0);
}

#[test]
fn test_rsi_extremes() {
    let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let falling: Vec<f64> = rising.iter().rev().copied().collect();
    assert_eq!(calculate_rsi(&rising, 14), 100.0);
    assert_eq!(calculate_rsi(&falling, 14), 0.0);

    let rsi = RSI::from_prices(&falling, 14);
    assert_eq!(rsi.value(), 0.0);
    assert_eq!(format!("{}", rsi), "RSI(14: 0.00)");
}

#[test]
fn test_stoch_rsi_bounds() {
    let prices: Vec<f64> = (0..50)
        .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
        .collect();
    let stoch = calculate_stoch_rsi(&prices, 14);
    assert!((0.0..=100.0).contains(&stoch));
}

#[test]
fn test_macd_modes_differ_on_long_series() {
    let prices: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64).powf(1.5)).collect();
    let rolling = MACD::calculate(&prices, MACDParams::default(), SignalLineMode::Rolling);
    let single = MACD::calculate(&prices, MACDParams::default(), SignalLineMode::SinglePoint);
    assert_eq!(rolling.macd_line, single.macd_line);
    assert_eq!(single.histogram, single.macd_line);
    assert!(rolling.histogram < single.histogram);
    assert_eq!(format!("{}", single).split(':').next(), Some("MACD(12,26,9"));
}

#[test]
fn test_bollinger_and_levels() {
    let prices: Vec<f64> = (0..60)
        .map(|i| 100.0 + if i % 2 == 0 { 2.0 } else { -2.0 })
        .collect();
    let bands = calculate_bollinger_bands(&prices, 20, 2.0);
    assert!((bands.middle - 100.0).abs() < 1e-9);
    assert!((bands.upper - 104.0).abs() < 1e-9);
    assert!((bands.lower - 96.0).abs() < 1e-9);

    let levels = calculate_support_resistance(&prices, 50);
    assert_eq!(levels.support_level, 98.0);
    assert_eq!(levels.resistance_level, 102.0);
}

#[test]
fn test_volatility_default_for_short_series() {
    assert_eq!(calculate_volatility(&[100.0; 10], 20, 0.02), 0.02);
    assert_eq!(calculate_volatility(&[100.0; 20], 20, 0.02), 0.0);
}

#[test]
fn test_snapshot_on_btc_run() {
    let series = PriceSeries::new(create_hourly_btc_points()).unwrap();
    let snapshot = analyze_technical_indicators(&series, &AnalysisConfig::default());

    assert_eq!(snapshot.price, btc_price_at(23));
    assert_eq!(snapshot.rsi, 100.0);
    assert!(snapshot.macd > 0.0);
    assert!(snapshot.histogram > 0.0);
    // 수익률이 일정하므로 변동성은 0에 가까움
    assert!(snapshot.volatility >= 0.0 && snapshot.volatility < 1e-9);
    assert_eq!(snapshot.volume_ratio, 1.0);
    assert!(snapshot.is_finite());
}

#[test]
fn test_snapshot_serializes_with_wire_names() {
    let series = PriceSeries::new(create_flat_points(30, 10.0, 5.0)).unwrap();
    let snapshot = analyze_technical_indicators(&series, &AnalysisConfig::default());
    let json = serde_json::to_value(snapshot).unwrap();
    assert!(json.get("stochRSI").is_some());
    assert!(json.get("bollingerBands").is_some());
    assert!(json.get("volumeRatio").is_some());
    assert!(json["patterns"].get("supportLevel").is_some());
}
