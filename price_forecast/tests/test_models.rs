use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use price_forecast::models::holt_winters::{HoltWintersModel, WEEKLY_PERIOD};
use price_forecast::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use price_forecast::{ForecastError, PriceSeries};
use trade_math::HoltWinters;

fn create_test_data(days: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let prices: Vec<f64> = (0..days)
        .map(|t| 100.0 + 0.25 * t as f64 + [2.0, 1.0, 0.0, -1.0, -2.0, 0.5, -0.5][t % 7])
        .collect();
    PriceSeries::daily(start, &prices).unwrap()
}

#[test]
fn test_holt_winters_training() {
    let data = create_test_data(35);
    let model = HoltWintersModel::weekly().unwrap();
    assert_eq!(model.seasonal_period(), WEEKLY_PERIOD);
    assert_eq!(model.min_observations(), 14);

    let trained = model.train(&data).unwrap();
    assert_eq!(trained.fitted_values().len(), data.len());

    let forecast = trained.forecast(5).unwrap();
    assert_eq!(forecast.horizons(), 5);
    assert_eq!(forecast.values().len(), 5);
    assert_eq!(forecast.intervals().unwrap().len(), 5);

    // Trend plus weekly cycle is reproduced exactly
    for (h, value) in forecast.values().iter().enumerate() {
        let t = 35 + h;
        let expected = 100.0 + 0.25 * t as f64 + [2.0, 1.0, 0.0, -1.0, -2.0, 0.5, -0.5][t % 7];
        assert_abs_diff_eq!(*value, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_fit_summary() {
    let data = create_test_data(28);
    let trained = HoltWintersModel::weekly().unwrap().train(&data).unwrap();

    let summary = trained.summary().unwrap();
    assert_eq!(summary.seasonal_period, Some(7));
    assert!(summary.params.is_some());
    assert!(summary.accuracy.mae < 1e-6);
    assert!(summary.to_string().contains("Holt-Winters"));
}

#[test]
fn test_fixed_engine_parameters() {
    let engine = HoltWinters::new(7)
        .unwrap()
        .with_alpha(0.4)
        .unwrap()
        .with_beta(0.1)
        .unwrap()
        .with_gamma(0.2)
        .unwrap();
    let model = HoltWintersModel::weekly().unwrap().with_engine(engine);

    let trained = model.train(&create_test_data(21)).unwrap();
    let params = trained.state().params;
    assert_eq!((params.alpha, params.beta, params.gamma), (0.4, 0.1, 0.2));
}

#[test]
fn test_insufficient_history() {
    let model = HoltWintersModel::weekly().unwrap();
    let result = model.train(&create_test_data(10));

    assert!(matches!(
        result,
        Err(ForecastError::InsufficientData { needed: 14, got: 10 })
    ));
}

#[test]
fn test_model_parameter_validation() {
    assert!(HoltWintersModel::new(1).is_err());
    assert!(HoltWintersModel::weekly()
        .unwrap()
        .with_confidence_level(1.5)
        .is_err());
    assert!(HoltWintersModel::weekly()
        .unwrap()
        .with_confidence_level(f64::NAN)
        .is_err());
    assert!(HoltWintersModel::weekly()
        .unwrap()
        .with_confidence_level(0.8)
        .is_ok());
}

#[test]
fn test_forecast_result_operations() {
    let values = vec![105.0, 106.0, 107.0];
    let forecast = ForecastResult::new(values.clone(), 3).unwrap();

    assert_eq!(forecast.horizons(), 3);
    assert_eq!(forecast.values(), values.as_slice());
    assert!(forecast.intervals().is_none());

    assert!(ForecastResult::new(values.clone(), 4).is_err());
    assert!(ForecastResult::new_with_intervals(values, 3, vec![(0.0, 1.0)]).is_err());
}

#[test]
fn test_wider_confidence_gives_wider_intervals() {
    let noisy: Vec<f64> = create_test_data(42)
        .prices()
        .iter()
        .enumerate()
        .map(|(t, p)| p + ((t * 31) % 5) as f64 * 0.2)
        .collect();
    let data = PriceSeries::daily(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &noisy).unwrap();

    let narrow = HoltWintersModel::weekly()
        .unwrap()
        .with_confidence_level(0.5)
        .unwrap()
        .train(&data)
        .unwrap()
        .forecast(3)
        .unwrap();
    let wide = HoltWintersModel::weekly()
        .unwrap()
        .with_confidence_level(0.99)
        .unwrap()
        .train(&data)
        .unwrap()
        .forecast(3)
        .unwrap();

    let width = |r: &ForecastResult| {
        let (lo, hi) = r.intervals().unwrap()[0];
        hi - lo
    };
    assert!(width(&wide) > width(&narrow));
}
