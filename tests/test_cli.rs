use chrono::NaiveDate;
use clap::Parser;
use pretty_assertions::assert_eq;
use price_forecast::PriceSeries;
use riel_dashboard::{Cli, Dashboard, DashboardConfig, DashboardParams};
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dashboard() -> Dashboard {
    let prices: Vec<f64> = (0..21).map(|t| 4100.0 + t as f64).collect();
    let series = PriceSeries::daily(date(2023, 1, 1), &prices).unwrap();
    Dashboard::new(series, DashboardConfig::default()).unwrap()
}

#[test]
fn test_overrides_apply_on_top_of_defaults() {
    let cli = Cli::parse_from(["riel-dashboard", "--start", "2023-01-05", "--horizon", "3"]);
    let defaults = DashboardParams {
        start: date(2023, 1, 1),
        end: date(2023, 1, 21),
        horizon: 7,
    };

    assert_eq!(
        cli.params(defaults),
        DashboardParams {
            start: date(2023, 1, 5),
            end: date(2023, 1, 21),
            horizon: 3,
        }
    );
}

#[rstest]
#[case(&["riel-dashboard", "--horizon", "0"])]
#[case(&["riel-dashboard", "--horizon", "31"])]
#[case(&["riel-dashboard", "--start", "yesterday"])]
fn test_bad_arguments_rejected(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args.iter().copied()).is_err());
}

#[rstest]
#[case(false, true, false)]
#[case(false, false, true)]
#[case(true, true, false)]
#[case(true, false, false)]
fn test_failure_only_for_one_shot_runs(
    #[case] interactive: bool,
    #[case] forecast_ok: bool,
    #[case] expected: bool,
) {
    let mut args = vec!["riel-dashboard"];
    if interactive {
        args.push("--interactive");
    }
    let cli = Cli::parse_from(args);

    let dashboard = dashboard();
    let mut params = dashboard.default_params();
    if !forecast_ok {
        // Five days is less than two weekly seasons
        params.end = date(2023, 1, 5);
    }
    let view = dashboard.render(&params);

    assert_eq!(view.is_ok(), forecast_ok);
    assert_eq!(cli.is_failure(&view), expected);
}

#[test]
fn test_model_name_reports_period() {
    assert_eq!(dashboard().model_name(), "Holt-Winters (additive, period=7)");
}
