use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::PriceSeries;
use riel_dashboard::session::{apply, HELP};
use riel_dashboard::{
    run_session, Command, CommandError, Dashboard, DashboardConfig, DashboardParams,
};
use rstest::rstest;
use std::io::Cursor;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dashboard() -> Dashboard {
    let prices: Vec<f64> = (0..28)
        .map(|t| 4100.0 + t as f64 + [2.0, 0.0, -1.0, -1.0, 0.0, 1.0, -1.0][t % 7])
        .collect();
    let series = PriceSeries::daily(date(2023, 1, 1), &prices).unwrap();
    Dashboard::new(series, DashboardConfig::default()).unwrap()
}

fn run(input: &str) -> (DashboardParams, String) {
    let dashboard = dashboard();
    let mut out = Vec::new();
    let params = run_session(
        &dashboard,
        dashboard.default_params(),
        Cursor::new(input),
        &mut out,
    )
    .unwrap();
    (params, String::from_utf8(out).unwrap())
}

#[rstest]
#[case("start 2023-01-05", Command::Start(date(2023, 1, 5)))]
#[case("end 2023/01/20", Command::End(date(2023, 1, 20)))]
#[case("horizon 14", Command::Horizon(14))]
#[case("  HORIZON   3 ", Command::Horizon(3))]
#[case("reset", Command::Reset)]
#[case("show", Command::Show)]
#[case("help", Command::Help)]
#[case("?", Command::Help)]
#[case("quit", Command::Quit)]
#[case("exit", Command::Quit)]
fn test_parse_command(#[case] line: &str, #[case] expected: Command) {
    assert_eq!(line.parse::<Command>(), Ok(expected));
}

#[rstest]
#[case("", CommandError::Empty)]
#[case("plot", CommandError::Unknown("plot".to_string()))]
#[case("start", CommandError::MissingArgument("start"))]
#[case("horizon", CommandError::MissingArgument("horizon"))]
#[case("end tomorrow", CommandError::BadDate("tomorrow".to_string()))]
#[case("horizon -2", CommandError::BadNumber("-2".to_string()))]
#[case("horizon 3 4", CommandError::TrailingInput("horizon"))]
#[case("reset now", CommandError::TrailingInput("reset"))]
fn test_parse_command_errors(#[case] line: &str, #[case] expected: CommandError) {
    assert_eq!(line.parse::<Command>(), Err(expected));
}

#[test]
fn test_apply() {
    let defaults = DashboardParams {
        start: date(2023, 1, 1),
        end: date(2023, 1, 28),
        horizon: 7,
    };
    let moved = apply(Command::Start(date(2023, 1, 10)), defaults, defaults).unwrap();
    assert_eq!(moved.start, date(2023, 1, 10));
    assert_eq!(moved.end, defaults.end);

    let longer = apply(Command::Horizon(20), moved, defaults).unwrap();
    assert_eq!(longer.horizon, 20);
    assert_eq!(longer.start, date(2023, 1, 10));

    assert_eq!(apply(Command::Reset, longer, defaults), Some(defaults));
    assert_eq!(apply(Command::Show, longer, defaults), Some(longer));
    assert_eq!(apply(Command::Quit, longer, defaults), None);
}

#[test]
fn test_session_rerenders_after_each_change() {
    let (params, out) = run("horizon 3\nstart 2023-01-08\n\nshow\nquit\nhorizon 5\n");

    assert_eq!(params.horizon, 3);
    assert_eq!(params.start, date(2023, 1, 8));
    // Initial render, two changes and one show; nothing after quit
    assert_eq!(out.matches("== Khmer(riel) Stock Price Prediction ==").count(), 4);
    assert!(out.contains("Horizon: 3 day(s)"));
    assert!(!out.contains("Horizon: 5 day(s)"));
}

#[test]
fn test_session_survives_errors() {
    let (params, out) = run("bogus\nend 2023-01-03\nreset\n");

    assert!(out.contains("Unknown command 'bogus'"));
    assert!(out.contains("Error: Insufficient history"));
    // Input ran out after reset, which restores the defaults
    assert_eq!(params, dashboard().default_params());
    assert_eq!(out.matches("Predicted Prices").count(), 2);
}

#[test]
fn test_session_help() {
    let (_, out) = run("help\n");
    assert!(out.contains(HELP));
}
