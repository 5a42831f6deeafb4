use chrono::Duration;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;

use crate::error::{Error, Result};
use crate::summary::DailySeries;
use crate::transaction::format_date;

const SIZE: (u32, u32) = (1000, 500);

fn chart_err<E: Display>(err: E) -> Error {
    Error::Chart(err.to_string())
}

/// Draws income (green) and expense (red) per day as an SVG line chart at
/// `path`. Days are plotted by offset from the first day so both lines share
/// one x-axis.
pub fn render_daily_series(series: &DailySeries, path: &Path, date_format: &str) -> Result<()> {
    let first = match series.income.first() {
        Some(point) => point.date,
        None => return Err(Error::Chart("no days to plot".to_string())),
    };
    let last_offset = (series.income.len() as i32 - 1).max(1);
    let peak = series
        .rows()
        .map(|(_, income, expense)| income.max(expense))
        .fold(0.0_f64, f64::max);
    let top = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Income and Expenses over Time", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..last_offset, 0.0..top)
        .map_err(chart_err)?;

    let day_label = |offset: &i32| format_date(first + Duration::days(*offset as i64), date_format);
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Amount")
        .x_label_formatter(&day_label)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            series
                .income
                .iter()
                .enumerate()
                .map(|(i, point)| (i as i32, point.amount)),
            &GREEN,
        ))
        .map_err(chart_err)?
        .label("Income")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart
        .draw_series(LineSeries::new(
            series
                .expense
                .iter()
                .enumerate()
                .map(|(i, point)| (i as i32, point.amount)),
            &RED,
        ))
        .map_err(chart_err)?
        .label("Expense")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::info!("wrote chart of {} days to {}", series.income.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::summary::daily_series;
    use crate::transaction::{Category, Transaction, DATE_FORMAT};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn salary_and_food_chart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finance_data.svg");
        let records = vec![
            Transaction::new(day(1, 1, 2024), 100.0, Category::Income, "salary").unwrap(),
            Transaction::new(day(3, 1, 2024), 40.0, Category::Expense, "food").unwrap(),
        ];
        render_daily_series(&daily_series(&records), &path, DATE_FORMAT).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Income and Expenses over Time"));
        assert!(svg.contains("01-01-2024"));
    }

    #[test]
    fn single_day_chart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one_day.svg");
        let records =
            vec![Transaction::new(day(5, 3, 2024), 9.0, Category::Expense, "").unwrap()];
        render_daily_series(&daily_series(&records), &path, DATE_FORMAT).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn nothing_to_plot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.svg");
        let result = render_daily_series(&DailySeries::default(), &path, DATE_FORMAT);

        assert!(matches!(result, Err(Error::Chart(_))));
        assert!(!path.exists());
    }
}
