use crate::config::CommissionRates;
use crate::domain::digital_order::{DigitalOrder, DigitalOrderStatus};
use crate::domain::food_order::{FoodOrder, FoodOrderStatus};
use crate::error::{CoreError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A calendar month as a half-open UTC interval `[start, end)`.
///
/// The exclusive end keeps an order created exactly on a month boundary from
/// being counted in two windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    year: i32,
    month: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first = first_of(year, month)
            .ok_or_else(|| CoreError::Validation(format!("invalid month: {year}-{month}")))?;
        let next = match month {
            12 => first_of(year + 1, 1),
            _ => first_of(year, month + 1),
        }
        .ok_or_else(|| CoreError::Validation(format!("invalid month: {year}-{month}")))?;
        Ok(Self {
            year,
            month,
            start: first,
            end: next,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn days(&self) -> u32 {
        (self.end - self.start).num_days() as u32
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

fn first_of(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Some(
        NaiveDate::from_ymd_opt(year, month, 1)?
            .and_time(NaiveTime::MIN)
            .and_utc(),
    )
}

/// Monthly commission report over completed food orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    pub total_profit: Decimal,
    pub order_count: usize,
    /// One entry per day of the month, index 0 = day 1. Days with no
    /// completed orders report zero rather than being absent.
    pub daily_profit: Vec<Decimal>,
}

/// Dashboard income summary for one window.
///
/// Digital revenue counts at full order value; food revenue counts at
/// commission only. The asymmetry is deliberate and mixing the two rates is
/// a correctness bug.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub digital_income: Decimal,
    pub commission_income: Decimal,
    pub total_income: Decimal,
    pub approved_orders: usize,
    pub products_sold: usize,
}

/// Platform revenue realized from a single food order, rounded to 2 dp.
///
/// Only a completed order contributes; every other status yields exactly
/// zero, not an error.
pub fn order_profit(order: &FoodOrder, rates: &CommissionRates) -> Decimal {
    if order.order_status != FoodOrderStatus::Completed {
        return Decimal::ZERO;
    }
    (order.delivery_charge.value() * rates.delivery_rate
        + order.food_total.value() * rates.food_rate)
        .round_dp(2)
}

/// Sums `order_profit` over the orders created inside `window` and buckets
/// them into a per-day histogram sized to that month.
pub fn aggregate_profit(
    orders: &[FoodOrder],
    window: &MonthWindow,
    rates: &CommissionRates,
) -> ProfitReport {
    let mut daily_profit = vec![Decimal::ZERO; window.days() as usize];
    let mut total_profit = Decimal::ZERO;
    let mut order_count = 0;

    for order in orders {
        if order.order_status != FoodOrderStatus::Completed || !window.contains(order.created_at) {
            continue;
        }
        let profit = order_profit(order, rates);
        total_profit += profit;
        order_count += 1;
        daily_profit[order.created_at.day() as usize - 1] += profit;
    }

    ProfitReport {
        total_profit,
        order_count,
        daily_profit,
    }
}

/// Dashboard-level income: approved digital orders at full value plus food
/// commission over the same window.
pub fn aggregate_income(
    digital: &[DigitalOrder],
    food: &[FoodOrder],
    window: &MonthWindow,
    rates: &CommissionRates,
) -> IncomeSummary {
    let mut digital_income = Decimal::ZERO;
    let mut approved_orders = 0;
    let mut products_sold = 0;
    for order in digital {
        if order.order_status != DigitalOrderStatus::Approved || !window.contains(order.ordered_at)
        {
            continue;
        }
        digital_income += order.order_amount.value();
        approved_orders += 1;
        products_sold += order.items.len();
    }

    let commission_income = aggregate_profit(food, window, rates).total_profit;

    IncomeSummary {
        digital_income,
        commission_income,
        total_income: digital_income + commission_income,
        approved_orders,
        products_sold,
    }
}

/// Month-over-month change in percent.
///
/// Division by zero is a defined policy rather than an accident: a previous
/// period of zero reports 100 when anything was earned now and 0 when both
/// periods are zero.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * dec!(100)
    } else if current > Decimal::ZERO {
        dec!(100)
    } else {
        Decimal::ZERO
    }
}
