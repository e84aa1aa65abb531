// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::FormatError;
use crate::models::TransactionType;

pub const CURRENCY_GLYPH: &str = "฿";

const THAI_WEEKDAYS: [&str; 7] = ["อา.", "จ.", "อ.", "พ.", "พฤ.", "ศ.", "ส."];
const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Render `amount` as baht with thousands grouping and exactly two decimals.
///
/// Negative values keep the sign after the glyph (`฿-749.50`), the same shape
/// the browser's `toLocaleString` produced.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!(
        "{}{}{}.{}",
        CURRENCY_GLYPH,
        sign,
        group_thousands(int_part),
        frac_part
    )
}

/// Float entry point for callers holding binary floats (e.g. raw JSON numbers).
pub fn format_currency_f64(amount: f64) -> Result<String, FormatError> {
    if !amount.is_finite() {
        return Err(FormatError::NonFinite(amount));
    }
    let d = Decimal::try_from(amount).map_err(|_| FormatError::OutOfRange(amount))?;
    Ok(format_currency(d))
}

/// Amount as shown in a list row: `+` for income, `-` for everything else.
pub fn format_signed(amount: Decimal, kind: Option<TransactionType>) -> String {
    let sign = match kind {
        Some(TransactionType::Income) => '+',
        _ => '-',
    };
    format!("{}{}", sign, format_currency(amount))
}

/// Short `th-TH` date, e.g. `พฤ. 15 ต.ค. 2569`.
pub fn format_thai_date(date: NaiveDate) -> String {
    let weekday = THAI_WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    let month = THAI_MONTHS[date.month0() as usize];
    format!(
        "{} {} {} {}",
        weekday,
        date.day(),
        month,
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
