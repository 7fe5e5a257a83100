//! Token-based date formatting.
//!
//! The format language has no escape syntax: any character that does not start
//! a recognized token is copied verbatim.

use chrono::{DateTime, Datelike, Timelike, Utc};

const FULL_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const FULL_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const SHORT_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year4,
    Year2,
    MonthName,
    MonthShort,
    Month2,
    Month,
    Day2,
    Day,
    WeekdayName,
    WeekdayShort,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    Minute2,
    Minute,
    Second2,
    Second,
    MeridiemUpper,
    MeridiemLower,
}

/// Recognized tokens, longest first so `MMM` never splits into `MM` + `M`.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year4),
    ("MMMM", Token::MonthName),
    ("dddd", Token::WeekdayName),
    ("MMM", Token::MonthShort),
    ("ddd", Token::WeekdayShort),
    ("YY", Token::Year2),
    ("MM", Token::Month2),
    ("DD", Token::Day2),
    ("HH", Token::Hour24Padded),
    ("hh", Token::Hour12Padded),
    ("mm", Token::Minute2),
    ("ss", Token::Second2),
    ("M", Token::Month),
    ("D", Token::Day),
    ("H", Token::Hour24),
    ("h", Token::Hour12),
    ("m", Token::Minute),
    ("s", Token::Second),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
];

/// Render `date` (in UTC) according to a token format such as `YYYY-MM-DD HH:mm`.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let mut output = String::with_capacity(format.len() * 2);
    let mut rest = format;
    while let Some(first) = rest.chars().next() {
        match TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            Some((text, token)) => {
                push_token(&mut output, *token, date);
                rest = &rest[text.len()..];
            }
            None => {
                output.push(first);
                rest = &rest[first.len_utf8()..];
            }
        }
    }
    output
}

/// RFC 1123 style UTC string, e.g. `Tue, 05 Mar 2024 14:30:45 GMT`.
pub fn utc_string(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn push_token(output: &mut String, token: Token, date: &DateTime<Utc>) {
    let month = date.month0() as usize;
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let hour12 = match date.hour() % 12 {
        0 => 12,
        hour => hour,
    };
    let value = match token {
        Token::Year4 => date.year().to_string(),
        Token::Year2 => {
            let year = date.year().to_string();
            year[year.len().saturating_sub(2)..].to_string()
        }
        Token::MonthName => FULL_MONTHS[month].to_string(),
        Token::MonthShort => SHORT_MONTHS[month].to_string(),
        Token::Month2 => format!("{:02}", date.month()),
        Token::Month => date.month().to_string(),
        Token::Day2 => format!("{:02}", date.day()),
        Token::Day => date.day().to_string(),
        Token::WeekdayName => FULL_WEEKDAYS[weekday].to_string(),
        Token::WeekdayShort => SHORT_WEEKDAYS[weekday].to_string(),
        Token::Hour24Padded => format!("{:02}", date.hour()),
        Token::Hour24 => date.hour().to_string(),
        Token::Hour12Padded => format!("{hour12:02}"),
        Token::Hour12 => hour12.to_string(),
        Token::Minute2 => format!("{:02}", date.minute()),
        Token::Minute => date.minute().to_string(),
        Token::Second2 => format!("{:02}", date.second()),
        Token::Second => date.second().to_string(),
        Token::MeridiemUpper => if date.hour() < 12 { "AM" } else { "PM" }.to_string(),
        Token::MeridiemLower => if date.hour() < 12 { "am" } else { "pm" }.to_string(),
    };
    output.push_str(&value);
}
