//! Composable regex patterns for stripping schedule noise (dates, times)
//! out of news text before tokenization.

/// Joins alternatives into a single alternation pattern.
pub fn disjoint_regex(patterns: &[&str]) -> String {
    patterns.join("|")
}

/// Alternation wrapped in a non-capturing group, for literal token sets.
pub fn disjoint_token_regex(tokens: &[&str]) -> String {
    format!("(?:{})", disjoint_regex(tokens))
}

pub fn days() -> String {
    disjoint_token_regex(&[
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday", "monday",
        "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "Mon", "Tue", "Wed",
        "Thu", "Fri", "Sat", "Sun",
    ])
}

pub fn months() -> String {
    disjoint_token_regex(&[
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
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
        "Jan",
        "Feb",
        "Mar",
        "Apr",
        "May",
        "Jun",
        "Jul",
        "Aug",
        "Sep",
        "Oct",
        "Nov",
        "Dec",
    ])
}

/// Clock times like "9:30 am" or "12:05:30p.m.".
pub const TIME: &str = r"\d{1,2}(:\d+)+\s*(?:a\.m\.|p\.m\.|am|pm)*";

/// True when the token is one character repeated, e.g. "aaa" or "-".
///
/// A backreference (`^(.)\1*$`) would express this, but the regex crate does
/// not support backreferences, so it is a character scan instead.
pub fn single_char_only(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        None => false,
        Some(first) => chars.all(|c| c == first),
    }
}

fn dday_dmonth_dyear(delimiter: &str) -> String {
    format!(r"\d{{1,2}}(\s*{delimiter}\s*\d{{1,4}}){{2}}")
}

fn dday_smonth_dyear(delimiter: &str) -> String {
    format!(
        r"\d{{1,2}}\s*{delimiter}\s*{months}\s*({delimiter}\s*\d{{2,4}}){{0,1}}",
        months = months()
    )
}

fn smonth_dday_dyear() -> String {
    format!(r"{}\s*\d{{1,2}}(,\s*\d{{2,4}}){{0,1}}", months())
}

/// Calendar dates in the common numeric and spelled-month layouts.
pub fn date_regex() -> String {
    disjoint_regex(&[
        &dday_dmonth_dyear(r"\/"),
        &dday_dmonth_dyear(r"\-"),
        &dday_smonth_dyear(r"\/"),
        &dday_smonth_dyear(r"\-"),
        &dday_smonth_dyear(r" "),
        &smonth_dday_dyear(),
    ])
}
