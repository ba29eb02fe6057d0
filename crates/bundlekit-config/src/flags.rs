//! Loosely-typed environment flag interpretation.
//!
//! A flag is tri-state: it can read as true, as false, or as neither (unset or
//! unrecognized). The two predicates are independent, so `!is_true(v)` does
//! not imply `is_false(v)`.

const TRUE_VALUES: [&str; 3] = ["yes", "on", "true"];
const FALSE_VALUES: [&str; 3] = ["no", "off", "false"];

/// Exact match against `yes`, `on`, `true`.
pub fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| TRUE_VALUES.contains(&v))
}

/// Exact match against `no`, `off`, `false`.
pub fn is_false(value: Option<&str>) -> bool {
    value.is_some_and(|v| FALSE_VALUES.contains(&v))
}
