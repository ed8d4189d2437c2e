//! Built-in example suite behind `bh --test`.
//!
//! Each case is a schedule with its expected flags under the default
//! configuration. User configuration is ignored so the suite checks the
//! classifier itself.

use std::io::Write;

use anyhow::{Result, bail};
use bh_core::{Classification, ClassifierConfig, RawEntry};

/// A schedule and the flags it must produce.
struct Case {
    name: &'static str,
    schedule: Vec<RawEntry>,
    expected: [bool; 3],
}

fn case(name: &'static str, schedule: &[(&str, &str)], expected: [bool; 3]) -> Case {
    Case {
        name,
        schedule: schedule
            .iter()
            .map(|(label, time)| RawEntry::new(*label, *time))
            .collect(),
        expected,
    }
}

fn every_day(open: &str, close: &str) -> Vec<(String, String)> {
    ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
        .iter()
        .flat_map(|day| {
            [
                (format!("{day}_1_open"), open.to_string()),
                (format!("{day}_1_close"), close.to_string()),
            ]
        })
        .collect()
}

fn cases() -> Vec<Case> {
    let overnight = every_day("11:00", "01:00");
    let overnight: Vec<(&str, &str)> = overnight
        .iter()
        .map(|(label, time)| (label.as_str(), time.as_str()))
        .collect();

    vec![
        case("empty schedule", &[], [false, false, false]),
        case(
            "open events only",
            &[("mon_1_open", "09:00"), ("thu_1_open", "18:00")],
            [false, false, false],
        ),
        case(
            "mon/tue 09:00-22:00",
            &[
                ("mon_1_open", "09:00"),
                ("mon_1_close", "22:00"),
                ("tue_1_open", "09:00"),
                ("tue_1_close", "22:00"),
            ],
            [false, true, true],
        ),
        case("every day 11:00-01:00", &overnight, [false, true, true]),
        case(
            "sunday night to monday morning",
            &[("sun_1_open", "22:00"), ("mon_1_close", "10:00")],
            [true, false, false],
        ),
    ]
}

/// Runs every case, printing one line each. Fails if any case mismatches.
pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    let config = ClassifierConfig::default();
    let mut failures = 0;

    for case in cases() {
        let expected = Classification::from(case.expected);
        let actual = bh_core::classify(&case.schedule, &config)?;
        if actual == expected {
            writeln!(writer, "ok      {}: {actual}", case.name)?;
        } else {
            failures += 1;
            writeln!(
                writer,
                "FAILED  {}: expected {expected}, got {actual}",
                case.name
            )?;
        }
    }

    if failures > 0 {
        bail!("{failures} example(s) failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn all_examples_pass() {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        assert_snapshot!(String::from_utf8(buf).unwrap(), @r"
        ok      empty schedule: [false, false, false]
        ok      open events only: [false, false, false]
        ok      mon/tue 09:00-22:00: [false, true, true]
        ok      every day 11:00-01:00: [false, true, true]
        ok      sunday night to monday morning: [true, false, false]
        ");
    }
}
