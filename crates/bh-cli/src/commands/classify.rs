//! Classify command: prints the breakfast/dinner/supper flags of a schedule.

use std::io::Write;

use anyhow::{Context, Result};
use bh_core::{ClassifierConfig, RawEntry};

use crate::cli::Output;

pub fn run<W: Write>(
    writer: &mut W,
    entries: &[RawEntry],
    config: &ClassifierConfig,
    output: Output,
) -> Result<()> {
    tracing::debug!(entries = entries.len(), ?output, "classifying schedule");

    match output {
        Output::Text | Output::Json => {
            let result =
                bh_core::classify(entries, config).context("failed to classify schedule")?;
            if output == Output::Json {
                writeln!(writer, "{}", serde_json::to_string(&result)?)?;
            } else {
                writeln!(writer, "{result}")?;
            }
        }
        Output::Explain | Output::ExplainJson => {
            let report = bh_core::explain(entries, config).context("failed to classify schedule")?;
            if output == Output::ExplainJson {
                writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write!(writer, "{report}")?;
                writeln!(writer, "{}", report.classification())?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::commands::util::parse_schedule;

    fn render(schedule: &str, output: Output) -> String {
        let entries = parse_schedule(schedule).unwrap();
        let mut buf = Vec::new();
        run(&mut buf, &entries, &ClassifierConfig::default(), output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    const LATE_SHIFT: &str = r#"[
        ["mon_1_open", "09:00"], ["mon_1_close", "22:00"],
        ["tue_1_open", "09:00"], ["tue_1_close", "22:00"]
    ]"#;

    #[test]
    fn text_output_is_lowercase_list() {
        assert_snapshot!(render(LATE_SHIFT, Output::Text), @"[false, true, true]");
    }

    #[test]
    fn json_output_is_bool_array() {
        assert_snapshot!(render(LATE_SHIFT, Output::Json), @"[false,true,true]");
    }

    #[test]
    fn degenerate_schedule_prints_all_false() {
        assert_snapshot!(render("[]", Output::Text), @"[false, false, false]");
        assert_snapshot!(
            render(r#"[["mon_1_open", "08:00"]]"#, Output::Text),
            @"[false, false, false]"
        );
    }

    #[test]
    fn explain_output_lists_hits() {
        let schedule = r#"[["wed_1_open", "07:45"], ["wed_1_close", "12:45"]]"#;
        assert_snapshot!(render(schedule, Output::Explain), @r"
        breakfast: open (wed 08:00-08:30, wed 08:30-09:00)
        dinner: open (wed 11:30-12:30)
        supper: closed
        [true, true, false]
        ");
    }

    #[test]
    fn explain_json_output() {
        let schedule = r#"[["sun_1_open", "19:00"], ["sun_1_close", "20:00"]]"#;
        assert_snapshot!(render(schedule, Output::ExplainJson), @r#"
        {
          "meals": [
            {
              "meal": "breakfast",
              "hits": []
            },
            {
              "meal": "dinner",
              "hits": []
            },
            {
              "meal": "supper",
              "hits": [
                {
                  "weekday": "sun",
                  "range": [
                    "19:00",
                    "20:00"
                  ]
                }
              ]
            }
          ]
        }
        "#);
    }

    #[test]
    fn malformed_schedule_fails() {
        let entries = parse_schedule(r#"[["someday_1_open", "09:00"]]"#).unwrap();
        let mut buf = Vec::new();
        let err = run(&mut buf, &entries, &ClassifierConfig::default(), Output::Text).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "failed to classify schedule: unknown weekday 'someday' in label 'someday_1_open'"
        );
        assert!(buf.is_empty());
    }
}
