use crate::models::History;

pub const EXPORT_FILENAME: &str = "discipline_tracker.csv";

/// One row per recorded (date, task) pair, including tasks since deleted.
pub fn export_csv(history: &History) -> String {
    let mut out = String::from("Date,Task,Completed\n");
    for (date, record) in history {
        for (task, done) in record {
            out.push_str(date);
            out.push(',');
            out.push_str(&quote(task));
            out.push(',');
            out.push_str(if *done { "Yes" } else { "No" });
            out.push('\n');
        }
    }
    out
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayRecord;

    #[test]
    fn empty_history_exports_header_only() {
        assert_eq!(export_csv(&History::new()), "Date,Task,Completed\n");
    }

    #[test]
    fn every_recorded_pair_is_one_row() {
        let mut history = History::new();
        history.insert(
            "2026-01-04".to_string(),
            DayRecord::from([("run".to_string(), true), ("read".to_string(), false)]),
        );
        history.insert(
            "2026-01-05".to_string(),
            DayRecord::from([("run".to_string(), false)]),
        );

        let csv = export_csv(&history);
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(
            rows,
            vec![
                "2026-01-04,\"read\",No",
                "2026-01-04,\"run\",Yes",
                "2026-01-05,\"run\",No",
            ]
        );
    }

    #[test]
    fn task_names_are_escaped() {
        let mut history = History::new();
        history.insert(
            "2026-01-05".to_string(),
            DayRecord::from([("say \"hi\", loudly".to_string(), true)]),
        );
        let csv = export_csv(&history);
        assert!(csv.ends_with("2026-01-05,\"say \"\"hi\"\", loudly\",Yes\n"));
    }
}
