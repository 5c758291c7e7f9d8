//! Timetable output models.
//!
//! Schedulers produce flat lists of entries; grouping and rendering are
//! left to the consumer.
//!
//! # Wire format
//! Field names are camelCase. Exam times are serialized as `"HH:MM"` and
//! dates as ISO `"YYYY-MM-DD"`.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One placed class in a weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Day label.
    pub day: String,
    /// Period label.
    pub period: String,
    /// Subject id.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Assigned faculty id.
    pub faculty_id: String,
    /// Assigned faculty display name.
    pub faculty_name: String,
    /// Assigned classroom id.
    pub classroom_id: String,
    /// Assigned classroom display name.
    pub classroom_name: String,
    /// Batch id; only set by the combined scheduler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Batch display name; only set by the combined scheduler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
}

/// Daily exam window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExamSession {
    /// Morning session.
    Forenoon,
    /// Afternoon session.
    Afternoon,
}

impl ExamSession {
    /// Both sessions in daily order.
    pub const ALL: [ExamSession; 2] = [ExamSession::Forenoon, ExamSession::Afternoon];
}

impl fmt::Display for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamSession::Forenoon => f.write_str("Forenoon"),
            ExamSession::Afternoon => f.write_str("Afternoon"),
        }
    }
}

/// One placed exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamScheduleEntry {
    /// Calendar date.
    pub date: NaiveDate,
    /// Session on that date.
    pub session: ExamSession,
    /// Session start.
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    /// Session end (start + duration, wrapping at midnight).
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    /// Subject id.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Batch id.
    pub batch_id: String,
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ScheduleEntry {
        ScheduleEntry {
            day: "Monday".into(),
            period: "09:00-09:50".into(),
            subject_id: "CS101".into(),
            subject_name: "Intro to Programming".into(),
            faculty_id: "F001".into(),
            faculty_name: "Dr. Alan Turing".into(),
            classroom_id: "C101".into(),
            classroom_name: "Room 101".into(),
            batch_id: None,
            batch_name: None,
        }
    }

    #[test]
    fn test_single_group_entry_omits_batch() {
        let json = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(json["subjectId"], "CS101");
        assert_eq!(json["classroomName"], "Room 101");
        assert!(json.get("batchId").is_none());
    }

    #[test]
    fn test_exam_entry_wire_format() {
        let entry = ExamScheduleEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            session: ExamSession::Afternoon,
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            subject_id: "MA101".into(),
            subject_name: "Calculus I".into(),
            batch_id: "B1".into(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-03-10");
        assert_eq!(json["session"], "Afternoon");
        assert_eq!(json["startTime"], "14:00");
        assert_eq!(json["endTime"], "17:00");

        let back: ExamScheduleEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_session_order() {
        assert!(ExamSession::Forenoon < ExamSession::Afternoon);
        assert_eq!(ExamSession::ALL[0].to_string(), "Forenoon");
    }
}
