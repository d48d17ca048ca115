use crate::i18n::{Key, Localized};
use serde::Deserialize;
use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Month,
    PrimitiveDateTime,
};

static DATETIME_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

static DATE_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Category {
    Meeting,
    Deadline,
    Workshop,
}

impl Category {
    pub(crate) fn key(self) -> Key {
        match self {
            Category::Meeting => Key::Meeting,
            Category::Deadline => Key::Deadline,
            Category::Workshop => Key::Workshop,
        }
    }
}

/// A scheduled item shown on the calendar.  Events are supplied by an
/// [`EventSource`](crate::catalog::EventSource) and never modified.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "EventRecord")]
pub(crate) struct Event {
    pub(crate) id: String,
    pub(crate) title: Localized,
    pub(crate) date: PrimitiveDateTime,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    pub(crate) participants: Vec<String>,
    pub(crate) location: Localized,
    pub(crate) category: Category,
}

impl Event {
    pub(crate) fn new<S: Into<String>>(
        id: S,
        title: Localized,
        date: PrimitiveDateTime,
        category: Category,
    ) -> Event {
        Event {
            id: id.into(),
            title,
            date,
            start_time: hhmm(date),
            end_time: String::new(),
            participants: Vec::new(),
            location: Localized::default(),
            category,
        }
    }

    pub(crate) fn until<S: Into<String>>(mut self, end_time: S) -> Event {
        self.end_time = end_time.into();
        self
    }

    pub(crate) fn at(mut self, location: Localized) -> Event {
        self.location = location;
        self
    }

    pub(crate) fn with<I, S>(mut self, participants: I) -> Event
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn day(&self) -> Date {
        self.date.date()
    }

    pub(crate) fn falls_on(&self, year: i32, month: Month, day: u8) -> bool {
        let d = self.day();
        d.year() == year && d.month() == month && d.day() == day
    }

    pub(crate) fn is_all_day(&self) -> bool {
        self.start_time.is_empty()
    }
}

/// All events on the given calendar date, in their original order.  The time
/// of day is not considered.
pub(crate) fn events_on_day(events: &[Event], day: u8, month: Month, year: i32) -> Vec<&Event> {
    events
        .iter()
        .filter(|ev| ev.falls_on(year, month, day))
        .collect()
}

/// An event as written in a JSON catalog
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventRecord {
    id: String,
    title: Localized,
    /// `YYYY-MM-DD HH:MM`, or `YYYY-MM-DD` for an all-day event
    date: String,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    participants: Vec<String>,
    #[serde(default)]
    location: Localized,
    category: Category,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventRecordError;

    fn try_from(rec: EventRecord) -> Result<Event, EventRecordError> {
        let (date, all_day) = match PrimitiveDateTime::parse(&rec.date, &DATETIME_FMT) {
            Ok(dt) => (dt, false),
            Err(e) => match Date::parse(&rec.date, &DATE_FMT) {
                Ok(d) => (d.midnight(), true),
                Err(_) => {
                    return Err(EventRecordError::Date {
                        id: rec.id,
                        value: rec.date,
                        source: e,
                    })
                }
            },
        };
        let start_time = match rec.start_time {
            Some(s) => s,
            None if all_day => String::new(),
            None => hhmm(date),
        };
        Ok(Event {
            id: rec.id,
            title: rec.title,
            date,
            start_time,
            end_time: rec.end_time.unwrap_or_default(),
            participants: rec.participants,
            location: rec.location,
            category: rec.category,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum EventRecordError {
    #[error("event {id:?} has invalid date {value:?}: expected YYYY-MM-DD HH:MM")]
    Date {
        id: String,
        value: String,
        source: time::error::Parse,
    },
}

fn hhmm(dt: PrimitiveDateTime) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use time::macros::datetime;

    fn sample() -> Vec<Event> {
        vec![
            Event::new(
                "a",
                Localized::new("Group meeting", "组会"),
                datetime!(2024-04-10 14:00),
                Category::Meeting,
            ),
            Event::new(
                "b",
                Localized::new("Report due", "报告截止"),
                datetime!(2024-04-11 23:59),
                Category::Deadline,
            ),
            Event::new(
                "c",
                Localized::new("ML workshop", "机器学习研讨会"),
                datetime!(2024-04-10 09:00),
                Category::Workshop,
            ),
            Event::new(
                "d",
                Localized::new("Group meeting", "组会"),
                datetime!(2023-04-10 14:00),
                Category::Meeting,
            ),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|ev| ev.id.clone()).collect()
    }

    #[test]
    fn test_events_on_day_keeps_input_order() {
        let events = sample();
        let found = events_on_day(&events, 10, Month::April, 2024);
        // "c" is earlier in the day but later in the input
        assert_eq!(ids(&found), ["a", "c"]);
    }

    #[test]
    fn test_events_on_day_none() {
        let events = sample();
        assert!(events_on_day(&events, 12, Month::April, 2024).is_empty());
        assert!(events_on_day(&events, 10, Month::May, 2024).is_empty());
        assert!(events_on_day(&[], 10, Month::April, 2024).is_empty());
    }

    #[test]
    fn test_builder() {
        let ev = Event::new(
            "x",
            Localized::new("Thesis defense", "论文答辩"),
            datetime!(2024-06-03 10:30),
            Category::Meeting,
        )
        .until("12:00")
        .at(Localized::new("Room 301", "301室"))
        .with(["Alice", "Bob"]);
        assert_eq!(ev.start_time, "10:30");
        assert_eq!(ev.end_time, "12:00");
        assert_eq!(ev.location.get(Language::Zh), "301室");
        assert_eq!(ev.participants, ["Alice", "Bob"]);
        assert!(!ev.is_all_day());
    }

    #[test]
    fn test_deserialize_full() {
        let ev: Event = serde_json::from_str(
            r#"{
                "id": "m1",
                "title": {"en": "Group meeting", "zh": "组会"},
                "date": "2024-04-10 14:00",
                "startTime": "2:00 PM",
                "endTime": "3:30 PM",
                "participants": ["Dr. Wang", "Li Hua"],
                "location": {"en": "Lab 2", "zh": "二号实验室"},
                "category": "meeting"
            }"#,
        )
        .unwrap();
        assert_eq!(ev.id, "m1");
        assert_eq!(ev.date, datetime!(2024-04-10 14:00));
        assert_eq!(ev.start_time, "2:00 PM");
        assert_eq!(ev.end_time, "3:30 PM");
        assert_eq!(ev.participants, ["Dr. Wang", "Li Hua"]);
        assert_eq!(ev.location.get(Language::En), "Lab 2");
        assert_eq!(ev.category, Category::Meeting);
    }

    #[test]
    fn test_deserialize_defaults() {
        let ev: Event = serde_json::from_str(
            r#"{
                "id": "w1",
                "title": {"en": "Writing workshop", "zh": "写作研讨会"},
                "date": "2024-04-12 09:05",
                "category": "workshop"
            }"#,
        )
        .unwrap();
        assert_eq!(ev.start_time, "09:05");
        assert_eq!(ev.end_time, "");
        assert!(ev.participants.is_empty());
        assert_eq!(ev.location, Localized::default());
    }

    #[test]
    fn test_deserialize_all_day() {
        let ev: Event = serde_json::from_str(
            r#"{
                "id": "d1",
                "title": {"en": "Proposal due", "zh": "开题报告截止"},
                "date": "2024-04-30",
                "category": "deadline"
            }"#,
        )
        .unwrap();
        assert_eq!(ev.date, datetime!(2024-04-30 0:00));
        assert!(ev.is_all_day());
        assert!(ev.falls_on(2024, Month::April, 30));
    }

    #[test]
    fn test_deserialize_bad_date() {
        let r = serde_json::from_str::<Event>(
            r#"{
                "id": "bad",
                "title": {"en": "x", "zh": "x"},
                "date": "2024-02-30 10:00",
                "category": "meeting"
            }"#,
        );
        let msg = r.unwrap_err().to_string();
        assert!(msg.contains("\"bad\""), "{msg}");
        assert!(msg.contains("2024-02-30 10:00"), "{msg}");
    }

    #[test]
    fn test_deserialize_bad_category() {
        let r = serde_json::from_str::<Event>(
            r#"{
                "id": "c",
                "title": {"en": "x", "zh": "x"},
                "date": "2024-02-03 10:00",
                "category": "party"
            }"#,
        );
        assert!(r.is_err());
    }
}
