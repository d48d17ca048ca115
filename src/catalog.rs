use crate::calendar::YearMonth;
use crate::event::{Category, Event};
use crate::i18n::Localized;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Time;

/// Where the calendar's events come from.  The calendar only ever reads the
/// loaded collection.
pub(crate) trait EventSource {
    fn load(&self) -> Result<Vec<Event>, CatalogError>;
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn load(&self) -> Result<Vec<Event>, CatalogError> {
        (**self).load()
    }
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("failed to read event file {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse event file {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("event id {0:?} is used more than once")]
    DuplicateId(String),
}

/// Events read from a JSON file holding an array of event records
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> JsonCatalog {
        JsonCatalog { path: path.into() }
    }

    fn parse(&self, text: &str) -> Result<Vec<Event>, CatalogError> {
        let events = serde_json::from_str::<Vec<Event>>(text).map_err(|source| {
            CatalogError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        check_unique(&events)?;
        Ok(events)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonCatalog {
    fn load(&self) -> Result<Vec<Event>, CatalogError> {
        let text = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let events = self.parse(&text)?;
        tracing::info!(path = %self.path.display(), count = events.len(), "loaded event file");
        Ok(events)
    }
}

fn check_unique(events: &[Event]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(events.len());
    for ev in events {
        if !seen.insert(ev.id.as_str()) {
            return Err(CatalogError::DuplicateId(ev.id.clone()));
        }
    }
    Ok(())
}

/// The built-in sample schedule of a research group, placed in the month the
/// calendar opens on and the month after it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixtureCatalog {
    anchor: YearMonth,
}

impl FixtureCatalog {
    pub(crate) fn new(anchor: YearMonth) -> FixtureCatalog {
        FixtureCatalog { anchor }
    }
}

#[derive(Debug)]
struct Fixture {
    next_month: bool,
    day: u8,
    start: (u8, u8),
    end: &'static str,
    title: (&'static str, &'static str),
    location: (&'static str, &'static str),
    participants: &'static [&'static str],
    category: Category,
}

const GROUP: &[&str] = &["Prof. Zhang", "Li Wei", "Chen Jing", "Wang Fang"];

const LAB: (&str, &str) = ("Lab 2, Science Building", "理科楼二号实验室");

static FIXTURES: &[Fixture] = &[
    Fixture {
        next_month: false,
        day: 3,
        start: (10, 0),
        end: "11:30",
        title: ("Weekly group meeting", "每周组会"),
        location: LAB,
        participants: GROUP,
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 3,
        start: (14, 0),
        end: "15:00",
        title: ("Thesis advising: Li Wei", "论文指导：李伟"),
        location: ("Office 512", "512办公室"),
        participants: &["Prof. Zhang", "Li Wei"],
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 8,
        start: (23, 59),
        end: "",
        title: ("Monthly progress report due", "月度进展报告截止"),
        location: ("Research portal", "科研管理平台"),
        participants: &[],
        category: Category::Deadline,
    },
    Fixture {
        next_month: false,
        day: 10,
        start: (10, 0),
        end: "11:30",
        title: ("Weekly group meeting", "每周组会"),
        location: LAB,
        participants: GROUP,
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 12,
        start: (9, 0),
        end: "12:00",
        title: ("Research ethics workshop", "科研伦理研讨会"),
        location: ("Library lecture hall", "图书馆报告厅"),
        participants: &["Graduate School"],
        category: Category::Workshop,
    },
    Fixture {
        next_month: false,
        day: 15,
        start: (23, 59),
        end: "",
        title: ("Conference paper submission", "会议论文投稿截止"),
        location: ("Online", "线上"),
        participants: &["Chen Jing", "Wang Fang"],
        category: Category::Deadline,
    },
    Fixture {
        next_month: false,
        day: 17,
        start: (10, 0),
        end: "11:30",
        title: ("Weekly group meeting", "每周组会"),
        location: LAB,
        participants: GROUP,
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 19,
        start: (14, 0),
        end: "17:00",
        title: ("Academic writing workshop", "学术写作研讨会"),
        location: ("Humanities Building 204", "人文楼204"),
        participants: &["Writing Center"],
        category: Category::Workshop,
    },
    Fixture {
        next_month: false,
        day: 24,
        start: (9, 0),
        end: "10:00",
        title: ("Collaboration call with partner lab", "合作实验室视频会议"),
        location: ("Online", "线上"),
        participants: &["Prof. Zhang", "Dr. Müller"],
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 24,
        start: (10, 0),
        end: "11:30",
        title: ("Weekly group meeting", "每周组会"),
        location: LAB,
        participants: GROUP,
        category: Category::Meeting,
    },
    Fixture {
        next_month: false,
        day: 24,
        start: (13, 30),
        end: "16:30",
        title: ("Python for data analysis", "Python数据分析研讨会"),
        location: ("Computing Center", "计算中心"),
        participants: &["Li Wei", "Chen Jing"],
        category: Category::Workshop,
    },
    Fixture {
        next_month: false,
        day: 24,
        start: (17, 0),
        end: "",
        title: ("Ethics review forms due", "伦理审查表提交截止"),
        location: ("Research portal", "科研管理平台"),
        participants: &[],
        category: Category::Deadline,
    },
    Fixture {
        next_month: false,
        day: 28,
        start: (12, 0),
        end: "",
        title: ("Lab equipment booking closes", "实验设备预约截止"),
        location: LAB,
        participants: &[],
        category: Category::Deadline,
    },
    Fixture {
        next_month: true,
        day: 2,
        start: (9, 30),
        end: "11:00",
        title: ("Midterm evaluation", "中期考核"),
        location: ("Conference room A", "A会议室"),
        participants: &["Prof. Zhang", "Li Wei", "Review committee"],
        category: Category::Meeting,
    },
];

impl EventSource for FixtureCatalog {
    fn load(&self) -> Result<Vec<Event>, CatalogError> {
        if self.anchor.first_day().is_none() {
            tracing::warn!(anchor = %self.anchor, "no sample schedule outside the supported dates");
            return Ok(Vec::new());
        }
        let events = FIXTURES
            .iter()
            .zip(1..)
            .filter_map(|(fx, n)| {
                let month = if fx.next_month {
                    self.anchor.next()
                } else {
                    self.anchor
                };
                let date = month.day(fx.day)?;
                let time = Time::from_hms(fx.start.0, fx.start.1, 0).ok()?;
                let ev = Event::new(
                    format!("fx-{n:02}"),
                    Localized::new(fx.title.0, fx.title.1),
                    date.with_time(time),
                    fx.category,
                )
                .until(fx.end)
                .at(Localized::new(fx.location.0, fx.location.1))
                .with(fx.participants.iter().copied());
                Some(ev)
            })
            .collect::<Vec<_>>();
        tracing::debug!(anchor = %self.anchor, count = events.len(), "loaded sample schedule");
        Ok(events)
    }
}
