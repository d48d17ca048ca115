use crate::calendar::YearMonth;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub(crate) fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub(crate) fn toggle(self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub(crate) fn month_name(self, month: Month) -> Cow<'static, str> {
        match self {
            Language::En => Cow::Owned(month.to_string()),
            Language::Zh => Cow::Borrowed(ZH_MONTHS[usize::from(u8::from(month) - 1)]),
        }
    }

    /// Heading for a month view, e.g. "April 2024" or "2024年4月"
    pub(crate) fn month_title(self, ym: YearMonth) -> String {
        match self {
            Language::En => format!("{} {}", self.month_name(ym.month()), ym.year()),
            Language::Zh => format!("{}年{}月", ym.year(), u8::from(ym.month())),
        }
    }

    /// Column labels, Sunday first, each two columns wide
    pub(crate) fn weekday_labels(self) -> &'static [&'static str; 7] {
        match self {
            Language::En => &["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            Language::Zh => &["日", "一", "二", "三", "四", "五", "六"],
        }
    }
}

static ZH_MONTHS: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
    "十二月",
];

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguageError;

    /// Accepts a bare language code or one with a region, e.g. `zh-CN` or
    /// `en_US.UTF-8`
    fn from_str(s: &str) -> Result<Language, UnknownLanguageError> {
        let primary = s
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            _ => Err(UnknownLanguageError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown display language {0:?}: expected \"en\" or \"zh\"")]
pub(crate) struct UnknownLanguageError(String);

/// Text supplied in every display language
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct Localized {
    pub(crate) en: String,
    pub(crate) zh: String,
}

impl Localized {
    pub(crate) fn new<S: Into<String>, T: Into<String>>(en: S, zh: T) -> Localized {
        Localized {
            en: en.into(),
            zh: zh.into(),
        }
    }

    pub(crate) fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }
}

/// Every piece of interface text that is looked up in a [`Dictionary`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Key {
    Meeting,
    Deadline,
    Workshop,
    EventsOn,
    NoEvents,
    Location,
    Participants,
    AllDay,
    JumpTo,
    Commands,
    HelpDay,
    HelpWeek,
    HelpMonth,
    HelpToday,
    HelpJump,
    HelpLanguage,
    HelpHelp,
    HelpQuit,
    HelpDismiss,
}

impl Key {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Key::Meeting => "meeting",
            Key::Deadline => "deadline",
            Key::Workshop => "workshop",
            Key::EventsOn => "events_on",
            Key::NoEvents => "no_events",
            Key::Location => "location",
            Key::Participants => "participants",
            Key::AllDay => "all_day",
            Key::JumpTo => "jump_to",
            Key::Commands => "commands",
            Key::HelpDay => "help_day",
            Key::HelpWeek => "help_week",
            Key::HelpMonth => "help_month",
            Key::HelpToday => "help_today",
            Key::HelpJump => "help_jump",
            Key::HelpLanguage => "help_language",
            Key::HelpHelp => "help_help",
            Key::HelpQuit => "help_quit",
            Key::HelpDismiss => "help_dismiss",
        }
    }
}

static EN: &[(Key, &str)] = &[
    (Key::Meeting, "Meeting"),
    (Key::Deadline, "Deadline"),
    (Key::Workshop, "Workshop"),
    (Key::EventsOn, "Events on"),
    (Key::NoEvents, "No events scheduled."),
    (Key::Location, "Location"),
    (Key::Participants, "Participants"),
    (Key::AllDay, "All day"),
    (Key::JumpTo, "Jump To…"),
    (Key::Commands, "Commands"),
    (Key::HelpDay, "Select previous/next day"),
    (Key::HelpWeek, "Select previous/next week"),
    (Key::HelpMonth, "Show previous/next month"),
    (Key::HelpToday, "Jump to today"),
    (Key::HelpJump, "Input month to jump to"),
    (Key::HelpLanguage, "Switch language"),
    (Key::HelpHelp, "Show this help"),
    (Key::HelpQuit, "Quit"),
    (Key::HelpDismiss, "Press the Any Key to dismiss."),
];

static ZH: &[(Key, &str)] = &[
    (Key::Meeting, "会议"),
    (Key::Deadline, "截止"),
    (Key::Workshop, "研讨会"),
    (Key::EventsOn, "日程"),
    (Key::NoEvents, "暂无日程。"),
    (Key::Location, "地点"),
    (Key::Participants, "参与者"),
    (Key::AllDay, "全天"),
    (Key::JumpTo, "跳转到…"),
    (Key::Commands, "命令"),
    (Key::HelpDay, "选择前一天/后一天"),
    (Key::HelpWeek, "选择上一周/下一周"),
    (Key::HelpMonth, "显示上个月/下个月"),
    (Key::HelpToday, "回到今天"),
    (Key::HelpJump, "输入要跳转的月份"),
    (Key::HelpLanguage, "切换语言"),
    (Key::HelpHelp, "显示帮助"),
    (Key::HelpQuit, "退出"),
    (Key::HelpDismiss, "按任意键关闭。"),
];

/// Interface text per language.  A key without a translation is displayed
/// as its bare name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Dictionary {
    entries: HashMap<(Language, Key), Cow<'static, str>>,
}

impl Dictionary {
    pub(crate) fn new() -> Dictionary {
        Dictionary::default()
    }

    pub(crate) fn builtin() -> Dictionary {
        let mut dict = Dictionary::new();
        for (lang, table) in [(Language::En, EN), (Language::Zh, ZH)] {
            for &(key, text) in table {
                dict.insert(lang, key, text);
            }
        }
        dict
    }

    pub(crate) fn insert<S: Into<Cow<'static, str>>>(&mut self, lang: Language, key: Key, text: S) {
        self.entries.insert((lang, key), text.into());
    }

    pub(crate) fn lookup(&self, lang: Language, key: Key) -> &str {
        match self.entries.get(&(lang, key)) {
            Some(text) => text,
            None => key.name(),
        }
    }
}
