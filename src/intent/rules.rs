//! The ordered rule table
//!
//! Conditions overlap ("what is your name" is also a lookup, "translate
//! hello to spanish" starts with a greeting word), so the table order is
//! part of the behaviour. Do not sort it.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::{IdentityQuestion, Intent, ReminderRequest, ReminderWhen, TranslateRequest};

/// One entry of the classification table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short label used in logs
    pub name: &'static str,
    /// Structural check plus parameter extraction
    pub classify: fn(&str) -> Option<Intent>,
}

/// Every rule, highest priority first
pub static RULES: &[Rule] = &[
    Rule { name: "introduce", classify: introduce },
    Rule { name: "recall_name", classify: recall_name },
    Rule { name: "greet", classify: greet },
    Rule { name: "who_are_you", classify: who_are_you },
    Rule { name: "open_site", classify: open_site },
    Rule { name: "time_or_date", classify: time_or_date },
    Rule { name: "weather", classify: weather },
    Rule { name: "reminder", classify: reminder },
    Rule { name: "joke", classify: joke },
    Rule { name: "news", classify: news },
    Rule { name: "stop_speaking", classify: stop_speaking },
    Rule { name: "change_language", classify: change_language },
    Rule { name: "play", classify: play },
    Rule { name: "lookup", classify: lookup },
    Rule { name: "facts", classify: facts },
    Rule { name: "translate", classify: translate },
    Rule { name: "device_toggle", classify: device_toggle },
    Rule { name: "locate", classify: locate },
    Rule { name: "navigate", classify: navigate },
    Rule { name: "help", classify: help },
];

macro_rules! regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect("valid regex"));
    };
}

regex!(INTRODUCE, r"^my name is\b(.*)$");
regex!(GREETING, r"^(?:hello|hi|hey)\b");
regex!(OPEN_SITE, r"\bopen (youtube|google|facebook|instagram|whatsapp)\b");
regex!(TIME, r"\btime\b");
regex!(DATE, r"\bdate\b");
regex!(WEATHER, r"\bweather\b");
regex!(WEATHER_CITY, r"weather in ([a-z\s]+)");
regex!(REMINDER_AT, r"set reminder (?:at|for) ([\d:apm\s]+) to (.+)");
regex!(REMINDER_IN, r"set reminder in (\d+) (minutes?|hours?) to (.+)");
regex!(NEWS, r"\bnews\b");
regex!(LOOKUP_MARKERS, r"who is|what is|wikipedia");
regex!(TRANSLATE, r"translate (.+) to (.+)");
regex!(HELP, r"\bhelp\b");

/// Collapse whitespace; `None` if nothing is left
fn non_empty(text: &str) -> Option<String> {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Everything after the first occurrence of `marker`
fn after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message.find(marker).map(|i| &message[i + marker.len()..])
}

fn introduce(message: &str) -> Option<Intent> {
    let caps = INTRODUCE.captures(message)?;
    Some(Intent::Introduce {
        name: non_empty(&caps[1]),
    })
}

fn recall_name(message: &str) -> Option<Intent> {
    (message.contains("what is my name") || message.contains("who am i"))
        .then_some(Intent::RecallName)
}

fn greet(message: &str) -> Option<Intent> {
    GREETING.is_match(message).then_some(Intent::Greet)
}

fn who_are_you(message: &str) -> Option<Intent> {
    let creator = ["who are you", "who created you", "who has created you"];
    if creator.iter().any(|p| message.contains(p)) {
        return Some(Intent::WhoAreYou {
            question: IdentityQuestion::Creator,
        });
    }

    (message.contains("what is your name") || message.contains("tell me your name")).then_some(
        Intent::WhoAreYou {
            question: IdentityQuestion::Name,
        },
    )
}

fn open_site(message: &str) -> Option<Intent> {
    let caps = OPEN_SITE.captures(message)?;
    Some(Intent::OpenSite {
        site: caps[1].to_string(),
    })
}

fn time_or_date(message: &str) -> Option<Intent> {
    if TIME.is_match(message) {
        Some(Intent::GetTime)
    } else if DATE.is_match(message) {
        Some(Intent::GetDate)
    } else {
        None
    }
}

fn weather(message: &str) -> Option<Intent> {
    if !WEATHER.is_match(message) {
        return None;
    }
    let city = WEATHER_CITY
        .captures(message)
        .and_then(|caps| non_empty(&caps[1]));
    Some(Intent::GetWeather { city })
}

fn reminder(message: &str) -> Option<Intent> {
    if !message.contains("set reminder") {
        return None;
    }
    Some(Intent::SetReminder {
        request: reminder_at(message).or_else(|| reminder_in(message)),
    })
}

fn reminder_at(message: &str) -> Option<ReminderRequest> {
    let caps = REMINDER_AT.captures(message)?;
    Some(ReminderRequest {
        when: ReminderWhen::At(non_empty(&caps[1])?),
        task: non_empty(&caps[2])?,
    })
}

fn reminder_in(message: &str) -> Option<ReminderRequest> {
    let caps = REMINDER_IN.captures(message)?;
    let amount: u64 = caps[1].parse().ok()?;
    let unit_secs = if caps[2].starts_with("hour") { 3600 } else { 60 };
    Some(ReminderRequest {
        when: ReminderWhen::In(Duration::from_secs(amount.checked_mul(unit_secs)?)),
        task: non_empty(&caps[3])?,
    })
}

fn joke(message: &str) -> Option<Intent> {
    message.contains("joke").then_some(Intent::TellJoke)
}

fn news(message: &str) -> Option<Intent> {
    NEWS.is_match(message).then_some(Intent::GetNews)
}

fn stop_speaking(message: &str) -> Option<Intent> {
    message.contains("stop speaking").then_some(Intent::StopSpeaking)
}

fn change_language(message: &str) -> Option<Intent> {
    let rest = after(message, "change language to")?;
    Some(Intent::ChangeLanguage {
        language: non_empty(rest),
    })
}

fn play(message: &str) -> Option<Intent> {
    if !message.contains("on youtube") {
        return None;
    }
    let rest = after(message, "play")?;
    let query = rest.find("on youtube").map_or(rest, |i| &rest[..i]);
    Some(Intent::PlayOnVideoSite {
        query: non_empty(query),
    })
}

fn lookup(message: &str) -> Option<Intent> {
    if !LOOKUP_MARKERS.is_match(message) {
        return None;
    }
    Some(Intent::Lookup {
        query: non_empty(&LOOKUP_MARKERS.replace_all(message, " ")),
    })
}

fn facts(message: &str) -> Option<Intent> {
    if let Some(rest) = after(message, "remember that") {
        return Some(Intent::Remember {
            fact: non_empty(rest),
        });
    }
    (message.contains("what did you remember") || message.contains("do you remember"))
        .then_some(Intent::RecallFacts)
}

fn translate(message: &str) -> Option<Intent> {
    if !message.contains("translate") {
        return None;
    }
    let request = TRANSLATE.captures(message).and_then(|caps| {
        Some(TranslateRequest {
            text: non_empty(&caps[1])?,
            language: non_empty(&caps[2])?,
        })
    });
    Some(Intent::Translate { request })
}

fn device_toggle(message: &str) -> Option<Intent> {
    let on = message.contains("turn on");
    if !on && !message.contains("turn off") {
        return None;
    }
    let stripped = message.replace("turn on", " ").replace("turn off", " ");
    let device = non_empty(&stripped).map(|d| match d.strip_prefix("the ") {
        Some(rest) => rest.to_string(),
        None => d,
    });
    Some(Intent::DeviceToggle { on, device })
}

fn locate(message: &str) -> Option<Intent> {
    message.contains("where am i").then_some(Intent::Locate)
}

fn navigate(message: &str) -> Option<Intent> {
    let rest = after(message, "navigate to")?;
    Some(Intent::Navigate {
        place: non_empty(rest),
    })
}

fn help(message: &str) -> Option<Intent> {
    HELP.is_match(message).then_some(Intent::Help)
}

#[cfg(test)]
mod tests {
    use super::super::classify;
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_table_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"introduce"));
        assert_eq!(names.last(), Some(&"help"));
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert!(pos("who_are_you") < pos("lookup"));
        assert!(pos("play") < pos("lookup"));
        assert!(pos("lookup") < pos("translate"));
        assert!(pos("time_or_date") < pos("reminder"));
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(
            classify("my name is   aaqib "),
            Intent::Introduce { name: some("aaqib") }
        );
        assert_eq!(classify("my name is"), Intent::Introduce { name: None });
        assert_eq!(classify("what is my name"), Intent::RecallName);
        assert_eq!(classify("who am i"), Intent::RecallName);
    }

    #[test]
    fn test_identity_beats_lookup() {
        assert_eq!(
            classify("what is your name"),
            Intent::WhoAreYou {
                question: IdentityQuestion::Name
            }
        );
        assert_eq!(
            classify("who created you"),
            Intent::WhoAreYou {
                question: IdentityQuestion::Creator
            }
        );
    }

    #[test]
    fn test_greeting_only_at_start() {
        assert_eq!(classify("hello"), Intent::Greet);
        assert_eq!(classify("hey there"), Intent::Greet);
        assert_ne!(classify("which is better"), Intent::Greet);
        assert_ne!(classify("highway to hell"), Intent::Greet);
    }

    #[test]
    fn test_open_site() {
        assert_eq!(
            classify("please open whatsapp"),
            Intent::OpenSite {
                site: "whatsapp".to_string()
            }
        );
        assert!(matches!(
            classify("open myspace"),
            Intent::WebSearchFallback { .. }
        ));
    }

    #[test]
    fn test_time_and_date_need_whole_words() {
        assert_eq!(classify("what's the time"), Intent::GetTime);
        assert_eq!(classify("what is the date today"), Intent::GetDate);
        assert_ne!(classify("software update"), Intent::GetDate);
    }

    #[test]
    fn test_weather_city() {
        assert_eq!(
            classify("weather in new york"),
            Intent::GetWeather {
                city: some("new york")
            }
        );
        assert_eq!(
            classify("how is the weather"),
            Intent::GetWeather { city: None }
        );
        assert_eq!(classify("weather in  "), Intent::GetWeather { city: None });
    }

    #[test]
    fn test_reminder_forms() {
        assert_eq!(
            classify("set reminder at 6:30 pm to call mom"),
            Intent::SetReminder {
                request: Some(ReminderRequest {
                    when: ReminderWhen::At("6:30 pm".to_string()),
                    task: "call mom".to_string(),
                })
            }
        );
        assert_eq!(
            classify("set reminder in 5 minutes to stretch"),
            Intent::SetReminder {
                request: Some(ReminderRequest {
                    when: ReminderWhen::In(Duration::from_secs(300)),
                    task: "stretch".to_string(),
                })
            }
        );
        assert_eq!(
            classify("set reminder in 1 hour to stand up"),
            Intent::SetReminder {
                request: Some(ReminderRequest {
                    when: ReminderWhen::In(Duration::from_secs(3600)),
                    task: "stand up".to_string(),
                })
            }
        );
        assert_eq!(
            classify("set reminder for tomorrow"),
            Intent::SetReminder { request: None }
        );
    }

    #[test]
    fn test_simple_keywords() {
        assert_eq!(classify("tell me a joke"), Intent::TellJoke);
        assert_eq!(classify("latest news"), Intent::GetNews);
        assert_eq!(classify("stop speaking"), Intent::StopSpeaking);
        assert_eq!(classify("where am i"), Intent::Locate);
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("what did you remember"), Intent::RecallFacts);
    }

    #[test]
    fn test_change_language() {
        assert_eq!(
            classify("change language to spanish"),
            Intent::ChangeLanguage {
                language: some("spanish")
            }
        );
        assert_eq!(
            classify("change language to"),
            Intent::ChangeLanguage { language: None }
        );
    }

    #[test]
    fn test_play_beats_lookup() {
        assert_eq!(
            classify("play what is love on youtube"),
            Intent::PlayOnVideoSite {
                query: some("what is love")
            }
        );
        assert_eq!(
            classify("play on youtube"),
            Intent::PlayOnVideoSite { query: None }
        );
    }

    #[test]
    fn test_lookup_strips_markers() {
        assert_eq!(
            classify("who is alan turing"),
            Intent::Lookup {
                query: some("alan turing")
            }
        );
        assert_eq!(
            classify("wikipedia rust language"),
            Intent::Lookup {
                query: some("rust language")
            }
        );
        assert_eq!(classify("what is"), Intent::Lookup { query: None });
    }

    #[test]
    fn test_remember() {
        assert_eq!(
            classify("remember that the keys are in the drawer"),
            Intent::Remember {
                fact: some("the keys are in the drawer")
            }
        );
        assert_eq!(classify("remember that"), Intent::Remember { fact: None });
    }

    #[test]
    fn test_translate() {
        assert_eq!(
            classify("translate hello to spanish"),
            Intent::Translate {
                request: Some(TranslateRequest {
                    text: "hello".to_string(),
                    language: "spanish".to_string(),
                })
            }
        );
        assert_eq!(classify("translate to"), Intent::Translate { request: None });
        assert_eq!(classify("translate"), Intent::Translate { request: None });
    }

    #[test]
    fn test_device_toggle() {
        assert_eq!(
            classify("turn on the lights"),
            Intent::DeviceToggle {
                on: true,
                device: some("lights")
            }
        );
        assert_eq!(
            classify("turn off fan"),
            Intent::DeviceToggle {
                on: false,
                device: some("fan")
            }
        );
        assert_eq!(
            classify("turn off"),
            Intent::DeviceToggle {
                on: false,
                device: None
            }
        );
    }

    #[test]
    fn test_navigate() {
        assert_eq!(
            classify("navigate to central park"),
            Intent::Navigate {
                place: some("central park")
            }
        );
        assert_eq!(classify("navigate to"), Intent::Navigate { place: None });
    }
}
