//! What the assistant says

use chrono::{DateTime, Local, Timelike};

use crate::memory::capitalize;
use crate::services::{Coordinates, WeatherReport};

pub const GREET: &str = "Yes sir, how can I help you?";

pub const INTRODUCE_EMPTY: &str = "Please tell me your name by saying, 'My name is ...'";
pub const NAME_UNKNOWN: &str =
    "I don't know your name yet. Please tell me by saying, 'My name is ...'";

pub const WEATHER_NO_CITY: &str = "Please specify a city to get the weather.";
pub const WEATHER_FAILED: &str = "Failed to fetch the weather.";

pub const REMINDER_USAGE: &str = "Please say: set reminder at [time] to [task]";
pub const REMINDER_INVALID: &str = "The time you specified is invalid.";
pub const REMINDER_PASSED: &str = "That time has already passed.";

pub const NEWS_INTRO: &str = "Fetching the latest news headlines.";
pub const NEWS_EMPTY: &str = "No news available now.";
pub const NEWS_FAILED: &str = "Failed to fetch news.";

pub const LANGUAGE_USAGE: &str = "Please say 'change language to [language]'";
pub const PLAY_USAGE: &str = "Please tell me what to play, for example 'play [song] on youtube'";

pub const LOOKUP_EMPTY: &str = "Please specify what you want to know from Wikipedia.";
pub const LOOKUP_NOT_FOUND: &str = "No information found on Wikipedia for your query.";
pub const LOOKUP_FAILED: &str = "Unable to fetch information from Wikipedia.";

pub const REMEMBERED: &str = "Okay, I will remember that.";
pub const REMEMBER_USAGE: &str = "Please tell me what to remember after saying 'remember that'";
pub const FACTS_INTRO: &str = "Here is what you asked me to remember:";
pub const FACTS_EMPTY: &str = "You haven't asked me to remember anything yet.";

pub const TRANSLATE_USAGE: &str = "Please say 'translate [word] to [language]'";
pub const TRANSLATE_EMPTY: &str = "I couldn't find the translation.";
pub const TRANSLATE_FAILED: &str = "Translation failed.";

pub const DEVICE_USAGE: &str = "Please tell me which device to turn on or off.";

pub const LOCATE_UNSUPPORTED: &str = "Geolocation is not supported on this device.";
pub const LOCATE_FAILED: &str = "Unable to retrieve your location.";

pub const NAVIGATE_USAGE: &str =
    "Please tell me where to navigate, for example 'navigate to [place]'";

pub const HELP_INTRO: &str = "Here are some things you can ask me:";

pub const NOT_CAUGHT: &str = "Sorry, I didn't catch that. Please try again.";

pub const HELP_LINES: &[&str] = &[
    "Say 'hello', 'hey', or 'hi' to greet me.",
    "Say 'open YouTube', 'Google', 'Facebook', 'Instagram', or 'WhatsApp'.",
    "Ask 'what's the time' or 'date'.",
    "Say 'tell me a joke' or 'news'.",
    "Say 'stop speaking' to stop me.",
    "Say 'change language to [language]' to switch languages.",
    "Say 'set reminder at [time] to [task]'.",
    "Say 'weather in [city]' to get weather updates.",
    "Ask 'who is [name]' or 'what is [topic]' for Wikipedia info.",
    "Say 'translate [word] to [language]'.",
    "Say 'remember that [fact]' to save something.",
    "Ask 'what did you remember' to recall facts.",
    "Say 'navigate to [place]'.",
    "Say 'turn on [device]' or 'turn off [device]'.",
    "Ask 'where am I' to get your location.",
    "Say 'help' to hear these commands again.",
];

pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "Why don't skeletons fight each other? They don't have the guts.",
    "What do you call fake spaghetti? An impasta!",
    "Why did the math book look sad? Because it had too many problems.",
];

pub fn greeting(now: DateTime<Local>, name: Option<&str>) -> String {
    let part = match now.hour() {
        0..12 => "Good Morning",
        12..16 => "Good Afternoon",
        _ => "Good Evening",
    };
    match name {
        Some(name) => format!("{part}, {name}"),
        None => format!("{part} Sir"),
    }
}

pub fn nice_to_meet(name: &str) -> String {
    format!("Nice to meet you, {name}")
}

pub fn your_name_is(name: &str) -> String {
    format!("You told me your name is {name}")
}

pub fn creator(creator: &str) -> String {
    format!("I am your virtual assistant, created by {creator}.")
}

pub fn own_name(assistant: &str) -> String {
    format!("my name is {assistant}.")
}

pub fn opening(site: &str) -> String {
    format!("Opening {}...", capitalize(site))
}

pub fn time(now: DateTime<Local>) -> String {
    format!("The time is {}", now.format("%I:%M %p"))
}

pub fn date(now: DateTime<Local>) -> String {
    format!("Today's date is {}", now.format("%B %-d, %Y"))
}

pub fn fetching_weather(city: &str) -> String {
    format!("Fetching weather for {}", capitalize(city))
}

pub fn weather(city: &str, report: &WeatherReport) -> String {
    format!(
        "The weather in {} is {} with a temperature of {:.0} degrees Celsius.",
        capitalize(city),
        report.description.to_lowercase(),
        report.temperature_c
    )
}

pub fn weather_not_found(city: &str) -> String {
    format!("I couldn't find weather information for {}.", capitalize(city))
}

pub fn reminder_set(when: &str, task: &str) -> String {
    format!("Reminder set for {when} to {task}")
}

pub fn headline(index: usize, title: &str) -> String {
    format!("Headline {}: {title}", index + 1)
}

pub fn changing_language(language: &str) -> String {
    format!("Changing language to {}", capitalize(language))
}

pub fn playing(query: &str) -> String {
    format!("Playing {query} on YouTube.")
}

pub fn fact(index: usize, fact: &str) -> String {
    format!("{}: {fact}", index + 1)
}

pub fn translation(text: &str) -> String {
    format!("The translation is: {text}")
}

pub fn device(on: bool, device: &str) -> String {
    let state = if on { "on" } else { "off" };
    format!("Okay, turning {state} the {device}")
}

pub fn located(at: Coordinates) -> String {
    format!(
        "You are located at latitude {:.2} and longitude {:.2}",
        at.latitude, at.longitude
    )
}

pub fn navigating(place: &str) -> String {
    format!("Navigating to {place}")
}

pub fn searching(query: &str) -> String {
    format!("I am searching the web for {query}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 9, hour, minute, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(at(11, 59), None), "Good Morning Sir");
        assert_eq!(greeting(at(12, 0), Some("Aaqib")), "Good Afternoon, Aaqib");
        assert_eq!(greeting(at(15, 59), None), "Good Afternoon Sir");
        assert_eq!(greeting(at(16, 0), None), "Good Evening Sir");
    }

    #[test]
    fn test_clock_formats() {
        assert_eq!(time(at(18, 5)), "The time is 06:05 PM");
        assert_eq!(date(at(9, 0)), "Today's date is March 9, 2026");
    }

    #[test]
    fn test_located_rounds() {
        let at = Coordinates {
            latitude: 28.613_94,
            longitude: 77.209_02,
        };
        assert_eq!(
            located(at),
            "You are located at latitude 28.61 and longitude 77.21"
        );
    }

    #[test]
    fn test_weather_report() {
        let report = WeatherReport {
            description: "Partly cloudy".to_string(),
            temperature_c: 21.4,
        };
        assert_eq!(
            weather("london", &report),
            "The weather in London is partly cloudy with a temperature of 21 degrees Celsius."
        );
    }
}
