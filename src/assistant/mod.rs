//! Assistant stub: maps free-text input to a canned reply.
//!
//! Keyword matching only — no model, no network. The joke pick is
//! deterministic so replies are reproducible.

use chrono::Local;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why did the AI go to therapy? It had too many deep issues.",
    "I told my computer I needed a break, and now it won't stop sending me vacation ads.",
];

const DEFAULT_REPLY: &str =
    "I can help with notes, weather, and quick calculations. Try asking about the time or the date.";

/// Produce a canned reply for `prompt`. Never empty, never fails.
pub fn reply(prompt: &str) -> String {
    let lower = prompt.to_lowercase();

    if lower.contains("time") {
        return format!("The current time is {}.", Local::now().format("%H:%M"));
    }
    if lower.contains("date") || lower.contains("today") {
        return format!("Today is {}.", Local::now().format("%A, %d %B %Y"));
    }
    if lower.contains("hello") || lower.contains("hi") {
        return "Hello! It's great to talk with you. What can I do for you?".to_string();
    }
    if lower.contains("how are you") {
        return "I'm functioning optimally, thank you for asking! How can I assist you?"
            .to_string();
    }
    if lower.contains("name") {
        return "I'm the Holo assistant, a canned-reply stub living in your terminal.".to_string();
    }
    if lower.contains("weather") {
        return "You can check the weather by switching to the Weather app (key 2).".to_string();
    }
    if lower.contains("joke") {
        return JOKES[prompt.len() % JOKES.len()].to_string();
    }
    if lower.contains("thank") {
        return "You're welcome! Is there anything else I can help with?".to_string();
    }

    DEFAULT_REPLY.to_string()
}
