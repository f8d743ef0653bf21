//! End-of-session statistics and outcome tiers

use serde::Serialize;

/// Outcome bracket by accuracy percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeTier {
    Excellent,
    Good,
    Okay,
    TryAgain,
}

impl OutcomeTier {
    pub fn from_accuracy(accuracy_percent: u32) -> Self {
        match accuracy_percent {
            80.. => OutcomeTier::Excellent,
            60..=79 => OutcomeTier::Good,
            30..=59 => OutcomeTier::Okay,
            _ => OutcomeTier::TryAgain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeTier::Excellent => "excellent",
            OutcomeTier::Good => "good",
            OutcomeTier::Okay => "okay",
            OutcomeTier::TryAgain => "try-again",
        }
    }

    /// Headline and follow-up line for the result screen
    pub fn messages(&self) -> (&'static str, &'static str) {
        match self {
            OutcomeTier::Excellent => ("🏆 Outstanding!", "Fantastic coordination!"),
            OutcomeTier::Good => ("🌟 Very good!", "Your movements keep getting better!"),
            OutcomeTier::Okay => ("👍 Well done!", "Practice makes perfect!"),
            OutcomeTier::TryAgain => ("💪 Chin up!", "Every attempt counts!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub score: u32,
    pub recognized: u32,
    pub total_rounds: u32,
    pub accuracy_percent: u32,
    /// Fastest recognition in whole seconds, if any round was recognized
    pub best_time_secs: Option<u32>,
    pub tier: OutcomeTier,
    pub title: &'static str,
    pub message: &'static str,
}

impl SessionSummary {
    pub fn new(score: u32, recognized: u32, total_rounds: u32, best_time_secs: Option<u32>) -> Self {
        let accuracy_percent = accuracy(recognized, total_rounds);
        let tier = OutcomeTier::from_accuracy(accuracy_percent);
        let (title, message) = tier.messages();

        Self {
            score,
            recognized,
            total_rounds,
            accuracy_percent,
            best_time_secs,
            tier,
            title,
            message,
        }
    }

    /// "recognized/total" for the result screen
    pub fn recognized_label(&self) -> String {
        format!("{}/{}", self.recognized, self.total_rounds)
    }
}

/// Recognized rounds as a rounded percentage of all rounds
pub fn accuracy(recognized: u32, total_rounds: u32) -> u32 {
    if total_rounds == 0 {
        return 0;
    }
    (recognized as f64 / total_rounds as f64 * 100.0).round() as u32
}
