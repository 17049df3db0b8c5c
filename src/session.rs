//! Screen flow of the game as an explicit finite-state machine.
//!
//! welcome → tutorial → practice → results → boss-round → final-results,
//! plus create-mode and story-mode side trips from the welcome screen.
//! The Boss Round unlocks only when practice accuracy reaches 70%.
//! The classifier is not involved here; screens only carry round scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOSS_UNLOCK_ACCURACY: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Welcome,
    Tutorial,
    Practice,
    BossRound,
    Results,
    CreateMode,
    StoryMode,
    FinalResults,
}

/// Score of one quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub correct: u32,
    pub total: u32,
}

impl RoundScore {
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    /// Fraction correct; 0 for an empty round.
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }

    /// Rounded percentage as shown on the results screen.
    pub fn percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    StartMission,
    ContinueFromTutorial,
    PracticeComplete(RoundScore),
    NextLevel,
    BossRoundComplete(RoundScore),
    /// Replay practice, discarding stored scores.
    PlayAgain,
    OpenCreateMode,
    OpenStoryMode,
    Back,
    BackToMenu,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("event {event:?} is not valid on the {from:?} screen")]
    InvalidTransition { from: Screen, event: SessionEvent },
    #[error("boss round locked: practice accuracy {accuracy:.2} is below 0.70")]
    BossRoundLocked { accuracy: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    screen: Screen,
    practice: Option<RoundScore>,
    boss: Option<RoundScore>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            practice: None,
            boss: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn practice_score(&self) -> Option<RoundScore> {
        self.practice
    }

    pub fn boss_score(&self) -> Option<RoundScore> {
        self.boss
    }

    pub fn boss_unlocked(&self) -> bool {
        self.practice
            .is_some_and(|p| p.total > 0 && p.accuracy() >= BOSS_UNLOCK_ACCURACY)
    }

    /// Apply `event`. On error the session is left unchanged.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Screen, SessionError> {
        use Screen::*;
        use SessionEvent::*;

        let next = match (self.screen, event) {
            (_, BackToMenu) => Welcome,

            (Welcome, StartMission) => Tutorial,
            (Welcome, OpenCreateMode) => CreateMode,
            (Welcome, OpenStoryMode) => StoryMode,

            (Tutorial, ContinueFromTutorial) => Practice,
            (Tutorial, Back) => Welcome,

            (Practice, PracticeComplete(score)) => {
                self.practice = Some(score);
                Results
            }
            (Practice, Back) => Tutorial,

            (Results, NextLevel) => {
                if !self.boss_unlocked() {
                    return Err(SessionError::BossRoundLocked {
                        accuracy: self.practice.map(|p| p.accuracy()).unwrap_or(0.0),
                    });
                }
                BossRound
            }
            (Results, Back) => Tutorial,

            (BossRound, BossRoundComplete(score)) => {
                self.boss = Some(score);
                FinalResults
            }
            (BossRound, Back) => Results,

            (Results | FinalResults, PlayAgain) => {
                self.practice = None;
                self.boss = None;
                Practice
            }

            (CreateMode | StoryMode, Back) => Welcome,

            (from, event) => return Err(SessionError::InvalidTransition { from, event }),
        };

        self.screen = next;
        Ok(next)
    }
}
