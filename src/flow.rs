//! Score submission and leaderboard screens
//!
//! A sans-IO state machine: methods return the request the host should
//! send (if any) and the host reports results back. Keeps the submit
//! guard and the last good leaderboard in one place.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::leaderboard::{LeaderboardEntry, NewScore, ValidationError, MAX_PLAYER_NAME_CHARS};

/// Leaderboard endpoint, relative to the API base
pub const SCORES_PATH: &str = "/api/dino-scores";

/// Screen shown around the game canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    /// Run ended, name entry shown
    GameOver,
    Leaderboard,
}

/// Failure talking to the leaderboard API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request never completed
    #[error("network error: {0}")]
    Transport(String),
    /// Server refused the submission (400)
    #[error("{0}")]
    Rejected(String),
    /// Any other non-2xx status
    #[error("server responded with status {0}")]
    Status(u16),
    /// Response body did not parse
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Interpret a finished API response
///
/// 2xx bodies decode as `T`; a 400 with an `{error}` body becomes
/// `Rejected` so the message can be shown inline.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    if status == 400 {
        if let Ok(ErrorBody { error }) = serde_json::from_str(body) {
            return Err(ApiError::Rejected(error));
        }
    }
    Err(ApiError::Status(status))
}

/// Marker for "fetch the top scores now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLeaderboard;

/// A score the host should POST, tagged with the run that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub run: u64,
    pub score: NewScore,
}

/// Screen state plus name entry and leaderboard cache
#[derive(Debug, Clone, Default)]
pub struct ScoreFlow {
    screen: Screen,
    /// Bumped on every run start; replies for older runs are dropped
    run: u64,
    final_score: u64,
    name_input: String,
    submitting: bool,
    /// Inline message under the name field
    notice: Option<String>,
    entries: Vec<LeaderboardEntry>,
}

impl ScoreFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a remembered player name
    pub fn with_name(name: &str) -> Self {
        let mut flow = Self::default();
        flow.set_name(name);
        flow
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Whether the submit button should be enabled
    pub fn can_submit(&self) -> bool {
        self.screen == Screen::GameOver && !self.submitting && !self.name_input.trim().is_empty()
    }

    pub fn start_run(&mut self) {
        self.screen = Screen::Playing;
        self.run += 1;
        self.final_score = 0;
        self.submitting = false;
        self.notice = None;
    }

    pub fn run_ended(&mut self, score: u64) {
        self.screen = Screen::GameOver;
        self.final_score = score;
        self.notice = None;
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.notice = None;
    }

    /// Update the name field, keeping at most the allowed length
    ///
    /// Leading whitespace is dropped first so the cap matches the
    /// server's count after trimming.
    pub fn set_name(&mut self, input: &str) {
        self.name_input = input
            .trim_start()
            .chars()
            .take(MAX_PLAYER_NAME_CHARS)
            .collect();
        self.notice = None;
    }

    /// Begin a submission
    ///
    /// Returns `None` (and sends nothing) for a blank name, while another
    /// submission is in flight, or outside the game-over screen.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.screen != Screen::GameOver || self.submitting {
            return None;
        }
        let request = match NewScore::new(&self.name_input, self.final_score) {
            Ok(request) => request,
            Err(ValidationError::BlankName) => return None,
            Err(e) => {
                self.notice = Some(e.to_string());
                return None;
            }
        };
        self.submitting = true;
        self.notice = None;
        Some(SubmitRequest {
            run: self.run,
            score: request,
        })
    }

    /// Report the outcome of a submission
    ///
    /// On success moves to the leaderboard and asks for a refetch. Replies
    /// for an earlier run, or arriving after the player left the game-over
    /// screen, change nothing on screen.
    pub fn submit_finished(
        &mut self,
        run: u64,
        result: Result<LeaderboardEntry, ApiError>,
    ) -> Option<FetchLeaderboard> {
        if run != self.run {
            log::debug!("Dropping submit reply for run {run} (now {})", self.run);
            return None;
        }
        self.submitting = false;
        if self.screen != Screen::GameOver {
            if let Err(e) = result {
                log::warn!("Failed to submit score: {e}");
            }
            return None;
        }
        match result {
            Ok(entry) => {
                log::info!("Score {} submitted for {}", entry.score, entry.player_name);
                self.screen = Screen::Leaderboard;
                self.notice = None;
                Some(FetchLeaderboard)
            }
            Err(ApiError::Rejected(message)) => {
                self.notice = Some(message);
                None
            }
            Err(e) => {
                log::warn!("Failed to submit score: {e}");
                None
            }
        }
    }

    /// Switch to the leaderboard view
    pub fn open_leaderboard(&mut self) -> FetchLeaderboard {
        self.screen = Screen::Leaderboard;
        FetchLeaderboard
    }

    /// Explicit refresh while viewing the leaderboard
    pub fn refresh(&self) -> Option<FetchLeaderboard> {
        (self.screen == Screen::Leaderboard).then_some(FetchLeaderboard)
    }

    /// Report a leaderboard fetch; failures keep the last good list
    pub fn leaderboard_loaded(&mut self, result: Result<Vec<LeaderboardEntry>, ApiError>) {
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => log::warn!("Failed to fetch leaderboard: {e}"),
        }
    }
}
