use serenity::all::UserId;

use crate::{GameProperties, GameRegistry, GobError, Preference, PreferenceStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

impl Participant {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Every term of the score, configurable per call so nothing is baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionWeights {
    pub unrated: i64,
    pub wontplay: i64,
    pub dontown: i64,
    pub prefnot: i64,
    pub nopref: i64,
    pub wantplay: i64,
    pub playercount: i64,
    pub idealplayercount: i64,
    pub playercount_fail: i64,
}

impl Default for SuggestionWeights {
    fn default() -> Self {
        Self {
            unrated: 0,
            wontplay: -5,
            dontown: -4,
            prefnot: -1,
            nopref: 0,
            wantplay: 1,
            playercount: 0,
            idealplayercount: 1,
            playercount_fail: -5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScore {
    pub game: String,
    pub score: i64,
    /// Participants whose rating for the game resolved to Unrated.
    pub missing: Vec<String>,
}

impl SuggestionWeights {
    pub fn preference_weight(&self, preference: Preference) -> i64 {
        match preference {
            Preference::Unrated => self.unrated,
            Preference::WontPlay => self.wontplay,
            Preference::DontOwn => self.dontown,
            Preference::PrefNot => self.prefnot,
            Preference::NoPref => self.nopref,
            Preference::WantPlay => self.wantplay,
        }
    }

    pub fn score_game(&self, game: &str, properties: Option<&GameProperties>, participants: &[Participant], preferences: &PreferenceStore) -> GameScore {
        let mut score = 0;
        let mut missing = Vec::new();

        for participant in participants {
            // no record at all and an explicit Unrated count the same
            let preference = preferences.get(participant.id, game);
            if preference == Preference::Unrated {
                score += self.unrated;
                missing.push(participant.name.clone());
            } else {
                score += self.preference_weight(preference);
            }
        }

        // the player count term depends only on how many showed up, and only
        // exists when the game declares a player count at all
        let count = participants.len();
        if let Some(range) = properties.and_then(|p| p.player_count.as_ref()) {
            if !range.contains(count) {
                score += self.playercount_fail;
            } else {
                match properties.and_then(|p| p.ideal_player_count.as_ref()) {
                    Some(ideal) if ideal.contains(count) => score += self.idealplayercount,
                    _ => score += self.playercount,
                }
            }
        }

        GameScore {
            game: game.to_owned(),
            score,
            missing,
        }
    }
}

/// Scores every known game for the participant set and keeps the best
/// `count`. Highest score first, game name breaks ties so equal scores come
/// out in a deterministic order. Asking for more games than exist just
/// returns everything.
pub fn suggest(registry: &GameRegistry, preferences: &PreferenceStore, participants: &[Participant], count: usize, weights: &SuggestionWeights) -> Result<Vec<GameScore>, GobError> {
    if participants.is_empty() {
        return Err(GobError::NoParticipants);
    }

    let mut scores: Vec<GameScore> = registry
        .games()
        .map(|game| weights.score_game(game, registry.properties(game), participants, preferences))
        .collect();

    scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.game.cmp(&b.game)));
    scores.truncate(count);

    Ok(scores)
}
