//! In-memory store backing the web binary and the integration tests.

use crate::models::{
    Match, MatchId, MatchResult, Player, PlayerId, Points, RegistrationStatus, TournamentState,
};
use crate::store::{Store, StoreError};

/// Vec-backed store. Insertion order is preserved, which keeps standings
/// tie resolution stable between reads of the same data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    matches: Vec<Match>,
    state: Option<TournamentState>,
    /// How many times the cache hook fired (observable in tests).
    invalidations: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, StoreError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::PlayerNotFound(id))
    }
}

impl Store for MemoryStore {
    fn list_players(
        &self,
        status: Option<RegistrationStatus>,
    ) -> Result<Vec<Player>, StoreError> {
        let mut players: Vec<Player> = self
            .players
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        // Stable sort: fully tied players keep registration order.
        players.sort_by(|a, b| (b.score, b.rating).cmp(&(a.score, a.rating)));
        Ok(players)
    }

    fn get_player(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::PlayerNotFound(id))
    }

    fn add_player(&mut self, player: Player) -> Result<(), StoreError> {
        self.players.push(player);
        Ok(())
    }

    fn update_player_status(
        &mut self,
        id: PlayerId,
        status: RegistrationStatus,
    ) -> Result<(), StoreError> {
        self.player_mut(id)?.status = status;
        Ok(())
    }

    fn update_player_score(&mut self, id: PlayerId, score: Points) -> Result<(), StoreError> {
        self.player_mut(id)?.score = score;
        Ok(())
    }

    fn increment_player_score(&mut self, id: PlayerId, delta: Points) -> Result<(), StoreError> {
        self.player_mut(id)?.score += delta;
        Ok(())
    }

    fn update_player_rank(&mut self, id: PlayerId, rank: Option<u32>) -> Result<(), StoreError> {
        self.player_mut(id)?.rank = rank;
        Ok(())
    }

    fn reset_player_stats(&mut self) -> Result<(), StoreError> {
        for p in &mut self.players {
            p.score = Points::ZERO;
            p.rank = None;
        }
        Ok(())
    }

    fn delete_player(&mut self, id: PlayerId) -> Result<(), StoreError> {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return Err(StoreError::PlayerNotFound(id));
        }
        self.matches.retain(|m| !m.involves(id));
        Ok(())
    }

    fn list_matches(&self, round: Option<u32>) -> Result<Vec<Match>, StoreError> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| round.map_or(true, |r| m.round == r))
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.table));
        Ok(matches)
    }

    fn create_matches(&mut self, matches: &[Match]) -> Result<(), StoreError> {
        self.matches.extend_from_slice(matches);
        Ok(())
    }

    fn set_match_result(&mut self, id: MatchId, result: MatchResult) -> Result<(), StoreError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::MatchNotFound(id))?;
        m.result = Some(result);
        Ok(())
    }

    fn delete_matches_for_round(&mut self, round: u32) -> Result<(), StoreError> {
        self.matches.retain(|m| m.round != round);
        Ok(())
    }

    fn clear_matches(&mut self) -> Result<(), StoreError> {
        self.matches.clear();
        Ok(())
    }

    fn tournament_state(&mut self) -> Result<TournamentState, StoreError> {
        Ok(*self.state.get_or_insert_with(TournamentState::default))
    }

    fn save_tournament_state(&mut self, state: &TournamentState) -> Result<(), StoreError> {
        self.state = Some(*state);
        Ok(())
    }

    fn invalidate_cache(&mut self) {
        self.invalidations += 1;
        log::debug!("cache invalidation #{}", self.invalidations);
    }
}
