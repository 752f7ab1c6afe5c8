//! Player registry: bids, moves spent this round and scores.

use rand::{seq::SliceRandom, Rng};
use ricochet_core::{PlayerId, PlayerScore};

/// State of one seated player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    bid: Option<u32>,
    used_moves: u32,
    score: u32,
}

impl Player {
    fn seated(id: PlayerId) -> Self {
        Self {
            id,
            name: id.to_string(),
            bid: None,
            used_moves: 0,
            score: 0,
        }
    }

    /// Identifier assigned at registration.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name: the one-based seat number.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bid for the current round, once submitted.
    #[must_use]
    pub const fn bid(&self) -> Option<u32> {
        self.bid
    }

    /// Slides spent during the current turn.
    #[must_use]
    pub const fn used_moves(&self) -> u32 {
        self.used_moves
    }

    /// Slides still available under the bid.
    #[must_use]
    pub const fn moves_left(&self) -> u32 {
        match self.bid {
            Some(bid) => bid.saturating_sub(self.used_moves),
            None => 0,
        }
    }

    /// Rounds won this game.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    fn score_line(&self) -> PlayerScore {
        PlayerScore {
            player: self.id,
            name: self.name.clone(),
            score: self.score,
        }
    }
}

/// Players in registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Players {
    seated: Vec<Player>,
}

impl Players {
    pub(crate) fn seat(count: u32) -> Self {
        Self {
            seated: (0..count).map(|id| Player::seated(PlayerId::new(id))).collect(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[Player] {
        &self.seated
    }

    pub(crate) fn len(&self) -> usize {
        self.seated.len()
    }

    pub(crate) fn get(&self, id: PlayerId) -> Option<&Player> {
        self.seated.get(id.index())
    }

    pub(crate) fn id_at(&self, position: usize) -> Option<PlayerId> {
        self.seated.get(position).map(Player::id)
    }

    pub(crate) fn record_bid(&mut self, id: PlayerId, steps: u32) {
        if let Some(player) = self.seated.get_mut(id.index()) {
            player.bid = Some(steps);
        }
    }

    /// Counts one slide against the player's bid and returns the new total.
    pub(crate) fn spend_move(&mut self, id: PlayerId) -> u32 {
        self.seated.get_mut(id.index()).map_or(0, |player| {
            player.used_moves = player.used_moves.saturating_add(1);
            player.used_moves
        })
    }

    pub(crate) fn begin_turn(&mut self, id: PlayerId) {
        if let Some(player) = self.seated.get_mut(id.index()) {
            player.used_moves = 0;
        }
    }

    pub(crate) fn award_point(&mut self, id: PlayerId) {
        if let Some(player) = self.seated.get_mut(id.index()) {
            player.score = player.score.saturating_add(1);
        }
    }

    pub(crate) fn clear_round(&mut self) {
        for player in &mut self.seated {
            player.bid = None;
            player.used_moves = 0;
        }
    }

    /// Ascending by bid. Equal bids are ordered by a shuffle drawn from `rng`.
    pub(crate) fn turn_order<R: Rng>(&self, rng: &mut R) -> Vec<PlayerId> {
        let mut order: Vec<&Player> = self.seated.iter().collect();
        order.shuffle(rng);
        order.sort_by_key(|player| player.bid.unwrap_or(0));
        order.into_iter().map(Player::id).collect()
    }

    /// Descending by score. Equal scores are ordered by a shuffle drawn from
    /// `rng`.
    pub(crate) fn ranking<R: Rng>(&self, rng: &mut R) -> Vec<PlayerScore> {
        let mut ranking: Vec<PlayerScore> = self.seated.iter().map(Player::score_line).collect();
        ranking.shuffle(rng);
        ranking.sort_by(|left, right| right.score.cmp(&left.score));
        ranking
    }
}
