//! Head-to-head games: pair the shuffled roster into 1v1 or 2v2 matches.

use crate::logic::shuffle::draw_roster;
use crate::models::{
    ActivityBoard, GameMatch, GenerationTicket, MatchMode, MatchOutcome, PickerError, RosterBook,
};
use chrono::Utc;
use log::debug;
use rand::Rng;
use std::collections::BTreeSet;

/// Form matches from the front of `roster` (1v1: blocks of 2, 2v2: blocks of 4).
///
/// First half of each block is team 1, second half team 2. An incomplete final
/// block goes to the leftover list whole; no partial match is ever created.
pub fn pair_into_matches(roster: &[String], mode: MatchMode) -> MatchOutcome {
    let blocks = roster.chunks_exact(mode.block_size());
    let leftover = blocks.remainder().to_vec();
    let mut used = BTreeSet::new();

    let matches: Vec<GameMatch> = blocks
        .map(|block| {
            let (team_1, team_2) = block.split_at(mode.team_size());
            used.extend(block.iter().cloned());
            GameMatch::new(team_1.to_vec(), team_2.to_vec())
        })
        .collect();

    MatchOutcome {
        mode,
        matches,
        leftover,
        used,
        generated_at: Utc::now(),
    }
}

/// Draw a fresh roster for the ticket's game and replace its matches, in the game's current mode.
pub fn generate_matches<R: Rng + ?Sized>(
    board: &mut ActivityBoard,
    ticket: GenerationTicket,
    book: &RosterBook,
    rng: &mut R,
) -> Result<(), PickerError> {
    let game = ticket.activity;
    let mode = match board.game(game) {
        Ok(state) => state.mode,
        Err(e) => {
            board.finish_generation(ticket);
            return Err(e);
        }
    };
    board.check_ticket(ticket)?;
    let drawn = draw_roster(book, game, rng);
    board.finish_generation(ticket);
    let roster = drawn?;

    let outcome = pair_into_matches(&roster, mode);
    debug!(
        "{}: {} {} matches, {} in reserve",
        game,
        outcome.matches.len(),
        mode,
        outcome.leftover.len()
    );
    board.game_mut(game)?.outcome = Some(outcome);
    Ok(())
}
