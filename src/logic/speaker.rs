//! Speaker of the day.

use crate::models::{Activity, ActivityBoard, GenerationTicket, PickerError, RosterBook};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// `speakers` minus `excluded` (exact match), blank names dropped. Order is kept.
pub fn eligible_speakers(speakers: &[String], excluded: &[String]) -> Vec<String> {
    speakers
        .iter()
        .filter(|s| !s.trim().is_empty() && !excluded.contains(s))
        .cloned()
        .collect()
}

/// Uniform pick among `eligible` speakers not yet in `already_picked`.
pub fn pick_speaker<R: Rng + ?Sized>(
    eligible: &[String],
    already_picked: &[String],
    rng: &mut R,
) -> Result<String, PickerError> {
    let candidates: Vec<&String> = eligible
        .iter()
        .filter(|s| !already_picked.contains(s))
        .collect();
    candidates
        .choose(rng)
        .map(|s| (*s).clone())
        .ok_or(PickerError::NoEligibleSpeakers)
}

/// Pick the next speaker and record it on the board.
///
/// With `no_repeat` set on the board, each pick is recorded in the history and skipped
/// until the history is reset. Without it, nothing is recorded.
pub fn pick_board_speaker<R: Rng + ?Sized>(
    board: &mut ActivityBoard,
    ticket: GenerationTicket,
    book: &RosterBook,
    rng: &mut R,
) -> Result<(), PickerError> {
    board.check_ticket_for(ticket, Activity::Speaker)?;
    board.finish_generation(ticket);

    let eligible = book.eligible_speakers();
    let skip: &[String] = if board.speaker.no_repeat {
        &board.speaker.history
    } else {
        &[]
    };
    let speaker = pick_speaker(&eligible, skip, rng)?;
    debug!("speaker: picked {} of {} eligible", speaker, eligible.len());
    if board.speaker.no_repeat {
        board.speaker.history.push(speaker.clone());
    }
    board.speaker.current = Some(speaker);
    Ok(())
}
