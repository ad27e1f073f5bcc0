//! Roster shuffling: a fresh random order per generation round.

use crate::models::{Activity, PickerError, RosterBook};
use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffled copy of `roster` (Fisher-Yates, last index down to 1). The input is untouched.
pub fn shuffle_roster<T: Clone, R: Rng + ?Sized>(roster: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Draw the shuffled working roster for one round of `activity`.
pub(crate) fn draw_roster<R: Rng + ?Sized>(
    book: &RosterBook,
    activity: Activity,
    rng: &mut R,
) -> Result<Vec<String>, PickerError> {
    let source = book.players_for(activity);
    if source.is_empty() {
        return Err(PickerError::EmptyRoster(activity));
    }
    Ok(shuffle_roster(&source, rng))
}
