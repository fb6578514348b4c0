//! The closed set of state patches.
//!
//! Every committed event carries exactly one `Delta`. Live commits and
//! replay both go through `Delta::apply`, so a replayed room ends up in the
//! same state the live room held. Each delta is only legal in its own phase;
//! anything else is an integrity error and the commit is aborted.

use serde::{Deserialize, Serialize};

use crate::domain::combos::PlayType;
use crate::domain::phase_data::{DeclarationEntry, PhaseData, StarterRule};
use crate::domain::pieces::Piece;
use crate::domain::rules::{PIECES_PER_HAND, PLAYERS};
use crate::domain::state::{PlayerState, RoomState, RoundInfo, Seat, SeatSpec};
use crate::domain::turns::TurnPlay;
use crate::domain::declaration::next_zero_streak;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Delta {
    RoomOpened {
        room_id: String,
        seed: u64,
        seats: Vec<SeatSpec>,
    },
    PhaseEntered {
        data: PhaseData,
    },
    GameStarted {
        by: Seat,
    },
    RoundStarted {
        round_no: u16,
    },
    HandsDealt {
        deal_no: u16,
        hands: Vec<Vec<Piece>>,
        weak_seats: Vec<Seat>,
    },
    RedealDeclined {
        seat: Seat,
        deal_no: u16,
    },
    RedealAccepted {
        seat: Seat,
        deal_no: u16,
    },
    RedealWindowExpired {
        deal_no: u16,
    },
    StarterChosen {
        seat: Seat,
        rule: StarterRule,
    },
    Declared {
        seat: Seat,
        value: u8,
    },
    PiecesPlayed {
        seat: Seat,
        pieces: Vec<Piece>,
        play_type: Option<PlayType>,
    },
    PilesAwarded {
        seat: Seat,
        count: u8,
    },
    TurnResultsAcknowledged,
    ScoresApplied {
        round_scores: Vec<i32>,
    },
    ScoringAcknowledged,
}

impl Delta {
    /// Event type tag stored alongside the payload.
    pub fn event_type(&self) -> &'static str {
        match self {
            Delta::RoomOpened { .. } => "room_opened",
            Delta::PhaseEntered { .. } => "phase_entered",
            Delta::GameStarted { .. } => "game_started",
            Delta::RoundStarted { .. } => "round_started",
            Delta::HandsDealt { .. } => "hands_dealt",
            Delta::RedealDeclined { .. } => "redeal_declined",
            Delta::RedealAccepted { .. } => "redeal_accepted",
            Delta::RedealWindowExpired { .. } => "redeal_window_expired",
            Delta::StarterChosen { .. } => "starter_chosen",
            Delta::Declared { .. } => "declared",
            Delta::PiecesPlayed { .. } => "pieces_played",
            Delta::PilesAwarded { .. } => "piles_awarded",
            Delta::TurnResultsAcknowledged => "turn_results_acknowledged",
            Delta::ScoresApplied { .. } => "scores_applied",
            Delta::ScoringAcknowledged => "scoring_acknowledged",
        }
    }

    /// Seat whose action produced this delta, if any.
    pub fn actor(&self) -> Option<Seat> {
        match self {
            Delta::GameStarted { by } => Some(*by),
            Delta::RedealDeclined { seat, .. }
            | Delta::RedealAccepted { seat, .. }
            | Delta::Declared { seat, .. }
            | Delta::PiecesPlayed { seat, .. } => Some(*seat),
            _ => None,
        }
    }

    /// Human-readable summary used as the broadcast reason.
    pub fn describe(&self) -> String {
        match self {
            Delta::RoomOpened { room_id, .. } => format!("room {room_id} opened"),
            Delta::PhaseEntered { data } => format!("entered {}", data.phase()),
            Delta::GameStarted { by } => format!("seat {by} started the game"),
            Delta::RoundStarted { round_no } => format!("round {round_no} started"),
            Delta::HandsDealt {
                deal_no,
                weak_seats,
                ..
            } => format!("deal {deal_no}: {} weak hand(s)", weak_seats.len()),
            Delta::RedealDeclined { seat, deal_no } => {
                format!("seat {seat} declined a redeal of deal {deal_no}")
            }
            Delta::RedealAccepted { seat, deal_no } => {
                format!("seat {seat} accepted a redeal of deal {deal_no}")
            }
            Delta::RedealWindowExpired { deal_no } => {
                format!("redeal window for deal {deal_no} expired")
            }
            Delta::StarterChosen { seat, rule } => format!("seat {seat} starts ({rule:?})"),
            Delta::Declared { seat, value } => format!("seat {seat} declared {value}"),
            Delta::PiecesPlayed {
                seat,
                pieces,
                play_type,
            } => match play_type {
                Some(t) => format!("seat {seat} played {} piece(s) as {t:?}", pieces.len()),
                None => format!("seat {seat} forfeited {} piece(s)", pieces.len()),
            },
            Delta::PilesAwarded { seat, count } => format!("seat {seat} wins {count} piece(s)"),
            Delta::TurnResultsAcknowledged => "turn results acknowledged".to_string(),
            Delta::ScoresApplied { .. } => "round scores applied".to_string(),
            Delta::ScoringAcknowledged => "scores acknowledged".to_string(),
        }
    }

    /// Patch `state` in place. On error `state` may be partially modified;
    /// callers apply to a staged copy.
    pub fn apply(&self, state: &mut RoomState) -> Result<(), DomainError> {
        if !matches!(self, Delta::RoomOpened { .. }) && !state.is_opened() {
            return Err(DomainError::integrity(format!(
                "{} before room_opened",
                self.event_type()
            )));
        }

        match self {
            Delta::RoomOpened {
                room_id,
                seed,
                seats,
            } => {
                if state.is_opened() || state.sequence != 0 {
                    return Err(DomainError::integrity("room already opened"));
                }
                if seats.len() != PLAYERS {
                    return Err(DomainError::integrity(format!(
                        "room needs {PLAYERS} seats, got {}",
                        seats.len()
                    )));
                }
                state.room_id = room_id.clone();
                state.seed = *seed;
                state.players = seats.iter().map(PlayerState::new).collect();
                state.round = RoundInfo::empty();
                state.phase_data = PhaseData::initial();
            }

            Delta::PhaseEntered { data } => {
                let from = state.phase();
                let to = data.phase();
                if !from.can_transition_to(to) {
                    return Err(DomainError::transition(format!(
                        "{from} -> {to} is not a legal transition"
                    )));
                }
                state.phase_data = data.clone();
            }

            Delta::GameStarted { .. } => {
                let PhaseData::Waiting(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.started {
                    return Err(DomainError::integrity("game already started"));
                }
                data.started = true;
            }

            Delta::RoundStarted { round_no } => {
                let PhaseData::Preparation(data) = &state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if *round_no != state.round.round_no + 1 || *round_no != data.round_no {
                    return Err(DomainError::integrity(format!(
                        "round {round_no} does not follow round {}",
                        state.round.round_no
                    )));
                }
                let previous_round_winner = state.round.last_turn_winner;
                state.round = RoundInfo {
                    round_no: *round_no,
                    previous_round_winner,
                    ..RoundInfo::empty()
                };
                for player in state.players.iter_mut() {
                    player.hand.clear();
                    player.declared = None;
                    player.captured = 0;
                }
            }

            Delta::HandsDealt {
                deal_no,
                hands,
                weak_seats,
            } => {
                let round_no = state.round.round_no;
                let PhaseData::Preparation(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.round_no != round_no || data.dealt || *deal_no != data.deal_no + 1 {
                    return Err(DomainError::integrity(format!(
                        "deal {deal_no} out of order in round {round_no}"
                    )));
                }
                if hands.len() != PLAYERS || hands.iter().any(|h| h.len() != PIECES_PER_HAND) {
                    return Err(DomainError::integrity("deal must give 8 pieces to each seat"));
                }
                data.deal_no = *deal_no;
                data.dealt = true;
                data.weak_seats = weak_seats.clone();
                data.declined.clear();
                data.window_expired = false;
                for (player, hand) in state.players.iter_mut().zip(hands) {
                    player.hand = hand.clone();
                }
            }

            Delta::RedealDeclined { seat, deal_no } => {
                let PhaseData::Preparation(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.deal_no != *deal_no || !data.undecided().contains(seat) {
                    return Err(DomainError::integrity(format!(
                        "seat {seat} has no open redeal decision for deal {deal_no}"
                    )));
                }
                data.declined.push(*seat);
            }

            Delta::RedealAccepted { seat, deal_no } => {
                let PhaseData::Preparation(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.deal_no != *deal_no || !data.undecided().contains(seat) {
                    return Err(DomainError::integrity(format!(
                        "seat {seat} has no open redeal decision for deal {deal_no}"
                    )));
                }
                data.dealt = false;
                data.weak_seats.clear();
                data.declined.clear();
                state.round.multiplier += 1;
                state.round.redeal_starter = Some(*seat);
            }

            Delta::RedealWindowExpired { deal_no } => {
                let PhaseData::Preparation(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if !data.window_open() || data.deal_no != *deal_no {
                    return Err(DomainError::integrity(format!(
                        "no open redeal window for deal {deal_no}"
                    )));
                }
                data.window_expired = true;
            }

            Delta::StarterChosen { seat, rule } => {
                let PhaseData::Preparation(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if !data.ready_for_starter() {
                    return Err(DomainError::integrity("starter chosen while a redeal is pending"));
                }
                check_seat(*seat)?;
                data.starter = Some(*seat);
                data.starter_rule = Some(*rule);
                state.round.starter = Some(*seat);
            }

            Delta::Declared { seat, value } => {
                let PhaseData::Declaration(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.next_to_act() != Some(*seat) {
                    return Err(DomainError::integrity(format!(
                        "seat {seat} declared out of order"
                    )));
                }
                data.declarations.push(DeclarationEntry {
                    seat: *seat,
                    value: *value,
                });
                let player = player_mut(&mut state.players, *seat)?;
                player.declared = Some(*value);
                player.zero_declare_streak = next_zero_streak(player.zero_declare_streak, *value);
            }

            Delta::PiecesPlayed {
                seat,
                pieces,
                play_type,
            } => {
                let PhaseData::Turn(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.next_to_act() != Some(*seat) {
                    return Err(DomainError::integrity(format!(
                        "seat {seat} played out of order"
                    )));
                }
                match data.required {
                    None => data.required = Some(pieces.len() as u8),
                    Some(k) if k as usize != pieces.len() => {
                        return Err(DomainError::integrity(format!(
                            "seat {seat} played {} piece(s), turn requires {k}",
                            pieces.len()
                        )));
                    }
                    Some(_) => {}
                }
                data.plays.push(TurnPlay {
                    seat: *seat,
                    pieces: pieces.clone(),
                    play_type: *play_type,
                });
                let player = player_mut(&mut state.players, *seat)?;
                for piece in pieces {
                    let Some(pos) = player.hand.iter().position(|p| p.id == piece.id) else {
                        return Err(DomainError::integrity(format!(
                            "piece {} not in seat {seat}'s hand",
                            piece.id
                        )));
                    };
                    player.hand.remove(pos);
                }
            }

            Delta::PilesAwarded { seat, count } => {
                let PhaseData::TurnResults(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.awarded || data.winner != *seat || data.pile_size != *count {
                    return Err(DomainError::integrity(format!(
                        "award of {count} to seat {seat} does not match the resolved turn"
                    )));
                }
                data.awarded = true;
                state.round.turns_played += 1;
                state.round.last_turn_winner = Some(*seat);
                let player = player_mut(&mut state.players, *seat)?;
                player.captured += count;
            }

            Delta::TurnResultsAcknowledged => {
                let PhaseData::TurnResults(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if !data.awarded || data.acknowledged {
                    return Err(DomainError::integrity("turn results not awaiting acknowledgement"));
                }
                data.acknowledged = true;
            }

            Delta::ScoresApplied { round_scores } => {
                let PhaseData::Scoring(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if data.applied || round_scores.len() != PLAYERS {
                    return Err(DomainError::integrity("scores already applied or malformed"));
                }
                data.applied = true;
                for (player, score) in state.players.iter_mut().zip(round_scores) {
                    player.score += score;
                }
            }

            Delta::ScoringAcknowledged => {
                let PhaseData::Scoring(data) = &mut state.phase_data else {
                    return Err(out_of_phase(self, state));
                };
                if !data.applied || data.acknowledged {
                    return Err(DomainError::integrity("scoring not awaiting acknowledgement"));
                }
                data.acknowledged = true;
            }
        }
        Ok(())
    }
}

fn out_of_phase(delta: &Delta, state: &RoomState) -> DomainError {
    DomainError::integrity(format!(
        "{} is not valid in phase {}",
        delta.event_type(),
        state.phase()
    ))
}

fn check_seat(seat: Seat) -> Result<(), DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(())
    } else {
        Err(DomainError::integrity(format!("seat {seat} out of range")))
    }
}

fn player_mut(players: &mut [PlayerState], seat: Seat) -> Result<&mut PlayerState, DomainError> {
    players
        .get_mut(seat as usize)
        .ok_or_else(|| DomainError::integrity(format!("seat {seat} out of range")))
}
