use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use super::RoomEngine;
use crate::domain::delta::Delta;
use crate::domain::player_view::player_views;
use crate::errors::domain::DomainError;
use crate::events::store::StoredEvent;
use crate::ws::protocol::{PhaseChange, PhaseChangeData};

impl RoomEngine {
    /// The only way room state changes.
    ///
    /// Order: encode, apply to a staged copy, append, install, broadcast.
    /// Any failure before the append leaves the log and the live state as
    /// they were.
    pub(super) fn commit(&mut self, delta: Delta) -> Result<u64, DomainError> {
        let payload = serde_json::to_string(&delta)?;

        let mut staged = self.state.clone();
        delta.apply(&mut staged)?;
        let sequence = self.state.sequence + 1;
        staged.sequence = sequence;

        let now = OffsetDateTime::now_utc();
        let timestamp = now.unix_timestamp_nanos() as f64 / 1_000_000_000.0;
        let created_at = now
            .format(&Rfc3339)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        let player_id = delta
            .actor()
            .and_then(|seat| staged.player(seat))
            .map(|p| p.name.clone());

        self.store.append(StoredEvent {
            sequence,
            room_id: staged.room_id.clone(),
            event_type: delta.event_type().to_string(),
            payload,
            player_id,
            timestamp,
            created_at,
        })?;
        self.state = staged;

        let change = PhaseChange::new(PhaseChangeData {
            room_id: self.state.room_id.clone(),
            phase: self.state.phase(),
            phase_data: self.state.phase_data.clone(),
            players: player_views(&self.state),
            sequence,
            timestamp,
            reason: delta.describe(),
        });
        let delivered = self.dispatcher.dispatch(&change);
        debug!(
            room_id = %self.state.room_id,
            sequence,
            event_type = delta.event_type(),
            delivered,
            "event committed"
        );
        Ok(sequence)
    }
}
