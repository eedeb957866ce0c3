//! Ordered participant list with join/leave/toggle reducers.

use tracing::debug;

use super::types::{Participant, ToggleField};

/// Participants of one session, in arrival order.
///
/// The local participant is always present. Its own record is kept aside as
/// well so a resync that omits it can put it back.
#[derive(Debug, Clone)]
pub struct PresenceRegistry {
    participants: Vec<Participant>,
    local: Participant,
}

impl PresenceRegistry {
    pub fn new(local: Participant) -> Self {
        Self {
            participants: vec![local.clone()],
            local,
        }
    }

    pub fn local_id(&self) -> &str {
        &self.local.id
    }

    /// The local participant's own view of its flags.
    pub fn local(&self) -> &Participant {
        &self.local
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Replace the whole list with an authoritative snapshot.
    ///
    /// Repeated ids collapse onto the first slot with the later record. If
    /// the snapshot lacks the local participant, the local record is put
    /// first. Returns `true` if the list changed.
    pub fn apply_participants_list(&mut self, list: Vec<Participant>) -> bool {
        let mut next: Vec<Participant> = Vec::with_capacity(list.len() + 1);
        for participant in list {
            upsert(&mut next, participant);
        }
        if !next.iter().any(|p| p.id == self.local.id) {
            next.insert(0, self.local.clone());
        }

        if next == self.participants {
            return false;
        }
        debug!(count = next.len(), "Participant list replaced");
        self.participants = next;
        true
    }

    /// Add a participant, or fully replace the record with the same id.
    pub fn apply_join(&mut self, participant: Participant) -> bool {
        if self.get(&participant.id) == Some(&participant) {
            return false;
        }
        upsert(&mut self.participants, participant);
        true
    }

    /// Remove a participant. Unknown ids are ignored.
    pub fn apply_leave(&mut self, id: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    /// Set one flag on a known participant. Unknown ids are ignored.
    pub fn apply_toggle(&mut self, id: &str, field: ToggleField, value: bool) -> bool {
        if id == self.local.id {
            self.local.set(field, value);
        }
        match self.participants.iter_mut().find(|p| p.id == id) {
            Some(p) if p.get(field) != value => {
                p.set(field, value);
                true
            }
            _ => false,
        }
    }
}

fn upsert(list: &mut Vec<Participant>, participant: Participant) {
    match list.iter_mut().find(|p| p.id == participant.id) {
        Some(existing) => *existing = participant,
        None => list.push(participant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PresenceRegistry {
        PresenceRegistry::new(Participant::new("me", "Me").with_host(true))
    }

    fn count(registry: &PresenceRegistry, id: &str) -> usize {
        registry.participants().iter().filter(|p| p.id == id).count()
    }

    #[test]
    fn starts_with_local_participant() {
        let reg = registry();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.local_id(), "me");
        assert!(reg.get("me").unwrap().is_host);
    }

    #[test]
    fn repeated_join_keeps_one_entry() {
        let mut reg = registry();
        assert!(reg.apply_join(Participant::new("bob", "Bob")));
        assert!(!reg.apply_join(Participant::new("bob", "Bob")));
        assert!(reg.apply_join(Participant::new("bob", "Robert")));
        assert_eq!(count(&reg, "bob"), 1);
        assert_eq!(reg.get("bob").unwrap().name, "Robert");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn join_replaces_in_place() {
        let mut reg = registry();
        reg.apply_join(Participant::new("a", "A"));
        reg.apply_join(Participant::new("b", "B"));
        let mut muted = Participant::new("a", "A");
        muted.is_muted = true;
        reg.apply_join(muted);

        let ids: Vec<&str> = reg.participants().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["me", "a", "b"]);
        assert!(reg.get("a").unwrap().is_muted);
    }

    #[test]
    fn list_without_local_prepends_it() {
        let mut reg = registry();
        reg.apply_toggle("me", ToggleField::Muted, true);
        assert!(reg.apply_participants_list(vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
        ]));

        assert_eq!(reg.participants()[0].id, "me");
        assert!(reg.participants()[0].is_muted);
        assert_eq!(count(&reg, "me"), 1);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn list_with_local_is_kept_as_given() {
        let mut reg = registry();
        let mut remote_me = Participant::new("me", "Me (server)");
        remote_me.is_video_off = true;
        reg.apply_participants_list(vec![Participant::new("a", "A"), remote_me.clone()]);

        assert_eq!(count(&reg, "me"), 1);
        assert_eq!(reg.participants()[1], remote_me);
    }

    #[test]
    fn empty_list_leaves_only_local() {
        let mut reg = registry();
        reg.apply_join(Participant::new("a", "A"));
        reg.apply_participants_list(Vec::new());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.participants()[0].id, "me");
    }

    #[test]
    fn duplicate_ids_in_list_collapse() {
        let mut reg = registry();
        reg.apply_participants_list(vec![
            Participant::new("a", "first"),
            Participant::new("b", "B"),
            Participant::new("a", "second"),
        ]);
        assert_eq!(count(&reg, "a"), 1);
        assert_eq!(reg.get("a").unwrap().name, "second");
    }

    #[test]
    fn toggle_for_unknown_id_is_noop() {
        let mut reg = registry();
        reg.apply_join(Participant::new("a", "A"));
        let before = reg.participants().to_vec();

        assert!(!reg.apply_toggle("ghost", ToggleField::Muted, true));
        assert_eq!(reg.participants(), before.as_slice());
    }

    #[test]
    fn toggle_updates_one_field() {
        let mut reg = registry();
        reg.apply_join(Participant::new("a", "A"));
        assert!(reg.apply_toggle("a", ToggleField::ScreenSharing, true));
        assert!(!reg.apply_toggle("a", ToggleField::ScreenSharing, true));

        let a = reg.get("a").unwrap();
        assert!(a.is_screen_sharing);
        assert!(!a.is_muted && !a.is_video_off);
    }

    #[test]
    fn leave_removes_and_ignores_unknown() {
        let mut reg = registry();
        reg.apply_join(Participant::new("a", "A"));
        assert!(reg.apply_leave("a"));
        assert!(!reg.apply_leave("a"));
        assert!(!reg.contains("a"));
    }
}
