use crate::error::ActivityError;
use campus_kernel::domain::activity::{Activity, Catalog};
use parking_lot::RwLock;
use tracing::info;

/// In-memory activity catalog.
///
/// Every roster mutation holds the write lock for the whole
/// check-then-modify sequence, so concurrent signups cannot overfill an
/// activity or register the same student twice.
#[derive(Debug, Default)]
pub struct ActivityStore {
    catalog: RwLock<Catalog>,
}

impl ActivityStore {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog: RwLock::new(catalog) }
    }

    /// A point-in-time copy of the whole catalog.
    #[must_use]
    pub fn snapshot(&self) -> Catalog {
        self.catalog.read().clone()
    }

    #[must_use]
    pub fn get(&self, activity: &str) -> Option<Activity> {
        self.catalog.read().get(activity).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.read().is_empty()
    }

    /// Registers `email` for `activity`.
    ///
    /// Checks run in order: unknown activity, duplicate signup, capacity.
    ///
    /// # Errors
    /// [`ActivityError::NotFound`], [`ActivityError::AlreadySignedUp`] or [`ActivityError::Full`].
    pub fn signup(&self, activity: &str, email: &str) -> Result<(), ActivityError> {
        let mut catalog = self.catalog.write();
        let entry = catalog
            .get_mut(activity)
            .ok_or_else(|| ActivityError::NotFound { activity: activity.to_owned() })?;

        if entry.has_participant(email) {
            return Err(ActivityError::AlreadySignedUp {
                activity: activity.to_owned(),
                email: email.to_owned(),
            });
        }
        if entry.is_full() {
            return Err(ActivityError::Full {
                activity: activity.to_owned(),
                capacity: entry.max_participants,
            });
        }

        entry.participants.push(email.to_owned());
        info!(activity, email, spots_left = entry.spots_left(), "Student signed up");
        Ok(())
    }

    /// Removes `email` from `activity`, keeping the order of the remaining roster.
    ///
    /// # Errors
    /// [`ActivityError::NotFound`] or [`ActivityError::NotRegistered`].
    pub fn unregister(&self, activity: &str, email: &str) -> Result<(), ActivityError> {
        let mut catalog = self.catalog.write();
        let entry = catalog
            .get_mut(activity)
            .ok_or_else(|| ActivityError::NotFound { activity: activity.to_owned() })?;

        let position = entry.participants.iter().position(|p| p == email).ok_or_else(|| {
            ActivityError::NotRegistered { activity: activity.to_owned(), email: email.to_owned() }
        })?;

        entry.participants.remove(position);
        info!(activity, email, spots_left = entry.spots_left(), "Student removed");
        Ok(())
    }

    /// Swaps in a new catalog, returning the previous one.
    pub fn replace(&self, catalog: Catalog) -> Catalog {
        std::mem::replace(&mut *self.catalog.write(), catalog)
    }
}

impl From<Catalog> for ActivityStore {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store_with(capacity: u32, participants: &[&str]) -> ActivityStore {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Chess Club".to_owned(),
            Activity::new("Chess", "Fridays", capacity).with_participants(participants.iter().copied()),
        );
        ActivityStore::new(catalog)
    }

    #[test]
    fn signup_appends_in_order() {
        let store = store_with(5, &["a@x.edu"]);
        store.signup("Chess Club", "b@x.edu").unwrap();
        store.signup("Chess Club", "c@x.edu").unwrap();

        let roster = store.get("Chess Club").unwrap().participants;
        assert_eq!(roster, vec!["a@x.edu", "b@x.edu", "c@x.edu"]);
    }

    #[test]
    fn duplicate_is_reported_before_capacity() {
        let store = store_with(1, &["a@x.edu"]);
        assert!(matches!(
            store.signup("Chess Club", "a@x.edu"),
            Err(ActivityError::AlreadySignedUp { .. })
        ));
        assert!(matches!(store.signup("Chess Club", "b@x.edu"), Err(ActivityError::Full { .. })));
    }

    #[test]
    fn unknown_activity() {
        let store = store_with(1, &[]);
        assert!(matches!(store.signup("Nope", "a@x.edu"), Err(ActivityError::NotFound { .. })));
        assert!(matches!(store.unregister("Nope", "a@x.edu"), Err(ActivityError::NotFound { .. })));
    }

    #[test]
    fn unregister_frees_a_spot() {
        let store = store_with(2, &["a@x.edu", "b@x.edu"]);
        store.unregister("Chess Club", "a@x.edu").unwrap();
        assert_eq!(store.get("Chess Club").unwrap().participants, vec!["b@x.edu"]);
        assert!(matches!(
            store.unregister("Chess Club", "a@x.edu"),
            Err(ActivityError::NotRegistered { .. })
        ));
        store.signup("Chess Club", "c@x.edu").unwrap();
    }

    #[test]
    fn empty_email_is_a_valid_value() {
        let store = store_with(3, &[]);
        store.signup("Chess Club", "").unwrap();
        assert!(matches!(
            store.signup("Chess Club", ""),
            Err(ActivityError::AlreadySignedUp { .. })
        ));
    }

    #[test]
    fn concurrent_signups_never_exceed_capacity() {
        let store = Arc::new(store_with(10, &[]));
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.signup("Chess Club", &format!("s{i}@x.edu")).is_ok())
            })
            .collect();

        let accepted = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();
        assert_eq!(accepted, 10);
        assert_eq!(store.get("Chess Club").unwrap().participants.len(), 10);
    }

    #[test]
    fn replace_returns_previous_catalog() {
        let store = store_with(3, &["a@x.edu"]);
        let previous = store.replace(Catalog::new());
        assert_eq!(previous.len(), 1);
        assert!(store.is_empty());
    }
}
