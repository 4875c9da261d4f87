//! Initial catalog: the built-in school roster or a JSON file in the
//! `GET /activities` format.

use crate::error::ActivityError;
use campus_kernel::domain::activity::{Activity, Catalog};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The catalog the school starts each term with.
#[must_use]
pub fn default_catalog() -> Catalog {
    [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Soccer Team",
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
            )
            .with_participants(["liam@mergington.edu", "noah@mergington.edu"]),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Practice and play basketball with the school team",
                "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["ava@mergington.edu", "mia@mergington.edu"]),
        ),
        (
            "Art Club",
            Activity::new(
                "Explore your creativity through painting and drawing",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["amelia@mergington.edu", "harper@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                20,
            )
            .with_participants(["ella@mergington.edu", "scarlett@mergington.edu"]),
        ),
        (
            "Math Club",
            Activity::new(
                "Solve challenging problems and participate in math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
            )
            .with_participants(["james@mergington.edu", "benjamin@mergington.edu"]),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(["charlotte@mergington.edu", "henry@mergington.edu"]),
        ),
    ]
    .into_iter()
    .map(|(name, activity)| (name.to_owned(), activity))
    .collect()
}

/// Reads and validates a catalog from a JSON file.
///
/// # Errors
/// Returns [`ActivityError::SeedIo`] if the file cannot be read,
/// [`ActivityError::SeedFormat`] if it is not a catalog, and
/// [`ActivityError::InvalidSeed`] if a roster breaks capacity or uniqueness.
pub fn load_catalog(path: &Path) -> Result<Catalog, ActivityError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ActivityError::SeedIo { path: path.to_path_buf(), source })?;
    let catalog: Catalog = serde_json::from_str(&raw)
        .map_err(|source| ActivityError::SeedFormat { path: path.to_path_buf(), source })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Checks the roster invariants the store relies on.
///
/// # Errors
/// Returns [`ActivityError::InvalidSeed`] naming the first offending activity.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), ActivityError> {
    for (name, activity) in catalog {
        let capacity = usize::try_from(activity.max_participants).unwrap_or(usize::MAX);
        if activity.participants.len() > capacity {
            return Err(ActivityError::InvalidSeed {
                message: format!(
                    "'{name}' has {} participants but allows {}",
                    activity.participants.len(),
                    activity.max_participants
                )
                .into(),
            });
        }

        let mut seen = HashSet::with_capacity(activity.participants.len());
        if let Some(dup) = activity.participants.iter().find(|email| !seen.insert(email.as_str())) {
            return Err(ActivityError::InvalidSeed {
                message: format!("'{name}' lists {dup} more than once").into(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 9);
        validate_catalog(&catalog).unwrap();
        assert!(catalog.values().all(|a| !a.participants.is_empty() && !a.is_full()));
    }

    #[test]
    fn over_capacity_roster_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Tiny".to_owned(),
            Activity { participants: vec!["a@x".into(), "b@x".into()], ..Activity::new("", "", 1) },
        );
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("'Tiny' has 2 participants"), "{err}");
    }

    #[test]
    fn duplicate_participant_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Twice".to_owned(),
            Activity { participants: vec!["a@x".into(), "a@x".into()], ..Activity::new("", "", 5) },
        );
        assert!(matches!(validate_catalog(&catalog), Err(ActivityError::InvalidSeed { .. })));
    }
}
