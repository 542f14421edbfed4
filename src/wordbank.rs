use chrono::{Datelike, Local, NaiveDate};

/// Secrets used when no word is given on the command line.
pub const EMBEDDED_SECRETS: &[&str] = &[
    "AMBER", "PIANO", "CRANE", "SLATE", "BRAKE", "GRAPE", "LEMON", "MELON", "PEACH", "SPEED",
    "CREEP", "FLAME", "SHINE", "PLANT", "STORM", "TIGER", "QUILT", "BLOOM", "CHARM", "DWELL",
    "FROST", "GLOVE", "HONEY", "JOLLY", "KNACK", "LUNAR", "MIRTH", "NOBLE", "OCEAN", "PRIZE",
    "ROBIN", "SWIFT",
];

/// Pick the secret for a calendar day. Every day maps to one word and
/// consecutive days cycle through the list.
#[must_use]
pub fn daily_secret(date: NaiveDate) -> &'static str {
    let day = i64::from(date.num_days_from_ce());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = day.rem_euclid(EMBEDDED_SECRETS.len() as i64) as usize;
    EMBEDDED_SECRETS[index]
}

#[must_use]
pub fn todays_secret() -> &'static str {
    daily_secret(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_secrets_are_five_letters() {
        assert!(
            EMBEDDED_SECRETS
                .iter()
                .all(|w| w.len() == 5 && w.chars().all(|c| c.is_ascii_uppercase()))
        );
    }

    #[test]
    fn test_embedded_secrets_are_unique() {
        let unique: std::collections::HashSet<_> = EMBEDDED_SECRETS.iter().collect();
        assert_eq!(unique.len(), EMBEDDED_SECRETS.len());
        assert!(EMBEDDED_SECRETS.contains(&"PIANO"));
    }

    #[test]
    fn test_daily_secret_is_stable_for_a_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(daily_secret(date), daily_secret(date));
    }

    #[test]
    fn test_daily_secret_changes_between_days() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let next = day.succ_opt().unwrap();
        assert_ne!(daily_secret(day), daily_secret(next));
    }

    #[test]
    fn test_daily_secret_cycles() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let later = day + chrono::Days::new(EMBEDDED_SECRETS.len() as u64);
        assert_eq!(daily_secret(day), daily_secret(later));
    }

    #[test]
    fn test_todays_secret_in_list() {
        assert!(EMBEDDED_SECRETS.contains(&todays_secret()));
    }
}
