use crate::debug_log;
use crate::error::GameError;
use std::collections::HashMap;
use std::fmt;

/// Per-letter feedback for a guess.
///
/// Variants are ordered by strength so that `max` picks the best hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    /// Letter is not in the secret, or every occurrence is already claimed (gray)
    Miss,
    /// Letter is in the secret at another position (yellow)
    Present,
    /// Letter is in the right position (green)
    Hit,
}

impl Feedback {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'G' | 'g' => Some(Self::Hit),
            'Y' | 'y' => Some(Self::Present),
            'X' | 'x' => Some(Self::Miss),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Hit => 'G',
            Self::Present => 'Y',
            Self::Miss => 'X',
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Hit => "🟩",
            Self::Present => "🟨",
            Self::Miss => "⬛",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Score `guess` against `secret`, one mark per position.
///
/// Exact matches are claimed first so a displaced letter can only be credited
/// from the occurrences left over. Among displaced copies of the same letter,
/// the leftmost positions win.
///
/// # Errors
/// Returns [`GameError::InvalidLength`] if the words differ in length.
pub fn evaluate(guess: &str, secret: &str) -> Result<Vec<Feedback>, GameError> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let secret_chars: Vec<char> = secret.chars().collect();
    if guess_chars.len() != secret_chars.len() {
        return Err(GameError::InvalidLength {
            expected: secret_chars.len(),
            actual: guess_chars.len(),
        });
    }

    let mut feedback = vec![Feedback::Miss; guess_chars.len()];
    let mut available: HashMap<char, usize> = HashMap::new();
    for &c in &secret_chars {
        *available.entry(c).or_insert(0) += 1;
    }

    // First pass: hits
    for (i, (g, s)) in guess_chars.iter().zip(&secret_chars).enumerate() {
        if g == s {
            feedback[i] = Feedback::Hit;
            if let Some(count) = available.get_mut(g) {
                *count -= 1;
            }
        }
    }

    // Second pass: presents, left to right
    for (i, g) in guess_chars.iter().enumerate() {
        if feedback[i] == Feedback::Hit {
            continue;
        }
        if let Some(count) = available.get_mut(g)
            && *count > 0
        {
            *count -= 1;
            feedback[i] = Feedback::Present;
        }
    }

    debug_log!(
        "evaluate({}, {}) -> {}",
        guess,
        secret,
        feedback.iter().map(|f| f.to_char()).collect::<String>()
    );
    Ok(feedback)
}

#[must_use]
pub fn is_solved(feedback: &[Feedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|f| *f == Feedback::Hit)
}
