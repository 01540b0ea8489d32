//! Heuristic syllable counting.
//!
//! Counts runs of vowels instead of looking words up in a dictionary, so the
//! estimate is deterministic and cheap but only approximate.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Estimator for syllable counts
pub struct SyllableEstimator;

impl SyllableEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate the syllables in a single word. Always at least 1.
    ///
    /// Non-alphabetic characters are ignored, so `"table,"` and `"table"` agree.
    pub fn count(&self, word: &str) -> usize {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 3 {
            return 1;
        }

        let mut count = vowel_runs(&chars) as isize;

        // Silent trailing e ("make")
        if chars[chars.len() - 1] == 'e' {
            count -= 1;
        }
        // Consonant + "le" is its own syllable ("table")
        if word.ends_with("le") && !is_vowel(chars[chars.len() - 3]) {
            count += 1;
        }

        count.max(1) as usize
    }

    /// Whether a word counts as complex (three or more syllables)
    pub fn is_complex(&self, word: &str) -> bool {
        self.count(word) >= 3
    }

    /// Fast whole-text proxy: the number of vowel runs across all letters.
    /// Always at least 1.
    pub fn count_text(&self, text: &str) -> usize {
        let letters: Vec<char> = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        vowel_runs(&letters).max(1)
    }
}

impl Default for SyllableEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn vowel_runs(chars: &[char]) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for &c in chars {
        if is_vowel(c) {
            if !in_run {
                runs += 1;
            }
            in_run = true;
        } else {
            in_run = false;
        }
    }
    runs
}
