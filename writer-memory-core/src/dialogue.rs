//! Dialogue-consistency lint: an approximate stylistic check, not a
//! semantic judge. False positives and negatives are expected.
//!
//! Speech-level detection sits behind the [`SpeechClassifier`] trait so
//! a stronger language-specific analyzer can replace the fixed-pattern
//! default without touching the surrounding CRUD contract.

use regex::Regex;

use crate::model::{Character, SpeechLevel};

/// Buckets a line of dialogue into a speech register.
pub trait SpeechClassifier {
    /// Classify one line. `Mixed` means no single register dominates.
    fn classify(&self, line: &str) -> SpeechLevel;
}

/// Default classifier: three fixed families of Korean sentence-ending
/// patterns, majority bucket across the line's sentences.
#[derive(Debug)]
pub struct PatternClassifier {
    formal: Regex,
    informal: Regex,
    casual: Regex,
}

impl PatternClassifier {
    /// Build the fixed pattern families.
    ///
    /// # Panics
    ///
    /// Never in practice; the patterns are fixed literals.
    #[must_use]
    pub fn new() -> Self {
        // Families are tested formal, then informal, then casual, and the
        // first match claims the sentence. Ordering keeps them disjoint:
        // formal endings also terminate in 다, polite endings in 요.
        Self {
            formal: Regex::new(r"(습니다|습니까|십니다|십니까|십시오|니다)$").expect("formal pattern"),
            informal: Regex::new(r"(요|죠)$").expect("informal pattern"),
            casual: Regex::new(r"(어|아|야|지|다|니|냐|래|자|걸|군|네|데|와|해|돼)$")
                .expect("casual pattern"),
        }
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechClassifier for PatternClassifier {
    fn classify(&self, line: &str) -> SpeechLevel {
        let (mut formal, mut informal, mut casual) = (0_usize, 0_usize, 0_usize);
        for sentence in line.split(['.', '!', '?', '…', '\n']) {
            let sentence = sentence
                .trim()
                .trim_end_matches(['"', '\u{201d}', '\u{2019}', '\'', ')']);
            if sentence.is_empty() {
                continue;
            }
            if self.formal.is_match(sentence) {
                formal += 1;
            } else if self.informal.is_match(sentence) {
                informal += 1;
            } else if self.casual.is_match(sentence) {
                casual += 1;
            }
        }

        let top = formal.max(informal).max(casual);
        if top == 0 {
            return SpeechLevel::Mixed;
        }
        let mut winner = SpeechLevel::Mixed;
        let mut winners = 0;
        for (count, level) in [
            (formal, SpeechLevel::Formal),
            (informal, SpeechLevel::Informal),
            (casual, SpeechLevel::Casual),
        ] {
            if count == top {
                winners += 1;
                winner = level;
            }
        }
        if winners > 1 { SpeechLevel::Mixed } else { winner }
    }
}

/// Result of one named check.
#[derive(Debug, Clone)]
pub struct DialogueCheck {
    /// Which check ran: "tone", "speech-level" or "keywords".
    pub name: &'static str,
    /// Whether the line passed it.
    pub passed: bool,
    /// Short human-readable finding.
    pub note: String,
}

/// Aggregate status of a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStatus {
    /// All checks passed.
    Pass,
    /// Exactly one check failed.
    Warn,
    /// Two or three checks failed.
    Fail,
}

/// Full report for one line of dialogue.
#[derive(Debug, Clone)]
pub struct DialogueReport {
    /// Detected speech level of the line.
    pub detected: SpeechLevel,
    /// Per-check outcomes, in fixed order.
    pub checks: Vec<DialogueCheck>,
    /// Aggregate status.
    pub status: DialogueStatus,
}

/// Tone-description markers indicating a restrained register; such
/// characters should not stack exclamation marks.
const RESTRAINED_MARKERS: &[&str] = &[
    "차분", "담백", "절제", "무뚝뚝", "건조", "조용", "calm", "plain", "restrained", "reserved",
    "quiet",
];

/// Run the three checks for `line` against `character`'s stored profile.
///
/// Stateless: nothing is recorded on the character. Status is PASS with
/// zero failed checks, WARN with exactly one, FAIL otherwise.
#[must_use]
pub fn check(
    character: &Character,
    line: &str,
    classifier: &impl SpeechClassifier,
) -> DialogueReport {
    let mut checks = Vec::with_capacity(3);

    // 1. Tone: restrained characters keep exclamations to at most one.
    let restrained = RESTRAINED_MARKERS
        .iter()
        .any(|marker| character.tone.contains(marker));
    let exclamations = line.chars().filter(|&c| c == '!').count();
    let tone_ok = !(restrained && exclamations > 1);
    checks.push(DialogueCheck {
        name: "tone",
        passed: tone_ok,
        note: if tone_ok {
            "tone consistent".to_string()
        } else {
            format!("{exclamations} exclamation marks clash with a restrained tone")
        },
    });

    // 2. Speech level: a mixed detection always passes, and a character
    // declared mixed accepts any register.
    let detected = classifier.classify(line);
    let level_ok = detected == SpeechLevel::Mixed
        || character.speech_level == SpeechLevel::Mixed
        || detected == character.speech_level;
    checks.push(DialogueCheck {
        name: "speech-level",
        passed: level_ok,
        note: format!("declared {}, detected {detected}", character.speech_level),
    });

    // 3. Keywords: vacuous pass when none are declared.
    let keyword_ok = character.keywords.is_empty()
        || character
            .keywords
            .iter()
            .any(|keyword| line.contains(keyword.as_str()));
    checks.push(DialogueCheck {
        name: "keywords",
        passed: keyword_ok,
        note: if character.keywords.is_empty() {
            "no keywords declared".to_string()
        } else if keyword_ok {
            "keyword present".to_string()
        } else {
            "none of the declared keywords appear".to_string()
        },
    });

    let failed = checks.iter().filter(|c| !c.passed).count();
    let status = match failed {
        0 => DialogueStatus::Pass,
        1 => DialogueStatus::Warn,
        _ => DialogueStatus::Fail,
    };
    DialogueReport {
        detected,
        checks,
        status,
    }
}
