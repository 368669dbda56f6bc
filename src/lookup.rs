// Symmetric Delete spelling correction: only deletes are required, no
// transposes + replaces + inserts. Transposes + replaces + inserts of the
// input term are transformed into deletes of the dictionary term.
//
// Derived from SymSpell by Wolf Garbe, https://github.com/wolfgarbe/symspell
// MIT License, https://opensource.org/licenses/MIT

//! Single-term lookup and compound-aware correction of multi-word input.

use std::cmp::Ordering;

use ahash::AHashSet;

use crate::dictionary::{char_len, char_slice, remove_char, Entry, SymSpell, TermId};
use crate::distance::{damerau_levenshtein_osa, osa_distance_stripped};
use crate::error::{Result, SymdelError};
use crate::tokenizer::parse_words;

/// Controls the closeness/quantity of returned spelling suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Top suggestion with the highest term frequency of the suggestions of
    /// smallest edit distance found.
    Top,
    /// All suggestions of smallest edit distance found, ordered by term
    /// frequency.
    Closest,
    /// All suggestions within max_edit_distance, ordered by edit distance,
    /// then by term frequency (slower, no early termination).
    All,
}

/// A spelling suggestion.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suggestion {
    /// The suggested correctly spelled word.
    pub term: String,
    /// Edit distance between the searched-for word and the suggestion.
    pub distance: i64,
    /// Frequency of the suggestion in the dictionary.
    pub count: i64,
}

impl Suggestion {
    pub fn empty() -> Suggestion {
        Suggestion {
            term: String::new(),
            distance: 0,
            count: 0,
        }
    }

    pub fn new(term: impl Into<String>, distance: i64, count: i64) -> Suggestion {
        Suggestion {
            term: term.into(),
            distance,
            count,
        }
    }
}

// Order by distance ascending, then by frequency count descending.
impl Ord for Suggestion {
    fn cmp(&self, other: &Suggestion) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Suggestion) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Suggestion) -> bool {
        self.distance == other.distance && self.count == other.count
    }
}

impl Eq for Suggestion {}

impl SymSpell {
    /// Find suggested spellings for a single input word within
    /// `max_edit_distance`, which must not exceed the distance the index was
    /// built for. Returns suggestions ranked by ascending edit distance, then
    /// descending frequency; with [`Verbosity::Top`] at most one.
    pub fn lookup(
        &self,
        input: &str,
        language: &str,
        max_edit_distance: i64,
    ) -> Result<Vec<Suggestion>> {
        self.check_distance(max_edit_distance)?;
        Ok(self.lookup_with(input, language, max_edit_distance, self.config.verbosity))
    }

    /// Find a correction for a multi-word input string. Beyond per-token
    /// correction this handles the two compound cases: a mistakenly inserted
    /// space that split one correct word in two, and a mistakenly omitted
    /// space that fused two correct words into one.
    ///
    /// Returns exactly one suggestion; its distance is measured against the
    /// raw input, so stray spaces and case differences are charged too.
    pub fn lookup_compound(
        &self,
        input: &str,
        language: &str,
        max_edit_distance: i64,
    ) -> Result<Vec<Suggestion>> {
        self.check_distance(max_edit_distance)?;

        let terms = parse_words(input);
        let mut parts: Vec<Suggestion> = Vec::new();
        let mut last_combi = false;

        for (i, term) in terms.iter().enumerate() {
            let suggestions = self.lookup_with(term, language, max_edit_distance, Verbosity::Top);

            // combi check, always before split: the previous and current
            // token may be one word broken by a stray space
            if i > 0 && !last_combi {
                if let Some(merged) =
                    self.try_combine(&terms, i, &suggestions, &parts, language, max_edit_distance)
                {
                    let last = parts.len() - 1;
                    parts[last] = merged;
                    last_combi = true;
                    continue;
                }
            }
            last_combi = false;

            // never split terms with a perfect suggestion or single-char terms
            match suggestions.first() {
                Some(top) if top.distance == 0 || char_len(term) == 1 => {
                    parts.push(top.clone());
                }
                _ => {
                    parts.push(self.split_token(term, &suggestions, language, max_edit_distance));
                }
            }
        }

        if parts.is_empty() {
            return Ok(vec![Suggestion::empty()]);
        }

        let mut joined = String::new();
        let mut count = i64::MAX;
        for part in &parts {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&part.term);
            count = count.min(part.count);
        }
        let distance = damerau_levenshtein_osa(input, &joined, usize::MAX);

        Ok(vec![Suggestion {
            term: joined,
            distance,
            count,
        }])
    }

    // Evaluate the merge hypothesis for tokens i-1 and i. Returns the merged
    // part, with one extra edit charged for the removed space, when it beats
    // correcting the two tokens separately.
    fn try_combine(
        &self,
        terms: &[String],
        i: usize,
        suggestions: &[Suggestion],
        parts: &[Suggestion],
        language: &str,
        max_edit_distance: i64,
    ) -> Option<Suggestion> {
        let combined = format!("{}{}", terms[i - 1], terms[i]);
        let combi_suggestions =
            self.lookup_with(&combined, language, max_edit_distance, Verbosity::Top);
        let combi_best = combi_suggestions.first()?;
        let previous = parts.last()?;

        let best2 = suggestions.first().cloned().unwrap_or_else(|| {
            // unknown word, estimated distance just above the ceiling
            Suggestion::new(terms[i].clone(), max_edit_distance + 1, 0)
        });

        let separate = format!("{} {}", previous.term, best2.term);
        let raw_pair = format!("{} {}", terms[i - 1], terms[i]);
        let separate_distance = damerau_levenshtein_osa(&raw_pair, &separate, usize::MAX);

        if combi_best.distance + 1 < separate_distance {
            let mut merged = combi_best.clone();
            merged.distance += 1;
            Some(merged)
        } else {
            None
        }
    }

    // Try every split position of an uncorrectable token. The whole-token
    // suggestion, when present, seeds the ranking; proposals are ranked by
    // (distance, -count) with the count of a split being the weaker of its
    // two halves.
    fn split_token(
        &self,
        term: &str,
        whole: &[Suggestion],
        language: &str,
        max_edit_distance: i64,
    ) -> Suggestion {
        let term_len = char_len(term);
        let mut best_split: Option<Suggestion> = whole.first().cloned();

        if term_len > 1 {
            for j in 1..term_len {
                let head = char_slice(term, 0, j);
                let tail = char_slice(term, j, term_len);

                let head_suggestions =
                    self.lookup_with(&head, language, max_edit_distance, Verbosity::Top);
                let Some(head_best) = head_suggestions.first() else {
                    continue;
                };
                let tail_suggestions =
                    self.lookup_with(&tail, language, max_edit_distance, Verbosity::Top);

                // the whole-token suggestion already captures this correction
                if let Some(whole_best) = whole.first() {
                    let tail_echo = tail_suggestions
                        .first()
                        .is_some_and(|t| t.term == whole_best.term);
                    if head_best.term == whole_best.term || tail_echo {
                        break;
                    }
                }

                let Some(tail_best) = tail_suggestions.first() else {
                    continue;
                };

                let split_term = format!("{} {}", head_best.term, tail_best.term);
                let distance = damerau_levenshtein_osa(term, &split_term, usize::MAX);
                let count = head_best.count.min(tail_best.count);

                let replace = match &best_split {
                    None => true,
                    Some(current) => {
                        distance < current.distance
                            || (distance == current.distance && count > current.count)
                    }
                };
                if replace {
                    best_split = Some(Suggestion::new(split_term, distance, count));
                }
                // a split one edit away cannot be beaten
                if distance == 1 {
                    break;
                }
            }
        }

        best_split.unwrap_or_else(|| Suggestion::new(term, max_edit_distance + 1, 0))
    }

    pub(crate) fn lookup_with(
        &self,
        input: &str,
        language: &str,
        max_edit_distance: i64,
        verbosity: Verbosity,
    ) -> Vec<Suggestion> {
        let input_len = char_len(input) as i64;
        let mut best: Vec<Suggestion> = Vec::new();

        // early termination, input too long to match anything indexed
        if input_len - max_edit_distance > self.max_length {
            return best;
        }

        let mut candidates: Vec<String> = vec![input.to_string()];
        let mut candidate_seen: AHashSet<String> = AHashSet::new();
        candidate_seen.insert(input.to_string());
        let mut suggestions_seen: AHashSet<String> = AHashSet::new();

        let mut pointer = 0;
        'bfs: while pointer < candidates.len() {
            let candidate = candidates[pointer].clone();
            pointer += 1;
            let candidate_len = char_len(&candidate) as i64;
            let length_diff = input_len - candidate_len;

            // candidates are dequeued in ascending delete distance, so once
            // the pure-delete distance exceeds the best found distance no
            // later candidate can improve on it
            if verbosity != Verbosity::All && !best.is_empty() && length_diff > best[0].distance {
                break;
            }

            if let Some(entry) = self.entry(language, &candidate) {
                let (own_count, suggestion_ids) = resolve(entry);

                // candidate is itself a vocabulary term
                if own_count > 0
                    && self.passes_noise_filter(own_count, candidate_len)
                    && !suggestions_seen.contains(candidate.as_str())
                {
                    suggestions_seen.insert(candidate.clone());
                    let distance = length_diff;
                    if verbosity != Verbosity::All && !best.is_empty() && best[0].distance > distance
                    {
                        best.clear();
                    }
                    best.push(Suggestion::new(candidate.as_str(), distance, own_count));
                    if verbosity != Verbosity::All && distance == 0 {
                        break 'bfs;
                    }
                }

                // terms whose delete closure contains this candidate
                for &id in suggestion_ids {
                    let word: &str = &self.wordlist[id as usize];
                    if suggestions_seen.contains(word) {
                        continue;
                    }
                    suggestions_seen.insert(word.to_string());

                    let word_len = char_len(word) as i64;
                    // only one side was edited when either string still equals
                    // the candidate in length; otherwise both sides carry
                    // edits and the residues need the full distance
                    let distance = if word_len == candidate_len {
                        input_len - candidate_len
                    } else if input_len == candidate_len {
                        word_len - candidate_len
                    } else {
                        osa_distance_stripped(word, input) as i64
                    };

                    if verbosity != Verbosity::All && !best.is_empty() {
                        if best[0].distance > distance {
                            best.clear();
                        } else if distance > best[0].distance {
                            continue;
                        }
                    }

                    if distance <= max_edit_distance {
                        if let Some(word_entry) = self.entry(language, word) {
                            let (word_count, _) = resolve(word_entry);
                            if self.passes_noise_filter(word_count, word_len) {
                                best.push(Suggestion::new(word, distance, word_count));
                            }
                        }
                    }
                }
            }

            // grow the frontier with the candidate's single-character deletes
            if length_diff < max_edit_distance {
                if verbosity != Verbosity::All && !best.is_empty() && length_diff >= best[0].distance
                {
                    continue;
                }
                for i in 0..candidate_len as usize {
                    let delete = remove_char(&candidate, i);
                    if candidate_seen.insert(delete.clone()) {
                        candidates.push(delete);
                    }
                }
            }
        }

        // ascending edit distance, then descending frequency; stable for ties
        best.sort_by(|x, y| x.distance.cmp(&y.distance).then(y.count.cmp(&x.count)));
        if verbosity == Verbosity::Top && best.len() > 1 {
            best.truncate(1);
        }
        best
    }

    // Very short, rarely observed keys are usually fragments rather than
    // words; keep them out of the suggestion stream.
    fn passes_noise_filter(&self, count: i64, len: i64) -> bool {
        count > self.config.noise_count_floor || len > self.config.noise_len_floor
    }

    fn check_distance(&self, max_edit_distance: i64) -> Result<()> {
        if max_edit_distance > self.config.max_edit_distance {
            return Err(SymdelError::InvalidParameter(format!(
                "lookup edit distance {} exceeds the index ceiling {}",
                max_edit_distance, self.config.max_edit_distance
            )));
        }
        Ok(())
    }
}

fn resolve(entry: &Entry) -> (i64, &[TermId]) {
    match entry {
        Entry::Single(id) => (0, std::slice::from_ref(id)),
        Entry::Multi(record) => (record.count, record.suggestions.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Config;

    fn speller_with(entries: &[(&str, i64)]) -> SymSpell {
        let mut speller = SymSpell::new();
        for (term, count) in entries {
            speller.create_dictionary_entry(term, "en", *count);
        }
        speller
    }

    fn speller_with_config(config: Config, entries: &[(&str, i64)]) -> SymSpell {
        let mut speller = SymSpell::with_config(config);
        for (term, count) in entries {
            speller.create_dictionary_entry(term, "en", *count);
        }
        speller
    }

    const SMALL_DICT: &[(&str, i64)] = &[
        ("steam", 500),
        ("steams", 200),
        ("team", 800),
        ("meats", 300),
    ];

    #[test]
    fn exact_match_wins() {
        let speller = speller_with(SMALL_DICT);
        let results = speller.lookup("steam", "en", 2).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("steam", results[0].term);
        assert_eq!(0, results[0].distance);
        assert_eq!(500, results[0].count);
    }

    #[test]
    fn top_returns_closest_then_most_frequent() {
        let speller = speller_with(SMALL_DICT);
        // both "steam" and "steams" are one edit away; frequency decides
        let results = speller.lookup("steama", "en", 2).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("steam", results[0].term);
        assert_eq!(1, results[0].distance);
    }

    #[test]
    fn closest_returns_all_at_minimal_distance() {
        let config = Config {
            verbosity: Verbosity::Closest,
            ..Config::default()
        };
        let speller = speller_with_config(config, SMALL_DICT);
        let results = speller.lookup("steama", "en", 2).unwrap();
        let terms: Vec<&str> = results.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(vec!["steam", "steams"], terms);
        assert!(results.iter().all(|s| s.distance == 1));
    }

    #[test]
    fn all_returns_everything_in_range_distance_first() {
        let config = Config {
            verbosity: Verbosity::All,
            ..Config::default()
        };
        let speller = speller_with_config(config, SMALL_DICT);
        let results = speller.lookup("steam", "en", 2).unwrap();
        let terms: Vec<&str> = results.iter().map(|s| s.term.as_str()).collect();
        // distance dominates: "team" (800) still sorts behind the exact match
        assert_eq!(vec!["steam", "team", "steams"], terms);
        assert_eq!(vec![0, 1, 1], results.iter().map(|s| s.distance).collect::<Vec<_>>());
    }

    #[test]
    fn length_gate_rejects_oversized_input() {
        let speller = speller_with(SMALL_DICT);
        // max indexed length is 6; 9 - 2 > 6
        let results = speller.lookup("abcdefghi", "en", 2).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn unknown_language_finds_nothing() {
        let speller = speller_with(SMALL_DICT);
        assert!(speller.lookup("steam", "de", 2).unwrap().is_empty());
    }

    #[test]
    fn distance_above_ceiling_is_rejected() {
        let speller = speller_with(SMALL_DICT);
        assert!(speller.lookup("steam", "en", 3).is_err());
    }

    #[test]
    fn noise_filter_suppresses_short_rare_terms() {
        let speller = speller_with(&[("ox", 50)]);
        assert!(speller.lookup("ox", "en", 2).unwrap().is_empty());

        let speller = speller_with(&[("ox", 500)]);
        let results = speller.lookup("ox", "en", 2).unwrap();
        assert_eq!("ox", results[0].term);
    }

    #[test]
    fn noise_floors_are_configurable() {
        let config = Config {
            noise_count_floor: 10,
            ..Config::default()
        };
        let speller = speller_with_config(config, &[("ox", 50)]);
        let results = speller.lookup("ox", "en", 2).unwrap();
        assert_eq!("ox", results[0].term);
    }

    #[test]
    fn empty_input_returns_no_suggestions() {
        let speller = speller_with(SMALL_DICT);
        assert!(speller.lookup("", "en", 2).unwrap().is_empty());
    }

    #[test]
    fn suggestions_stay_within_max_distance() {
        let speller = speller_with_config(
            Config {
                verbosity: Verbosity::All,
                ..Config::default()
            },
            SMALL_DICT,
        );
        for input in ["steama", "stema", "tea", "mats", "xyzzy"] {
            for suggestion in speller.lookup(input, "en", 2).unwrap() {
                let true_distance =
                    damerau_levenshtein_osa(input, &suggestion.term, usize::MAX);
                assert_eq!(true_distance, suggestion.distance, "input {input:?}");
                assert!(suggestion.distance <= 2);
            }
        }
    }

    #[test]
    fn compound_accepts_exact_tokens() {
        let speller = speller_with(&[("the", 2000), ("quick", 1000)]);
        let results = speller.lookup_compound("the quick", "en", 2).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("the quick", results[0].term);
        assert_eq!(0, results[0].distance);
        assert_eq!(1000, results[0].count);
    }

    #[test]
    fn compound_lowercases_correct_input() {
        let speller = speller_with(&[("the", 2000), ("quick", 1000)]);
        let results = speller.lookup_compound("The QUICK", "en", 2).unwrap();
        assert_eq!("the quick", results[0].term);
        // distance measured against the raw input charges the case changes
        assert_eq!(6, results[0].distance);
    }

    #[test]
    fn compound_splits_fused_words() {
        let speller = speller_with(&[("read", 1500), ("this", 1200)]);
        let results = speller.lookup_compound("readthis", "en", 2).unwrap();
        assert_eq!("read this", results[0].term);
        assert_eq!(1, results[0].distance);
        assert_eq!(1200, results[0].count);
    }

    #[test]
    fn compound_merges_words_split_by_stray_space() {
        let speller = speller_with(&[
            ("together", 100),
            ("to", 200),
            ("get", 50),
            ("her", 80),
        ]);
        let results = speller.lookup_compound("to gether", "en", 2).unwrap();
        assert_eq!("together", results[0].term);
        assert_eq!(1, results[0].distance);
    }

    #[test]
    fn compound_preserves_unknown_tokens() {
        let speller = speller_with(&[("the", 2000)]);
        let results = speller.lookup_compound("the zxqvw", "en", 2).unwrap();
        assert_eq!("the zxqvw", results[0].term);
        assert_eq!(0, results[0].count);
    }

    #[test]
    fn compound_never_splits_single_char_tokens() {
        let speller = speller_with(&[("q", 500), ("r", 500)]);
        let results = speller.lookup_compound("q r", "en", 2).unwrap();
        assert_eq!("q r", results[0].term);
    }

    #[test]
    fn compound_empty_input_yields_empty_term() {
        let speller = speller_with(SMALL_DICT);
        let results = speller.lookup_compound("", "en", 2).unwrap();
        assert_eq!(1, results.len());
        assert_eq!("", results[0].term);
        assert_eq!(0, results[0].distance);
    }

    #[test]
    fn suggestion_ordering() {
        let mut list = vec![
            Suggestion::new("b", 1, 10),
            Suggestion::new("a", 0, 5),
            Suggestion::new("c", 1, 99),
        ];
        list.sort();
        assert_eq!("a", list[0].term);
        assert_eq!("c", list[1].term);
        assert_eq!("b", list[2].term);
    }
}
