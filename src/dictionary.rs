//! Symmetric-delete dictionary index.
//!
//! Every vocabulary term is expanded into the set of strings reachable by
//! deleting 1..max_edit_distance characters, and each delete is indexed back
//! to the term ids it was derived from. Candidate retrieval at lookup time
//! then intersects the deletes of the input with this index instead of
//! enumerating transposes + replaces + inserts, which keeps the work bounded
//! and language independent.

use std::collections::hash_map::Entry as MapEntry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};

use crate::error::Result;
use crate::lookup::Verbosity;
use crate::tokenizer::{keep_corpus_token, parse_words};

/// Dense handle for a vocabulary term; indexes into the wordlist arena.
pub type TermId = u32;

/// Counts and suggestion payload of an index key that carries more than a
/// single delete pointer.
#[derive(Debug, Clone)]
pub(crate) struct SuggestionRecord {
    /// Observed frequency of the key itself; 0 when the key exists only as a
    /// delete of other terms.
    pub(crate) count: i64,
    /// Insertion-ordered ids of the terms whose delete closure contains this
    /// key.
    pub(crate) suggestions: Vec<TermId>,
}

/// One index entry per (language, key) pair.
///
/// Most deletes point back to exactly one term; storing that common case as a
/// bare id keeps the index compact. The entry is promoted to `Multi` the
/// moment a second piece of information has to attach to the same key.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Single(TermId),
    Multi(SuggestionRecord),
}

/// Tuning knobs for index construction and lookup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ceiling on delete-generation depth during indexing and on accepted
    /// suggestion distance during lookup.
    pub max_edit_distance: i64,
    /// How many suggestions a lookup returns; see [`Verbosity`].
    pub verbosity: Verbosity,
    /// Route multi-word queries through the compound corrector.
    pub compound_check: bool,
    /// Minimum observed count before a term is indexed and given deletes.
    pub count_threshold: i64,
    /// A term whose count exceeds this floor passes the lookup noise filter
    /// regardless of its length.
    pub noise_count_floor: i64,
    /// A term longer than this passes the lookup noise filter regardless of
    /// its count.
    pub noise_len_floor: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            verbosity: Verbosity::Top,
            compound_check: true,
            count_threshold: 1,
            noise_count_floor: 100,
            noise_len_floor: 2,
        }
    }
}

/// Compound-aware spell checker over a symmetric-delete index.
///
/// The index is populated through [`SymSpell::load_dictionary`] /
/// [`SymSpell::create_dictionary`] and is read-only during query processing;
/// queries never mutate shared state.
pub struct SymSpell {
    pub(crate) config: Config,
    /// (language + key) -> entry; holds both terms and their deletes.
    pub(crate) dictionary: AHashMap<String, Entry>,
    /// Append-only arena of interned term strings, indexed by `TermId`.
    pub(crate) wordlist: Vec<Box<str>>,
    /// Bigram frequencies. Populated by [`SymSpell::load_bigram_dictionary`],
    /// not yet consulted by any ranking path.
    pub(crate) bigrams: AHashMap<Box<str>, i64>,
    /// Length in code points of the longest key ever inserted.
    pub(crate) max_length: i64,
}

impl SymSpell {
    /// Creates a spell checker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a spell checker with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            dictionary: AHashMap::new(),
            wordlist: Vec::new(),
            bigrams: AHashMap::new(),
            max_length: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of distinct vocabulary terms.
    pub fn word_count(&self) -> usize {
        self.wordlist.len()
    }

    /// Number of index keys, terms and deletes combined.
    pub fn entry_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Length in code points of the longest indexed key.
    pub fn max_length(&self) -> i64 {
        self.max_length
    }

    /// Number of loaded bigram entries.
    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    /// Build the index from a free-text corpus file, one more observation per
    /// token occurrence. Single-character tokens other than "a" and "i" are
    /// dropped. A missing file is reported and leaves the index unchanged.
    pub fn create_dictionary(&mut self, corpus: impl AsRef<Path>, language: &str) -> Result<bool> {
        let path = corpus.as_ref();
        if !path.exists() {
            log::error!("corpus file not found: {}", path.display());
            return Ok(false);
        }

        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            for token in parse_words(&line) {
                if keep_corpus_token(&token) {
                    self.create_dictionary_entry(&token, language, 0);
                }
            }
        }
        Ok(true)
    }

    /// Load word/frequency pairs from a dictionary file, one record per line,
    /// fields separated by any run of whitespace. `term_index` and
    /// `count_index` are 0-based column positions. A missing file is reported
    /// and leaves the index unchanged.
    pub fn load_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
        language: &str,
    ) -> Result<bool> {
        let path = corpus.as_ref();
        if !path.exists() {
            log::error!("dictionary file not found: {}", path.display());
            return Ok(false);
        }

        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            self.load_dictionary_line(&line, term_index, count_index, language);
        }
        Ok(true)
    }

    /// Load a single word/frequency record. Lines with fewer than two fields
    /// or an unparseable count are skipped. Returns whether the line was
    /// consumed.
    pub fn load_dictionary_line(
        &mut self,
        line: &str,
        term_index: usize,
        count_index: usize,
        language: &str,
    ) -> bool {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return false;
        }
        let (Some(term), Some(count_field)) = (fields.get(term_index), fields.get(count_index))
        else {
            return false;
        };
        let Ok(count) = count_field.parse::<i64>() else {
            return false;
        };

        self.create_dictionary_entry(term, language, count);
        true
    }

    /// Load bigram/frequency pairs: two term columns starting at `term_index`,
    /// count at `count_index`. The bigram table is a hook for future ranking;
    /// nothing consults it yet.
    pub fn load_bigram_dictionary(
        &mut self,
        corpus: impl AsRef<Path>,
        term_index: usize,
        count_index: usize,
    ) -> Result<bool> {
        let path = corpus.as_ref();
        if !path.exists() {
            log::error!("bigram dictionary file not found: {}", path.display());
            return Ok(false);
        }

        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                continue;
            }
            let (Some(first), Some(second), Some(count_field)) = (
                fields.get(term_index),
                fields.get(term_index + 1),
                fields.get(count_index),
            ) else {
                continue;
            };
            let Ok(count) = count_field.parse::<i64>() else {
                continue;
            };
            self.bigrams
                .insert(format!("{first} {second}").into_boxed_str(), count);
        }
        Ok(true)
    }

    /// Create or update the entry for `key`, adding `count` observations
    /// (`count == 0` means one more occurrence). When the accumulated count
    /// first reaches the configured threshold, the key becomes a vocabulary
    /// term: it is assigned a dense id, interned in the wordlist, and a delete
    /// pointer is installed for every string in its delete closure.
    ///
    /// Returns whether the key was minted as a new term.
    pub fn create_dictionary_entry(&mut self, key: &str, language: &str, count: i64) -> bool {
        let increment = if count > 0 { count } else { 1 };
        let map_key = dict_key(language, key);

        let previous_count;
        let new_count;
        match self.dictionary.entry(map_key.clone()) {
            MapEntry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                match entry {
                    Entry::Single(existing) => {
                        // delete existed before the word itself was observed
                        let existing = *existing;
                        previous_count = 0;
                        new_count = increment;
                        *entry = Entry::Multi(SuggestionRecord {
                            count: new_count,
                            suggestions: vec![existing],
                        });
                    }
                    Entry::Multi(record) => {
                        previous_count = record.count;
                        record.count = record.count.saturating_add(increment);
                        new_count = record.count;
                    }
                }
            }
            MapEntry::Vacant(slot) => {
                previous_count = 0;
                new_count = increment;
                slot.insert(Entry::Multi(SuggestionRecord {
                    count: new_count,
                    suggestions: Vec::new(),
                }));
                let key_len = char_len(key) as i64;
                if key_len > self.max_length {
                    self.max_length = key_len;
                }
            }
        }

        // The id is minted exactly once, on the crossing from below to at or
        // above the threshold; repeated observations only accumulate counts.
        if previous_count >= self.config.count_threshold
            || new_count < self.config.count_threshold
        {
            return false;
        }

        let term_id = self.wordlist.len() as TermId;
        self.wordlist.push(key.into());

        let mut deletes = AHashSet::new();
        self.edits(key, 0, &mut deletes);

        for delete in deletes {
            let delete_key = dict_key(language, &delete);
            match self.dictionary.entry(delete_key) {
                MapEntry::Vacant(slot) => {
                    slot.insert(Entry::Single(term_id));
                }
                MapEntry::Occupied(mut slot) => {
                    let entry = slot.get_mut();
                    match entry {
                        Entry::Single(existing) => {
                            let existing = *existing;
                            if existing != term_id {
                                let mut record = SuggestionRecord {
                                    count: 0,
                                    suggestions: vec![existing],
                                };
                                add_lowest_distance(
                                    &mut record,
                                    &self.wordlist,
                                    self.config.verbosity,
                                    key,
                                    term_id,
                                    &delete,
                                );
                                *entry = Entry::Multi(record);
                            }
                        }
                        Entry::Multi(record) => {
                            if !record.suggestions.contains(&term_id) {
                                add_lowest_distance(
                                    record,
                                    &self.wordlist,
                                    self.config.verbosity,
                                    key,
                                    term_id,
                                    &delete,
                                );
                            }
                        }
                    }
                }
            }
        }

        true
    }

    /// Accumulates into `deletes` every string reachable from `word` by
    /// deleting 1..max_edit_distance characters. Deletes are only generated
    /// from strings of at least two characters, so the empty string never
    /// enters the index.
    pub(crate) fn edits(&self, word: &str, edit_distance: i64, deletes: &mut AHashSet<String>) {
        let edit_distance = edit_distance + 1;
        let word_len = char_len(word);

        if word_len > 1 {
            for i in 0..word_len {
                let delete = remove_char(word, i);
                if deletes.insert(delete.clone()) && edit_distance < self.config.max_edit_distance {
                    self.edits(&delete, edit_distance, deletes);
                }
            }
        }
    }

    pub(crate) fn entry(&self, language: &str, key: &str) -> Option<&Entry> {
        self.dictionary.get(&dict_key(language, key))
    }
}

impl Default for SymSpell {
    fn default() -> Self {
        Self::new()
    }
}

// Best-only policy for delete-derived suggestion lists. The surplus length
// |suggestion| - |delete| is a conservative proxy for the edit distance
// between the original term and the delete: a smaller surplus clears the
// list, a larger one is ignored, ties append. Verbosity::All keeps everything.
fn add_lowest_distance(
    record: &mut SuggestionRecord,
    wordlist: &[Box<str>],
    verbosity: Verbosity,
    suggestion: &str,
    term_id: TermId,
    delete: &str,
) {
    if verbosity == Verbosity::All {
        record.suggestions.push(term_id);
        return;
    }

    let Some(&first) = record.suggestions.first() else {
        record.suggestions.push(term_id);
        return;
    };

    let delete_len = char_len(delete);
    let current_surplus = char_len(&wordlist[first as usize]) - delete_len;
    let new_surplus = char_len(suggestion) - delete_len;

    if new_surplus < current_surplus {
        record.suggestions.clear();
    }
    if new_surplus <= current_surplus {
        record.suggestions.push(term_id);
    }
}

fn dict_key(language: &str, key: &str) -> String {
    let mut map_key = String::with_capacity(language.len() + key.len());
    map_key.push_str(language);
    map_key.push_str(key);
    map_key
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub(crate) fn remove_char(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, ch)| ch)
        .collect()
}

pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end - start).collect()
}
