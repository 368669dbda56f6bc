//! Damerau-Levenshtein edit distance, optimal string alignment variant (OSA).
//!
//! Like Levenshtein but counts an adjacent transposition as a single edit:
//! "bank" vs "bnak" is distance 1, not 2. Each substring may only be edited
//! once, which is what distinguishes OSA from unrestricted Damerau-Levenshtein
//! ("CA" to "ABC" is 3 under OSA, 2 unrestricted).
//!
//! The implementation works on code points, so it is agnostic to the alphabet:
//! ASCII, accented Latin and Han characters all cost the same.

use std::cmp::min;
use std::mem;

use smallvec::{SmallVec, smallvec};

const VEC_SIZE: usize = 16;
pub(crate) type FastVec<T> = SmallVec<[T; VEC_SIZE]>;

/// Returns the OSA edit distance between `a` and `b`, or `-1` if the distance
/// exceeds `max_distance`.
///
/// Pass `usize::MAX` for an uncapped distance.
pub fn damerau_levenshtein_osa(a: &str, b: &str, max_distance: usize) -> i64 {
    let a_chars: FastVec<char> = a.chars().collect();
    let b_chars: FastVec<char> = b.chars().collect();
    let distance = osa_distance(&a_chars, &b_chars);

    if distance <= max_distance {
        distance as i64
    } else {
        -1
    }
}

/// OSA distance after stripping the common prefix and suffix of the two
/// strings. The optimal alignment always passes through matched borders
/// unchanged, so the residue distance equals the full distance.
pub fn osa_distance_stripped(a: &str, b: &str) -> usize {
    let a_chars: FastVec<char> = a.chars().collect();
    let b_chars: FastVec<char> = b.chars().collect();

    let mut start = 0;
    while start < a_chars.len() && start < b_chars.len() && a_chars[start] == b_chars[start] {
        start += 1;
    }
    let mut end = 0;
    while end < a_chars.len() - start
        && end < b_chars.len() - start
        && a_chars[a_chars.len() - end - 1] == b_chars[b_chars.len() - end - 1]
    {
        end += 1;
    }

    osa_distance(
        &a_chars[start..a_chars.len() - end],
        &b_chars[start..b_chars.len() - end],
    )
}

// Rolling three-row dynamic program. prev_two is needed for the transposition
// case, which reaches back two rows and two columns.
fn osa_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let b_len = b.len();
    let mut prev_two: FastVec<usize> = (0..b_len + 1).collect();
    let mut prev: FastVec<usize> = (0..b_len + 1).collect();
    let mut curr: FastVec<usize> = smallvec![0; b_len + 1];

    for (i, &a_char) in a.iter().enumerate() {
        curr[0] = i + 1;

        for (j, &b_char) in b.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = min(curr[j] + 1, min(prev[j + 1] + 1, prev[j] + cost));

            if i > 0 && j > 0 && a_char != b_char && a_char == b[j - 1] && b_char == a[i - 1] {
                curr[j + 1] = min(curr[j + 1], prev_two[j - 1] + 1);
            }
        }

        mem::swap(&mut prev_two, &mut prev);
        mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}
