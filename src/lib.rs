/*!

Compound-aware spelling correction based on the Symmetric Delete algorithm.

Candidate generation only ever deletes characters: every dictionary term is
expanded into its 1..k-character deletes at indexing time, and a lookup
intersects the deletes of the input with that index. Transposes, replaces and
inserts of the input term become deletes of the dictionary term, which keeps
candidate retrieval sublinear and language independent.

On top of the single-term lookup sits a compound corrector that walks a
multi-word input left to right and, per token, weighs three hypotheses:
keep the corrected token, merge it with the previous token (a stray space
split one word in two), or split it in two (a missing space fused two words).

#### Single word correction

```no_run
use symdel::SymSpell;

let mut speller = SymSpell::new();
speller.load_dictionary("data/frequency_dictionary_en.txt", 0, 1, "en").unwrap();

let suggestions = speller.lookup("whereis", "en", 2).unwrap();
println!("{suggestions:?}");
```

#### Compound correction of multi-word input

```no_run
use symdel::SymSpell;

let mut speller = SymSpell::new();
speller.load_dictionary("data/frequency_dictionary_en.txt", 0, 1, "en").unwrap();

let corrected = speller.lookup_compound("whereis th elove", "en", 2).unwrap();
println!("{} ({} edits)", corrected[0].term, corrected[0].distance);
```

*/

mod dictionary;
mod distance;
mod error;
mod lookup;
mod tokenizer;

pub use dictionary::{Config, SymSpell, TermId};
pub use distance::damerau_levenshtein_osa;
pub use error::{Result, SymdelError};
pub use lookup::{Suggestion, Verbosity};
pub use tokenizer::parse_words;
