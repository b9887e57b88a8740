#![no_main]

use libfuzzer_sys::fuzz_target;
use lemmacov::corpus::Tokenizer;
use lemmacov::lexicon::{grouped_from_str, ranked_from_str};
use lemmacov::questions::QuestionDocument;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Looking for panics, not errors
        if let (Ok(plain), Ok(compound)) = (Tokenizer::plain(), Tokenizer::compound()) {
            let _ = plain.tokenize(input);
            let _ = compound.tokenize(input);
        }
        let _ = QuestionDocument::from_str(input);
        let _ = ranked_from_str(input);
        let _ = grouped_from_str(input);
    }
});
