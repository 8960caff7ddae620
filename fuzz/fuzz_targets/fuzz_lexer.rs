#![no_main]

use lazyparse::{Channel, Token};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokenizer = expr_grammar::tokenizer(s);
        if let Ok(tokens) = tokenizer.read_tokens() {
            let eof = tokens.last().map(|token| (token.is_eof(), token.channel()));
            assert_eq!(eof, Some((true, Channel::HIDDEN)));

            for token in tokens {
                let span = token.span();
                assert!(span.start <= span.end && span.end <= s.len());
            }
        }
    }
});
