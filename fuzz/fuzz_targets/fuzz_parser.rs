#![no_main]

use lazyparse::{Parser, PredictionMode, TokenizerState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let tokenizer = expr_grammar::tokenizer(s);
        match tokenizer.read_ast() {
            Ok(program) => {
                assert_eq!(tokenizer.state(), TokenizerState::Parsed);
                let again = tokenizer.read_ast().ok();
                assert!(again.is_some_and(|p| std::rc::Rc::ptr_eq(&p, &program)));
                let _ = program.to_string();
            }
            Err(_) => {
                if let Some(parser) = tokenizer.parser() {
                    assert_eq!(parser.prediction_mode(), PredictionMode::Ll);
                }
            }
        }
    }
});
