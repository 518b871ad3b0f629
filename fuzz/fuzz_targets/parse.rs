#![no_main]

use libfuzzer_sys::fuzz_target;
use quill::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Lexing is total; blames are the only failure channel.
        let out = lexer::lex(s);
        // Parsing must never panic either, however broken the stream.
        let _ = parser::parse(&out.tokens);
    }
});
