// src/generate/extract.rs
// =============================================================================
// Pulls the generated program out of a model reply.
//
// Models usually wrap the code in a ```python fenced block surrounded by
// prose. We parse the reply as Markdown with pulldown-cmark and take the
// text of the first fenced block tagged `python`. If there is none, the
// reply is assumed to be bare code and returned as-is.
// =============================================================================

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

pub fn extract_code(reply: &str) -> String {
    let mut in_python_block = false;
    let mut code = String::new();

    for event in Parser::new(reply) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                // The info string may carry more than the language ("python title=app.py")
                let language = info.split_whitespace().next().unwrap_or_default();
                in_python_block = language == "python";
            }
            Event::Text(text) if in_python_block => code.push_str(&text),
            Event::End(Tag::CodeBlock(_)) if in_python_block => {
                // Drop the newline that precedes the closing fence
                let trimmed = code.strip_suffix('\n').unwrap_or(&code).to_string();
                return trimmed;
            }
            _ => {}
        }
    }

    reply.to_string()
}
