//! Shell-like line tokenization.
//!
//! Whitespace separates tokens; single and double quotes group words;
//! backslash escapes the next character (outside single quotes); `#` outside
//! quotes begins a trailing comment. Tokenization never fails: an
//! unterminated quote takes the rest of the line, because a bad line must
//! degrade to a reportable outcome, not an error the loop has to survive.

/// Split one input line into tokens.
///
/// Returns an empty vector for blank and comment-only lines.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '#' => break,
            '\'' => {
                in_token = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '"' => {
                in_token = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => {
                            // Inside double quotes a backslash only escapes
                            // the quote and itself.
                            match chars.next() {
                                Some(e @ ('"' | '\\')) => current.push(e),
                                Some(e) => {
                                    current.push('\\');
                                    current.push(e);
                                }
                                None => current.push('\\'),
                            }
                        }
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(e) = chars.next() {
                    current.push(e);
                }
            }
            _ => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
