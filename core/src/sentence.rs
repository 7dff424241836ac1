use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    // Lowercased, without the trailing period.
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "mr","mrs","ms","dr","prof","sr","jr","st","vs","etc","inc","ltd","corp",
            "e.g","i.e","a.m","p.m","fig","vol","approx","dept","jan","feb","apr","jun",
            "jul","aug","sep","sept","oct","nov","dec",
        ];
        words.iter().copied().collect()
    };
}

fn is_terminator(c: char) -> bool { matches!(c, '.' | '!' | '?') }

fn is_closing(c: char) -> bool { matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') }

/// A lone capital followed by a period, e.g. "J." in "J. R. R. Tolkien".
fn is_initial(token: &str) -> bool {
    let mut chars = match token.strip_suffix('.') {
        Some(letter) => letter.chars(),
        None => return false,
    };
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Whether the period closing `sentence` belongs to an abbreviation or an
/// initial rather than ending it. `rest` is the text after the period.
fn period_continues(sentence: &str, rest: &str) -> bool {
    let mut words = sentence.rsplit(|c: char| c.is_whitespace() || c == '(').filter(|w| !w.is_empty());
    let last = match words.next() {
        Some(word) => word,
        None => return false,
    };
    if ABBREVIATIONS.contains(last.trim_end_matches('.').to_lowercase().as_str()) {
        return true;
    }
    // "vitamin C." ends a sentence, "J. R. R. Tolkien" does not
    is_initial(last) && (rest.split_whitespace().next().map_or(false, is_initial) || words.next().map_or(false, is_initial))
}

/// Split raw text into trimmed, non-empty sentences in reading order.
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) followed by whitespace or the end of the text. A period after a
/// known abbreviation, or after an initial that sits next to another initial,
/// does not end a sentence. Trailing text without a terminator forms the last
/// sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        current.push(c);
        if !is_terminator(c) {
            continue;
        }
        while let Some(&(_, next)) = chars.peek() {
            if is_terminator(next) || is_closing(next) {
                current.push(next);
                chars.next();
            } else {
                break;
            }
        }
        let rest = chars.peek().map_or("", |&(at, _)| &text[at..]);
        if !rest.chars().next().map_or(true, char::is_whitespace) {
            continue;
        }
        let candidate = current.trim_end();
        if c == '.' && candidate.ends_with('.') && period_continues(candidate, rest) {
            continue;
        }
        push_trimmed(&mut sentences, &current);
        current.clear();
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
