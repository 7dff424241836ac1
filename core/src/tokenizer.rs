use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    static ref NON_ASCII: Regex = Regex::new(r"[^\x00-\x7F]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves",
            "you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
            "he","him","his","himself","she","she's","her","hers","herself",
            "it","it's","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom","this","that","that'll","these","those",
            "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
            "a","an","the","and","but","if","or","because","as","until","while",
            "of","at","by","for","with","about","against","between","into","through","during","before","after",
            "above","below","to","from","up","down","in","out","on","off","over","under",
            "again","further","then","once","here","there","when","where","why","how",
            "all","any","both","each","few","more","most","other","some","such",
            "no","nor","not","only","own","same","so","than","too","very",
            "s","t","can","will","just","don","don't","should","should've","now",
            "d","ll","m","o","re","ve","y","ain","aren","aren't","couldn","couldn't",
            "didn","didn't","doesn","doesn't","hadn","hadn't","hasn","hasn't","haven","haven't",
            "isn","isn't","ma","mightn","mightn't","mustn","mustn't","needn","needn't",
            "shan","shan't","shouldn","shouldn't","wasn","wasn't","weren","weren't",
            "won","won't","wouldn","wouldn't",
            // conversational filler common in typed queries
            "please","thank","hello","hi","could","would","might",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Reduce a token to its base form.
///
/// One Snowball pass is not always a fixed point ("agreed" -> "agre" -> "agr"),
/// so stemming repeats until the token stops changing. Every pass either
/// shortens the token or turns a `y` into an `i`, so the loop ends.
pub fn lemmatize(token: &str) -> String {
    let mut current = token.to_string();
    loop {
        let next = STEMMER.stem(&current);
        if next == current.as_str() {
            return current;
        }
        current = next.into_owned();
    }
}

/// Clean text into a space-joined sequence of base-form tokens.
///
/// Non-ASCII runs become a single space, then digits and ASCII punctuation are
/// dropped, the rest is lowercased, stopwords are removed and every surviving
/// token is lemmatized. Indexed sentences and queries must both pass through
/// here or their vectors stop being comparable.
pub fn normalize(text: &str) -> String {
    let ascii = NON_ASCII.replace_all(text, " ");
    let cleaned: String = ascii
        .chars()
        .filter(|c| !c.is_ascii_digit() && !c.is_ascii_punctuation())
        .collect::<String>()
        .to_ascii_lowercase();
    cleaned
        .trim()
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
