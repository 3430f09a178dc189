use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{HashMap, HashSet};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref URL_RE: Regex = Regex::new(r"^(?:https?://|www\.)\S+$").expect("valid regex");
    static ref EMAIL_RE: Regex = Regex::new(r"^[\w.+-]+@[\w-]+\.[\w.-]+$").expect("valid regex");
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\(?\d[\d().-]{5,}$").expect("valid regex");
    static ref MENTION_RE: Regex = Regex::new(r"^@\w+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
            // high-frequency English words beyond the standard list
            "also","back","come","day","even","first","get","give","go","good","just","know","like","look",
            "make","new","now","one","person","say","see","take","think","time","two","us","use","want",
            "way","well","will","work","year",
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

fn is_noise(chunk: &str) -> bool {
    URL_RE.is_match(chunk)
        || EMAIL_RE.is_match(chunk)
        || PHONE_RE.is_match(chunk)
        || MENTION_RE.is_match(chunk)
}

/// Normalize raw post text into the ordered term sequence shared by corpus
/// build and query time: accent folding (NFKD, combining marks dropped),
/// lowercase, word tokenization, stopword removal, noise stripping (URLs,
/// emails, phone numbers, @mentions, digits, punctuation, emoji), then
/// English stemming. Total on any input; unrecognized characters are
/// dropped, never an error.
pub fn normalize(text: &str) -> Vec<String> {
    let folded = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut terms = Vec::new();
    for chunk in folded.split_whitespace() {
        if is_noise(chunk) {
            continue;
        }
        for mat in WORD_RE.find_iter(chunk) {
            let token = mat.as_str();
            if is_stopword(token) {
                continue;
            }
            let letters: String = token.chars().filter(|c| c.is_alphabetic()).collect();
            if letters.is_empty() {
                continue;
            }
            terms.push(STEMMER.stem(&letters).to_string());
        }
    }
    terms
}

/// Count raw occurrences of each term. Raw counts are the single
/// frequency scheme used corpus-wide; cosine scoring takes care of length
/// normalization.
pub fn compute_term_frequencies(tokens: &[String]) -> HashMap<String, u64> {
    let mut frequencies = HashMap::new();
    for token in tokens {
        *frequencies.entry(token.clone()).or_insert(0) += 1;
    }
    frequencies
}
