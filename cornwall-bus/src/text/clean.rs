//! Generic label cleanup shared by every label kind.
//!
//! These transforms know nothing about the agency. Each one is idempotent
//! on its own, and none of them produces text another one would rewrite.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref POINTS: Regex = Regex::new(r"(\S)\.+(\s|$)").unwrap();
    static ref ORDINALS: Regex = Regex::new(
        r"(?i)\b(first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth)\b"
    )
    .unwrap();
    static ref STREET_TYPES: Regex = Regex::new(
        r"(?i)\b(street|avenue|road|boulevard|drive|crescent|court|place|lane|highway|parkway|terrace|square|centre|center)\b"
    )
    .unwrap();
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_spaces(label: &str) -> String {
    SPACES.replace_all(label.trim(), " ").into_owned()
}

/// Drop abbreviation points: `"St. Lawrence"` becomes `"St Lawrence"`.
///
/// Only points that end a token are removed, so `"U.S"` keeps its inner point.
pub fn remove_points(label: &str) -> String {
    POINTS.replace_all(label, "${1}${2}").into_owned()
}

/// Spell ordinal words as numerals: `"Second & Pitt"` becomes `"2nd & Pitt"`.
pub fn clean_numbers(label: &str) -> String {
    ORDINALS
        .replace_all(label, |caps: &Captures| {
            ordinal(&caps[1].to_lowercase()).to_string()
        })
        .into_owned()
}

fn ordinal(word: &str) -> &'static str {
    match word {
        "first" => "1st",
        "second" => "2nd",
        "third" => "3rd",
        "fourth" => "4th",
        "fifth" => "5th",
        "sixth" => "6th",
        "seventh" => "7th",
        "eighth" => "8th",
        "ninth" => "9th",
        "tenth" => "10th",
        "eleventh" => "11th",
        "twelfth" => "12th",
        "thirteenth" => "13th",
        "fourteenth" => "14th",
        "fifteenth" => "15th",
        "sixteenth" => "16th",
        "seventeenth" => "17th",
        "eighteenth" => "18th",
        "nineteenth" => "19th",
        _ => "20th",
    }
}

/// Abbreviate street types: `"Montreal Road"` becomes `"Montreal Rd"`.
pub fn clean_street_types(label: &str) -> String {
    STREET_TYPES
        .replace_all(label, |caps: &Captures| {
            street_type(&caps[1].to_lowercase()).to_string()
        })
        .into_owned()
}

fn street_type(word: &str) -> &'static str {
    match word {
        "street" => "St",
        "avenue" => "Ave",
        "road" => "Rd",
        "boulevard" => "Blvd",
        "drive" => "Dr",
        "crescent" => "Cres",
        "court" => "Crt",
        "place" => "Pl",
        "lane" => "Ln",
        "highway" => "Hwy",
        "parkway" => "Pkwy",
        "terrace" => "Terr",
        "square" => "Sq",
        _ => "Ctr",
    }
}

/// Final label pass: collapse whitespace, trim, and capitalize word starts.
///
/// A letter starts a word when it follows whitespace, one of `- / ( & "`, or
/// the start of the label. Letters after digits are left alone so `"2nd"`
/// stays `"2nd"`. Nothing is ever lower-cased here.
pub fn clean_label(label: &str) -> String {
    let collapsed = collapse_spaces(label);
    let mut out = String::with_capacity(collapsed.len());
    let mut prev: Option<char> = None;

    for c in collapsed.chars() {
        let starts_word = match prev {
            None => true,
            Some(p) => p.is_whitespace() || matches!(p, '-' | '/' | '(' | '&' | '"'),
        };
        if starts_word && c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}
