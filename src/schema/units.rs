//! CSS unit suggestions after a bare number.

use crate::candidate::{Candidate, CompletionKind};

/// (unit, description)
const UNITS: &[(&str, &str)] = &[
    ("px", "pixels"),
    ("em", "relative to the element's font size"),
    ("rem", "relative to the root font size"),
    ("%", "percentage"),
    ("vh", "1% of the viewport height"),
    ("vw", "1% of the viewport width"),
    ("vmin", "1% of the smaller viewport dimension"),
    ("vmax", "1% of the larger viewport dimension"),
    ("ch", "width of the \"0\" glyph"),
    ("ex", "x-height of the font"),
    ("fr", "fraction of the free grid space"),
    ("pt", "points"),
    ("pc", "picas"),
    ("cm", "centimeters"),
    ("mm", "millimeters"),
    ("in", "inches"),
    ("deg", "degrees"),
    ("rad", "radians"),
    ("turn", "turns"),
    ("s", "seconds"),
    ("ms", "milliseconds"),
];

/// `10px`, `10em`, ... for the number being typed.
pub fn unit_completions(number: &str) -> Vec<Candidate> {
    UNITS
        .iter()
        .map(|(unit, description)| {
            Candidate::plain(format!("{}{}", number, unit), CompletionKind::Unit)
                .with_detail(*description)
        })
        .collect()
}
