//! Built-in Thanglish scenario catalog.
//!
//! Twenty-five positive scenarios (the last one chained on a single page) and
//! fifteen negative ones. Negative predicates accept any of several outcomes
//! because the site's handling of unsupported input is not pinned down: the
//! output may be empty, may keep the offending fragment verbatim, or may
//! simply carry no Tamil letters.

use crate::expectation::Expectation;
use crate::scenario::{Polarity, Scenario, TestSuite};

/// Name of the built-in suite
pub const SUITE_NAME: &str = "thanglish-to-tamil";

fn pos(n: u8, title: &str, input: &str, expect: Expectation) -> Scenario {
    Scenario::single(
        format!("pos-{n:02}"),
        title,
        Polarity::Positive,
        input,
        expect,
    )
}

fn neg(n: u8, title: &str, input: &str, expect: Expectation) -> Scenario {
    Scenario::single(
        format!("neg-{n:02}"),
        title,
        Polarity::Negative,
        input,
        expect,
    )
}

/// Output has no Tamil letters
fn no_tamil() -> Expectation {
    Expectation::not(Expectation::tamil())
}

/// Output is empty or has no Tamil letters
fn empty_or_no_tamil() -> Expectation {
    Expectation::any_of([Expectation::empty(), no_tamil()])
}

/// Output keeps any of `fragments`, or has no Tamil letters
fn keeps_or_no_tamil<const N: usize>(fragments: [Expectation; N]) -> Expectation {
    Expectation::any_of(fragments.into_iter().chain([no_tamil()]))
}

/// Positive scenarios, in catalog order
#[must_use]
pub fn positive_scenarios() -> Vec<Scenario> {
    use Expectation as E;

    vec![
        pos(
            1,
            "Polite daily greeting",
            "kaalai vanakkam amma",
            E::all_of([E::contains("காலை வணக்கம் அம்மா"), E::tamil()]),
        ),
        pos(2, "Short polite request", "konjam water kudunga", E::contains("கொஞ்சம்")),
        pos(3, "Interrogative daily question", "sapadu saaptiya?", E::contains("சாப்பாடு")),
        pos(4, "Negative statement", "naan varala", E::contains("நான் வரல")),
        pos(
            5,
            "Past tense sentence",
            "naan netru exam ezhudhinen",
            E::contains("நான் நேற்று exam எழுதினேன்"),
        ),
        pos(6, "Future plan", "naalai naan library-ku poguven", E::contains("நாளை")),
        pos(
            7,
            "Compound cause/effect",
            "mazhai peyyuthu, athunaala veetula irukken",
            E::contains("மழை"),
        ),
        pos(
            8,
            "Mixed Thanglish + English",
            "innaiku office meeting cancel aayiduchu",
            E::contains("இன்னைக்கு"),
        ),
        pos(
            9,
            "Repeated words emphasis",
            "seekiram seekiram vaa",
            E::contains("சீக்கிரம் சீக்கிரம் வா"),
        ),
        pos(10, "Currency usage", "indha book price Rs. 1200", E::contains("Rs.")),
        pos(11, "Pronoun usage", "naanga unakku support pannuvom", E::contains("நாங்க")),
        pos(
            12,
            "Singular/plural + negation",
            "oru ticket pothum, rendu tickets vendam",
            E::contains("வேண்டாம்"),
        ),
        pos(13, "Time format sentence", "meeting morning 9:30-ku start aagum", E::contains("9:30")),
        pos(14, "Date mention", "exam 2026-03-15 anikku nadakkum", E::contains("2026-03-15")),
        pos(15, "Punctuation handling", "enna idhu?! ipdi pannina epdi?", E::contains("?!")),
        pos(16, "Slang informal sentence", "dei romba bore adikkuthu", E::contains("டேய்")),
        pos(17, "Units of measurement", "2kg arisi vaangi vaa", E::contains("2kg")),
        // "bus stop-ல" and "busstop" are both acceptable
        pos(
            18,
            "Joined word (busstopla)",
            "busstopla romba koottam",
            E::contains_ignore_case("bus"),
        ),
        pos(19, "Extra spaces robustness", "naan   konjam   busy", E::contains("நான்")),
        pos(20, "Line break input", "amma\nnaan late-aa varuven", E::contains("அம்மா")),
        pos(
            21,
            "Longer paragraph (multi-sentence)",
            "innaiku morning semma vela irundhuchu. bus miss aayiduchu. \
             office-ku late-aa poiten. evening thirumbi veetukku vandhen.",
            E::contains("இன்னைக்கு"),
        ),
        pos(
            22,
            "Polite formal request",
            "ungalukku time irundhaal help pannunga",
            E::all_of([E::contains("உங்களுக்கு"), E::tamil()]),
        ),
        pos(23, "Brand term embedded", "naan Samsung phone vaanginen", E::contains("Samsung")),
        pos(24, "Negative question", "nee varalaya?", E::contains("வரல")),
        Scenario::refresh(
            "pos-25",
            "UI clear and retype updates output",
            [
                ("vanakkam", E::contains("வணக்கம்")),
                ("nandri", E::contains("நன்றி")),
            ],
            true,
        ),
    ]
}

/// Negative scenarios, in catalog order
#[must_use]
pub fn negative_scenarios() -> Vec<Scenario> {
    use Expectation as E;

    vec![
        neg(1, "Empty input", "", E::empty()),
        neg(
            2,
            "Only symbols",
            "###$$$",
            E::any_of([E::empty(), E::contains("#"), E::contains("$")]),
        ),
        neg(
            3,
            "Emojis with text",
            "naan happy 😄😄",
            keeps_or_no_tamil([E::contains("😄"), E::contains_ignore_case("happy")]),
        ),
        neg(
            4,
            "Pure English sentence",
            "Please complete the task today",
            keeps_or_no_tamil([E::contains_ignore_case("please")]),
        ),
        neg(5, "Heavy spelling mistakes", "naaaaan vvvvvaarrrren", empty_or_no_tamil()),
        neg(
            6,
            "Chat abbreviations only",
            "lol brb ttyl",
            keeps_or_no_tamil([E::contains_ignore_case("lol")]),
        ),
        neg(
            7,
            "Mixed foreign words (not Tamil phonetics)",
            "naan hari lassan venum",
            empty_or_no_tamil(),
        ),
        neg(
            8,
            "Excessive emojis",
            "super 😄😄😄😄",
            keeps_or_no_tamil([E::contains("😄")]),
        ),
        neg(9, "Random characters", "asdfghjkl", empty_or_no_tamil()),
        neg(
            10,
            "Numerics noise with text",
            "1234 naan pogiren",
            keeps_or_no_tamil([E::contains("1234")]),
        ),
        neg(
            11,
            "Unsupported symbols with text",
            "naan @ home #now",
            keeps_or_no_tamil([E::contains("@"), E::contains("#")]),
        ),
        neg(12, "Weird casing noise", "NaAn InNaIkU vArAlA", empty_or_no_tamil()),
        neg(
            13,
            "Copy-paste junk words",
            "lorem ipsum dolor sit amet naan pogiren",
            keeps_or_no_tamil([E::contains_ignore_case("lorem")]),
        ),
        neg(
            14,
            "Mixed unsupported script",
            "naan 你好 varuven",
            keeps_or_no_tamil([E::contains("你好")]),
        ),
        neg(
            15,
            "Long gibberish",
            "qwertyuiopasdfghjklzxcvbnm qwertyuiopasdfghjklzxcvbnm qwertyuiopasdfghjklzxcvbnm",
            empty_or_no_tamil(),
        ),
    ]
}

/// The full built-in suite: positives first, then negatives
#[must_use]
pub fn thanglish_suite() -> TestSuite {
    TestSuite {
        name: SUITE_NAME.to_string(),
        scenarios: positive_scenarios()
            .into_iter()
            .chain(negative_scenarios())
            .collect(),
    }
}
