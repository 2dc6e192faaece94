//! Normalizes text loaded from the articles table before it is dropped into
//! HTML. See [`sanitize`].

/// Typographic characters and their ASCII replacements.
const REPLACEMENTS: [(char, &str); 5] = [
    ('\u{201D}', "\""),
    ('\u{201C}', "\""),
    ('\u{2019}', "'"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
];

/// Some rows were authored with a truncated link attribute.
const BROKEN_TARGET: &str = "target=\"_blank>";
const FIXED_TARGET: &str = "target=\"_blank\">";

/// Trims `value`, replaces curly quotes and en/em dashes with their ASCII
/// equivalents, and repairs the truncated `target="_blank>` attribute.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize(value: &str) -> String {
    let mut cleaned = value.trim().to_owned();
    for (source, target) in REPLACEMENTS.iter() {
        if cleaned.contains(*source) {
            cleaned = cleaned.replace(*source, target);
        }
    }
    cleaned.replace(BROKEN_TARGET, FIXED_TARGET)
}

#[cfg(test)]
mod test {
    use super::*;

    struct TestCase {
        input: &'static str,
        wanted: &'static str,
    }

    #[test]
    fn test_sanitize() {
        let cases = [
            TestCase {
                input: "\u{201C}AI\u{201D} and society",
                wanted: "\"AI\" and society",
            },
            TestCase {
                input: "  padded\t\n",
                wanted: "padded",
            },
            TestCase {
                input: "it\u{2019}s 2019\u{2013}2020 \u{2014} a year",
                wanted: "it's 2019-2020 - a year",
            },
            TestCase {
                input: "<a href=\"x\" target=\"_blank>link</a>",
                wanted: "<a href=\"x\" target=\"_blank\">link</a>",
            },
            TestCase {
                input: "<a href=\"x\" target=\"_blank\">link</a>",
                wanted: "<a href=\"x\" target=\"_blank\">link</a>",
            },
            TestCase {
                input: "",
                wanted: "",
            },
        ];

        for case in cases.iter() {
            let found = sanitize(case.input);
            assert_eq!(
                case.wanted, found,
                "wanted \"{}\"; found \"{}\"",
                case.wanted, found
            );
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "\u{201C}AI\u{201D} and society",
            " <a target=\"_blank>x</a> \u{2014} y ",
            "<a target=\"_blank>a</a><a target=\"_blank>b</a>",
        ];
        for input in inputs.iter() {
            let once = sanitize(input);
            assert_eq!(once, sanitize(&once));
        }
    }
}
