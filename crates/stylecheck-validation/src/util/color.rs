//! CSS color string recognition
//!
//! Copyright (c) 2025 Stylecheck Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
static FUNCTIONAL_COLOR: OnceLock<Regex> = OnceLock::new();

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

fn hex_color() -> &'static Regex {
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("hex color pattern is valid")
    })
}

fn functional_color() -> &'static Regex {
    FUNCTIONAL_COLOR.get_or_init(|| {
        Regex::new(r"^(rgba?|hsla?)\(([^()]*)\)$").expect("functional color pattern is valid")
    })
}

/// Number of comma-separated components each color function takes
fn arity(function: &str) -> usize {
    match function {
        "rgba" | "hsla" => 4,
        _ => 3,
    }
}

/// A single component: a finite number, optionally followed by `%`
fn is_numeric_component(component: &str) -> bool {
    let number = component.trim();
    let number = number.strip_suffix('%').unwrap_or(number);
    !number.is_empty()
        && number.trim_end() == number
        && number.parse::<f64>().map_or(false, f64::is_finite)
}

fn is_functional_color(input: &str) -> bool {
    let Some(captures) = functional_color().captures(input) else {
        return false;
    };
    let components: Vec<&str> = captures[2].split(',').collect();
    components.len() == arity(&captures[1]) && components.iter().all(|c| is_numeric_component(c))
}

/// True if `input` parses as a CSS color
pub fn is_css_color(input: &str) -> bool {
    let normalized = input.trim().to_ascii_lowercase();
    hex_color().is_match(&normalized)
        || is_functional_color(&normalized)
        || NAMED_COLORS.binary_search(&normalized.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_css_colors() {
        assert!(is_css_color("#fff"));
        assert!(is_css_color("#FF000080"));
        assert!(is_css_color("rgba(0, 0, 0, 0)"));
        assert!(is_css_color("hsl(120, 100%, 50%)"));
        assert!(is_css_color("rgb(255, 128, 0)"));
        assert!(is_css_color("rgb(100%, 50%, 0%)"));
        assert!(is_css_color("hsla(240, 50%, 50%, 0.5)"));
        assert!(is_css_color("RebeccaPurple"));
        assert!(is_css_color("transparent"));

        assert!(!is_css_color("#ff"));
        assert!(!is_css_color("rgb 0 0 0"));
        assert!(!is_css_color("not-a-color"));
        assert!(!is_css_color(""));
    }

    #[test]
    fn test_malformed_functional_colors() {
        assert!(!is_css_color("rgb(banana)"));
        assert!(!is_css_color("rgba(1,2)"));
        assert!(!is_css_color("hsl(a b c)"));
        assert!(!is_css_color("rgb(999,999,999,999,999)"));
        assert!(!is_css_color("rgb(1, 2, 3, 0.5)"));
        assert!(!is_css_color("rgba(1, 2, 3)"));
        assert!(!is_css_color("rgb(1, 2,)"));
        assert!(!is_css_color("rgb(1 2, 3, 4)"));
        assert!(!is_css_color("hsl(120, 100%%, 50%)"));
        assert!(!is_css_color("rgb(inf, 0, 0)"));
    }
}
