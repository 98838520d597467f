use once_cell::sync::Lazy;
use regex::Regex;

/// One priority-ordered lexicon entry: any pattern that begins a word of
/// the normalized message yields `token`.
#[derive(Debug, Clone, Copy)]
pub struct LexiconRule {
    pub patterns: &'static [&'static str],
    pub token: &'static str,
}

const fn rule(patterns: &'static [&'static str], token: &'static str) -> LexiconRule {
    LexiconRule { patterns, token }
}

// "هونداي" starts with "هوندا", so hyundai must be tested before honda.
pub static BRAND_RULES: &[LexiconRule] = &[
    rule(&["تويوتا", "toyota"], "toyota"),
    rule(&["هيونداي", "هونداي", "هيونداى", "hyundai"], "hyundai"),
    rule(&["كيا", "kia"], "kia"),
    rule(&["نيسان", "nissan"], "nissan"),
    rule(&["شفروليه", "شيفروليه", "شفرليت", "chevrolet", "chevy"], "chevrolet"),
    rule(&["هوندا", "honda"], "honda"),
    rule(&["فورد", "ford"], "ford"),
];

// "لاند كروزر" contains the word "كروز", so land cruiser must be tested
// before cruze.
pub static MODEL_RULES: &[LexiconRule] = &[
    rule(&["كامري", "كامرى", "camry"], "camry"),
    rule(&["كورولا", "كرولا", "corolla"], "corolla"),
    rule(
        &["لاندكروزر", "لاند كروزر", "land cruiser", "landcruiser"],
        "landcruiser",
    ),
    rule(&["هايلكس", "هيلوكس", "hilux"], "hilux"),
    rule(&["راف فور", "راف4", "rav4", "rav 4"], "rav4"),
    rule(&["النترا", "إلنترا", "الينترا", "elantra"], "elantra"),
    rule(&["سوناتا", "sonata"], "sonata"),
    rule(&["توسان", "tucson"], "tucson"),
    rule(&["اكسنت", "أكسنت", "accent"], "accent"),
    rule(&["سيراتو", "cerato"], "cerato"),
    rule(&["سبورتاج", "sportage"], "sportage"),
    rule(&["اوبتيما", "أوبتيما", "optima"], "optima"),
    rule(&["صني", "sunny"], "sunny"),
    rule(&["التيما", "ألتيما", "altima"], "altima"),
    rule(&["باترول", "patrol"], "patrol"),
    rule(&["ماليبو", "malibu"], "malibu"),
    rule(&["كروز", "cruze"], "cruze"),
    rule(&["تاهو", "tahoe"], "tahoe"),
    rule(&["اكورد", "أكورد", "accord"], "accord"),
    rule(&["سيفيك", "civic"], "civic"),
    rule(&["اكسبلورر", "إكسبلورر", "explorer"], "explorer"),
];

/// City and country aliases, canonicalised to the country name.
pub static LOCATION_RULES: &[LexiconRule] = &[
    rule(
        &[
            "العراق", "عراق", "بغداد", "البصرة", "بصرة", "الموصل", "أربيل", "اربيل", "النجف",
            "كربلاء", "iraq", "baghdad",
        ],
        "العراق",
    ),
    rule(&["السعودية", "الرياض", "جدة", "الدمام", "saudi"], "السعودية"),
    rule(&["الكويت", "kuwait"], "الكويت"),
    rule(
        &["الإمارات", "الامارات", "دبي", "أبوظبي", "ابوظبي", "dubai", "uae"],
        "الإمارات",
    ),
    rule(&["قطر", "الدوحة", "qatar"], "قطر"),
    rule(&["الأردن", "الاردن", "jordan"], "الأردن"),
    rule(&["مصر", "القاهرة", "egypt"], "مصر"),
];

// Conjunction, preposition and article prefixes that may be glued to a
// name ("والكامري", "بالبصرة"). Longest first.
const WORD_PREFIXES: &[&str] = &["وال", "بال", "فال", "كال", "لل", "ال", "و", "ب", "ل", "ف", "ك"];

pub const SEVERE_KEYWORDS: &[&str] = &["شاق", "صعب"];
pub const HIGHWAY_KEYWORDS: &[&str] = &["سفر", "طريق"];
pub const CITY_KEYWORDS: &[&str] = &["مدينة"];
pub const DUST_KEYWORDS: &[&str] = &["غبار", "تراب", "عواصف"];
pub const HOT_KEYWORDS: &[&str] = &["حرارة", "حار", "صيف"];
pub const MILD_KEYWORDS: &[&str] = &["معتدل", "بارد"];
pub const EFFICIENT_KEYWORDS: &[&str] = &["توفير", "اقتصادي"];
pub const THIRSTY_KEYWORDS: &[&str] = &["يصرف", "استهلاك عالي"];

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9])(20[0-9]{2})(?:[^0-9]|$)").expect("valid year regex"));

static THOUSANDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9][0-9,]*)\s*(?:ألف|الف|آلاف|الاف|كيلو|كلم|k\b)")
        .expect("valid mileage regex")
});

static PLAIN_KM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9][0-9,]*)\s*(?:كم|km)|(?:ماشية|ماشيه|قاطع|قاطعة)\s*([0-9][0-9,]*)")
        .expect("valid mileage regex")
});

/// Lowercases the message and maps Arabic-Indic and Persian digits to ASCII.
pub fn normalize_message(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            '٠'..='٩' => char::from(b'0' + (ch as u32 - '٠' as u32) as u8),
            '۰'..='۹' => char::from(b'0' + (ch as u32 - '۰' as u32) as u8),
            _ => ch,
        })
        .collect()
}

/// First rule in table order with a pattern that begins a word of `text`.
pub fn first_match(text: &str, rules: &[LexiconRule]) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.patterns.iter().any(|pattern| contains_word(text, pattern)))
        .map(|rule| rule.token)
}

/// True when `needle` occurs at the start of a word, optionally behind one
/// of the glued prefixes. "كيا" is found in "كيا سيراتو" and "وكيا" but not
/// inside "تركيا".
pub fn contains_word(text: &str, needle: &str) -> bool {
    text.match_indices(needle)
        .any(|(at, _)| starts_word(&text[..at]))
}

fn starts_word(before: &str) -> bool {
    at_boundary(before)
        || WORD_PREFIXES.iter().any(|prefix| {
            before
                .strip_suffix(prefix)
                .is_some_and(at_boundary)
        })
}

fn at_boundary(before: &str) -> bool {
    before
        .chars()
        .next_back()
        .map_or(true, |ch| !ch.is_alphabetic())
}

pub fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

pub fn extract_year(text: &str) -> Option<u32> {
    YEAR_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

/// Thousands form ("130 ألف") wins over the plain-kilometre form.
pub fn extract_mileage(text: &str) -> Option<u32> {
    if let Some(value) = THOUSANDS_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|number| parse_number(number.as_str()))
    {
        return u32::try_from(value.checked_mul(1000)?).ok();
    }

    PLAIN_KM_RE
        .captures(text)
        .and_then(|captures| captures.get(1).or_else(|| captures.get(2)))
        .and_then(|number| parse_number(number.as_str()))
        .and_then(|value| u32::try_from(value).ok())
}

fn parse_number(raw: &str) -> Option<u64> {
    raw.replace(',', "").parse().ok()
}
