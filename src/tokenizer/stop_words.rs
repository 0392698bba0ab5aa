/// Minimum token length used when none is configured.
pub const MIN_LENGTH: usize = 2;

/// Common Dutch words that carry little meaning on their own.
#[rustfmt::skip]
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "het", "de", "deze",
    "en", "of", "om", "te", "hier", "nog", "ook", "al",
    "in", "van", "voor", "mee", "per", "als", "tot", "uit", "bij",
    "waar", "waardoor", "waarvan", "wanneer",
    "je", "uw", "ze", "zelf", "jezelf",
    "ca", "bijvoorbeeld",
    "is", "bevat", "hebben", "kunnen", "mogen",
    "gemaakt", "aanbevolen",
    "belangrijke", "heerlijk", "heerlijke", "handig", "handige", "dagelijkse",
    "gebruik", "allergieinformatie", "bijdrage", "smaak", "hoeveelheid",
];
