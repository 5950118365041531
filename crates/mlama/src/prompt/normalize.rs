use icu_casemap::CaseMapper;
use icu_locale_core::langid;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics from and lowercases Greek text.
///
/// The text is canonically decomposed, combining marks are dropped, and the
/// result is lowercased with Greek casing rules. Occurrences of
/// `mask_symbol` keep their original spelling so the model still recognizes
/// the mask token.
///
/// ```
/// use mlama::prompt::normalize_greek;
///
/// assert_eq!(
///     normalize_greek("Ο Άρης γεννήθηκε στην [MASK].", "[MASK]"),
///     "ο αρης γεννηθηκε στην [MASK]."
/// );
/// ```
pub fn normalize_greek(text: &str, mask_symbol: &str) -> String {
    let normalized = fold(text);
    if mask_symbol.is_empty() {
        return normalized;
    }
    let folded_mask = fold(mask_symbol);
    if folded_mask == mask_symbol {
        return normalized;
    }
    normalized.replace(&folded_mask, mask_symbol)
}

fn fold(text: &str) -> String {
    let stripped: String = text.nfd().filter(|&c| !is_combining_mark(c)).collect();
    CaseMapper::new()
        .lowercase_to_string(&stripped, &langid!("el"))
        .into_owned()
}
