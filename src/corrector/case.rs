/// Carry the case of `original`'s first character over to `correction`.
///
/// Only the first character is adjusted: an uppercase first letter in the
/// original uppercases the correction's first letter; everything else in the
/// correction is kept as written in the dictionary.
pub fn carry_first_letter(original: &str, correction: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return correction.to_string();
    }

    let mut chars = correction.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
