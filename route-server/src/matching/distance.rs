//! Case-insensitive Levenshtein edit distance.

/// Lowercase a string for comparison.
///
/// Case folding is the only normalization applied anywhere in matching:
/// accents and punctuation stay significant.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Number of single-character insertions, deletions or substitutions needed
/// to turn `a` into `b`, ignoring case.
///
/// Characters are Unicode scalar values. Uses a single rolling row of
/// `len(b) + 1` cells.
///
/// # Examples
///
/// ```
/// use route_server::matching::distance;
///
/// assert_eq!(distance("Terminal Central", "terminl centrl"), 2);
/// assert_eq!(distance("", "abc"), 3);
/// assert_eq!(distance("Sé", "SÉ"), 0);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    folded_distance(&fold(a), &fold(b))
}

/// Edit distance between two strings that are already case-folded.
pub(crate) fn folded_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();

    // row[j] = distance between the processed prefix of `a` and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        // diagonal holds row[j - 1] from the previous iteration
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("abc", "abc"), 0);
        assert_eq!(distance("abc", "abd"), 1);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(distance("TERMINAL CENTRAL", "terminal central"), 0);
        assert_eq!(distance("Paulista", "pAULISTA"), 0);
    }

    #[test]
    fn accents_and_punctuation_are_significant() {
        assert_eq!(distance("Consolação", "Consolacao"), 2);
        assert_eq!(distance("Av. Paulista", "Av Paulista"), 1);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(distance("ã", "a"), 1);
        assert_eq!(distance("", "Metrô"), 5);
    }

    #[test]
    fn typos_in_stop_name() {
        assert_eq!(distance("terminl centrl", "Terminal Central"), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identity(s in "[a-zA-Z çãéô.,-]{0,24}") {
            prop_assert_eq!(distance(&s, &s), 0);
        }

        #[test]
        fn empty_is_length(s in "[a-z ãéô]{0,24}") {
            prop_assert_eq!(distance("", &s), s.chars().count());
            prop_assert_eq!(distance(&s, ""), s.chars().count());
        }

        #[test]
        fn symmetric(a in "[a-zA-Z ]{0,16}", b in "[a-zA-Z ]{0,16}") {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        /// Bounded below by the length difference and above by the longer length
        #[test]
        fn bounds(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            let (la, lb) = (a.chars().count(), b.chars().count());
            let d = distance(&a, &b);
            prop_assert!(d >= la.abs_diff(lb));
            prop_assert!(d <= la.max(lb));
        }

        #[test]
        fn triangle_inequality(
            a in "[a-c]{0,8}",
            b in "[a-c]{0,8}",
            c in "[a-c]{0,8}",
        ) {
            prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
        }

        /// A single appended character costs exactly one edit
        #[test]
        fn single_insertion(s in "[a-z]{0,16}", c in "[a-z]") {
            let longer = format!("{s}{c}");
            prop_assert_eq!(distance(&s, &longer), 1);
        }
    }
}
