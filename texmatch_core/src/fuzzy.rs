use crate::distance::damerau_levenshtein;

/// Edit distance used by the fuzzy fallback
pub trait Matcher {
    fn distance(&self, a: &str, b: &str) -> usize;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DamerauLevenshtein;

impl Matcher for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        damerau_levenshtein(a, b)
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn distance(&self, a: &str, b: &str) -> usize {
        (**self).distance(a, b)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClosestMatch<'a> {
    pub key: &'a str,
    pub distance: usize,
}

/// Candidate closest to `target`.
///
/// Equal distances resolve to the lexicographically smallest key whatever the
/// scan order. `None` only when there are no candidates.
pub fn closest<'a, M, I>(matcher: &M, target: &str, candidates: I) -> Option<ClosestMatch<'a>>
where
    M: Matcher + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<ClosestMatch<'a>> = None;
    for key in candidates {
        let distance = matcher.distance(target, key);
        let better = match best {
            None => true,
            Some(current) => (distance, key) < (current.distance, current.key),
        };
        if better {
            best = Some(ClosestMatch { key, distance });
            if distance == 0 {
                break;
            }
        }
    }
    best
}
