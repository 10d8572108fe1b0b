use std::collections::HashMap;

/// Unrestricted Damerau–Levenshtein distance between `a` and `b`, counted in `char`s.
///
/// Unlike optimal string alignment this allows editing between transposed
/// characters, so `"ca"` → `"abc"` costs 2 rather than 3. The result is a metric.
///
/// Runs in `O(n·m)` time and space over a matrix padded by one extra row and
/// column holding a "too expensive" sentinel, with `last_row` remembering the
/// latest row each character of `a` was seen in.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let sentinel = n + m;
    let width = m + 2;
    let at = move |i: usize, j: usize| i * width + j;
    let mut score = vec![0usize; (n + 2) * width];

    score[at(0, 0)] = sentinel;
    for i in 0..=n {
        score[at(i + 1, 0)] = sentinel;
        score[at(i + 1, 1)] = i;
    }
    for j in 0..=m {
        score[at(0, j + 1)] = sentinel;
        score[at(1, j + 1)] = j;
    }

    let mut last_row: HashMap<char, usize> = HashMap::new();
    for i in 1..=n {
        // last column in this row where a[i - 1] matched
        let mut last_match_col = 0;
        for j in 1..=m {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;

            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            let substitution = score[at(i, j)] + cost;
            let insertion = score[at(i + 1, j)] + 1;
            let deletion = score[at(i, j + 1)] + 1;
            let transposition = score[at(i1, j1)] + (i - i1 - 1) + 1 + (j - j1 - 1);

            score[at(i + 1, j + 1)] = substitution
                .min(insertion)
                .min(deletion)
                .min(transposition);
        }
        last_row.insert(a[i - 1], i);
    }

    score[at(n + 1, m + 1)]
}
