//! Longest common subsequence over ordered line sequences.

/// Compute the longest common subsequence of `a` and `b`.
///
/// Classic bottom-up dynamic programming over an (m+1)×(n+1) table of
/// match lengths, backtracking from `[m][n]`. Ties during backtracking
/// prefer the row step, which keeps the result deterministic.
///
/// O(m·n) time and space; callers bound input size before invoking.
#[must_use]
pub fn longest_common_subsequence(a: &[String], b: &[String]) -> Vec<String> {
    let m = a.len();
    let n = b.len();
    if m == 0 || n == 0 {
        return Vec::new();
    }

    let mut table = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut out = Vec::with_capacity(table[m][n] as usize);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            out.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_lcs_basic() {
        let a = lines(&["x", "y", "z"]);
        let b = lines(&["x", "q", "y", "z"]);
        assert_eq!(longest_common_subsequence(&a, &b), lines(&["x", "y", "z"]));
    }

    #[test]
    fn test_lcs_identical() {
        let a = lines(&["a", "b", "c"]);
        assert_eq!(longest_common_subsequence(&a, &a), a);
    }

    #[test]
    fn test_lcs_disjoint() {
        let a = lines(&["a", "b"]);
        let b = lines(&["c", "d"]);
        assert!(longest_common_subsequence(&a, &b).is_empty());
    }

    #[test]
    fn test_lcs_empty_side() {
        let a = lines(&["a", "b"]);
        assert!(longest_common_subsequence(&a, &[]).is_empty());
        assert!(longest_common_subsequence(&[], &a).is_empty());
    }

    #[test]
    fn test_lcs_is_ordered_subsequence_of_both() {
        let a = lines(&["m", "a", "b", "n", "c"]);
        let b = lines(&["a", "x", "b", "c", "y"]);
        let lcs = longest_common_subsequence(&a, &b);
        assert_eq!(lcs, lines(&["a", "b", "c"]));

        // Every LCS element appears in both inputs in order.
        for seq in [&a, &b] {
            let mut cursor = 0;
            for item in &lcs {
                let pos = seq[cursor..]
                    .iter()
                    .position(|x| x == item)
                    .expect("LCS element missing from input");
                cursor += pos + 1;
            }
        }
    }

    #[test]
    fn test_lcs_with_duplicates() {
        let a = lines(&["a", "a", "b"]);
        let b = lines(&["a", "b", "a"]);
        let lcs = longest_common_subsequence(&a, &b);
        assert_eq!(lcs.len(), 2);
    }
}
