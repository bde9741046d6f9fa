use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub index: usize,
    pub score: i32,
}

/// Best `limit` candidates for `query`, highest score first. Ties keep
/// candidate order.
pub fn top_matches(query: &str, candidates: &[String], limit: usize) -> Vec<FuzzyMatch> {
    if limit == 0 {
        return Vec::new();
    }

    let query = query.trim();
    let mut heap: BinaryHeap<Reverse<(i32, Reverse<usize>)>> = BinaryHeap::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(matched_indices) = match_indices(query, candidate) else {
            continue;
        };
        let score = score_match(candidate, &matched_indices, query);
        let entry = Reverse((score, Reverse(index)));

        if heap.len() < limit {
            heap.push(entry);
        } else if heap.peek().is_some_and(|min| entry < *min) {
            heap.pop();
            heap.push(entry);
        }
    }

    let mut out = heap
        .into_iter()
        .map(|Reverse((score, Reverse(index)))| FuzzyMatch { index, score })
        .collect::<Vec<_>>();
    out.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    out
}

fn match_indices(query: &str, candidate: &str) -> Option<Vec<usize>> {
    let query_chars: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    let candidate_chars: Vec<char> = candidate.chars().flat_map(char::to_lowercase).collect();

    if query_chars.is_empty() {
        return Some(Vec::new());
    }

    if query_chars.len() <= candidate_chars.len() {
        for start in 0..=candidate_chars.len() - query_chars.len() {
            if candidate_chars[start..start + query_chars.len()] == query_chars[..] {
                return Some((start..start + query_chars.len()).collect());
            }
        }
    }

    let mut indices = Vec::new();
    let mut qpos = 0;

    for (cpos, ch) in candidate_chars.iter().enumerate() {
        if qpos >= query_chars.len() {
            break;
        }
        if *ch == query_chars[qpos] {
            indices.push(cpos);
            qpos += 1;
        }
    }

    if qpos == query_chars.len() {
        Some(indices)
    } else {
        None
    }
}

fn score_match(candidate: &str, matched_indices: &[usize], query: &str) -> i32 {
    if matched_indices.is_empty() {
        return 0;
    }

    let chars: Vec<char> = candidate.chars().collect();
    let mut score = (matched_indices.len() as i32) * 10;

    if matched_indices.first() == Some(&0) {
        score += 30;
    }

    let mut consecutive_run = 1;
    for pair in matched_indices.windows(2) {
        if pair[1] == pair[0] + 1 {
            consecutive_run += 1;
            score += 8;
        } else {
            let gap = pair[1].saturating_sub(pair[0] + 1) as i32;
            score -= gap * 2;
        }
    }

    if consecutive_run == matched_indices.len() {
        score += 40;
    }

    for &idx in matched_indices {
        if idx == 0 {
            continue;
        }
        if chars.get(idx - 1).copied().is_some_and(is_boundary) {
            score += 12;
        }
    }

    if candidate.to_lowercase() == query.to_lowercase() {
        score += 100;
    }

    score - (chars.len() as i32) / 2
}

fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '/' | '_' | '-' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::top_matches;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefix_beats_scattered_subsequence() {
        let candidates = words(&["crab rangoon", "rust", "rusty nail"]);
        let matches = top_matches("rust", &candidates, 10);
        let order = matches.iter().map(|m| m.index).collect::<Vec<_>>();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn subsequence_matches_are_kept() {
        let candidates = words(&["read me", "zzz"]);
        let matches = top_matches("rdm", &candidates, 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index, 0);
    }

    #[test]
    fn limit_truncates_to_best() {
        let candidates = words(&["ab", "abc", "abcd", "xabx"]);
        let matches = top_matches("ab", &candidates, 2);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 0);
        assert!(top_matches("ab", &candidates, 0).is_empty());
    }
}
