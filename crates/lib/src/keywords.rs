//! # Keyword Frequency Tables
//!
//! Ranks the words that show up most often in pattern titles. The negative table is
//! built from critical and bad titles, the positive one from good titles.

use crate::types::KeywordScore;
use std::collections::HashMap;

/// Tokens at or below this many characters are ignored.
const MIN_TOKEN_CHARS: usize = 4;

/// Points awarded per occurrence of a token.
const SCORE_PER_OCCURRENCE: u32 = 10;

/// Lower-cased whitespace tokens longer than four characters that are purely alphabetic.
fn tokens(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS && t.chars().all(char::is_alphabetic))
}

/// Counts tokens across `titles` and returns the `limit` most frequent ones.
///
/// Ties keep the order in which tokens were first seen.
pub fn keyword_scores<'a, I>(titles: I, limit: usize) -> Vec<KeywordScore>
where
    I: IntoIterator<Item = &'a str>,
{
    let (mut counts, _) = titles.into_iter().flat_map(tokens).fold(
        (Vec::<(String, u32)>::new(), HashMap::<String, usize>::new()),
        |(mut counts, mut index), token| {
            match index.get(&token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push((token, 1));
                }
            }
            (counts, index)
        },
    );

    // `sort_by` is stable, so first-seen order survives among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(word, count)| KeywordScore {
            word,
            score: count * SCORE_PER_OCCURRENCE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_filter_short_and_non_alphabetic() {
        let kept: Vec<String> = tokens("The Service's data 3rd-party shared widely").collect();
        assert_eq!(kept, vec!["shared", "widely"]);
    }

    #[test]
    fn test_limit_is_respected() {
        let scores = keyword_scores(["alpha bravo charlie delta"], 2);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].word, "alpha");
        assert_eq!(scores[1].word, "bravo");
    }
}
