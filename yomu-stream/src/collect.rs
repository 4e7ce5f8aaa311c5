//! Eager collection on top of [`SentenceIter`]

use crate::error::Result;
use crate::iter::SentenceIter;
use crate::morpheme::{Analyzer, MorphemeList, SplitMode};
use crate::segment::Segmenter;
use crate::source::CharSource;

/// Drain `iter` into one list per sentence
///
/// Uses only the public `has_next`/`next_sentence` contract, so the result is
/// exactly what manual pulling would produce. The first fault is returned
/// as is and no partial result is kept.
pub fn collect_all<S, G, A>(iter: &mut SentenceIter<S, G, A>) -> Result<Vec<MorphemeList>>
where
    S: CharSource,
    G: Segmenter,
    A: Analyzer,
{
    let mut sentences = Vec::new();
    while iter.has_next()? {
        sentences.push(iter.next_sentence()?);
    }
    Ok(sentences)
}

/// Split and analyze the whole of `source`
pub fn tokenize_all<S, G, A>(
    source: S,
    segmenter: G,
    analyzer: A,
    mode: SplitMode,
) -> Result<Vec<MorphemeList>>
where
    S: CharSource,
    G: Segmenter,
    A: Analyzer,
{
    collect_all(&mut SentenceIter::new(source, segmenter, analyzer, mode))
}
