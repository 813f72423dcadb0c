//! LCS-anchored pronunciation alignment.

use smol_str::SmolStr;

use crate::errors::PhonologyError;
use crate::tables::FILLER;

use super::PhonemeList;

impl PhonemeList {
    /// Makes two pronunciations the same length by inserting fillers.
    ///
    /// The longest common subsequence of the two phone sequences is
    /// used as a set of anchors; between consecutive anchors each side
    /// keeps its own unmatched phones and the shorter side is padded
    /// with fillers so that every anchor lands at the same output
    /// offset in both sequences.
    ///
    /// With `simplified_matching` the anchors are found on the
    /// simplified forms, so e.g. `"ɹ"` and `"r"` match, and the outputs
    /// are rebuilt from the original-resolution phones.
    ///
    /// Where the LCS is ambiguous, anchors are resolved to the first
    /// unmatched occurrence scanning left to right. This is a
    /// deterministic tie-break, not a claim of global optimality.
    pub fn align(
        &self,
        target: &PhonemeList,
        simplified_matching: bool,
    ) -> Result<(PhonemeList, PhonemeList), PhonologyError> {
        let (aligned_self, aligned_target) = if simplified_matching {
            let (a, b) = self.simplify()?.align_exact(&target.simplify()?);
            (unsimplify(&a, self)?, unsimplify(&b, target)?)
        } else {
            self.align_exact(target)
        };

        if aligned_self.len() != aligned_target.len() {
            return Err(PhonologyError::Unexpected(format!(
                "alignment produced sequences of unequal length ({} vs {})",
                aligned_self.len(),
                aligned_target.len()
            )));
        }

        Ok((aligned_self, aligned_target))
    }

    fn align_exact(&self, target: &PhonemeList) -> (PhonemeList, PhonemeList) {
        let anchors = lcs(&target.phones, &self.phones);

        let mut at_self = Vec::with_capacity(anchors.len() + 1);
        let mut at_target = Vec::with_capacity(anchors.len() + 1);
        let mut cursor_self = 0;
        let mut cursor_target = 0;
        for phone in &anchors {
            // LCS members occur in order in both sequences, so both
            // scans are guaranteed to hit.
            if let (Some(i), Some(j)) = (
                self.phones[cursor_self..].iter().position(|p| p == phone),
                target.phones[cursor_target..].iter().position(|p| p == phone),
            ) {
                at_self.push(cursor_self + i);
                at_target.push(cursor_target + j);
                cursor_self += i + 1;
                cursor_target += j + 1;
            }
        }
        at_self.push(self.len());
        at_target.push(target.len());

        let mut out_self = Vec::with_capacity(self.len().max(target.len()));
        let mut out_target = Vec::with_capacity(self.len().max(target.len()));
        let mut prev_self = 0;
        let mut prev_target = 0;
        for (k, (&ia, &ib)) in at_self.iter().zip(at_target.iter()).enumerate() {
            let span_self = ia - prev_self;
            let span_target = ib - prev_target;
            let width = span_self.max(span_target);

            out_self.extend(self.phones[prev_self..ia].iter().cloned());
            out_self.extend((span_self..width).map(|_| SmolStr::new(FILLER)));
            out_target.extend(target.phones[prev_target..ib].iter().cloned());
            out_target.extend((span_target..width).map(|_| SmolStr::new(FILLER)));

            if k < anchors.len() {
                out_self.push(self.phones[ia].clone());
                out_target.push(target.phones[ib].clone());
                prev_self = ia + 1;
                prev_target = ib + 1;
            }
        }

        (
            PhonemeList::from_raw(out_self),
            PhonemeList::from_raw(out_target),
        )
    }
}

/// Rebuilds an aligned simplified sequence at original resolution:
/// every non-filler position takes the next original phone in order.
fn unsimplify(
    aligned: &PhonemeList,
    original: &PhonemeList,
) -> Result<PhonemeList, PhonologyError> {
    let mut source = original.phones.iter();
    let mut phones = Vec::with_capacity(aligned.len());
    for phone in &aligned.phones {
        if phone.as_str() == FILLER {
            phones.push(SmolStr::new(FILLER));
        } else {
            let next = source.next().ok_or_else(|| {
                PhonologyError::Unexpected(
                    "ran out of original phones while undoing simplification".to_string(),
                )
            })?;
            phones.push(next.clone());
        }
    }
    Ok(PhonemeList::from_raw(phones))
}

/// Longest common subsequence by divide and conquer over LCS-length
/// vectors, avoiding the quadratic-space table.
///
/// The first sequence is halved; forward length vectors for the left
/// half and backward vectors for the right half meet at the split point
/// of the second sequence that maximizes their sum (the largest such
/// index among ties), and both halves recurse.
pub(crate) fn lcs<T: Clone + PartialEq>(xs: &[T], ys: &[T]) -> Vec<T> {
    match xs.len() {
        0 => vec![],
        1 => {
            if ys.contains(&xs[0]) {
                vec![xs[0].clone()]
            } else {
                vec![]
            }
        }
        nx => {
            let ny = ys.len();
            let (xb, xe) = xs.split_at(nx / 2);

            let forward = lcs_lengths(xb.iter(), ys.iter());
            let backward = lcs_lengths(xe.iter().rev(), ys.iter().rev());

            let mut split = 0;
            let mut best = 0;
            for j in 0..=ny {
                let total = forward[j] + backward[ny - j];
                if total >= best {
                    best = total;
                    split = j;
                }
            }

            let (yb, ye) = ys.split_at(split);
            let mut out = lcs(xb, yb);
            out.extend(lcs(xe, ye));
            out
        }
    }
}

fn lcs_lengths<'a, T, X, Y>(xs: X, ys: Y) -> Vec<usize>
where
    T: PartialEq + 'a,
    X: Iterator<Item = &'a T>,
    Y: Iterator<Item = &'a T>,
{
    let ys: Vec<&T> = ys.collect();
    let mut curr = vec![0; ys.len() + 1];
    for x in xs {
        let prev = curr.clone();
        for (i, y) in ys.iter().enumerate() {
            curr[i + 1] = if x == *y {
                prev[i] + 1
            } else {
                curr[i].max(prev[i + 1])
            };
        }
    }
    curr
}
