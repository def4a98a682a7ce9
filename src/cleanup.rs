use num::Float;

use crate::Term;

/// Kill pairs of live terms that are equal up to sign.
///
/// Terms are expected to be alphabetized. Every term cancels against at most
/// one partner per call.
pub fn cleanup<T>(ordered: &mut [Term<T>])
where
    T: Float,
{
    for i in 0..ordered.len() {
        if ordered[i].skip {
            continue;
        }
        for j in i + 1..ordered.len() {
            if ordered[j].skip || !ordered[i].cancels(&ordered[j]) {
                continue;
            }
            ordered[i].skip = true;
            ordered[j].skip = true;
            break;
        }
    }
}

impl<T> Term<T>
where
    T: Float,
{
    /// Same factor, same operators, tensor, deltas and amplitudes, but
    /// opposite sign.
    pub fn cancels(
        &self,
        other: &Self,
    ) -> bool {
        self.factor == other.factor
            && self.sign != other.sign
            && self.symbols == other.symbols
            && self.tensor == other.tensor
            && self.same_deltas(other)
            && self.same_amplitudes(other)
    }

    /// Deltas compare as unordered pairs, in any order.
    fn same_deltas(
        &self,
        other: &Self,
    ) -> bool {
        self.deltas.len() == other.deltas.len()
            && self
                .deltas
                .iter()
                .all(|delta| other.deltas.iter().any(|d| delta.matches(d)))
    }

    /// Amplitudes compare as a multiset of index multisets.
    fn same_amplitudes(
        &self,
        other: &Self,
    ) -> bool {
        if self.amplitudes.len() != other.amplitudes.len() {
            return false;
        }

        let sorted = |amp: &Vec<String>| {
            let mut amp = amp.clone();
            amp.sort_unstable();
            amp
        };
        let mut unmatched: Vec<_> = other.amplitudes.iter().map(sorted).collect();
        for amp in self.amplitudes.iter().map(sorted) {
            match unmatched.iter().position(|candidate| *candidate == amp) {
                Some(at) => {
                    unmatched.swap_remove(at);
                }
                None => return false,
            }
        }
        true
    }
}
