use num::Float;

use crate::{
    Sign,
    Symbol,
    Term,
};

/// Sort the creation block and the annihilation block of every live term by
/// the first character of each label, and orient every delta the same way.
///
/// Each transposition of two operators flips the term's sign. The two blocks
/// are sorted independently and never exchange operators.
pub fn alphabetize<T>(ordered: &mut [Term<T>])
where
    T: Float,
{
    for term in ordered.iter_mut().filter(|term| !term.skip) {
        term.alphabetize();
    }
}

impl<T> Term<T>
where
    T: Float,
{
    pub fn alphabetize(&mut self) {
        let creators = self.symbols.iter().take_while(|s| s.dagger).count();
        let (cr, an) = self.symbols.split_at_mut(creators);
        sort_block(cr, &mut self.sign);
        sort_block(an, &mut self.sign);

        self.deltas = std::mem::take(&mut self.deltas)
            .into_iter()
            .map(|delta| delta.canonical())
            .collect();
    }
}

fn sort_block(
    block: &mut [Symbol],
    sign: &mut Sign,
) {
    let mut sorted = false;
    while !sorted {
        sorted = true;
        for j in 1..block.len() {
            if block[j].key() < block[j - 1].key() {
                block.swap(j - 1, j);
                *sign = sign.flip();
                sorted = false;
            }
        }
    }
}
