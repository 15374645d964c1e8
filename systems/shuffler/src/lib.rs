#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized direction ordering consumed by the maze carver.

use maze_forge_core::{Direction, DirectionSource};
use rand::Rng;

/// Shuffles `items` in place with a forward Fisher–Yates pass.
///
/// For every index `i` except the last, an index `r` is drawn uniformly from
/// `i..len` and the two elements are swapped. The draw order is part of the
/// contract: seeded generators reproduce the same permutation sequence.
pub fn shuffle_in_place<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let len = items.len();
    for index in 0..len.saturating_sub(1) {
        let swap_index = rng.gen_range(index..len);
        items.swap(index, swap_index);
    }
}

/// Returns a uniformly random permutation of [`Direction::ALL`].
#[must_use]
pub fn shuffled_directions<R>(rng: &mut R) -> [Direction; 4]
where
    R: Rng + ?Sized,
{
    let mut directions = Direction::ALL;
    shuffle_in_place(&mut directions, rng);
    directions
}

/// [`DirectionSource`] that draws a fresh permutation from a random source on
/// every request.
#[derive(Debug)]
pub struct DirectionShuffler<'rng, R: ?Sized> {
    rng: &'rng mut R,
}

impl<'rng, R> DirectionShuffler<'rng, R>
where
    R: Rng + ?Sized,
{
    /// Creates a shuffler that borrows the provided random source.
    #[must_use]
    pub fn new(rng: &'rng mut R) -> Self {
        Self { rng }
    }
}

impl<R> DirectionSource for DirectionShuffler<'_, R>
where
    R: Rng + ?Sized,
{
    fn next_order(&mut self) -> [Direction; 4] {
        shuffled_directions(&mut *self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn single_element_is_left_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut items = [42];
        shuffle_in_place(&mut items, &mut rng);
        assert_eq!(items, [42]);
    }

    #[test]
    fn empty_slice_is_accepted() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut items: [u8; 0] = [];
        shuffle_in_place(&mut items, &mut rng);
    }
}
