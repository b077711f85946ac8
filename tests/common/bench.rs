use super::*;
extern crate test;
use test::Bencher;

use arbor::{avl::AVLTree, red_black::RedBlackTree};

pub fn bench_tree<T>(b: &mut Bencher)
where
    T: SomeTree<i32> + std::iter::FromIterator<i32>,
{
    let mut rng = rand::thread_rng();
    let mut tree: T = (0..MAX_VALUE).filter(|x| x % 2 == 0).collect();
    b.iter(|| {
        let round_action = random_round_action(&mut rng);
        let res = run_round(round_action, &mut tree);
        test::bench::black_box(res);
    });
}

pub fn bench_ascending_inserts<T>(b: &mut Bencher)
where
    T: SomeTree<i32> + Default,
{
    b.iter(|| {
        let mut tree = T::default();
        for x in 0..1_000 {
            tree.insert(x).unwrap();
        }
        test::bench::black_box(tree.len());
    });
}

#[bench]
fn bench_avl(b: &mut Bencher) {
    bench_tree::<AVLTree<_>>(b)
}

#[bench]
fn bench_red_black(b: &mut Bencher) {
    bench_tree::<RedBlackTree<_>>(b)
}

#[bench]
fn bench_avl_ascending(b: &mut Bencher) {
    bench_ascending_inserts::<AVLTree<_>>(b)
}

#[bench]
fn bench_red_black_ascending(b: &mut Bencher) {
    bench_ascending_inserts::<RedBlackTree<_>>(b)
}
