#[cfg(feature = "bench")]
pub mod bench;

pub use arbor::*;
use proptest::prelude::*;
use rand::{self, Rng};
use std::collections::BTreeSet;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert(i32),
    Remove(i32),
    Take(i32),
    Contains(i32),
    Pop,
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Done,
    Failed,
    Found(bool),
    Value(Option<i32>),
}

pub const MAX_VALUE: i32 = 300;

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng) -> RoundAction {
    use RoundAction::*;
    let value = rng.gen_range(0..MAX_VALUE);
    match rng.gen_range(0..8) {
        0..=2 => Insert(value),
        3 | 4 => Remove(value),
        5 => Take(value),
        6 => Contains(value),
        7 => Pop,
        _ => {
            panic!()
        }
    }
}

pub fn run_round<T: SomeTree<i32>>(round_action: RoundAction, tree: &mut T) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;

    match round_action {
        Insert(value) => match tree.insert(value) {
            Ok(()) => Done,
            Err(rejected) => {
                // the element comes back untouched
                assert_eq!(rejected.into_inner(), value);
                Failed
            }
        },
        Remove(value) => match tree.remove(&value) {
            Ok(()) => Done,
            Err(err) => {
                assert_eq!(err, TreeError::NotFound);
                Failed
            }
        },
        Take(value) => Value(tree.take(&value)),
        Contains(value) => Found(tree.contains(&value)),
        Pop => {
            let top = tree.peek().cloned();
            match tree.pop() {
                Ok(()) => Value(top),
                Err(err) => {
                    assert_eq!(err, TreeError::EmptyTree);
                    Value(None)
                }
            }
        }
    }
}

/// Applies the round to the model, and checks that the tree's result agrees with it.
/// `pop` removes whatever is at the root of the tree, so the model takes the tree's word
/// for which element that is, and only checks that it was there.
pub fn check_round(
    round_action: &RoundAction,
    result: &RoundResult,
    model: &mut BTreeSet<i32>,
) -> Result<(), TestCaseError> {
    use RoundAction::*;
    use RoundResult::*;

    let expected = match *round_action {
        Insert(value) => {
            if model.insert(value) {
                Done
            } else {
                Failed
            }
        }
        Remove(value) => {
            if model.remove(&value) {
                Done
            } else {
                Failed
            }
        }
        Take(value) => Value(model.take(&value)),
        Contains(value) => Found(model.contains(&value)),
        Pop => match *result {
            Value(Some(top)) => {
                prop_assert!(model.remove(&top), "popped {} which wasn't there", top);
                Value(Some(top))
            }
            _ => {
                prop_assert!(model.is_empty());
                Value(None)
            }
        },
    };
    prop_assert_eq!(result, &expected);
    Ok(())
}

/// Compares everything observable about the tree with the model.
pub fn check_against_model<T: SomeTree<i32>>(
    tree: &T,
    model: &BTreeSet<i32>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(tree.len(), model.len());
    prop_assert_eq!(tree.min(), model.iter().next());
    prop_assert_eq!(tree.max(), model.iter().next_back());
    prop_assert!(tree.iter().eq(model.iter()));
    Ok(())
}

const INITIAL_SIZE: i32 = 200;
pub fn check_consistency<T>(num_rounds: u32)
where
    T: SomeTree<i32> + std::iter::FromIterator<i32>,
{
    let mut rng = rand::thread_rng();
    let mut tree: T = (0..INITIAL_SIZE).collect();
    let mut model: BTreeSet<i32> = (0..INITIAL_SIZE).collect();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng);
        let res = run_round(round_action.clone(), &mut tree);
        check_round(&round_action, &res, &mut model).unwrap();
        check_against_model(&tree, &model).unwrap();
        // This check takes `O(n)` time. However, the trees stay small in this test,
        // so it doesn't take too long.
        tree.assert_correctness();
    }
}

pub fn check_consistency_proptest<T>(
    initial: &[i32],
    actions: &[RoundAction],
) -> Result<(), TestCaseError>
where
    T: SomeTree<i32> + std::iter::FromIterator<i32>,
{
    let mut tree: T = initial.iter().cloned().collect();
    let mut model: BTreeSet<i32> = initial.iter().cloned().collect();
    check_against_model(&tree, &model)?;

    for round_action in actions {
        let res = run_round(round_action.clone(), &mut tree);
        check_round(round_action, &res, &mut model)?;
        check_against_model(&tree, &model)?;
        tree.assert_correctness();
    }
    Ok(())
}

/// Deletes every element of a tree of 500 elements, one at a time, each from a fresh tree.
pub fn check_delete<T>()
where
    T: SomeTree<i32> + std::iter::FromIterator<i32>,
{
    let arr: Vec<i32> = (0..500).collect();
    for i in 0..arr.len() {
        let mut tree: T = arr.iter().cloned().collect();
        assert_eq!(tree.take(&arr[i]), Some(arr[i]));
        tree.assert_correctness();
        assert_eq!(
            tree.iter().cloned().collect::<Vec<_>>(),
            arr[..i]
                .iter()
                .chain(arr[i + 1..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );
    }
}

/// Routes the trees' `log` output to the test harness. Safe to call from every test.
pub fn init_logging() {
    use simplelog::*;
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
