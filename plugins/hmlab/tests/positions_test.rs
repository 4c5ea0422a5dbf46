#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Edge end positioning and position merging.

use hmlab::matrix::layout::{merge_new_positions, position_ends};

#[test]
fn various_position_sequences() {
    assert_eq!(position_ends(&[-8, 0, 19]), vec![-1, 0, 1]);
    assert_eq!(position_ends(&[-9, -8, 0, 2, 19]), vec![-2, -1, 0, 1, 2]);
    assert_eq!(
        position_ends(&[-10, -9, -8, 0, 2, 19, 21]),
        vec![-3, -2, -1, 0, 1, 2, 3]
    );
    assert_eq!(position_ends(&[0]), vec![0]);
    assert_eq!(position_ends(&[-5]), vec![-1]);
    assert_eq!(position_ends(&[5]), vec![1]);
    assert_eq!(position_ends(&[1, 2, 5]), vec![1, 2, 3]);
    assert_eq!(position_ends(&[-1, -2, -5]), vec![-3, -2, -1]);
}

#[test]
fn asymmetrical_position_sequences() {
    assert_eq!(
        position_ends(&[-10, -9, -8, 2, 19, 21]),
        vec![-3, -2, -1, 1, 2, 3]
    );
    assert_eq!(position_ends(&[-10, -9, -8, 19]), vec![-3, -2, -1, 1]);
    assert_eq!(position_ends(&[-8, 19]), vec![-1, 1]);
    assert_eq!(position_ends(&[-8, 0]), vec![-1, 0]);
    assert_eq!(position_ends(&[0, 2]), vec![0, 1]);
    assert_eq!(position_ends(&[0, 0]), vec![0, 1]);
    assert_eq!(position_ends(&[0, 0, 0]), vec![-1, 0, 1]);
    assert_eq!(position_ends(&[-5, 0, 0, 2, 3]), vec![-2, -1, 0, 1, 2]);
    assert_eq!(position_ends(&[-5, -3, 0, 0, 3]), vec![-2, -1, 0, 1, 2]);
}

#[test]
fn merge_various_position_sequences() {
    assert_eq!(merge_new_positions(&[-1, 0, 1], vec![-1, 0]), vec![-2, 2]);
    assert_eq!(merge_new_positions(&[-1, 0, 1, 2], vec![-1, 0]), vec![-2, 3]);
    assert_eq!(merge_new_positions(&[-1, 1, 2], vec![-1, 0]), vec![-2, 0]);
    assert_eq!(
        merge_new_positions(&[-2, -1, 1, 2], vec![-1, 0, 2]),
        vec![-3, 0, 3]
    );
    assert_eq!(
        merge_new_positions(&[-2, -1, 1, 2], vec![-1, 0, 1]),
        vec![-3, 0, 3]
    );
}

#[test]
fn merge_various_position_sequences_ii() {
    assert_eq!(merge_new_positions(&[-2, -1], vec![-2, -1]), vec![-4, -3]);
    assert_eq!(merge_new_positions(&[1, 2], vec![1, 2]), vec![3, 4]);
}

#[test]
fn merge_without_fixed_positions_is_a_no_op() {
    assert_eq!(merge_new_positions(&[], vec![-1, 0, 1]), vec![-1, 0, 1]);
}
