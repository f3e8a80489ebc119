// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Unit tests for the circular array
*/
#[cfg(test)]
use super::*;

#[test]
fn test_basic_indexing() {
    let arr = CircularArray::new([10, 20, 30, 40]);
    assert_eq!(arr[0], 10);
    assert_eq!(arr[3], 40);
    assert_eq!(arr.len(), 4);
}

#[test]
fn test_wrapping() {
    let arr = CircularArray::new([10, 20, 30, 40]);
    assert_eq!(arr[4], 10);
    assert_eq!(arr[5], 20);
    assert_eq!(arr[-1], 40);
    assert_eq!(arr[-4], 10);
    assert_eq!(arr[-5], 40);
    assert_eq!(arr[11], 40);
}

#[test]
fn test_mutation() {
    let mut arr = CircularArray::new([0.0; 4]);
    arr[-1] = 4.0;
    arr.set(5, 2.0);
    assert_eq!(arr[3], 4.0);
    assert_eq!(arr[1], 2.0);
    arr.fill(7.0);
    assert!(arr.iter().all(|&v| v == 7.0));
}

#[test]
fn test_iteration_order() {
    let arr = CircularArray::new([1, 2, 3, 4]);
    let collected: Vec<i32> = arr.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3, 4]);
    assert_eq!(arr.as_slice(), &[1, 2, 3, 4]);
}
