//! Shape helpers shared by the batch (numeric) implementations.
//!
//! Convention: the event axis is the last axis, every other axis is a batch axis.

use ndarray::{ArrayD, ArrayViewD, Axis, stack};
use xo_core::{Error, Result};

/// Check a graph-mode event length.
pub(crate) fn check_event<T>(name: &str, event: &[T], expected: usize) -> Result<()> {
    if event.len() != expected {
        return Err(Error::Shape(format!(
            "{name}: expected an event of length {expected}, got {}",
            event.len()
        )));
    }
    Ok(())
}

/// Check a graph-mode event is non-empty.
pub(crate) fn check_nonempty<T>(name: &str, event: &[T]) -> Result<()> {
    if event.is_empty() {
        return Err(Error::Shape(format!("{name}: empty event")));
    }
    Ok(())
}

/// Split `x` along its last axis into `n` component views.
pub(crate) fn components<'a>(
    name: &str,
    x: &ArrayViewD<'a, f64>,
    n: usize,
) -> Result<Vec<ArrayViewD<'a, f64>>> {
    let last = last_axis(name, x)?;
    if x.len_of(last) != n {
        return Err(Error::Shape(format!(
            "{name}: expected last axis of length {n}, got shape {:?}",
            x.shape()
        )));
    }
    Ok((0..n).map(|i| x.clone().index_axis_move(last, i)).collect())
}

/// Stack equally-shaped components along a new last axis.
pub(crate) fn stack_components(name: &str, parts: &[ArrayD<f64>]) -> Result<ArrayD<f64>> {
    let ndim = parts.first().map(|p| p.ndim()).unwrap_or(0);
    let views: Vec<ArrayViewD<'_, f64>> = parts.iter().map(|p| p.view()).collect();
    stack(Axis(ndim), &views).map_err(|e| Error::Shape(format!("{name}: {e}")))
}

/// The event axis of `x`; rank-0 arrays have none.
pub(crate) fn last_axis(name: &str, x: &ArrayViewD<'_, f64>) -> Result<Axis> {
    match x.ndim() {
        0 => Err(Error::Shape(format!("{name}: expected at least one axis, got a scalar"))),
        n => Ok(Axis(n - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{IxDyn, array};

    #[test]
    fn test_components_and_stack_are_inverse() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].into_dyn();
        let parts = components("t", &x.view(), 2).unwrap();
        assert_eq!(parts[0].shape(), &[3]);
        assert_eq!(parts[1][IxDyn(&[2])], 6.0);

        let owned: Vec<ArrayD<f64>> = parts.iter().map(|p| p.to_owned()).collect();
        let back = stack_components("t", &owned).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn test_components_single_event() {
        let x = array![0.1, 0.2].into_dyn();
        let parts = components("t", &x.view(), 2).unwrap();
        assert_eq!(parts[0].ndim(), 0);
        let owned: Vec<ArrayD<f64>> = parts.iter().map(|p| p.to_owned()).collect();
        assert_eq!(stack_components("t", &owned).unwrap(), x);
    }

    #[test]
    fn test_wrong_last_axis_is_shape_error() {
        let x = array![[1.0, 2.0, 3.0]].into_dyn();
        assert!(matches!(components("t", &x.view(), 2), Err(Error::Shape(_))));
        let s = ndarray::arr0(1.0).into_dyn();
        assert!(matches!(components("t", &s.view(), 2), Err(Error::Shape(_))));
    }

    #[test]
    fn test_check_event() {
        assert!(check_event("t", &[1.0, 2.0], 2).is_ok());
        assert!(matches!(check_event("t", &[1.0], 2), Err(Error::Shape(_))));
        assert!(matches!(check_nonempty::<f64>("t", &[]), Err(Error::Shape(_))));
    }
}
