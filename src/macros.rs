//! Custom macro definitions

#[macro_export]
/// Assert that two floats agree within the given tolerance
macro_rules! assert_fuzzy_eq {
    ( $left:expr, $right:expr, $tol:expr ) => {{
        let (left_val, right_val, tol) = (&($left), &($right), &($tol));
        if (*left_val - *right_val).abs() >= *tol {
            panic!(
                "assertion failed: `{:?}` and `{:?}` differ by more than `{:?}`",
                *left_val, *right_val, *tol
            )
        }
    }};
}
