// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{ArrayBase, Data, Dimension};

/// Return `true` if the shapes agree and `f` holds for every pair of
/// elements at the same logical index.
fn all_pairs<A, B, S, S2, D, F>(a: &ArrayBase<S, D>, b: &ArrayBase<S2, D>, mut f: F) -> bool
where
    S: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
    F: FnMut(&A, &B) -> bool,
{
    a.shape() == b.shape() && a.iter_logical().zip(b.iter_logical()).all(|(x, y)| f(x, y))
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2, D> AbsDiffEq<ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: AbsDiffEq<B>,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon
    {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &ArrayBase<S2, D>, epsilon: A::Epsilon) -> bool
    {
        all_pairs(self, other, |a, b| A::abs_diff_eq(a, b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2, D> RelativeEq<ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: RelativeEq<B>,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
{
    fn default_max_relative() -> A::Epsilon
    {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &ArrayBase<S2, D>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool
    {
        all_pairs(self, other, |a, b| A::relative_eq(a, b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`**
impl<A, B, S, S2, D> UlpsEq<ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: UlpsEq<B>,
    A::Epsilon: Clone,
    S: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
{
    fn default_max_ulps() -> u32
    {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &ArrayBase<S2, D>, epsilon: A::Epsilon, max_ulps: u32) -> bool
    {
        all_pairs(self, other, |a, b| A::ulps_eq(a, b, epsilon.clone(), max_ulps))
    }
}

#[cfg(test)]
mod tests
{
    use crate::{arr2, Array2, ShapeBuilder};
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne, assert_ulps_eq};

    #[test]
    fn abs_diff_eq()
    {
        let a: Array2<f32> = arr2(&[[0., 2.], [-0.000010001, 100000000.]]);
        let mut b: Array2<f32> = arr2(&[[0., 1.], [-0.000010002, 100000001.]]);
        assert_abs_diff_ne!(a, b);
        b[[0, 1]] = 2.;
        assert_abs_diff_eq!(a, b);
    }

    #[test]
    fn relative_eq_across_orders()
    {
        let a = arr2(&[[1., 2.], [3., 4.]]);
        let b = Array2::from_shape_vec((2, 2).f(), vec![1., 3. + 1e-12, 2., 4.]).unwrap();
        assert_relative_eq!(a, b);
        assert_ulps_eq!(a.view(), b.view(), max_ulps = 4096);
        assert_relative_ne!(a, arr2(&[[1., 2.], [3., 4.5]]));
        assert_abs_diff_ne!(a, Array2::<f64>::zeros((1, 4)));
    }
}
