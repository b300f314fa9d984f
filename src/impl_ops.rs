// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Elements that can be used as direct operands in arithmetic with
/// containers.
///
/// `m + 1.5`, `&m * 2.` and `m -= 3.` are defined for every `ScalarOperand`
/// on the right hand side. The primitive numeric types also get the scalar
/// on the left (`2. - &m`), keeping the operand order for `-` and `/`.
///
/// The operators panic when the shapes of two container operands disagree.
/// The fallible equivalents are [`sum_of`](crate::ArrayBase::sum_of) and
/// its siblings.
pub trait ScalarOperand: 'static + Clone {}

macro_rules! impl_scalar_operand {
    ($t:ty) => {
        impl ScalarOperand for $t {}
    };
}
for_each_numeric!(impl_scalar_operand);

macro_rules! impl_binary_op(
    ($trt:ident, $operator:tt, $mth:ident, $doc:expr) => (
/// Elementwise
#[doc=$doc]
/// of two containers, consuming both. The result reuses the storage of
/// `self`.
///
/// **Panics** if the shapes disagree.
impl<A, S, S2, D> $trt<ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: Clone + $trt<A, Output=A>,
    S: DataOwned<Elem=A> + DataMut,
    S2: Data<Elem=A>,
    D: Dimension,
{
    type Output = ArrayBase<S, D>;
    fn $mth(self, rhs: ArrayBase<S2, D>) -> Self::Output
    {
        self.$mth(&rhs)
    }
}

/// Elementwise
#[doc=$doc]
/// of an owned container and a borrowed one, written into the storage of
/// `self`.
///
/// **Panics** if the shapes disagree.
impl<'a, A, S, S2, D> $trt<&'a ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: Clone + $trt<A, Output=A>,
    S: DataOwned<Elem=A> + DataMut,
    S2: Data<Elem=A>,
    D: Dimension,
{
    type Output = ArrayBase<S, D>;
    fn $mth(mut self, rhs: &ArrayBase<S2, D>) -> Self::Output
    {
        ndassert!(self.shape() == rhs.shape(),
                  "{} of containers with shapes {:?} and {:?}", $doc, self.shape(), rhs.shape());
        self.zip_mut_with_same_shape(rhs, clone_iopf(A::$mth));
        self
    }
}

/// Elementwise
#[doc=$doc]
/// of a borrowed container and an owned one, written into the storage of
/// `rhs`. Operand order is kept.
///
/// **Panics** if the shapes disagree.
impl<'a, A, S, S2, D> $trt<ArrayBase<S2, D>> for &'a ArrayBase<S, D>
where
    A: Clone + $trt<A, Output=A>,
    S: Data<Elem=A>,
    S2: DataOwned<Elem=A> + DataMut,
    D: Dimension,
{
    type Output = ArrayBase<S2, D>;
    fn $mth(self, mut rhs: ArrayBase<S2, D>) -> Self::Output
    {
        ndassert!(self.shape() == rhs.shape(),
                  "{} of containers with shapes {:?} and {:?}", $doc, self.shape(), rhs.shape());
        rhs.zip_mut_with_same_shape(self, clone_iopf_rev(A::$mth));
        rhs
    }
}

/// Elementwise
#[doc=$doc]
/// of two borrowed containers into a new row major `Array`.
///
/// **Panics** if the shapes disagree. See
/// [`sum_of`](crate::ArrayBase::sum_of) for the `Result` form.
impl<'a, A, S, S2, D> $trt<&'a ArrayBase<S2, D>> for &'a ArrayBase<S, D>
where
    A: Clone + $trt<A, Output=A>,
    S: Data<Elem=A>,
    S2: Data<Elem=A>,
    D: Dimension,
{
    type Output = Array<A, D>;
    fn $mth(self, rhs: &'a ArrayBase<S2, D>) -> Self::Output
    {
        ndassert!(self.shape() == rhs.shape(),
                  "{} of containers with shapes {:?} and {:?}", $doc, self.shape(), rhs.shape());
        self.zip_map_same_shape(rhs, clone_opf(A::$mth))
    }
}

/// Elementwise
#[doc=$doc]
/// of every element of an owned container with the scalar `x`, in place.
impl<A, S, D, B> $trt<B> for ArrayBase<S, D>
    where A: Clone + $trt<B, Output=A>,
          S: DataOwned<Elem=A> + DataMut,
          D: Dimension,
          B: ScalarOperand,
{
    type Output = ArrayBase<S, D>;
    fn $mth(mut self, x: B) -> ArrayBase<S, D> {
        self.map_inplace(move |elt| {
            *elt = elt.clone() $operator x.clone();
        });
        self
    }
}

/// Elementwise
#[doc=$doc]
/// of every element with the scalar `x`, into a new `Array`.
impl<'a, A, S, D, B> $trt<B> for &'a ArrayBase<S, D>
    where A: Clone + $trt<B, Output=A>,
          S: Data<Elem=A>,
          D: Dimension,
          B: ScalarOperand,
{
    type Output = Array<A, D>;
    fn $mth(self, x: B) -> Self::Output {
        self.map(move |elt| elt.clone() $operator x.clone())
    }
}
    );
);

// `Commute` reuses the container-on-the-left impl, `Ordered` keeps `x @ elt`
macro_rules! if_commutative {
    (Commute { $a:expr } or { $b:expr }) => {
        $a
    };
    (Ordered { $a:expr } or { $b:expr }) => {
        $b
    };
}

macro_rules! impl_scalar_lhs_op {
    ($scalar:ty, $commutative:ident, $operator:tt, $trt:ident, $mth:ident) => (
// scalar on the left, owned container on the right
impl<S, D> $trt<ArrayBase<S, D>> for $scalar
    where S: DataOwned<Elem=$scalar> + DataMut,
          D: Dimension,
{
    type Output = ArrayBase<S, D>;
    fn $mth(self, rhs: ArrayBase<S, D>) -> ArrayBase<S, D> {
        if_commutative!($commutative {
            rhs.$mth(self)
        } or {{
            let mut rhs = rhs;
            rhs.map_inplace(move |elt| {
                *elt = self $operator *elt;
            });
            rhs
        }})
    }
}

// scalar on the left, borrowed container on the right
impl<'a, S, D> $trt<&'a ArrayBase<S, D>> for $scalar
    where S: Data<Elem=$scalar>,
          D: Dimension,
{
    type Output = Array<$scalar, D>;
    fn $mth(self, rhs: &ArrayBase<S, D>) -> Self::Output {
        if_commutative!($commutative {
            rhs.$mth(self)
        } or {
            rhs.map(move |elt| self $operator *elt)
        })
    }
}
    );
}

mod arithmetic_ops
{
    use super::*;
    use crate::{Array, ArrayBase, Data, DataMut, DataOwned, Dimension};

    use std::ops::*;

    fn clone_opf<A: Clone, B: Clone, C>(f: impl Fn(A, B) -> C) -> impl FnMut(&A, &B) -> C
    {
        move |x, y| f(x.clone(), y.clone())
    }

    fn clone_iopf<A: Clone, B: Clone>(f: impl Fn(A, B) -> A) -> impl FnMut(&mut A, &B)
    {
        move |x, y| *x = f(x.clone(), y.clone())
    }

    fn clone_iopf_rev<A: Clone>(f: impl Fn(A, A) -> A) -> impl FnMut(&mut A, &A)
    {
        move |x, y| *x = f(y.clone(), x.clone())
    }

    impl_binary_op!(Add, +, add, "addition");
    impl_binary_op!(Sub, -, sub, "subtraction");
    impl_binary_op!(Mul, *, mul, "multiplication");
    impl_binary_op!(Div, /, div, "division");
    impl_binary_op!(Rem, %, rem, "remainder");

    macro_rules! all_scalar_ops {
        ($scalar:ty) => {
            impl_scalar_lhs_op!($scalar, Commute, +, Add, add);
            impl_scalar_lhs_op!($scalar, Ordered, -, Sub, sub);
            impl_scalar_lhs_op!($scalar, Commute, *, Mul, mul);
            impl_scalar_lhs_op!($scalar, Ordered, /, Div, div);
            impl_scalar_lhs_op!($scalar, Ordered, %, Rem, rem);
        };
    }
    for_each_numeric!(all_scalar_ops);

    impl<A, S, D> Neg for ArrayBase<S, D>
    where
        A: Clone + Neg<Output = A>,
        S: DataOwned<Elem = A> + DataMut,
        D: Dimension,
    {
        type Output = Self;
        /// Perform an elementwise negation of `self` and return the result.
        fn neg(mut self) -> Self
        {
            self.map_inplace(|elt| {
                *elt = -elt.clone();
            });
            self
        }
    }

    impl<'a, A, S, D> Neg for &'a ArrayBase<S, D>
    where
        A: Clone + Neg<Output = A>,
        S: Data<Elem = A>,
        D: Dimension,
    {
        type Output = Array<A, D>;
        /// Perform an elementwise negation of reference `self` and return the
        /// result as a new `Array`.
        fn neg(self) -> Array<A, D>
        {
            self.map(|elt| -elt.clone())
        }
    }
}

mod assign_ops
{
    use super::*;
    use crate::{ArrayBase, Data, DataMut, Dimension};

    macro_rules! impl_assign_op {
        ($trt:ident, $method:ident, $doc:expr) => {
            use std::ops::$trt;

            #[doc=$doc]
            /// **Panics** if the shapes disagree.
            impl<'a, A, S, S2, D> $trt<&'a ArrayBase<S2, D>> for ArrayBase<S, D>
            where
                A: Clone + $trt<A>,
                S: DataMut<Elem = A>,
                S2: Data<Elem = A>,
                D: Dimension,
            {
                fn $method(&mut self, rhs: &ArrayBase<S2, D>)
                {
                    ndassert!(
                        self.shape() == rhs.shape(),
                        "assignment operator on containers with shapes {:?} and {:?}",
                        self.shape(),
                        rhs.shape()
                    );
                    self.zip_mut_with_same_shape(rhs, |x, y| {
                        x.$method(y.clone());
                    });
                }
            }

            #[doc=$doc]
            impl<A, S, D> $trt<A> for ArrayBase<S, D>
            where
                A: ScalarOperand + $trt<A>,
                S: DataMut<Elem = A>,
                D: Dimension,
            {
                fn $method(&mut self, rhs: A)
                {
                    self.map_inplace(move |elt| {
                        elt.$method(rhs.clone());
                    });
                }
            }
        };
    }

    impl_assign_op!(
        AddAssign,
        add_assign,
        "Perform `self += rhs` as elementwise addition (in place).\n"
    );
    impl_assign_op!(
        SubAssign,
        sub_assign,
        "Perform `self -= rhs` as elementwise subtraction (in place).\n"
    );
    impl_assign_op!(
        MulAssign,
        mul_assign,
        "Perform `self *= rhs` as elementwise multiplication (in place).\n"
    );
    impl_assign_op!(
        DivAssign,
        div_assign,
        "Perform `self /= rhs` as elementwise division (in place).\n"
    );
    impl_assign_op!(
        RemAssign,
        rem_assign,
        "Perform `self %= rhs` as elementwise remainder (in place).\n"
    );
}

#[cfg(test)]
mod tests
{
    use crate::{arr1, arr2, Array, ShapeBuilder};

    #[test]
    fn container_operands_pair_by_logical_index()
    {
        let a = arr2(&[[1, 2], [3, 4]]);
        let b = Array::from_shape_vec((2, 2).f(), vec![10, 30, 20, 40]).unwrap();
        assert_eq!(&a + &b, arr2(&[[11, 22], [33, 44]]));
        assert_eq!(&b - &a, arr2(&[[9, 18], [27, 36]]));
        assert_eq!(a.clone() * &b, arr2(&[[10, 40], [90, 160]]));
        assert_eq!(&b / a.clone(), arr2(&[[10, 10], [10, 10]]));
    }

    #[test]
    fn scalar_operands_keep_order()
    {
        let a = arr1(&[1., 2., 4.]);
        assert_eq!(&a * 2., arr1(&[2., 4., 8.]));
        assert_eq!(8. / &a, arr1(&[8., 4., 2.]));
        assert_eq!(1. - a.clone(), arr1(&[0., -1., -3.]));
        assert_eq!(-&a, arr1(&[-1., -2., -4.]));
        assert_eq!(arr1(&[7u8, 9]) % 4, arr1(&[3, 1]));
    }

    #[test]
    fn assign_ops_on_views()
    {
        let mut m = arr2(&[[1, 2, 3], [4, 5, 6]]);
        {
            let mut col = m.column_mut(1);
            col += 10;
        }
        let ones = Array::ones((2, 3));
        m -= &ones;
        assert_eq!(m, arr2(&[[0, 11, 2], [3, 14, 5]]));
    }

    #[test]
    #[should_panic]
    fn mismatched_shapes_panic()
    {
        let _ = &arr1(&[1, 2]) + &arr1(&[1, 2, 3]);
    }
}
