// Copyright 2016-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random filling of containers, built on [`rand`] and [`rand_distr`].
//!
//! [`RandomFill`] overwrites every leaf scalar of a value, container,
//! fixed-size container or nested container with an independent uniform
//! sample in `[min, max]`: integers are drawn from the inclusive integer
//! range and floats continuously. [`RandomExt`] creates new owned
//! containers from any distribution.
//!
//! Without an explicit generator, each call seeds a fast generator from the
//! thread-local entropy source, so repeated calls give different values.
//! Pass your own seeded generator to the `_using` variants for reproducible
//! results.
//!
//! ```
//! use ndcontainer::Array2;
//! use ndcontainer_rand::rand::{rngs::SmallRng, SeedableRng};
//! use ndcontainer_rand::RandomFill;
//!
//! let mut a = Array2::<f64>::zeros((12, 23));
//! a.fill_uniform(-10., 10.);
//! assert!(a.iter().all(|&x| (-10. ..=10.).contains(&x)));
//!
//! let mut b = Array2::<i32>::zeros((2, 3));
//! let mut c = b.clone();
//! b.fill_uniform_using(0, 9, &mut SmallRng::seed_from_u64(7));
//! c.fill_uniform_using(0, 9, &mut SmallRng::seed_from_u64(7));
//! assert_eq!(b, c);
//! ```

use crate::rand::distr::uniform::SampleUniform;
use crate::rand::rngs::SmallRng;
use crate::rand::{Rng, SeedableRng};
use crate::rand_distr::Distribution;

use ndcontainer::fixed::{FixedArray3, FixedContainer, FixedMatrix, FixedVector};
use ndcontainer::{ArrayBase, DataMut, DataOwned, Dimension, ShapeBuilder};

/// [`rand`](https://docs.rs/rand/), re-exported for convenience and version-compatibility.
pub mod rand
{
    pub use rand::*;
}

/// [`rand-distr`](https://docs.rs/rand_distr/), re-exported for convenience and version-compatibility.
pub mod rand_distr
{
    pub use rand_distr::*;
}

fn get_rng() -> SmallRng
{
    SmallRng::from_rng(&mut crate::rand::rng())
}

/// Overwrite every leaf scalar of type `T` with a uniform sample.
pub trait RandomFill<T>
{
    /// Fill with samples in `[min, max]` drawn from `rng`.
    ///
    /// ***Panics*** if `min > max`, or if either bound of a float range is
    /// not finite.
    fn fill_uniform_using<R>(&mut self, min: T, max: T, rng: &mut R)
    where R: Rng + ?Sized;

    /// Fill with samples in `[min, max]` from a freshly seeded generator.
    ///
    /// ***Panics*** like [`fill_uniform_using`](Self::fill_uniform_using).
    fn fill_uniform(&mut self, min: T, max: T)
    {
        self.fill_uniform_using(min, max, &mut get_rng())
    }
}

macro_rules! impl_fill_leaf {
    ($($t:ty),*) => {
        $(
            impl RandomFill<$t> for $t
            {
                fn fill_uniform_using<R>(&mut self, min: $t, max: $t, rng: &mut R)
                where R: Rng + ?Sized
                {
                    *self = rng.random_range(min..=max);
                }
            }
        )*
    };
}

impl_fill_leaf!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<T, A, S, D> RandomFill<T> for ArrayBase<S, D>
where
    T: Copy,
    A: RandomFill<T>,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    fn fill_uniform_using<R>(&mut self, min: T, max: T, rng: &mut R)
    where R: Rng + ?Sized
    {
        for elt in self.iter_mut() {
            elt.fill_uniform_using(min, max, rng);
        }
    }
}

macro_rules! impl_fill_fixed {
    ([$($cg:tt)*] $ty:ty) => {
        impl<T, A, $($cg)*> RandomFill<T> for $ty
        where
            T: Copy,
            A: RandomFill<T> + Copy,
        {
            fn fill_uniform_using<G>(&mut self, min: T, max: T, rng: &mut G)
            where G: Rng + ?Sized
            {
                self.view_mut().fill_uniform_using(min, max, rng);
            }
        }
    };
}

impl_fill_fixed!([const N: usize] FixedVector<A, N>);
impl_fill_fixed!([const R: usize, const C: usize] FixedMatrix<A, R, C>);
impl_fill_fixed!([const P: usize, const R: usize, const C: usize] FixedArray3<A, P, R, C>);

/// Constructors for containers with random elements.
///
/// This trait extends ndcontainer's `ArrayBase` and can not be implemented
/// for other types.
///
/// The default generator is a fast, automatically seeded one
/// (`rand::rngs::SmallRng`).
pub trait RandomExt<S, A, D>
where
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    /// Create a container of shape `shape` with elements drawn from
    /// `distribution` using the default generator.
    ///
    /// ```
    /// use ndcontainer::Array;
    /// use ndcontainer_rand::rand_distr::Normal;
    /// use ndcontainer_rand::RandomExt;
    ///
    /// let a = Array::random((2, 5), Normal::new(0., 1.).unwrap());
    /// assert_eq!(a.shape(), &[2, 5]);
    /// ```
    fn random<Sh, IdS>(shape: Sh, distribution: IdS) -> ArrayBase<S, D>
    where
        IdS: Distribution<A>,
        Sh: ShapeBuilder<Dim = D>;

    /// Create a container of shape `shape` with elements drawn from
    /// `distribution`, using a specific generator `rng`.
    fn random_using<Sh, IdS, R>(shape: Sh, distribution: IdS, rng: &mut R) -> ArrayBase<S, D>
    where
        IdS: Distribution<A>,
        R: Rng + ?Sized,
        Sh: ShapeBuilder<Dim = D>;

    /// Create a container of shape `shape` with uniform samples in
    /// `[min, max]` using the default generator.
    ///
    /// ***Panics*** if `min > max`, or if either bound of a float range is
    /// not finite.
    fn random_uniform<Sh>(shape: Sh, min: A, max: A) -> ArrayBase<S, D>
    where
        A: SampleUniform + PartialOrd + Copy,
        Sh: ShapeBuilder<Dim = D>;
}

impl<S, A, D> RandomExt<S, A, D> for ArrayBase<S, D>
where
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    fn random<Sh, IdS>(shape: Sh, dist: IdS) -> ArrayBase<S, D>
    where
        IdS: Distribution<A>,
        Sh: ShapeBuilder<Dim = D>,
    {
        Self::random_using(shape, dist, &mut get_rng())
    }

    fn random_using<Sh, IdS, R>(shape: Sh, dist: IdS, rng: &mut R) -> ArrayBase<S, D>
    where
        IdS: Distribution<A>,
        R: Rng + ?Sized,
        Sh: ShapeBuilder<Dim = D>,
    {
        Self::from_shape_simple_fn(shape, move || dist.sample(rng))
    }

    fn random_uniform<Sh>(shape: Sh, min: A, max: A) -> ArrayBase<S, D>
    where
        A: SampleUniform + PartialOrd + Copy,
        Sh: ShapeBuilder<Dim = D>,
    {
        let mut rng = get_rng();
        Self::from_shape_simple_fn(shape, move || rng.random_range(min..=max))
    }
}
