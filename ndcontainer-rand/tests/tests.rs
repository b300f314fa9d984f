use ndcontainer::fixed::{FixedMatrix, FixedVector};
use ndcontainer::serialize::{from_binary, from_text, to_binary, to_text};
use ndcontainer::{arr1, Array, Array1, Array2};
use ndcontainer_rand::rand::rngs::SmallRng;
use ndcontainer_rand::rand::SeedableRng;
use ndcontainer_rand::rand_distr::Uniform;
use ndcontainer_rand::{RandomExt, RandomFill};
use quickcheck::quickcheck;

#[test]
fn test_dim()
{
    let (mm, nn) = (5, 5);
    for m in 0..mm {
        for n in 0..nn {
            let a = Array::random((m, n), Uniform::new(0., 2.).unwrap());
            assert_eq!(a.shape(), &[m, n]);
            assert!(a.iter().all(|x| *x < 2.));
            assert!(a.iter().all(|x| *x >= 0.));
        }
    }
}

#[test]
fn seeded_fills_repeat()
{
    let mut a = Array2::<f64>::zeros((12, 23));
    let mut b = Array2::<f64>::zeros((12, 23));
    a.fill_uniform_using(-10., 10., &mut SmallRng::seed_from_u64(42));
    b.fill_uniform_using(-10., 10., &mut SmallRng::seed_from_u64(42));
    assert_eq!(a, b);
    let c = Array2::random_using((12, 23), Uniform::new_inclusive(-10., 10.).unwrap(), &mut SmallRng::seed_from_u64(42));
    assert_eq!(c.shape(), &[12, 23]);
}

#[test]
fn random_matrix_survives_binary_and_text()
{
    let mut m = Array2::<f64>::zeros((12, 23));
    m.fill_uniform(-10., 10.);
    let back: Array2<f64> = from_binary(&to_binary(&m).unwrap()).unwrap();
    assert_eq!(back.shape(), &[12, 23]);
    assert_eq!(back, m);

    let text = to_text(&m, ' ');
    let back: Array2<f64> = from_text(&text, ' ').unwrap();
    assert_eq!(back, m);
    assert!(from_text::<Array2<f64>>(&text, ',').is_err());
}

#[test]
fn default_sequence_is_not_deterministic()
{
    let mut a = Array1::<f64>::zeros(64);
    let mut b = a.clone();
    a.fill_uniform(0., 1.);
    b.fill_uniform(0., 1.);
    assert_ne!(a, b);
}

#[test]
fn integer_ranges_are_inclusive()
{
    let mut a = Array1::<u8>::zeros(400);
    a.fill_uniform_using(3, 4, &mut SmallRng::seed_from_u64(1));
    assert!(a.iter().any(|&x| x == 3));
    assert!(a.iter().any(|&x| x == 4));
    assert!(a.iter().all(|&x| x == 3 || x == 4));

    let mut single = arr1(&[0i64; 5]);
    single.fill_uniform(-7, -7);
    assert_eq!(single, arr1(&[-7i64; 5]));
}

#[test]
fn nested_and_fixed_leaves()
{
    let mut nested = Array1::from_vec(vec![Array2::<i32>::zeros((2, 3)), Array2::zeros((0, 1)), Array2::zeros((1, 1))]);
    nested.fill_uniform(10, 20);
    assert_eq!(nested[0].shape(), &[2, 3]);
    assert!(nested.iter().flat_map(|m| m.iter()).all(|&x| (10..=20).contains(&x)));

    let mut m = FixedMatrix([[0f32; 4]; 3]);
    m.fill_uniform(-1., 1.);
    assert!(m.0.iter().flatten().all(|x| (-1.0..=1.0).contains(x)));

    let mut v = FixedVector([0u16; 8]);
    v.fill_uniform_using(100, 200, &mut SmallRng::seed_from_u64(5));
    assert!(v.0.iter().all(|x| (100..=200).contains(x)));
}

#[test]
fn random_uniform_constructor()
{
    let a = Array2::<i16>::random_uniform((3, 3), -2, 2);
    assert!(a.iter().all(|&x| (-2..=2).contains(&x)));
}

#[test]
#[should_panic]
fn reversed_bounds_panic()
{
    let mut a = Array1::<f64>::zeros(3);
    a.fill_uniform(1., 0.);
}

quickcheck! {
    fn samples_stay_in_bounds(lo: i32, span: u16, seed: u64) -> bool {
        let hi = lo.saturating_add(span as i32);
        let mut a = Array1::<i32>::zeros(16);
        a.fill_uniform_using(lo, hi, &mut SmallRng::seed_from_u64(seed));
        a.iter().all(|&x| lo <= x && x <= hi)
    }
}
