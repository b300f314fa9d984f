use ndcontainer::prelude::*;
use ndcontainer::serialize::{from_binary, from_text, to_binary, to_text};

use quickcheck::{quickcheck, TestResult};

fn matrix_from(rows: u8, data: &[i16]) -> Array2<i64>
{
    let rows = rows as usize % 6 + 1;
    let cols = data.len() / rows;
    let values = data[..rows * cols].iter().map(|&x| i64::from(x)).collect();
    Array2::from_shape_vec((rows, cols), values).unwrap()
}

quickcheck! {
    fn storage_order_does_not_change_values(rows: u8, data: Vec<i16>) -> bool {
        let c = matrix_from(rows, &data);
        let mut f = Array2::zeros(c.dim().f());
        f.assign(&c).unwrap();
        f == c && f.sum() == c.sum() && f.is_compact()
            && f.min_and_max() == c.min_and_max()
    }

    fn double_transpose_is_identity(rows: u8, data: Vec<i16>) -> bool {
        let c = matrix_from(rows, &data);
        let tt = c.t().t().to_owned();
        tt == c && c.t().ncols() == c.nrows()
    }

    fn add_then_subtract(rows: u8, data: Vec<i16>, k: i16) -> bool {
        let a = matrix_from(rows, &data);
        let b = a.mapv(|x| x * 3 - i64::from(k));
        let mut sum = Array2::zeros(a.raw_dim());
        sum.sum_of(&a, &b).unwrap();
        let mut back = Array2::zeros(a.raw_dim());
        back.difference_of(&sum, &b).unwrap();
        back == a && (&sum - &a) == b
    }

    fn text_round_trip(data: Vec<i32>, delim_choice: u8) -> bool {
        let delim = [' ', ',', ';', '\t'][delim_choice as usize % 4];
        let v = Array1::from_vec(data);
        from_text::<Array1<i32>>(&to_text(&v, delim), delim).ok() == Some(v)
    }

    fn binary_round_trip_is_bitwise(data: Vec<f64>) -> bool {
        let v = Array1::from_vec(data);
        let back: Array1<f64> = from_binary(&to_binary(&v).unwrap()).unwrap();
        back.len() == v.len() && back.iter().zip(v.iter()).all(|(x, y)| x.to_bits() == y.to_bits())
    }

    fn window_stays_inside(rows: u8, data: Vec<i16>, off: (u8, u8), len: (u8, u8)) -> TestResult {
        let a = matrix_from(rows, &data);
        if a.is_empty() {
            return TestResult::discard();
        }
        let offsets = [off.0 as usize % 8, off.1 as usize % 8];
        let lengths = [len.0 as usize % 8, len.1 as usize % 8];
        let fits = (0..2).all(|k| offsets[k] + lengths[k] <= a.shape()[k]);
        match a.window(&offsets, &lengths) {
            Ok(w) => {
                let same = w.indexed_iter().all(|((i, j), x)| *x == a[[i + offsets[0], j + offsets[1]]]);
                TestResult::from_bool(fits && same && w.shape() == lengths)
            }
            Err(e) => TestResult::from_bool(!fits && e.kind() == ErrorKind::IndexOutOfRange),
        }
    }

    fn scalar_count_matches_text_tokens(lens: Vec<u8>) -> bool {
        let nested = Array1::from_vec(
            lens.iter().map(|&n| Array1::from_elem(n as usize % 5, 1u8)).collect::<Vec<_>>(),
        );
        let text = to_text(&nested, ',');
        text.matches(',').count() == nested.scalar_number()
    }
}
