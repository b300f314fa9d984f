use ndcontainer::prelude::*;
use ndcontainer::serialize::{
    from_binary, from_text, read_binary, read_text, to_binary, to_text, DataFormat, TextReader,
};

use itertools::Itertools;

fn pseudo_random(shape: (usize, usize)) -> Array2<f64>
{
    Array2::from_shape_fn(shape, |(i, j)| ((i * 31 + j * 17 + 5) % 97) as f64 / 4.75 - 10.)
}

#[test]
fn matrix_binary_round_trip_recovers_shape()
{
    let m = pseudo_random((12, 23));
    let bytes = to_binary(&m).unwrap();
    let mut back = Array2::<f64>::zeros((1, 1));
    read_binary(&mut &bytes[..], &mut back).unwrap();
    assert_eq!(back.shape(), &[12, 23]);
    assert_eq!(back, m);

    let f = {
        let mut f = Array2::zeros((12, 23).f());
        f.assign(&m).unwrap();
        f
    };
    assert_eq!(to_binary(&f).unwrap(), bytes);
    assert_eq!(to_binary(&m.t()).unwrap().len(), bytes.len());
    assert_ne!(to_binary(&m.t()).unwrap(), bytes);
}

#[test]
fn text_round_trips_across_element_types()
{
    macro_rules! round_trip {
        ($t:ty, $value:expr) => {{
            let value: Array2<$t> = $value;
            for delim in [' ', ',', ';', '\t', '|'] {
                let text = to_text(&value, delim);
                let back: Array2<$t> = from_text(&text, delim).unwrap();
                assert_eq!(back, value);
            }
        }};
    }
    round_trip!(f64, pseudo_random((3, 4)));
    round_trip!(f32, Array2::from_shape_fn((2, 5), |(i, j)| i as f32 * 0.5 - j as f32));
    round_trip!(i8, Array2::from_shape_fn((4, 2), |(i, j)| (i as i8 - 2) * (j as i8 + 60)));
    round_trip!(u64, Array2::from_elem((1, 3), u64::MAX));
    round_trip!(bool, arr2(&[[true, false], [false, true]]));
    round_trip!(i32, Array2::zeros((0, 7)));
}

#[test]
fn wrong_delimiter_is_an_error_for_every_type()
{
    let written = [',', ';', ' '];
    let requested = [',', ';', ' ', '|', '\t'];
    for (&w, &r) in written.iter().cartesian_product(&requested) {
        if w == r {
            continue;
        }
        let ints = to_text(&arr1(&[-3i64, 4, 5]), w);
        let floats = to_text(&arr2(&[[1.5f32, -2.], [0.25, 8.]]), w);
        let flags = to_text(&arr1(&[true, true]), w);
        assert_eq!(
            from_text::<Array1<i64>>(&ints, r).unwrap_err().kind(),
            ErrorKind::DelimiterMismatch
        );
        assert_eq!(
            from_text::<Array2<f32>>(&floats, r).unwrap_err().kind(),
            ErrorKind::DelimiterMismatch
        );
        assert_eq!(
            from_text::<Array1<bool>>(&flags, r).unwrap_err().kind(),
            ErrorKind::DelimiterMismatch
        );
    }
}

#[test]
fn nested_containers_round_trip()
{
    let nested = Array2::from_shape_fn((4, 5), |(i, j)| {
        Array2::from_shape_fn((i + 1, j + 1), |(p, q)| (100 * i + 10 * j + p * (j + 1) + q) as i32)
    });
    let bytes = to_binary(&nested).unwrap();
    let back: Array2<Array2<i32>> = from_binary(&bytes).unwrap();
    assert_eq!(back, nested);
    assert_eq!(back[[3, 4]].shape(), &[4, 5]);

    let text = to_text(&nested, ' ');
    let back: Array2<Array2<i32>> = from_text(&text, ' ').unwrap();
    assert_eq!(back, nested);
    // one token per scalar
    assert_eq!(text.split(' ').filter(|t| !t.is_empty()).count(), nested.scalar_number());
}

#[test]
fn fixed_inside_dynamic()
{
    let points = Array1::from_shape_fn(3, |i| FixedVector([i as f32, -(i as f32), 0.5]));
    let bytes = to_binary(&points).unwrap();
    assert_eq!(bytes.len(), 7 + std::mem::size_of::<usize>() + 3 * 3 * 4);
    let back: Array1<FixedVector<f32, 3>> = from_binary(&bytes).unwrap();
    assert_eq!(back, points);
    assert_eq!(to_text(&points, ','), "3,0,-0,0.5,1,-1,0.5,2,-2,0.5,");
}

#[test]
fn fixed_arrays_round_trip()
{
    let cube = FixedArray3::<i16, 2, 3, 4>::from_fn(|(p, i, j)| (p * 100 + i * 10 + j) as i16 - 50);
    let bytes = to_binary(&cube).unwrap();
    assert_eq!(bytes.len(), 7 + 24 * 2);
    assert_eq!(from_binary::<FixedArray3<i16, 2, 3, 4>>(&bytes).unwrap(), cube);
    assert_eq!(
        from_binary::<FixedArray3<i16, 2, 3, 4>>(&bytes[..bytes.len() - 2]).unwrap_err().kind(),
        ErrorKind::StreamCorrupt
    );

    let m = FixedMatrix([[0.5f64, -1.], [2., 4.], [8., 16.]]);
    let back: FixedMatrix<f64, 3, 2> = from_binary(&to_binary(&m).unwrap()).unwrap();
    assert_eq!(back, m);
}

#[test]
fn one_header_for_several_values()
{
    let a = arr1(&[1u32, 2, 3]);
    let b = FixedMatrix([[1.5f64, 2.5]]);
    let mut stream = Vec::new();
    DataFormat::write_header(&mut stream).unwrap();
    a.serialize_binary(&mut stream).unwrap();
    b.serialize_binary(&mut stream).unwrap();

    let mut r = &stream[..];
    let format = DataFormat::read_header(&mut r).unwrap();
    let mut a2 = Array1::<u32>::zeros(0);
    let mut b2 = FixedMatrix::<f64, 1, 2>::default();
    a2.deserialize_binary(&mut r, &format).unwrap();
    b2.deserialize_binary(&mut r, &format).unwrap();
    assert!(r.is_empty());
    assert_eq!((a2, b2), (a, b));
}

#[test]
fn reading_into_views_keeps_the_parent()
{
    let src = arr2(&[[9i16, 8], [7, 6]]);
    let text = to_text(&src, ',');
    let mut parent = Array2::<i16>::zeros((4, 4).f());
    {
        let mut view = parent.window_mut(&[2, 1], &[2, 2]).unwrap();
        read_text(&text, ',', &mut view).unwrap();
    }
    assert_eq!(parent.window(&[2, 1], &[2, 2]).unwrap(), src);
    assert_eq!(parent.sum(), 30);

    let mut wrong = parent.window_mut(&[0, 0], &[2, 3]).unwrap();
    assert_eq!(read_text(&text, ',', &mut wrong).unwrap_err().kind(), ErrorKind::SizeMismatch);
}

#[test]
fn corrupt_streams()
{
    let m = arr2(&[[1.0f64, 2.0], [3.0, 4.0]]);
    let bytes = to_binary(&m).unwrap();
    for cut in [0, 3, 7, 8, bytes.len() - 8, bytes.len() - 1] {
        let err = from_binary::<Array2<f64>>(&bytes[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StreamCorrupt, "cut at {}", cut);
    }
    let mut magic = bytes.clone();
    magic[0] = b'X';
    assert_eq!(from_binary::<Array2<f64>>(&magic).unwrap_err().kind(), ErrorKind::StreamCorrupt);

    // a shape far bigger than the stream fails without allocating it
    let mut huge = Vec::new();
    DataFormat::write_header(&mut huge).unwrap();
    huge.extend_from_slice(&(usize::MAX / 16).to_ne_bytes());
    huge.extend_from_slice(&1.0f64.to_ne_bytes());
    assert_eq!(from_binary::<Array1<f64>>(&huge).unwrap_err().kind(), ErrorKind::StreamCorrupt);

    assert_eq!(from_text::<Array1<i32>>("3,1,2,", ',').unwrap_err().kind(), ErrorKind::StreamCorrupt);
    assert_eq!(from_text::<Array1<i32>>("1,2,3,", ',').unwrap_err().kind(), ErrorKind::StreamCorrupt);
}

#[test]
fn text_reader_tokens()
{
    let mut r = TextReader::new("12;abc;;", ';');
    assert_eq!(r.delimiter(), ';');
    assert_eq!(r.parse::<u8>().unwrap(), 12);
    assert_eq!(r.next_token().unwrap(), "abc");
    assert_eq!(r.next_token().unwrap(), "");
    assert!(r.is_empty());
    assert_eq!(r.next_token().unwrap_err().kind(), ErrorKind::StreamCorrupt);
}
