use ndcontainer::image::ImageBuffer;
use ndcontainer::prelude::*;

use defmac::defmac;

defmac!(kind r => r.unwrap_err().kind());

#[test]
fn compact_pairs_copy()
{
    let a = Array3::from_shape_fn((2, 3, 4), |(p, i, j)| (p * 100 + i * 10 + j) as i32);
    let mut b = Array3::zeros((2, 3, 4));
    assert!(b.fast_copy_compatible(&a));
    b.fast_copy_of(&a, CopyCheck::PerformChecks).unwrap();
    assert_eq!(a, b);

    let fa = Array2::from_shape_fn((5, 2).f(), |(i, j)| (i + j) as f64);
    let mut fb = Array2::zeros((5, 2).f());
    fb.fast_copy_of(&fa, CopyCheck::PerformChecks).unwrap();
    assert_eq!(fa, fb);
}

#[test]
fn vectors_ignore_storage_order()
{
    let m = Array2::from_shape_fn((3, 3).f(), |(i, j)| (i * 3 + j) as u8);
    let mut v = Array1::zeros(3);
    v.fast_copy_of(&m.column(2), CopyCheck::PerformChecks).unwrap();
    assert_eq!(v, arr1(&[2, 5, 8]));

    // a row of a column major matrix is strided
    assert_eq!(kind!(v.fast_copy_of(&m.row(1), CopyCheck::PerformChecks)), ErrorKind::IncompatibleLayout);
    v.assign(&m.row(1)).unwrap();
    assert_eq!(v, arr1(&[3, 4, 5]));
}

#[test]
fn layout_and_size_errors()
{
    let a = Array2::<f32>::ones((4, 6));
    let mut other_order = Array2::zeros((4, 6).f());
    assert_eq!(kind!(other_order.fast_copy_of(&a, CopyCheck::PerformChecks)), ErrorKind::IncompatibleLayout);

    let mut smaller = Array2::zeros((4, 5));
    assert_eq!(kind!(smaller.fast_copy_of(&a, CopyCheck::PerformChecks)), ErrorKind::SizeMismatch);

    // a window with strides in both directions has no unit stride lane
    let big = Array3::<f32>::zeros((3, 4, 6));
    let strided = big.subview(Axis(2), 0).unwrap();
    let mut dst = Array2::zeros((3, 4));
    assert!(!dst.fast_copy_compatible(&strided));
    assert_eq!(kind!(dst.fast_copy_of(&strided, CopyCheck::PerformChecks)), ErrorKind::IncompatibleLayout);
    dst.assign(&strided).unwrap();

    // same element count, different shape
    let tall = Array2::from_shape_fn((3, 2), |(i, j)| (i * 2 + j) as i32);
    let mut wide = Array2::zeros((2, 3));
    assert!(!wide.fast_copy_compatible(&tall));
    assert_eq!(kind!(wide.fast_copy_of(&tall, CopyCheck::PerformChecks)), ErrorKind::IncompatibleLayout);
    assert_eq!(wide, Array2::zeros((2, 3)));
    let mut flat = Array3::zeros((1, 2, 3));
    let cube = Array3::from_shape_fn((3, 2, 1), |(i, j, _)| (i + j) as i32);
    assert_eq!(kind!(flat.fast_copy_of(&cube, CopyCheck::PerformChecks)), ErrorKind::IncompatibleLayout);
}

#[test]
fn skip_checks_copies_memory_order()
{
    let a = Array2::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    let mut flat = Array1::zeros(6);
    let mut flat_view = flat.view_mut();
    let mut reshaped = Array2::zeros((3, 2));
    reshaped.fast_copy_of(&a, CopyCheck::SkipChecks).unwrap();
    assert_eq!(reshaped, arr2(&[[1, 2], [3, 4], [5, 6]]));
    flat_view
        .fast_copy_of(&Array1::from_vec(a.as_slice().unwrap().to_vec()), CopyCheck::PerformChecks)
        .unwrap();
    assert_eq!(flat.to_vec(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn fixed_containers_through_views()
{
    let src = FixedMatrix([[1i64, 2, 3], [4, 5, 6]]);
    let mut dst = FixedMatrix::<i64, 2, 3>::default();
    dst.view_mut().fast_copy_of(&src.view(), CopyCheck::PerformChecks).unwrap();
    assert_eq!(dst, src);

    let mut dynamic = Array2::zeros((2, 3));
    dynamic.fast_copy_of(&src.view(), CopyCheck::PerformChecks).unwrap();
    assert_eq!(dynamic, src.to_array());

    let mut transposed = FixedMatrix::<i64, 3, 2>::default();
    assert_eq!(
        kind!(transposed.view_mut().fast_copy_of(&src.view().t(), CopyCheck::PerformChecks)),
        ErrorKind::IncompatibleLayout
    );
    transposed.assign_from(&src.view().t()).unwrap();
    assert_eq!(transposed, src.transpose());
}

#[test]
fn image_pixels_round_trip()
{
    let (width, height, channels) = (5, 3, 3);
    let pixels: Vec<u8> = (0..width * height * channels).map(|x| (x * 7 % 251) as u8).collect();
    let image = ImageBuffer::from_pixels(width, height, channels, &pixels).unwrap();
    assert_eq!((image.height(), image.width(), image.channels()), (3, 5, 3));
    assert_eq!(image[[1, 2, 0]], pixels[(5 + 2) * 3]);

    let mut out = vec![0u8; pixels.len()];
    image.copy_to_pixels(&mut out).unwrap();
    assert_eq!(out, pixels);

    // a view with the rows reversed copies element by element
    let mut flipped = image.view();
    flipped.invert_axis(Axis(0));
    flipped.copy_to_pixels(&mut out).unwrap();
    assert_eq!(&out[..15], &pixels[30..]);

    let mut target = Array3::<u8>::zeros((3, 5, 3).f());
    target.copy_from_pixels(&pixels).unwrap();
    assert_eq!(target, image);
    assert!(target.copy_from_pixels(&pixels[1..]).is_err());
}
