//! Image canonicalization for policy inputs.
use ndarray::{ArrayD, IxDyn};

/// An image array as a source hands it over, before canonicalization.
#[derive(Clone, Debug)]
pub enum ImageTensor {
    /// 8-bit image.
    U8(ArrayD<u8>),

    /// Floating-point image, expected to be normalized to `[0, 1]`.
    F32(ArrayD<f32>),
}

/// Canonicalizes an image to channel-last `u8`.
///
/// Floating input is scaled by 255 and rounded, with the cast saturating
/// outside `[0, 255]`. An array whose leading dimension is exactly 3 is
/// taken to be channel-first and transposed to height, width, channel. The
/// layout check is a heuristic on the leading dimension: a channel-last
/// image 3 pixels tall is indistinguishable from a channel-first one here,
/// since sources carry no layout tag.
pub fn canonicalize(image: ImageTensor) -> ArrayD<u8> {
    let image = match image {
        ImageTensor::U8(image) => image,
        ImageTensor::F32(image) => image.mapv(|v| (255. * v).round() as u8),
    };

    if image.shape().first() == Some(&3) {
        image
            .permuted_axes(IxDyn(&[1, 2, 0]))
            .as_standard_layout()
            .to_owned()
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_images_scale_to_u8() {
        let image = ArrayD::from_shape_vec(
            IxDyn(&[1, 2, 3]),
            vec![0., 0.2, 0.4, 0.6, 0.8, 1.],
        )
        .unwrap();

        let out = canonicalize(ImageTensor::F32(image));
        assert_eq!(
            out.iter().cloned().collect::<Vec<u8>>(),
            vec![0, 51, 102, 153, 204, 255]
        );
    }

    #[test]
    fn out_of_range_floats_saturate() {
        let image =
            ArrayD::from_shape_vec(IxDyn(&[1, 1, 2]), vec![-0.5, 1.5]).unwrap();
        let out = canonicalize(ImageTensor::F32(image));
        assert_eq!(out.iter().cloned().collect::<Vec<u8>>(), vec![0, 255]);
    }

    #[test]
    fn channel_first_images_are_transposed() {
        let chw = ArrayD::from_shape_fn(IxDyn(&[3, 4, 5]), |ix| {
            (100 * ix[0] + 10 * ix[1] + ix[2]) as u8
        });

        let hwc = canonicalize(ImageTensor::U8(chw.clone()));
        assert_eq!(hwc.shape(), &[4, 5, 3]);
        for c in 0..3 {
            for h in 0..4 {
                for w in 0..5 {
                    assert_eq!(hwc[[h, w, c]], chw[[c, h, w]]);
                }
            }
        }
    }

    #[test]
    fn channel_last_images_pass_through() {
        let hwc = ArrayD::from_elem(IxDyn(&[4, 5, 3]), 9u8);
        assert_eq!(canonicalize(ImageTensor::U8(hwc.clone())), hwc);
    }

    #[test]
    fn float_channel_first_images_are_scaled_then_transposed() {
        let chw = ArrayD::from_elem(IxDyn(&[3, 2, 2]), 1.0f32);
        let out = canonicalize(ImageTensor::F32(chw));
        assert_eq!(out.shape(), &[2, 2, 3]);
        assert!(out.iter().all(|&v| v == 255));
    }
}
