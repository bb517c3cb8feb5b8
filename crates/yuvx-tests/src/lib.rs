//! Integration tests for yuvx crates.
//!
//! This crate contains end-to-end tests that check how conversion
//! (`yuvx-color`) and geometry (`yuvx-ops`) compose across every registered
//! pixel format.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use yuvx_color::{
        convert, from_canonical, sensor_to_canonical, to_canonical, to_canonical_region, ChromaUpsampling, Converter,
        SensorFrame, YuvRange,
    };
    use yuvx_core::{Channel, Family, FrameBuffer, PixelFormat, Rect, Rotation};
    use yuvx_ops::{crop, flip_v, mirror, rotate, scale, FilterMode};

    /// Deterministic pseudo-random bytes covering a whole frame.
    fn noise(format: PixelFormat, width: u32, height: u32) -> FrameBuffer {
        let size = format.desc().frame_size(width, height);
        let mut state = 0x2545_f491_u32;
        let bytes: Vec<u8> = (0..size)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();
        FrameBuffer::from_bytes(format, width, height, &bytes).unwrap()
    }

    /// Packed RGB frame from a per-pixel color function; alpha is opaque.
    fn rgb_frame(format: PixelFormat, width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 3]) -> FrameBuffer {
        let desc = format.desc();
        let bpp = desc.planes[0].bytes_per_element as usize;
        let mut bytes = vec![0u8; desc.frame_size(width, height)];
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = color(x, y);
                let px = (y * width + x) as usize * bpp;
                for c in desc.components {
                    bytes[px + c.offset as usize] = match c.channel {
                        Channel::R => r,
                        Channel::G => g,
                        Channel::B => b,
                        _ => 255,
                    };
                }
            }
        }
        FrameBuffer::from_bytes(format, width, height, &bytes).unwrap()
    }

    fn rgb_formats() -> impl Iterator<Item = PixelFormat> {
        PixelFormat::ALL.into_iter().filter(|f| f.desc().family == Family::Rgb)
    }

    fn channels(format: PixelFormat) -> Vec<Channel> {
        format.desc().components.iter().map(|c| c.channel).collect()
    }

    /// Mean absolute RGB difference between two frames of the same format.
    fn mean_rgb_error(a: &FrameBuffer, b: &FrameBuffer) -> f64 {
        let mut total = 0u64;
        let mut count = 0u64;
        for y in 0..a.height() {
            for x in 0..a.width() {
                for ch in [Channel::R, Channel::G, Channel::B] {
                    let (va, vb) = (a.sample(ch, x, y).unwrap(), b.sample(ch, x, y).unwrap());
                    total += va.abs_diff(vb) as u64;
                    count += 1;
                }
            }
        }
        total as f64 / count as f64
    }

    // ------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------

    #[test]
    fn test_rgb_roundtrip_within_tolerance() {
        // Chroma is uniform per 2x2 block, which 4:2:0 represents exactly
        let block_color = |x: u32, y: u32| {
            let (bx, by) = (x / 2, y / 2);
            [
                (bx * 53 + by * 97) as u8,
                (bx * 191 + by * 31 + 7) as u8,
                (bx * 17 + by * 211 + 101) as u8,
            ]
        };
        for range in [YuvRange::Limited, YuvRange::Full] {
            let converter = Converter::new().with_range(range);
            for format in rgb_formats() {
                let src = rgb_frame(format, 8, 6, block_color);
                let canonical = converter.to_canonical(&src, Rotation::Rotate0).unwrap();
                let back = converter.from_canonical(&canonical, format).unwrap();
                for (i, (a, b)) in back.to_bytes().iter().zip(src.to_bytes()).enumerate() {
                    assert!(a.abs_diff(b) <= 2, "{range:?} {format} byte {i}: {a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_gray_roundtrip_exact() {
        let src = rgb_frame(PixelFormat::Abgr, 16, 16, |x, y| {
            let g = (x * 13 + y * 3) as u8;
            [g, g, g]
        });
        let full = Converter::new().with_range(YuvRange::Full);
        let back = full.from_canonical(&full.to_canonical(&src, Rotation::Rotate0).unwrap(), PixelFormat::Abgr).unwrap();
        assert_abs_diff_eq!(mean_rgb_error(&src, &back), 0.0);
    }

    #[test]
    fn test_bilinear_upsampling_reduces_gradient_error() {
        let src = rgb_frame(PixelFormat::Abgr, 16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 128]);
        let canonical = to_canonical(&src, Rotation::Rotate0).unwrap();

        let nearest = from_canonical(&canonical, PixelFormat::Abgr).unwrap();
        let bilinear = Converter::new()
            .with_upsampling(ChromaUpsampling::Bilinear)
            .from_canonical(&canonical, PixelFormat::Abgr)
            .unwrap();

        let (e_nearest, e_bilinear) = (mean_rgb_error(&src, &nearest), mean_rgb_error(&src, &bilinear));
        assert!(e_bilinear < e_nearest, "{e_bilinear} >= {e_nearest}");
        assert!(e_bilinear < 2.0);
        assert!(e_nearest < 6.0);
    }

    #[test]
    fn test_semi_planar_roundtrip_exact() {
        for format in [PixelFormat::Nv21, PixelFormat::Nv12, PixelFormat::Yv12] {
            let src = noise(format, 7, 5);
            let i420 = convert(&src, PixelFormat::I420).unwrap();
            assert_eq!(convert(&i420, format).unwrap(), src, "{format}");
        }
    }

    #[test]
    fn test_convert_every_pair() {
        let src = noise(PixelFormat::I420, 6, 4);
        for from in PixelFormat::ALL {
            let a = convert(&src, from).unwrap();
            for to in PixelFormat::ALL {
                let b = convert(&a, to).unwrap();
                assert_eq!(b.format(), to);
                assert_eq!(b.dimensions(), (6, 4));
                // Luma survives any YUV -> YUV hop
                if from.desc().family == Family::Yuv && to.desc().family == Family::Yuv {
                    for y in 0..4 {
                        for x in 0..6 {
                            assert_eq!(b.sample(Channel::Y, x, y), src.sample(Channel::Y, x, y), "{from} -> {to}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fused_rotation_matches_rotate() {
        for rotation in Rotation::ALL {
            for (format, w, h) in [
                (PixelFormat::I420, 5, 3),
                (PixelFormat::Nv21, 6, 4),
                (PixelFormat::Yv12, 7, 7),
                (PixelFormat::Argb, 6, 4),
                (PixelFormat::Rgb24, 8, 2),
            ] {
                let src = noise(format, w, h);
                let fused = to_canonical(&src, rotation).unwrap();
                let separate = rotate(&to_canonical(&src, Rotation::Rotate0).unwrap(), rotation).unwrap();
                assert_eq!(fused, separate, "{format} {rotation}");
            }
        }
    }

    #[test]
    fn test_sensor_matches_nv21() {
        let (w, h) = (6u32, 4u32);
        let nv21 = noise(PixelFormat::Nv21, w, h);
        let bytes = nv21.to_bytes();
        let luma = (w * h) as usize;
        let chroma_stride = 2 * (w as usize).div_ceil(2);
        let frame = SensorFrame {
            width: w,
            height: h,
            y: &bytes[..luma],
            y_stride: w as usize,
            u: &bytes[luma + 1..],
            u_stride: chroma_stride,
            v: &bytes[luma..],
            v_stride: chroma_stride,
            uv_pixel_stride: 2,
        };
        for rotation in Rotation::ALL {
            assert_eq!(
                sensor_to_canonical(&frame, rotation).unwrap(),
                to_canonical(&nv21, rotation).unwrap(),
                "{rotation}"
            );
        }
    }

    #[test]
    fn test_region_matches_crop_then_convert() {
        let src = noise(PixelFormat::Nv21, 12, 8);
        let rect = Rect::new(3, 1, 6, 5);
        for rotation in Rotation::ALL {
            let (fused, applied) = to_canonical_region(&src, rect, rotation).unwrap();
            let (cropped, applied_crop) = crop(&src, rect).unwrap();
            assert_eq!(applied, applied_crop);
            assert_eq!(fused, to_canonical(&cropped, rotation).unwrap(), "{rotation}");
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    #[test]
    fn test_four_quarter_turns_identity() {
        for format in PixelFormat::ALL {
            let desc = format.desc();
            if !desc.is_element_addressable() || !desc.is_square_subsampled() {
                continue;
            }
            let src = noise(format, 5, 3);
            let mut out = src.clone();
            for _ in 0..4 {
                out = rotate(&out, Rotation::Rotate90).unwrap();
            }
            assert_eq!(out, src, "{format}");
        }
    }

    #[test]
    fn test_rotation_dimensions() {
        for format in PixelFormat::ALL {
            let src = noise(format, 6, 4);
            for rotation in Rotation::ALL {
                let out = rotate(&src, rotation).unwrap();
                let expected = if rotation.swaps_dimensions() { (4, 6) } else { (6, 4) };
                assert_eq!(out.dimensions(), expected, "{format} {rotation}");
                assert_eq!(out.format(), format);
            }
        }
    }

    #[test]
    fn test_mirror_and_flip_involutions() {
        for format in PixelFormat::ALL {
            for width in [5, 6] {
                let src = noise(format, width, 4);
                assert_eq!(flip_v(&flip_v(&src).unwrap()).unwrap(), src, "{format} {width}");
                // Packed 4:2:2 mirrors exactly at even widths
                if format.desc().is_element_addressable() || width % 2 == 0 {
                    assert_eq!(mirror(&mirror(&src).unwrap()).unwrap(), src, "{format} {width}");
                    let half = rotate(&rotate(&src, Rotation::Rotate180).unwrap(), Rotation::Rotate180).unwrap();
                    assert_eq!(half, src, "{format} {width}");
                }
            }
        }
    }

    #[test]
    fn test_crop_containment() {
        for format in PixelFormat::ALL {
            let src = noise(format, 8, 6);
            let (out, applied) = crop(&src, Rect::new(3, 1, 4, 3)).unwrap();
            assert!(Rect::from_size(8, 6).contains_rect(&applied));
            assert_eq!(out.dimensions(), (applied.width, applied.height));
            for ch in channels(format) {
                for y in 0..applied.height {
                    for x in 0..applied.width {
                        assert_eq!(
                            out.sample(ch, x, y),
                            src.sample(ch, applied.x + x, applied.y + y),
                            "{format} {ch:?} ({x}, {y})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_scale_same_size_identity() {
        for format in PixelFormat::ALL {
            let src = noise(format, 6, 5);
            for filter in [FilterMode::None, FilterMode::Linear, FilterMode::Bilinear, FilterMode::Box] {
                assert_eq!(scale(&src, 6, 5, filter).unwrap(), src, "{format} {filter:?}");
            }
        }
    }

    #[test]
    fn test_scale_every_format() {
        for format in PixelFormat::ALL {
            let src = noise(format, 9, 7);
            for (w, h) in [(4, 3), (18, 14), (2, 2), (9, 1)] {
                let out = scale(&src, w, h, FilterMode::Bilinear).unwrap();
                assert_eq!(out.dimensions(), (w, h));
                out.validate().unwrap();
            }
        }
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    #[test]
    fn test_checkerboard_through_abgr_rotated() {
        let (w, h) = (4u32, 4u32);
        let mut bytes: Vec<u8> = (0..h)
            .flat_map(|y| (0..w).map(move |x| if (x + y) % 2 == 0 { 40 } else { 200 }))
            .collect();
        bytes.extend([128u8; 8]);
        let src = FrameBuffer::from_bytes(PixelFormat::I420, w, h, &bytes).unwrap();

        let abgr = convert(&src, PixelFormat::Abgr).unwrap();
        let turned = rotate(&abgr, Rotation::Rotate90).unwrap();
        let out = convert(&turned, PixelFormat::I420).unwrap();

        let expected = rotate(&src, Rotation::Rotate90).unwrap();
        assert_eq!(out.plane(0), expected.plane(0));
        for y in 0..h {
            for x in 0..w {
                for ch in [Channel::U, Channel::V] {
                    let v = out.sample(ch, x, y).unwrap();
                    assert!(v.abs_diff(128) <= 2, "{ch:?} ({x}, {y}) = {v}");
                }
            }
        }
    }

    #[test]
    fn test_crop_snaps_to_chroma_grid() {
        let src = FrameBuffer::alloc(PixelFormat::I420, 100, 100).unwrap();
        let (out, applied) = crop(&src, Rect::new(1, 1, 10, 10)).unwrap();
        assert_eq!(applied, Rect::new(0, 0, 10, 10));
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn test_camera_preview_pipeline() {
        // Landscape sensor frame to a portrait, square, scaled RGBA preview
        let sensor = noise(PixelFormat::Nv21, 64, 48);
        let (upright, _) = to_canonical_region(&sensor, Rect::new(8, 0, 48, 48), Rotation::Rotate90).unwrap();
        let small = scale(&upright, 16, 16, FilterMode::None).unwrap();
        let preview = convert(&small, PixelFormat::Abgr).unwrap();
        assert_eq!(preview.dimensions(), (16, 16));
        assert_eq!(preview.plane(0).stride(), 64);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(preview.sample(Channel::A, x, y), Some(255));
            }
        }
    }

    #[test]
    fn test_frames_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrameBuffer>();
        assert_send_sync::<Converter>();
        assert_send_sync::<SensorFrame<'static>>();
    }
}
